//! Water-body filtering: flood fill per plane, suppressing bodies below a
//! size threshold.
//!
//! A water body is a maximal 4-connected set of tiles with a water tile type
//! within one plane. The scan visits tiles in (x, y) order, BFS-fills each
//! unvisited body, marks small bodies for removal, then copies the surviving
//! water to the output in a second pass. Visited and filter sets are roaring
//! bitmaps over a plane-local `(y - min_y) * x_range + (x - min_x)` index.
//!
//! Planes are processed sequentially; each is independent, but the tracking
//! bitmaps are large. Cancellation is checked at plane boundaries.

use std::collections::VecDeque;

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

use tessera_core::{CoordBounds, CARDINAL_DIRECTIONS};
use tessera_store::{CollisionMapWriter, TileTypeMap, TileTypeMapWriter};

use crate::cancel::CancellationToken;
use crate::error::ProcessError;

/// Bodies smaller than this many tiles are filtered out by default.
pub const DEFAULT_MIN_BODY_SIZE: usize = 5000;

/// Counters from one filtering run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterBodyStats {
    pub total_water_tiles: u64,
    pub filtered_tiles: u64,
    pub bodies_preserved: u32,
    pub bodies_filtered: u32,
}

/// Filters the tile-type map's full coordinate range.
pub fn filter_water_bodies(
    source: &TileTypeMap,
    min_body_size: usize,
    output: &TileTypeMapWriter,
    cancel: &CancellationToken,
) -> Result<WaterBodyStats, ProcessError> {
    filter_water_bodies_in(source, source.bounds(), min_body_size, output, cancel)
}

/// Filters an explicit region.
pub fn filter_water_bodies_in(
    source: &TileTypeMap,
    region: CoordBounds,
    min_body_size: usize,
    output: &TileTypeMapWriter,
    cancel: &CancellationToken,
) -> Result<WaterBodyStats, ProcessError> {
    log::info!("filtering water bodies smaller than {min_body_size} tiles");
    let mut stats = WaterBodyStats::default();

    for plane in region.min_plane..=region.max_plane {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }
        process_plane(source, region, plane, min_body_size, output, &mut stats)?;
        log::debug!("water filter: plane {plane} done");
    }

    log::info!(
        "water filter complete: {} water tiles, {} filtered, {} bodies preserved, {} filtered",
        stats.total_water_tiles,
        stats.filtered_tiles,
        stats.bodies_preserved,
        stats.bodies_filtered
    );
    Ok(stats)
}

/// Plane-local bitmap index for the tracking sets.
#[inline]
fn packed(region: &CoordBounds, x: i32, y: i32) -> u32 {
    let x_range = (region.max_x - region.min_x + 1) as u32;
    (y - region.min_y) as u32 * x_range + (x - region.min_x) as u32
}

fn process_plane(
    source: &TileTypeMap,
    region: CoordBounds,
    plane: i32,
    min_body_size: usize,
    output: &TileTypeMapWriter,
    stats: &mut WaterBodyStats,
) -> Result<(), ProcessError> {
    let mut visited = RoaringBitmap::new();
    let mut filtered = RoaringBitmap::new();

    for x in region.min_x..=region.max_x {
        for y in region.min_y..=region.max_y {
            if !source.is_water(x, y, plane) || visited.contains(packed(&region, x, y)) {
                continue;
            }

            let body = flood_fill(source, &region, plane, x, y, &mut visited);
            stats.total_water_tiles += body.len() as u64;

            if body.len() < min_body_size {
                stats.bodies_filtered += 1;
                stats.filtered_tiles += body.len() as u64;
                for &(bx, by) in &body {
                    filtered.insert(packed(&region, bx, by));
                }
            } else {
                stats.bodies_preserved += 1;
            }
        }
    }

    // Second pass: copy the surviving water. Filtered and non-water tiles
    // stay at the writer's default of 0.
    for x in region.min_x..=region.max_x {
        for y in region.min_y..=region.max_y {
            let tile_type = source.tile_type(x, y, plane);
            if tile_type.is_water() && !filtered.contains(packed(&region, x, y)) {
                output.set_tile_type(x, y, plane, tile_type)?;
            }
        }
    }
    Ok(())
}

/// BFS over the 4-neighborhood collecting one connected water body.
fn flood_fill(
    source: &TileTypeMap,
    region: &CoordBounds,
    plane: i32,
    start_x: i32,
    start_y: i32,
    visited: &mut RoaringBitmap,
) -> Vec<(i32, i32)> {
    let mut body = vec![(start_x, start_y)];
    let mut queue = VecDeque::from([(start_x, start_y)]);
    visited.insert(packed(region, start_x, start_y));

    while let Some((x, y)) = queue.pop_front() {
        for direction in CARDINAL_DIRECTIONS {
            let offset = direction.offset();
            let nx = x + offset.x;
            let ny = y + offset.y;
            if nx < region.min_x || nx > region.max_x || ny < region.min_y || ny > region.max_y {
                continue;
            }
            let index = packed(region, nx, ny);
            if visited.contains(index) {
                continue;
            }
            if source.is_water(nx, ny, plane) {
                visited.insert(index);
                queue.push_back((nx, ny));
                body.push((nx, ny));
            }
        }
    }
    body
}

/// Writes the water mask: every water tile in the region becomes a blocked
/// tile in the output collision writer. Returns the number of masked tiles.
pub fn build_water_mask(
    tile_types: &TileTypeMap,
    region: CoordBounds,
    output: &CollisionMapWriter,
    cancel: &CancellationToken,
) -> Result<u64, ProcessError> {
    let mut masked = 0u64;
    for plane in region.min_plane..=region.max_plane {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }
        for x in region.min_x..=region.max_x {
            for y in region.min_y..=region.max_y {
                if tile_types.is_water(x, y, plane) {
                    output.set_pathable_north(x, y, plane, false)?;
                    output.set_pathable_east(x, y, plane, false)?;
                    masked += 1;
                }
            }
        }
    }
    log::info!("water mask covers {masked} tiles");
    Ok(masked)
}
