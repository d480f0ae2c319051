//! Builds a boat navigation map: a derived collision map in which
//! `pathable_north(x, y)` means a boat fits centered at `(x, y + 1)` and
//! `pathable_east(x, y)` means it fits at `(x + 1, y)`.
//!
//! The scan is partitioned by X column; workers write disjoint X strips
//! through the shared, internally synchronized output writer. Cancellation
//! is checked at strip boundaries.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use tessera_core::CoordBounds;
use tessera_store::{CollisionMap, CollisionMapWriter, TileTypeMap};

use crate::boat_fit::BoatFitChecker;
use crate::cancel::CancellationToken;
use crate::error::ProcessError;

/// Counters from one boat-navigation build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoatNavStats {
    pub boat_size: i32,
    pub tiles_processed: u64,
    pub fit_north: u64,
    pub fit_east: u64,
}

/// Runs the build over the tile-type map's full coordinate range.
pub fn build_boat_nav_map(
    collision: &CollisionMap,
    tile_types: &TileTypeMap,
    boat_size: i32,
    output: &CollisionMapWriter,
    cancel: &CancellationToken,
) -> Result<BoatNavStats, ProcessError> {
    build_boat_nav_map_in(collision, tile_types, boat_size, tile_types.bounds(), output, cancel)
}

/// Runs the build over an explicit region.
pub fn build_boat_nav_map_in(
    collision: &CollisionMap,
    tile_types: &TileTypeMap,
    boat_size: i32,
    region: CoordBounds,
    output: &CollisionMapWriter,
    cancel: &CancellationToken,
) -> Result<BoatNavStats, ProcessError> {
    let checker = BoatFitChecker::new(collision, tile_types, boat_size)?;
    let total_strips = (region.max_x - region.min_x + 1) as u32;
    log::info!("building boat navigation map for {boat_size}x{boat_size} boats ({total_strips} strips)");

    let tiles_processed = AtomicU64::new(0);
    let fit_north = AtomicU64::new(0);
    let fit_east = AtomicU64::new(0);
    let completed_strips = AtomicU32::new(0);

    (region.min_x..=region.max_x)
        .into_par_iter()
        .try_for_each(|x| -> Result<(), ProcessError> {
            if cancel.is_cancelled() {
                return Err(ProcessError::Cancelled);
            }

            let mut strip_tiles = 0u64;
            let mut strip_north = 0u64;
            let mut strip_east = 0u64;
            for y in region.min_y..=region.max_y {
                for plane in region.min_plane..=region.max_plane {
                    let can_fit_north = checker.can_fit_at(x, y + 1, plane);
                    output.set_pathable_north(x, y, plane, can_fit_north)?;
                    strip_north += u64::from(can_fit_north);

                    let can_fit_east = checker.can_fit_at(x + 1, y, plane);
                    output.set_pathable_east(x, y, plane, can_fit_east)?;
                    strip_east += u64::from(can_fit_east);

                    strip_tiles += 1;
                }
            }
            tiles_processed.fetch_add(strip_tiles, Ordering::Relaxed);
            fit_north.fetch_add(strip_north, Ordering::Relaxed);
            fit_east.fetch_add(strip_east, Ordering::Relaxed);

            let done = completed_strips.fetch_add(1, Ordering::Relaxed) + 1;
            if done % 256 == 0 {
                log::debug!("boat navigation: {done}/{total_strips} strips");
            }
            Ok(())
        })?;

    let stats = BoatNavStats {
        boat_size,
        tiles_processed: tiles_processed.into_inner(),
        fit_north: fit_north.into_inner(),
        fit_east: fit_east.into_inner(),
    };
    log::info!(
        "processed {} tiles; passable: {} north, {} east",
        stats.tiles_processed,
        stats.fit_north,
        stats.fit_east
    );
    Ok(stats)
}
