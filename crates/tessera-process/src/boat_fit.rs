//! The boat-fit predicate: can an n×n boat sit centered on a tile?
//!
//! For odd sizes there is one true center and one area to check. For even
//! sizes the center falls between tiles, so the four areas whose central
//! 2×2 contains the query tile are tried and any passing one counts.
//!
//! An area passes when every tile is in bounds and water, interior tiles are
//! pathable in all four cardinals, and edge tiles are pathable toward the
//! interior (corners in both inward cardinals).

use tessera_core::{CoordBounds, CoreError};
use tessera_store::{CollisionMap, TileTypeMap};

pub struct BoatFitChecker<'a> {
    collision: &'a CollisionMap,
    tile_types: &'a TileTypeMap,
    boat_size: i32,
    bounds: CoordBounds,
}

impl<'a> BoatFitChecker<'a> {
    pub fn new(
        collision: &'a CollisionMap,
        tile_types: &'a TileTypeMap,
        boat_size: i32,
    ) -> Result<Self, CoreError> {
        if boat_size < 1 {
            return Err(CoreError::InvalidConfiguration(
                "boat size must be at least 1".into(),
            ));
        }
        Ok(Self {
            collision,
            tile_types,
            boat_size,
            bounds: tile_types.bounds(),
        })
    }

    pub fn boat_size(&self) -> i32 {
        self.boat_size
    }

    /// Whether a boat of the configured size can be centered at the tile.
    pub fn can_fit_at(&self, x: i32, y: i32, plane: i32) -> bool {
        if self.boat_size % 2 == 1 {
            let radius = self.boat_size / 2;
            return self.check_area(x - radius, y - radius, plane);
        }

        // Even size: the anchor of each candidate area puts the query tile
        // at one corner of the central 2x2.
        let half = self.boat_size / 2;
        self.check_area(x - (half - 1), y - (half - 1), plane)
            || self.check_area(x - half, y - (half - 1), plane)
            || self.check_area(x - (half - 1), y - half, plane)
            || self.check_area(x - half, y - half, plane)
    }

    /// Checks the n×n area anchored at `(min_x, min_y)`.
    fn check_area(&self, min_x: i32, min_y: i32, plane: i32) -> bool {
        let max_x = min_x + self.boat_size - 1;
        let max_y = min_y + self.boat_size - 1;

        if min_x < self.bounds.min_x
            || max_x > self.bounds.max_x
            || min_y < self.bounds.min_y
            || max_y > self.bounds.max_y
            || plane < self.bounds.min_plane
            || plane > self.bounds.max_plane
        {
            return false;
        }

        for tile_x in min_x..=max_x {
            for tile_y in min_y..=max_y {
                if !self.tile_types.is_water(tile_x, tile_y, plane) {
                    return false;
                }
                if !self.tile_pathable(tile_x, tile_y, plane, min_x, min_y, max_x, max_y) {
                    return false;
                }
            }
        }
        true
    }

    /// Pathability requirement for one tile of the footprint, by position.
    fn tile_pathable(
        &self,
        tile_x: i32,
        tile_y: i32,
        plane: i32,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    ) -> bool {
        let west_edge = tile_x == min_x;
        let east_edge = tile_x == max_x;
        let south_edge = tile_y == min_y;
        let north_edge = tile_y == max_y;

        if !west_edge && !east_edge && !south_edge && !north_edge {
            return self.collision.pathable_north(tile_x, tile_y, plane)
                && self.collision.pathable_east(tile_x, tile_y, plane)
                && self.collision.pathable_south(tile_x, tile_y, plane)
                && self.collision.pathable_west(tile_x, tile_y, plane);
        }

        // Edge and corner tiles only need to be pathable toward the interior.
        if north_edge && east_edge {
            return self.collision.pathable_south(tile_x, tile_y, plane)
                && self.collision.pathable_west(tile_x, tile_y, plane);
        }
        if north_edge && west_edge {
            return self.collision.pathable_south(tile_x, tile_y, plane)
                && self.collision.pathable_east(tile_x, tile_y, plane);
        }
        if south_edge && east_edge {
            return self.collision.pathable_north(tile_x, tile_y, plane)
                && self.collision.pathable_west(tile_x, tile_y, plane);
        }
        if south_edge && west_edge {
            return self.collision.pathable_north(tile_x, tile_y, plane)
                && self.collision.pathable_east(tile_x, tile_y, plane);
        }
        if north_edge {
            return self.collision.pathable_south(tile_x, tile_y, plane);
        }
        if south_edge {
            return self.collision.pathable_north(tile_x, tile_y, plane);
        }
        if east_edge {
            return self.collision.pathable_west(tile_x, tile_y, plane);
        }
        self.collision.pathable_east(tile_x, tile_y, plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ContiguousIndexer, CoordIndexer, TileType};
    use tessera_store::{CollisionMapWriter, TileDataWriter, TileTypeMap, TileTypeMapWriter};

    fn open_collision() -> CollisionMapWriter {
        CollisionMapWriter::blocking(TileDataWriter::roaring(CoordIndexer::Contiguous(
            ContiguousIndexer::standard_2().with_validation_enabled(),
        )))
    }

    /// Water patch covering x and y 999..=1001 on plane 0.
    fn water_patch_3x3() -> TileTypeMap {
        let writer = TileTypeMapWriter::new(TileDataWriter::roaring(CoordIndexer::Contiguous(
            ContiguousIndexer::standard_8().with_validation_enabled(),
        )));
        for x in 999..=1001 {
            for y in 999..=1001 {
                writer.set_tile_type(x, y, 0, TileType(1)).expect("in range");
            }
        }
        writer.freeze()
    }

    #[test]
    fn test_size_must_be_positive() {
        let collision = open_collision().freeze();
        let tile_types = water_patch_3x3();
        assert!(BoatFitChecker::new(&collision, &tile_types, 0).is_err());
        assert!(BoatFitChecker::new(&collision, &tile_types, 1).is_ok());
    }

    #[test]
    fn test_even_size_fits_anywhere_on_open_water_patch() {
        let collision = open_collision().freeze();
        let tile_types = water_patch_3x3();
        let checker = BoatFitChecker::new(&collision, &tile_types, 2).expect("valid size");

        // Every tile whose four candidate 2x2 areas stay on water passes.
        for (x, y) in [(999, 999), (1000, 999), (999, 1000), (1000, 1000)] {
            assert!(checker.can_fit_at(x, y, 0), "({x}, {y})");
        }
        // A center one off the patch drags an area onto dry land.
        assert!(!checker.can_fit_at(1003, 1000, 0));
    }

    #[test]
    fn test_odd_size_needs_the_whole_area_on_water() {
        let collision = open_collision().freeze();
        let tile_types = water_patch_3x3();
        let checker = BoatFitChecker::new(&collision, &tile_types, 3).expect("valid size");

        assert!(checker.can_fit_at(1000, 1000, 0), "3x3 patch fits exactly");
        assert!(!checker.can_fit_at(1001, 1000, 0), "area extends off the water");
    }

    #[test]
    fn test_blocked_edge_kills_large_fit_but_not_small() {
        // Block north of (999, 1000): the NW patch corner (999, 1001) is no
        // longer pathable south, toward the interior.
        let collision_writer = open_collision();
        collision_writer.north_blocking(999, 1000, 0, true).expect("in range");
        let collision = collision_writer.freeze();
        let tile_types = water_patch_3x3();

        let three = BoatFitChecker::new(&collision, &tile_types, 3).expect("valid size");
        assert!(!three.can_fit_at(1000, 1000, 0), "corner not pathable inward");

        // The even fit still passes: at least one 2x2 avoids the bad corner.
        let two = BoatFitChecker::new(&collision, &tile_types, 2).expect("valid size");
        assert!(two.can_fit_at(1000, 1000, 0));
    }

    #[test]
    fn test_interior_must_be_pathable_in_all_directions() {
        // Block east of the patch center: the center is interior for n=3.
        let collision_writer = open_collision();
        collision_writer.east_blocking(1000, 1000, 0, true).expect("in range");
        let collision = collision_writer.freeze();
        let tile_types = water_patch_3x3();

        let checker = BoatFitChecker::new(&collision, &tile_types, 3).expect("valid size");
        assert!(!checker.can_fit_at(1000, 1000, 0));
    }

    #[test]
    fn test_out_of_bounds_area_fails() {
        let collision = open_collision().freeze();
        let tile_types = water_patch_3x3();
        let checker = BoatFitChecker::new(&collision, &tile_types, 3).expect("valid size");
        let min_x = tile_types.bounds().min_x;
        assert!(!checker.can_fit_at(min_x, 1000, 0), "area pokes past the margin");
    }
}
