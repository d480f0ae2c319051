//! Keep areas: rectangles whose collision bits come from an authoritative
//! baseline map instead of a fresh build.

use tessera_core::CoreError;

use crate::collision::{CollisionMap, CollisionMapWriter};

/// An axis-aligned rectangle on one plane. Corners may be given in any
/// order; construction normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepArea {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub plane: i32,
}

impl KeepArea {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32, plane: i32) -> Self {
        Self {
            min_x: if x1 < x2 { x1 } else { x2 },
            min_y: if y1 < y2 { y1 } else { y2 },
            max_x: if x1 > x2 { x1 } else { x2 },
            max_y: if y1 > y2 { y1 } else { y2 },
            plane,
        }
    }

    pub fn contains(&self, x: i32, y: i32, plane: i32) -> bool {
        plane == self.plane
            && x >= self.min_x
            && x <= self.max_x
            && y >= self.min_y
            && y <= self.max_y
    }
}

/// Regions whose hand-tuned collision data outlives a rebuild.
pub const KEEP_AREAS: [KeepArea; 10] = [
    KeepArea::new(2808, 2802, 2698, 2713, 0), // island settlement
    KeepArea::new(1626, 3522, 1710, 3600, 0), // ruin complex
    KeepArea::new(2446, 9733, 2526, 9703, 0), // underground bridge
    KeepArea::new(2464, 9670, 2487, 9710, 0), // underground puzzle rooms
    KeepArea::new(2505, 3460, 2516, 3465, 0), // waterfall ledge
    KeepArea::new(2684, 9030, 2291, 9318, 1), // cave upper floor
    KeepArea::new(1629, 3123, 1669, 3093, 0), // walled district
    KeepArea::new(1790, 4790, 1835, 4865, 0), // moored boats, plane 0
    KeepArea::new(1790, 4790, 1835, 4865, 1), // moored boats, plane 1
    KeepArea::new(1790, 4790, 1835, 4865, 2), // moored boats, plane 2
];

/// Splices baseline collision data into a writer wherever a keep area covers
/// the tile.
#[derive(Debug)]
pub struct KeepAreaOverlay {
    baseline: CollisionMap,
    areas: Vec<KeepArea>,
}

impl KeepAreaOverlay {
    /// Overlay using the standard keep-area list.
    pub fn new(baseline: CollisionMap) -> Self {
        Self::with_areas(baseline, KEEP_AREAS.to_vec())
    }

    pub fn with_areas(baseline: CollisionMap, areas: Vec<KeepArea>) -> Self {
        Self { baseline, areas }
    }

    pub fn baseline(&self) -> &CollisionMap {
        &self.baseline
    }

    /// Whether the tile's collision should come from the baseline map.
    pub fn should_keep(&self, x: i32, y: i32, plane: i32) -> bool {
        self.areas.iter().any(|area| area.contains(x, y, plane))
    }

    /// Copies the baseline's north and east pathability into the writer when
    /// the tile lies inside a keep area. Returns whether the override
    /// happened; the caller skips its own data for the tile if it did.
    pub fn override_if_applicable(
        &self,
        writer: &CollisionMapWriter,
        x: i32,
        y: i32,
        plane: i32,
    ) -> Result<bool, CoreError> {
        if !self.should_keep(x, y, plane) {
            return Ok(false);
        }
        let north = self.baseline.pathable_north(x, y, plane);
        let east = self.baseline.pathable_east(x, y, plane);
        writer.set_pathable_north(x, y, plane, north)?;
        writer.set_pathable_east(x, y, plane, east)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionSemantics;
    use crate::tile_data::TileDataWriter;
    use tessera_core::{ContiguousIndexer, CoordIndexer, InterleavedIndexer};

    #[test]
    fn test_corners_normalize() {
        let area = KeepArea::new(10, 30, 5, 20, 1);
        assert_eq!(area.min_x, 5);
        assert_eq!(area.max_x, 10);
        assert_eq!(area.min_y, 20);
        assert_eq!(area.max_y, 30);
    }

    #[test]
    fn test_contains_checks_plane() {
        let area = KeepArea::new(0, 0, 10, 10, 1);
        assert!(area.contains(5, 5, 1));
        assert!(!area.contains(5, 5, 0));
        assert!(!area.contains(11, 5, 1));
    }

    #[test]
    fn test_override_copies_baseline_bits() {
        // Baseline in walkable semantics: mark (600, 100) pathable north only.
        let baseline_writer = CollisionMapWriter::new(
            TileDataWriter::roaring(CoordIndexer::Interleaved(
                InterleavedIndexer::legacy_collision(),
            )),
            CollisionSemantics::SetMeansWalkable,
        );
        baseline_writer
            .set_pathable_north(600, 100, 0, true)
            .expect("in range");
        let overlay = KeepAreaOverlay::with_areas(
            baseline_writer.freeze(),
            vec![KeepArea::new(590, 90, 610, 110, 0)],
        );

        let writer = CollisionMapWriter::blocking(TileDataWriter::roaring(
            CoordIndexer::Contiguous(ContiguousIndexer::standard_2().with_validation_enabled()),
        ));

        assert!(overlay
            .override_if_applicable(&writer, 600, 100, 0)
            .expect("in range"));
        assert!(!overlay
            .override_if_applicable(&writer, 700, 100, 0)
            .expect("outside area"));

        let map = writer.freeze();
        assert!(map.pathable_north(600, 100, 0));
        assert!(!map.pathable_east(600, 100, 0), "baseline east was not walkable");
    }

    #[test]
    fn test_standard_areas_cover_known_tiles() {
        for area in KEEP_AREAS {
            assert!(area.min_x <= area.max_x);
            assert!(area.min_y <= area.max_y);
            assert!(area.contains(area.min_x, area.min_y, area.plane));
        }
    }
}
