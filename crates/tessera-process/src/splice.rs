//! Keep-area splice: rebuilds a collision map with the baseline's bits
//! taking precedence inside the keep areas.
//!
//! Tiles covered by a keep area copy the baseline map's north and east
//! pathability; every other tile copies the source map unchanged. The
//! output writer starts empty, so the pass visits the full region.
//! Cancellation is checked at plane boundaries.

use tessera_core::CoordBounds;
use tessera_store::{CollisionMap, CollisionMapWriter, KeepAreaOverlay};

use crate::cancel::CancellationToken;
use crate::error::ProcessError;

/// Rewrites `source` into `output` with keep-area overrides applied.
/// Returns the number of tiles taken from the baseline.
pub fn splice_keep_areas(
    source: &CollisionMap,
    overlay: &KeepAreaOverlay,
    region: CoordBounds,
    output: &CollisionMapWriter,
    cancel: &CancellationToken,
) -> Result<u64, ProcessError> {
    let mut kept = 0u64;
    for plane in region.min_plane..=region.max_plane {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }
        for x in region.min_x..=region.max_x {
            for y in region.min_y..=region.max_y {
                if overlay.override_if_applicable(output, x, y, plane)? {
                    kept += 1;
                    continue;
                }
                output.set_pathable_north(x, y, plane, source.pathable_north(x, y, plane))?;
                output.set_pathable_east(x, y, plane, source.pathable_east(x, y, plane))?;
            }
        }
        log::debug!("keep-area splice: plane {plane} done");
    }
    log::info!("keep-area splice took {kept} tiles from the baseline");
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ContiguousIndexer, CoordIndexer, InterleavedIndexer};
    use tessera_store::{CollisionSemantics, KeepArea, TileDataWriter};

    fn region() -> CoordBounds {
        CoordBounds {
            min_x: 580,
            max_x: 620,
            min_y: 90,
            max_y: 120,
            min_plane: 0,
            max_plane: 0,
        }
    }

    fn blocking_writer() -> CollisionMapWriter {
        CollisionMapWriter::blocking(TileDataWriter::roaring(CoordIndexer::Contiguous(
            ContiguousIndexer::standard_2().with_validation_enabled(),
        )))
    }

    #[test]
    fn test_splice_prefers_baseline_inside_areas() {
        // Baseline in walkable semantics: north of (600, 100) is pathable,
        // east is not.
        let baseline = CollisionMapWriter::new(
            TileDataWriter::roaring(CoordIndexer::Interleaved(
                InterleavedIndexer::legacy_collision(),
            )),
            CollisionSemantics::SetMeansWalkable,
        );
        baseline.set_pathable_north(600, 100, 0, true).expect("in range");
        let overlay = KeepAreaOverlay::with_areas(
            baseline.freeze(),
            vec![KeepArea::new(590, 90, 610, 110, 0)],
        );

        // Source map: east blocked inside the area (overridden), north
        // blocked outside it (copied through).
        let source_writer = blocking_writer();
        source_writer.east_blocking(600, 100, 0, true).expect("in range");
        source_writer.north_blocking(585, 95, 0, true).expect("in range");
        let source = source_writer.freeze();

        let output = blocking_writer();
        let kept = splice_keep_areas(&source, &overlay, region(), &output, &CancellationToken::new())
            .expect("splice succeeds");
        assert_eq!(kept, 21 * 21, "every area tile inside the region is kept");

        let spliced = output.freeze();
        // Inside the area the baseline decides.
        assert!(spliced.pathable_north(600, 100, 0));
        assert!(!spliced.pathable_east(600, 100, 0), "baseline east was not walkable");
        // Outside the area the source decides.
        assert!(!spliced.pathable_north(585, 95, 0));
        assert!(spliced.pathable_north(586, 95, 0));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let baseline = CollisionMapWriter::new(
            TileDataWriter::roaring(CoordIndexer::Interleaved(
                InterleavedIndexer::legacy_collision(),
            )),
            CollisionSemantics::SetMeansWalkable,
        );
        let overlay = KeepAreaOverlay::new(baseline.freeze());
        let source = blocking_writer().freeze();
        let output = blocking_writer();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = splice_keep_areas(&source, &overlay, region(), &output, &cancel);
        assert!(matches!(result, Err(ProcessError::Cancelled)));
    }
}
