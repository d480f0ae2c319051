use tessera_core::{CoordBounds, CoreError, TileType};

use crate::tile_data::{TileDataMap, TileDataWriter};

/// Read-only map of one [`TileType`] per tile.
#[derive(Debug)]
pub struct TileTypeMap {
    data: TileDataMap,
}

impl TileTypeMap {
    pub fn new(data: TileDataMap) -> Self {
        Self { data }
    }

    #[inline]
    pub fn tile_type(&self, x: i32, y: i32, plane: i32) -> TileType {
        TileType(self.data.all_bits(x, y, plane))
    }

    #[inline]
    pub fn is_water(&self, x: i32, y: i32, plane: i32) -> bool {
        self.tile_type(x, y, plane).is_water()
    }

    pub fn data(&self) -> &TileDataMap {
        &self.data
    }

    pub fn bounds(&self) -> CoordBounds {
        self.data.bounds()
    }
}

/// Tile-type map under construction; write operations are internally
/// synchronized.
#[derive(Debug)]
pub struct TileTypeMapWriter {
    data: TileDataWriter,
}

impl TileTypeMapWriter {
    pub fn new(data: TileDataWriter) -> Self {
        Self { data }
    }

    pub fn set_tile_type(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        tile_type: TileType,
    ) -> Result<(), CoreError> {
        self.data.set_all_bits(x, y, plane, tile_type.0)
    }

    pub fn data(&self) -> &TileDataWriter {
        &self.data
    }

    pub fn freeze(self) -> TileTypeMap {
        TileTypeMap::new(self.data.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ContiguousIndexer, CoordIndexer, CoordPacker};

    fn writers() -> Vec<TileTypeMapWriter> {
        let indexer = CoordIndexer::Contiguous(ContiguousIndexer::standard_8());
        vec![
            TileTypeMapWriter::new(TileDataWriter::roaring(indexer.clone())),
            TileTypeMapWriter::new(TileDataWriter::bitset(indexer)),
            TileTypeMapWriter::new(
                TileDataWriter::words(8, CoordPacker::standard()).expect("8 is a valid width"),
            ),
        ]
    }

    #[test]
    fn test_unset_tile_is_none() {
        for writer in writers() {
            let map = writer.freeze();
            assert_eq!(map.tile_type(900, 900, 0), TileType::NONE);
            assert!(!map.is_water(900, 900, 0));
        }
    }

    #[test]
    fn test_set_then_read_back() {
        for writer in writers() {
            writer.set_tile_type(900, 900, 0, TileType(7)).expect("in range");
            writer.set_tile_type(900, 901, 0, TileType(12)).expect("in range");
            let map = writer.freeze();
            assert_eq!(map.tile_type(900, 900, 0), TileType(7));
            assert_eq!(map.tile_type(900, 901, 0), TileType(12));
            assert!(map.is_water(900, 900, 0));
            assert_eq!(map.tile_type(901, 900, 0), TileType::NONE);
        }
    }

    #[test]
    fn test_overwrite() {
        for writer in writers() {
            writer.set_tile_type(900, 900, 2, TileType(5)).expect("in range");
            writer.set_tile_type(900, 900, 2, TileType(1)).expect("in range");
            let map = writer.freeze();
            assert_eq!(map.tile_type(900, 900, 2), TileType(1));
        }
    }
}
