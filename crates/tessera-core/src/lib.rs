pub mod constants;
pub mod direction;
pub mod error;
pub mod indexer;
pub mod tile_type;

pub use direction::{Direction, ALL_DIRECTIONS, CARDINAL_DIRECTIONS};
pub use error::CoreError;
pub use indexer::{
    ContiguousIndexer, CoordBounds, CoordIndexer, CoordPacker, InterleavedIndexer,
};
pub use tile_type::TileType;
