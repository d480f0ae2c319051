//! Sparse tile-data containers and the map facades over them.
//!
//! Three interchangeable backends store bits or small words at sparse 32-bit
//! indices: a roaring compressed bitmap, a 3-level sparse bitset, and a
//! 3-level sparse word array. The collision and tile-type maps are thin
//! facades that translate coordinates through a configured indexer and give
//! the stored bits their meaning.

pub mod collision;
pub mod keep_area;
pub mod sparse_bitset;
pub mod sparse_wordset;
pub mod tile_data;
pub mod tile_type_map;

mod tree;

pub use collision::{flags, CollisionMap, CollisionMapWriter, CollisionSemantics};
pub use keep_area::{KeepArea, KeepAreaOverlay, KEEP_AREAS};
pub use sparse_bitset::SparseBitSet;
pub use sparse_wordset::SparseWordSet;
pub use tile_data::{TileDataMap, TileDataWriter};
pub use tile_type_map::{TileTypeMap, TileTypeMapWriter};
