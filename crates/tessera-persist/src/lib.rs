//! Persistence for tile-data maps: format auto-detection from filenames,
//! gzip stream handling, and the load/save entry points.

pub mod error;
pub mod format;
pub mod maps;
pub mod stream;

pub use error::PersistError;
pub use format::{is_gzipped, Format};
pub use maps::{
    create_collision_writer, create_tile_type_writer, load_collision_map, load_tile_type_map,
    load_walkable_map, save_collision_map, save_tile_data, save_tile_type_map,
};
