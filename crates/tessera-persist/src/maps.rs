//! Load and save entry points for collision and tile-type maps.
//!
//! A reader detects the format and gzip layer from the file name, picks the
//! matching deserializer, and wraps the container in the right facade with
//! the standard indexer for that map kind. Writers are created per format
//! with validation-enabled indexers so bad build input fails loudly.

use std::io::Read;
use std::path::Path;

use roaring::RoaringBitmap;

use tessera_core::constants::{COLLISION_WORD_BITS, TILE_TYPE_WORD_BITS};
use tessera_core::{ContiguousIndexer, CoordIndexer, CoordPacker, InterleavedIndexer};
use tessera_store::{
    CollisionMap, CollisionMapWriter, SparseBitSet, SparseWordSet, TileDataMap, TileDataWriter,
    TileTypeMap, TileTypeMapWriter,
};

use crate::error::{decode_error, PersistError};
use crate::format::{is_gzipped, Format};
use crate::stream;

/// The two map kinds this store persists, with their standard layouts.
#[derive(Debug, Clone, Copy)]
enum MapKind {
    /// Two addresses per tile (north/east), 4-bit words.
    Collision,
    /// Eight addresses per tile, 8-bit words.
    TileType,
}

impl MapKind {
    fn reader_indexer(self) -> CoordIndexer {
        CoordIndexer::Contiguous(match self {
            MapKind::Collision => ContiguousIndexer::standard_2(),
            MapKind::TileType => ContiguousIndexer::standard_8(),
        })
    }

    fn writer_indexer(self) -> CoordIndexer {
        CoordIndexer::Contiguous(match self {
            MapKind::Collision => ContiguousIndexer::standard_2().with_validation_enabled(),
            MapKind::TileType => ContiguousIndexer::standard_8().with_validation_enabled(),
        })
    }

    fn word_bits(self) -> u32 {
        match self {
            MapKind::Collision => COLLISION_WORD_BITS,
            MapKind::TileType => TILE_TYPE_WORD_BITS,
        }
    }
}

fn read_roaring(input: impl Read) -> Result<RoaringBitmap, PersistError> {
    let mut bitmap = RoaringBitmap::deserialize_from(input).map_err(decode_error)?;
    // Collapse dense runs so a freshly loaded map is as compact as a saved one.
    bitmap.optimize();
    Ok(bitmap)
}

fn read_tile_data(
    mut input: impl Read,
    format: Format,
    kind: MapKind,
) -> Result<TileDataMap, PersistError> {
    match format {
        Format::Roaring => Ok(TileDataMap::Roaring {
            bitmap: read_roaring(input)?,
            indexer: kind.reader_indexer(),
        }),
        Format::SparseBitset => Ok(TileDataMap::Bitset {
            bits: SparseBitSet::read_from(&mut input).map_err(decode_error)?,
            indexer: kind.reader_indexer(),
        }),
        Format::SparseWordset => {
            let words = SparseWordSet::read_from(&mut input).map_err(decode_error)?;
            if words.bits_per_value() != kind.word_bits() {
                return Err(PersistError::BitsPerValueMismatch {
                    expected: kind.word_bits(),
                    found: words.bits_per_value(),
                });
            }
            Ok(TileDataMap::Words {
                words,
                packer: CoordPacker::standard(),
            })
        }
    }
}

fn load_tile_data(path: &Path, kind: MapKind) -> Result<TileDataMap, PersistError> {
    let format = Format::detect(path);
    log::debug!(
        "loading {kind:?} map from {} (format {format:?}, gzip {})",
        path.display(),
        is_gzipped(path)
    );
    let input = stream::open_input(path)?;
    read_tile_data(input, format, kind)
}

/// Loads a collision map saved with blocking semantics (set bit = blocked).
pub fn load_collision_map(path: &Path) -> Result<CollisionMap, PersistError> {
    Ok(CollisionMap::blocking(load_tile_data(path, MapKind::Collision)?))
}

/// Loads a legacy walkability baseline: a roaring file over the
/// flag-interleaved layout where a set bit means pathable.
pub fn load_walkable_map(path: &Path) -> Result<CollisionMap, PersistError> {
    log::debug!("loading walkability baseline from {}", path.display());
    let input = stream::open_input(path)?;
    let bitmap = read_roaring(input)?;
    Ok(CollisionMap::walkable(TileDataMap::Roaring {
        bitmap,
        indexer: CoordIndexer::Interleaved(InterleavedIndexer::legacy_collision()),
    }))
}

/// Loads a tile-type map.
pub fn load_tile_type_map(path: &Path) -> Result<TileTypeMap, PersistError> {
    Ok(TileTypeMap::new(load_tile_data(path, MapKind::TileType)?))
}

fn create_tile_data_writer(format: Format, kind: MapKind) -> TileDataWriter {
    match format {
        Format::Roaring => TileDataWriter::roaring(kind.writer_indexer()),
        Format::SparseBitset => TileDataWriter::bitset(kind.writer_indexer()),
        Format::SparseWordset => TileDataWriter::words(kind.word_bits(), CoordPacker::standard())
            .expect("the standard word widths divide 64"),
    }
}

/// Creates an empty collision writer (blocking semantics) for the format.
pub fn create_collision_writer(format: Format) -> CollisionMapWriter {
    CollisionMapWriter::blocking(create_tile_data_writer(format, MapKind::Collision))
}

/// Creates an empty tile-type writer for the format.
pub fn create_tile_type_writer(format: Format) -> TileTypeMapWriter {
    TileTypeMapWriter::new(create_tile_data_writer(format, MapKind::TileType))
}

fn writer_format(writer: &TileDataWriter) -> Format {
    match writer {
        TileDataWriter::Roaring { .. } => Format::Roaring,
        TileDataWriter::Bitset { .. } => Format::SparseBitset,
        TileDataWriter::Words { .. } => Format::SparseWordset,
    }
}

/// Serializes a tile-data writer to the path, gzip-compressed when the path
/// ends in `.gz`. The roaring backend is run-optimized first.
pub fn save_tile_data(writer: &TileDataWriter, path: &Path) -> Result<(), PersistError> {
    let backend = writer_format(writer);
    if Format::detect(path) != backend {
        log::warn!(
            "file name {} does not name the {} format; readers will pick the wrong decoder",
            path.display(),
            backend.file_token()
        );
    }

    let mut output = stream::create_output(path)?;
    match writer {
        TileDataWriter::Roaring { bitmap, .. } => {
            let mut bitmap = bitmap.lock();
            bitmap.optimize();
            bitmap.serialize_into(&mut output)?;
        }
        TileDataWriter::Bitset { bits, .. } => {
            let bits = bits.lock();
            log::debug!("serializing sparse bitset, ~{} KiB resident", bits.memory_estimate() / 1024);
            bits.write_into(&mut output)?;
        }
        TileDataWriter::Words { words, .. } => {
            let words = words.lock();
            log::debug!("serializing sparse wordset, ~{} KiB resident", words.memory_estimate() / 1024);
            words.write_into(&mut output)?;
        }
    }
    output.finish()?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Saves a collision map build.
pub fn save_collision_map(writer: &CollisionMapWriter, path: &Path) -> Result<(), PersistError> {
    save_tile_data(writer.data(), path)
}

/// Saves a tile-type map build.
pub fn save_tile_type_map(writer: &TileTypeMapWriter, path: &Path) -> Result<(), PersistError> {
    save_tile_data(writer.data(), path)
}
