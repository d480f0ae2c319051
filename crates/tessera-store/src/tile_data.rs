//! Uniform read/write access to tile data over any backend.
//!
//! The backends and indexer schemes are closed sets, so both the reader and
//! the writer are tagged enums rather than trait objects. A map carries the
//! indexer it was built with; two maps holding the same logical data answer
//! every query identically regardless of backend.

use parking_lot::Mutex;
use roaring::RoaringBitmap;

use tessera_core::{CoordBounds, CoordIndexer, CoordPacker, CoreError};

use crate::sparse_bitset::SparseBitSet;
use crate::sparse_wordset::SparseWordSet;

/// A frozen, read-only tile-data map. Reads are wait-free and safe for
/// unlimited concurrency.
#[derive(Debug)]
pub enum TileDataMap {
    /// Compressed bitmap, one bit per (coordinate, address).
    Roaring {
        bitmap: RoaringBitmap,
        indexer: CoordIndexer,
    },
    /// 3-level sparse bitset, one bit per (coordinate, address).
    Bitset {
        bits: SparseBitSet,
        indexer: CoordIndexer,
    },
    /// 3-level sparse word array; all addresses of a tile share one value.
    Words {
        words: SparseWordSet,
        packer: CoordPacker,
    },
}

impl TileDataMap {
    /// Reads a single data bit. Out-of-range addresses read as false.
    #[inline]
    pub fn is_bit_set(&self, x: i32, y: i32, plane: i32, address: u32) -> bool {
        match self {
            TileDataMap::Roaring { bitmap, indexer } => {
                bitmap.contains(indexer.pack(x, y, plane, address))
            }
            TileDataMap::Bitset { bits, indexer } => bits.get(indexer.pack(x, y, plane, address)),
            TileDataMap::Words { words, packer } => {
                if address >= words.bits_per_value() {
                    return false;
                }
                words.get(packer.pack(x, y, plane)) >> address & 1 != 0
            }
        }
    }

    /// Reads every address of the tile packed into a byte. The word backend
    /// answers with a single lookup; the bit backends probe each address.
    pub fn all_bits(&self, x: i32, y: i32, plane: i32) -> u8 {
        match self {
            TileDataMap::Words { words, packer } => words.get(packer.pack(x, y, plane)) as u8,
            _ => {
                let mut value = 0u8;
                for address in 0..=self.max_address_index().min(7) {
                    if self.is_bit_set(x, y, plane, address) {
                        value |= 1 << address;
                    }
                }
                value
            }
        }
    }

    pub fn max_address_index(&self) -> u32 {
        match self {
            TileDataMap::Roaring { indexer, .. } | TileDataMap::Bitset { indexer, .. } => {
                indexer.max_address_index()
            }
            TileDataMap::Words { words, .. } => words.bits_per_value() - 1,
        }
    }

    /// Coordinate range this map was configured for.
    pub fn bounds(&self) -> CoordBounds {
        match self {
            TileDataMap::Roaring { indexer, .. } | TileDataMap::Bitset { indexer, .. } => {
                indexer.bounds()
            }
            TileDataMap::Words { packer, .. } => packer.bounds(),
        }
    }
}

/// A tile-data map under construction. Interior locking makes the write
/// operations safe to share across builder threads; freeze once writing is
/// done and hand readers the frozen map.
#[derive(Debug)]
pub enum TileDataWriter {
    Roaring {
        bitmap: Mutex<RoaringBitmap>,
        indexer: CoordIndexer,
    },
    Bitset {
        bits: Mutex<SparseBitSet>,
        indexer: CoordIndexer,
    },
    Words {
        words: Mutex<SparseWordSet>,
        packer: CoordPacker,
    },
}

impl TileDataWriter {
    pub fn roaring(indexer: CoordIndexer) -> Self {
        TileDataWriter::Roaring {
            bitmap: Mutex::new(RoaringBitmap::new()),
            indexer,
        }
    }

    pub fn bitset(indexer: CoordIndexer) -> Self {
        TileDataWriter::Bitset {
            bits: Mutex::new(SparseBitSet::new()),
            indexer,
        }
    }

    pub fn words(bits_per_value: u32, packer: CoordPacker) -> Result<Self, CoreError> {
        Ok(TileDataWriter::Words {
            words: Mutex::new(SparseWordSet::new(bits_per_value)?),
            packer,
        })
    }

    /// Sets one data bit, validating the coordinate when the indexer asks.
    pub fn set_bit(&self, x: i32, y: i32, plane: i32, address: u32) -> Result<(), CoreError> {
        match self {
            TileDataWriter::Roaring { bitmap, indexer } => {
                let index = indexer.try_pack(x, y, plane, address)?;
                bitmap.lock().insert(index);
            }
            TileDataWriter::Bitset { bits, indexer } => {
                let index = indexer.try_pack(x, y, plane, address)?;
                bits.lock().set(index);
            }
            TileDataWriter::Words { words, packer } => {
                let index = packer.pack(x, y, plane);
                let mut words = words.lock();
                let current = words.get(index);
                words.set(index, current | 1 << address);
            }
        }
        Ok(())
    }

    /// Clears one data bit.
    pub fn clear_bit(&self, x: i32, y: i32, plane: i32, address: u32) -> Result<(), CoreError> {
        match self {
            TileDataWriter::Roaring { bitmap, indexer } => {
                let index = indexer.try_pack(x, y, plane, address)?;
                bitmap.lock().remove(index);
            }
            TileDataWriter::Bitset { bits, indexer } => {
                let index = indexer.try_pack(x, y, plane, address)?;
                bits.lock().clear(index);
            }
            TileDataWriter::Words { words, packer } => {
                let index = packer.pack(x, y, plane);
                let mut words = words.lock();
                let current = words.get(index);
                words.set(index, current & !(1 << address));
            }
        }
        Ok(())
    }

    /// Overwrites every address of the tile from the bits of `value`.
    pub fn set_all_bits(&self, x: i32, y: i32, plane: i32, value: u8) -> Result<(), CoreError> {
        match self {
            TileDataWriter::Words { words, packer } => {
                words.lock().set(packer.pack(x, y, plane), u64::from(value));
                Ok(())
            }
            _ => {
                for address in 0..=self.max_address_index().min(7) {
                    if u32::from(value) >> address & 1 != 0 {
                        self.set_bit(x, y, plane, address)?;
                    } else {
                        self.clear_bit(x, y, plane, address)?;
                    }
                }
                Ok(())
            }
        }
    }

    pub fn max_address_index(&self) -> u32 {
        match self {
            TileDataWriter::Roaring { indexer, .. } | TileDataWriter::Bitset { indexer, .. } => {
                indexer.max_address_index()
            }
            TileDataWriter::Words { words, .. } => words.lock().bits_per_value() - 1,
        }
    }

    /// Ends the build and produces the read-only map.
    pub fn freeze(self) -> TileDataMap {
        match self {
            TileDataWriter::Roaring { bitmap, indexer } => TileDataMap::Roaring {
                bitmap: bitmap.into_inner(),
                indexer,
            },
            TileDataWriter::Bitset { bits, indexer } => TileDataMap::Bitset {
                bits: bits.into_inner(),
                indexer,
            },
            TileDataWriter::Words { words, packer } => TileDataMap::Words {
                words: words.into_inner(),
                packer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::ContiguousIndexer;

    fn backends() -> Vec<TileDataWriter> {
        let indexer = CoordIndexer::Contiguous(ContiguousIndexer::standard_2());
        vec![
            TileDataWriter::roaring(indexer.clone()),
            TileDataWriter::bitset(indexer),
            TileDataWriter::words(4, CoordPacker::standard()).expect("4 is a valid width"),
        ]
    }

    #[test]
    fn test_set_then_read_back() {
        for writer in backends() {
            writer.set_bit(600, 100, 0, 0).expect("in range");
            let map = writer.freeze();
            assert!(map.is_bit_set(600, 100, 0, 0));
            assert!(!map.is_bit_set(600, 100, 0, 1));
            assert!(!map.is_bit_set(601, 100, 0, 0));
            assert_eq!(map.all_bits(600, 100, 0), 1);
            assert_eq!(map.all_bits(601, 100, 0), 0);
        }
    }

    #[test]
    fn test_clear_bit() {
        for writer in backends() {
            writer.set_bit(600, 100, 2, 1).expect("in range");
            writer.clear_bit(600, 100, 2, 1).expect("in range");
            let map = writer.freeze();
            assert!(!map.is_bit_set(600, 100, 2, 1));
        }
    }

    #[test]
    fn test_set_all_bits_overwrites() {
        for writer in backends() {
            writer.set_all_bits(700, 50, 1, 0b11).expect("in range");
            writer.set_all_bits(700, 50, 1, 0b10).expect("in range");
            let map = writer.freeze();
            assert_eq!(map.all_bits(700, 50, 1), 0b10);
            assert!(!map.is_bit_set(700, 50, 1, 0));
            assert!(map.is_bit_set(700, 50, 1, 1));
        }
    }

    #[test]
    fn test_empty_map_reads_zero() {
        for writer in backends() {
            let map = writer.freeze();
            assert!(!map.is_bit_set(2000, 2000, 0, 0));
            assert_eq!(map.all_bits(2000, 2000, 0), 0);
        }
    }

    #[test]
    fn test_backends_agree_on_random_pattern() {
        // A fixed LCG keeps the sample deterministic.
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state
        };

        let writers = backends();
        let mut sample = Vec::new();
        for _ in 0..2000 {
            let r = next();
            let x = 482 + (r as i32 & 0xFFF).min(4091);
            let y = 2 + ((r >> 12) as i32 & 0x3FFF).min(16379);
            let plane = (r >> 26) as i32 & 3;
            let address = (r >> 28) as u32 & 1;
            sample.push((x, y, plane, address));
            for writer in &writers {
                writer.set_bit(x, y, plane, address).expect("in range");
            }
        }

        let maps: Vec<_> = writers.into_iter().map(TileDataWriter::freeze).collect();
        for &(x, y, plane, address) in &sample {
            for map in &maps {
                assert!(map.is_bit_set(x, y, plane, address), "({x}, {y}, {plane}, {address})");
            }
        }
        // Probe unrelated coordinates too; every backend must agree.
        for probe in 0..2000 {
            let r = next();
            let x = 482 + (r as i32 & 0xFFF).min(4091);
            let y = 2 + ((r >> 12) as i32 & 0x3FFF).min(16379);
            let plane = (r >> 26) as i32 & 3;
            let expected = maps[0].all_bits(x, y, plane);
            assert_eq!(maps[1].all_bits(x, y, plane), expected, "probe {probe}");
            assert_eq!(maps[2].all_bits(x, y, plane), expected, "probe {probe}");
        }
    }

    #[test]
    fn test_parallel_writers_share_one_map() {
        let writer = TileDataWriter::roaring(CoordIndexer::Contiguous(
            ContiguousIndexer::standard_2().with_validation_enabled(),
        ));
        std::thread::scope(|scope| {
            for strip in 0..4 {
                let writer = &writer;
                scope.spawn(move || {
                    for y in 0..256 {
                        writer
                            .set_bit(500 + strip, y + 2, 0, 0)
                            .expect("disjoint in-range writes");
                    }
                });
            }
        });
        let map = writer.freeze();
        for strip in 0..4 {
            for y in 0..256 {
                assert!(map.is_bit_set(500 + strip, y + 2, 0, 0));
            }
        }
    }
}
