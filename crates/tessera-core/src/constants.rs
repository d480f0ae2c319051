//! Single source of truth for the standard world layout.
//! Indexer presets and the persistence layer both derive from these values.

/// Bits for the X axis in the contiguous layout. Covers X 480..=4575.
pub const STANDARD_X_BITS: u32 = 12;

/// Base offset subtracted from X before packing.
pub const STANDARD_X_BASE: i32 = 480;

/// Bits for the Y axis. Covers Y 0..=16383.
pub const STANDARD_Y_BITS: u32 = 14;

/// Bits for the plane (vertical layer). Planes 0..=3.
pub const STANDARD_PLANE_BITS: u32 = 2;

/// Bits for the X axis in the legacy flag-interleaved layout (no base).
pub const LEGACY_X_BITS: u32 = 14;

/// Address slot holding the north collision bit.
pub const NORTH_ADDRESS: u32 = 0;

/// Address slot holding the east collision bit.
pub const EAST_ADDRESS: u32 = 1;

/// Addresses per tile in a collision map (north + east).
pub const COLLISION_ADDRESSES: u32 = 2;

/// Addresses per tile in a tile-type map (one bit per value bit).
pub const TILE_TYPE_ADDRESSES: u32 = 8;

/// Value width of collision data in the word-array backend.
pub const COLLISION_WORD_BITS: u32 = 4;

/// Value width of tile-type data in the word-array backend.
pub const TILE_TYPE_WORD_BITS: u32 = 8;

/// Index capacity of the roaring backend (unsigned 32-bit indices).
pub const UNSIGNED_CAPACITY_BITS: u32 = 32;

/// Index capacity of the sparse-bitset backend (signed 31-bit indices).
pub const SIGNED_CAPACITY_BITS: u32 = 31;
