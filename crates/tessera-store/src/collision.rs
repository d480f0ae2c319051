//! Collision map facade: two directional bits per tile and the derived
//! 8-way walkability queries.
//!
//! Address 0 holds the north bit and address 1 the east bit. South and west
//! are derived from the neighboring tiles: south of `(x, y)` is north of
//! `(x, y - 1)`, west is east of `(x - 1, y)`.
//!
//! Two storage conventions exist because two data sources disagree on what a
//! set bit means; the semantics are explicit on every map and writer.

use tessera_core::constants::{EAST_ADDRESS, NORTH_ADDRESS};
use tessera_core::{CoordBounds, CoreError, Direction};

use crate::tile_data::{TileDataMap, TileDataWriter};

/// Packed pathability flags returned by [`CollisionMap::all`].
pub mod flags {
    use tessera_core::Direction;

    /// No direction is pathable.
    pub const NONE: u8 = 0;

    pub const NORTH_WEST: u8 = 1 << 0;
    pub const NORTH: u8 = 1 << 1;
    pub const NORTH_EAST: u8 = 1 << 2;
    pub const WEST: u8 = 1 << 3;
    pub const EAST: u8 = 1 << 4;
    pub const SOUTH_WEST: u8 = 1 << 5;
    pub const SOUTH: u8 = 1 << 6;
    pub const SOUTH_EAST: u8 = 1 << 7;

    /// The flag bit corresponding to a direction.
    pub fn for_direction(direction: Direction) -> u8 {
        match direction {
            Direction::NorthWest => NORTH_WEST,
            Direction::North => NORTH,
            Direction::NorthEast => NORTH_EAST,
            Direction::West => WEST,
            Direction::East => EAST,
            Direction::SouthWest => SOUTH_WEST,
            Direction::South => SOUTH,
            Direction::SouthEast => SOUTH_EAST,
        }
    }
}

/// What a set bit in the backing store means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSemantics {
    /// A set bit blocks movement; the default for internally built maps.
    SetMeansBlocked,
    /// A set bit permits movement; used by the legacy baseline files.
    SetMeansWalkable,
}

/// Read-only collision map over any tile-data backend.
#[derive(Debug)]
pub struct CollisionMap {
    data: TileDataMap,
    semantics: CollisionSemantics,
}

impl CollisionMap {
    pub fn new(data: TileDataMap, semantics: CollisionSemantics) -> Self {
        Self { data, semantics }
    }

    /// Map with blocking semantics (set bit = blocked).
    pub fn blocking(data: TileDataMap) -> Self {
        Self::new(data, CollisionSemantics::SetMeansBlocked)
    }

    /// Map with walkability semantics (set bit = pathable).
    pub fn walkable(data: TileDataMap) -> Self {
        Self::new(data, CollisionSemantics::SetMeansWalkable)
    }

    pub fn semantics(&self) -> CollisionSemantics {
        self.semantics
    }

    pub fn data(&self) -> &TileDataMap {
        &self.data
    }

    pub fn bounds(&self) -> CoordBounds {
        self.data.bounds()
    }

    #[inline]
    fn pathable_bit(&self, x: i32, y: i32, plane: i32, address: u32) -> bool {
        let set = self.data.is_bit_set(x, y, plane, address);
        match self.semantics {
            CollisionSemantics::SetMeansBlocked => !set,
            CollisionSemantics::SetMeansWalkable => set,
        }
    }

    #[inline]
    pub fn pathable_north(&self, x: i32, y: i32, plane: i32) -> bool {
        self.pathable_bit(x, y, plane, NORTH_ADDRESS)
    }

    #[inline]
    pub fn pathable_east(&self, x: i32, y: i32, plane: i32) -> bool {
        self.pathable_bit(x, y, plane, EAST_ADDRESS)
    }

    #[inline]
    pub fn pathable_south(&self, x: i32, y: i32, plane: i32) -> bool {
        self.pathable_north(x, y - 1, plane)
    }

    #[inline]
    pub fn pathable_west(&self, x: i32, y: i32, plane: i32) -> bool {
        self.pathable_east(x - 1, y, plane)
    }

    /// True when no cardinal direction out of the tile is pathable.
    pub fn is_blocked(&self, x: i32, y: i32, plane: i32) -> bool {
        !self.pathable_north(x, y, plane)
            && !self.pathable_east(x, y, plane)
            && !self.pathable_south(x, y, plane)
            && !self.pathable_west(x, y, plane)
    }

    /// Pathability toward one direction. A diagonal step needs both enclosing
    /// cardinals plus the two corner-adjacent cardinals.
    pub fn pathable(&self, direction: Direction, x: i32, y: i32, plane: i32) -> bool {
        match direction {
            Direction::North => self.pathable_north(x, y, plane),
            Direction::East => self.pathable_east(x, y, plane),
            Direction::South => self.pathable_south(x, y, plane),
            Direction::West => self.pathable_west(x, y, plane),
            Direction::NorthEast => {
                self.pathable_north(x, y, plane)
                    && self.pathable_east(x, y, plane)
                    && self.pathable_east(x, y + 1, plane)
                    && self.pathable_north(x + 1, y, plane)
            }
            Direction::NorthWest => {
                self.pathable_north(x, y, plane)
                    && self.pathable_west(x, y, plane)
                    && self.pathable_west(x, y + 1, plane)
                    && self.pathable_north(x - 1, y, plane)
            }
            Direction::SouthEast => {
                self.pathable_south(x, y, plane)
                    && self.pathable_east(x, y, plane)
                    && self.pathable_east(x, y - 1, plane)
                    && self.pathable_south(x + 1, y, plane)
            }
            Direction::SouthWest => {
                self.pathable_south(x, y, plane)
                    && self.pathable_west(x, y, plane)
                    && self.pathable_west(x, y - 1, plane)
                    && self.pathable_south(x - 1, y, plane)
            }
        }
    }

    /// Pathability flags for all 8 directions packed into one byte.
    ///
    /// Returns [`flags::NONE`] when all four cardinals are blocked; the
    /// cardinals are read once each and the diagonals derived from them.
    pub fn all(&self, x: i32, y: i32, plane: i32) -> u8 {
        let n = self.pathable_north(x, y, plane);
        let e = self.pathable_east(x, y, plane);
        let s = self.pathable_south(x, y, plane);
        let w = self.pathable_west(x, y, plane);

        if !n && !e && !s && !w {
            return flags::NONE;
        }

        let nw = n && w && self.pathable_west(x, y + 1, plane) && self.pathable_north(x - 1, y, plane);
        let ne = n && e && self.pathable_east(x, y + 1, plane) && self.pathable_north(x + 1, y, plane);
        let sw = s && w && self.pathable_west(x, y - 1, plane) && self.pathable_south(x - 1, y, plane);
        let se = s && e && self.pathable_east(x, y - 1, plane) && self.pathable_south(x + 1, y, plane);

        u8::from(nw)
            | u8::from(n) << 1
            | u8::from(ne) << 2
            | u8::from(w) << 3
            | u8::from(e) << 4
            | u8::from(sw) << 5
            | u8::from(s) << 6
            | u8::from(se) << 7
    }
}

/// Collision map under construction. Write operations are internally
/// synchronized; the coordinate semantics of the setters match the reader.
#[derive(Debug)]
pub struct CollisionMapWriter {
    data: TileDataWriter,
    semantics: CollisionSemantics,
}

impl CollisionMapWriter {
    pub fn new(data: TileDataWriter, semantics: CollisionSemantics) -> Self {
        Self { data, semantics }
    }

    /// Writer with blocking semantics, the default for fresh builds.
    pub fn blocking(data: TileDataWriter) -> Self {
        Self::new(data, CollisionSemantics::SetMeansBlocked)
    }

    pub fn data(&self) -> &TileDataWriter {
        &self.data
    }

    fn write_bit(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        address: u32,
        blocked: bool,
    ) -> Result<(), CoreError> {
        let set = match self.semantics {
            CollisionSemantics::SetMeansBlocked => blocked,
            CollisionSemantics::SetMeansWalkable => !blocked,
        };
        if set {
            self.data.set_bit(x, y, plane, address)
        } else {
            self.data.clear_bit(x, y, plane, address)
        }
    }

    pub fn north_blocking(&self, x: i32, y: i32, plane: i32, blocked: bool) -> Result<(), CoreError> {
        self.write_bit(x, y, plane, NORTH_ADDRESS, blocked)
    }

    pub fn east_blocking(&self, x: i32, y: i32, plane: i32, blocked: bool) -> Result<(), CoreError> {
        self.write_bit(x, y, plane, EAST_ADDRESS, blocked)
    }

    pub fn south_blocking(&self, x: i32, y: i32, plane: i32, blocked: bool) -> Result<(), CoreError> {
        self.north_blocking(x, y - 1, plane, blocked)
    }

    pub fn west_blocking(&self, x: i32, y: i32, plane: i32, blocked: bool) -> Result<(), CoreError> {
        self.east_blocking(x - 1, y, plane, blocked)
    }

    /// Blocks (or unblocks) all four cardinals of the tile.
    pub fn full_blocking(&self, x: i32, y: i32, plane: i32, blocked: bool) -> Result<(), CoreError> {
        self.north_blocking(x, y, plane, blocked)?;
        self.east_blocking(x, y, plane, blocked)?;
        self.south_blocking(x, y, plane, blocked)?;
        self.west_blocking(x, y, plane, blocked)
    }

    pub fn set_pathable_north(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        pathable: bool,
    ) -> Result<(), CoreError> {
        self.north_blocking(x, y, plane, !pathable)
    }

    pub fn set_pathable_east(
        &self,
        x: i32,
        y: i32,
        plane: i32,
        pathable: bool,
    ) -> Result<(), CoreError> {
        self.east_blocking(x, y, plane, !pathable)
    }

    /// Ends the build and produces the read-only map with the same semantics.
    pub fn freeze(self) -> CollisionMap {
        CollisionMap::new(self.data.freeze(), self.semantics)
    }
}
