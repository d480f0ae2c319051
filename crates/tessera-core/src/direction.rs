use glam::IVec2;

/// One of the 8 neighbor directions on the tile grid (4 cardinals + 4 diagonals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// All 8 directions.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

/// The 4 cardinal directions, the neighborhood used by flood fill.
pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Offset vector for this direction. North = +Y, East = +X.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, 1),
            Direction::East => IVec2::new(1, 0),
            Direction::South => IVec2::new(0, -1),
            Direction::West => IVec2::new(-1, 0),
            Direction::NorthEast => IVec2::new(1, 1),
            Direction::NorthWest => IVec2::new(-1, 1),
            Direction::SouthEast => IVec2::new(1, -1),
            Direction::SouthWest => IVec2::new(-1, -1),
        }
    }

    /// Whether this direction moves along both axes.
    pub fn is_diagonal(self) -> bool {
        let o = self.offset();
        o.x != 0 && o.y != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_unique() {
        for (i, a) in ALL_DIRECTIONS.iter().enumerate() {
            for (j, b) in ALL_DIRECTIONS.iter().enumerate() {
                if i != j {
                    assert_ne!(a.offset(), b.offset(), "directions {i} and {j} share offset");
                }
            }
        }
    }

    #[test]
    fn test_no_zero_offset() {
        for dir in ALL_DIRECTIONS {
            assert_ne!(dir.offset(), IVec2::ZERO, "{dir:?} has zero offset");
        }
    }

    #[test]
    fn test_cardinals_move_one_axis() {
        for dir in CARDINAL_DIRECTIONS {
            assert!(!dir.is_diagonal(), "{dir:?} should be cardinal");
            let o = dir.offset();
            assert_eq!(o.x.abs() + o.y.abs(), 1);
        }
    }

    #[test]
    fn test_diagonals_move_both_axes() {
        for dir in ALL_DIRECTIONS.iter().filter(|d| d.is_diagonal()) {
            let o = dir.offset();
            assert_eq!(o.x.abs(), 1);
            assert_eq!(o.y.abs(), 1);
        }
    }

    #[test]
    fn test_north_is_positive_y() {
        assert_eq!(Direction::North.offset(), IVec2::new(0, 1));
        assert_eq!(Direction::South.offset(), IVec2::new(0, -1));
    }
}
