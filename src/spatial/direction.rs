//! Compass directions for neighbor stepping and adjacency lookup

/// One of the four axis-aligned neighbor directions
///
/// Rows grow downward and columns grow rightward, so `Up` steps to a smaller
/// row index. Each direction knows its grid offset, its inverse, and a dense
/// index used to address per-direction adjacency masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One row up (row - 1)
    Up,
    /// One row down (row + 1)
    Down,
    /// One column left (col - 1)
    Left,
    /// One column right (col + 1)
    Right,
}

impl Direction {
    /// All four directions in adjacency-index order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The (row, col) step toward the neighboring cell
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::Up => [-1, 0],
            Self::Down => [1, 0],
            Self::Left => [0, -1],
            Self::Right => [0, 1],
        }
    }

    /// The direction pointing back from the neighbor to this cell
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Dense index into per-direction adjacency storage
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}
