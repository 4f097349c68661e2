use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning from `self` to `other` would reverse the snake onto itself
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// (dx, dy) of one step; y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A cell on the board, in cell units
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Board dimensions. Edges are joined: leaving one side enters the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    pub cols: i32,
    pub rows: i32,
}

impl Board {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    pub fn capacity(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.cols && p.y < self.rows
    }

    pub fn wrap(&self, p: Position) -> Position {
        Position {
            x: p.x.rem_euclid(self.cols),
            y: p.y.rem_euclid(self.rows),
        }
    }

    /// One step from `p` in `direction`, wrapping around the edges
    pub fn step(&self, p: Position, direction: Direction) -> Position {
        self.wrap(p.moved(direction))
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for a in Direction::ALL {
            for b in Direction::ALL {
                let (ax, ay) = a.delta();
                let (bx, by) = b.delta();
                let reverse = ax == -bx && ay == -by;
                assert_eq!(a.is_opposite(b), reverse, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_wrap_all_edges() {
        let board = Board::new(40, 30);
        assert_eq!(board.step(Position::new(39, 7), Direction::Right), Position::new(0, 7));
        assert_eq!(board.step(Position::new(0, 7), Direction::Left), Position::new(39, 7));
        assert_eq!(board.step(Position::new(12, 0), Direction::Up), Position::new(12, 29));
        assert_eq!(board.step(Position::new(12, 29), Direction::Down), Position::new(12, 0));
        assert_eq!(board.step(Position::new(12, 5), Direction::Down), Position::new(12, 6));
    }

    #[test]
    fn test_cells_cover_board() {
        let board = Board::new(3, 2);
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), board.capacity());
        assert!(cells.iter().all(|c| board.contains(*c)));
        assert!(!board.contains(Position::new(3, 0)));
        assert!(!board.contains(Position::new(0, -1)));
    }
}
