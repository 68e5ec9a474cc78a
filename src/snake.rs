use std::fmt;

use Direction::*;

/// A grid coordinate. Signed so a head that leaves the board can still be represented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.unit();
        Cell { x: self.x + dx, y: self.y + dy }
    }

    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Row 0 is the top of the board, so `Up` decreases `y`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn unit(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Ordered segments, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    /// Lays the snake out along row 0 with the head at `(length - 1, 0)`, moving right.
    pub fn new(length: usize) -> Self {
        let length = length.max(1) as i32;
        let body = (0..length).rev().map(|x| Cell::new(x, 0)).collect();
        Snake { body, direction: Right }
    }

    /// Builds a snake from explicit segments, head first. `None` if `body` is empty.
    pub fn from_cells(body: Vec<Cell>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Snake { body, direction })
    }

    /// Consecutive segments are grid neighbours, or equal where the snake has
    /// just grown.
    pub fn is_contiguous(&self) -> bool {
        self.body.windows(2).all(|pair| {
            let (a, b) = (pair[0], pair[1]);
            (a.x - b.x).abs() + (a.y - b.y).abs() <= 1
        })
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Adopts `new_direction` unless it would reverse the snake onto itself.
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match (new_direction, self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => false,
            _ => {
                self.direction = new_direction;
                true
            }
        }
    }

    /// Moves one cell in the current direction: every segment takes its
    /// predecessor's place and the head steps forward. Returns the new head.
    pub fn advance(&mut self) -> Cell {
        let new_head = self.head().offset(self.direction);
        self.body.rotate_right(1);
        self.body[0] = new_head;
        new_head
    }

    /// Appends a copy of the tail; the copy separates from it on the next move.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }
}
