use std::fmt;

use super::Player;
use crate::error::{InvalidDimension, MoveError};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Pieces needed in a line to win. Also the smallest usable board side.
pub const LINE_LENGTH: usize = 4;

/// Line directions as (row step, column step): horizontal, vertical,
/// diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Fixed-size grid. Row 0 is the top, row `height - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board, rejecting sides too short to hold a line of four.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidDimension> {
        if width < LINE_LENGTH || height < LINE_LENGTH {
            return Err(InvalidDimension { width, height });
        }
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position, or `None` if it is off the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Check if a column is full. Columns off the grid count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Lowest empty row in `col`, scanning from the bottom up
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + col].is_empty())
    }

    /// Columns that can still take a piece, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece for `player` in a column, returns the row where it landed
    pub fn place(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        let row = self
            .landing_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.cells[row * self.width + col] = Cell::Occupied(player);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Whether `player` owns four cells in a row anywhere on the board
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First winning line for `player`, as (row, col) pairs from its root cell.
    ///
    /// Every cell is tried as the start of a line in each direction; a line
    /// counts only if all four coordinates are on the grid and owned by
    /// `player`.
    pub fn winning_line(&self, player: Player) -> Option<[(usize, usize); LINE_LENGTH]> {
        let target = Cell::Occupied(player);
        for row in 0..self.height {
            for col in 0..self.width {
                for &(dr, dc) in &DIRECTIONS {
                    if let Some(line) = self.line_from(row, col, dr, dc) {
                        if line.iter().all(|&(r, c)| self.get(r, c) == Some(target)) {
                            return Some(line);
                        }
                    }
                }
            }
        }
        None
    }

    /// The four coordinates starting at (row, col) along (dr, dc), if all are in bounds
    fn line_from(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
    ) -> Option<[(usize, usize); LINE_LENGTH]> {
        let mut line = [(0, 0); LINE_LENGTH];
        for (step, slot) in line.iter_mut().enumerate() {
            let r = row.checked_add_signed(dr * step as isize)?;
            let c = col.checked_add_signed(dc * step as isize)?;
            if r >= self.height || c >= self.width {
                return None;
            }
            *slot = (r, c);
        }
        Some(line)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cells[row * self.width + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Player::One) => 'X',
                    Cell::Occupied(Player::Two) => 'O',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        // 1-based labels, last digit only so wide boards stay aligned
        for col in 0..self.width {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", (col + 1) % 10)?;
        }
        writeln!(f)
    }
}
