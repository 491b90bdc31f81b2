//! Board geometry: lines, half-edges and the host grid.
//!
//! Every box owns four half-edges numbered `4x + 20y + k` (`k`: top, right,
//! bottom, left). A drawn line removes the half-edge on each side of it.

pub mod graph;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

pub use graph::{Component, Position};

pub const BOX_X: usize = 5;
pub const BOX_Y: usize = 5;
pub const DOT_X: usize = BOX_X + 1;
pub const DOT_Y: usize = BOX_Y + 1;
pub const NUM_BOXES: usize = BOX_X * BOX_Y;
pub const NUM_EDGE: usize = NUM_BOXES * 4;
pub const NUM_LINES: usize = BOX_X * DOT_Y + BOX_Y * DOT_X;
/// Capacity of the component list. Normal play stays within 9; border-to-border
/// chains use two of the 20 border sides each, so 10 chains plus two small
/// interior loops is the worst case.
pub const MAX_COMPONENTS: usize = 12;

pub type EdgeId = i8;
pub const DEADEND: EdgeId = -1;
pub const REMOVED: EdgeId = -2;

/// Host grid indexed `[x][y][orientation]`; `true` means drawn.
pub type BoardLines = [[[bool; 2]; DOT_Y]; DOT_X];

pub fn empty_board() -> BoardLines {
    [[[false; 2]; DOT_Y]; DOT_X]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_u8(self) -> u8 {
        match self { Orientation::Horizontal => 0, Orientation::Vertical => 1 }
    }
}

/// One line of the lattice, addressed the way the host addresses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub x: u8,
    pub y: u8,
    pub orientation: Orientation,
}

impl Line {
    pub fn new(x: u8, y: u8, orientation: u8) -> Result<Self, BoardError> {
        let (xu, yu) = (x as usize, y as usize);
        let ok = match orientation {
            0 => xu < BOX_X && yu < DOT_Y,
            1 => xu < DOT_X && yu < BOX_Y,
            _ => false,
        };
        if !ok { return Err(BoardError::OutOfRange { x, y, orientation }); }
        let orientation = if orientation == 0 { Orientation::Horizontal } else { Orientation::Vertical };
        Ok(Self { x, y, orientation })
    }

    /// Rechecks a line built from its public fields.
    pub fn validate(self) -> Result<Self, BoardError> {
        Line::new(self.x, self.y, self.orientation.as_u8())
    }

    pub const fn horizontal(x: u8, y: u8) -> Self { Self { x, y, orientation: Orientation::Horizontal } }
    pub const fn vertical(x: u8, y: u8) -> Self { Self { x, y, orientation: Orientation::Vertical } }

    /// Match-harness numbering: horizontal `x*6 + y`, vertical `30 + x*5 + y`.
    pub fn index(self) -> usize {
        let (x, y) = (self.x as usize, self.y as usize);
        match self.orientation {
            Orientation::Horizontal => x * DOT_Y + y,
            Orientation::Vertical => BOX_X * DOT_Y + x * BOX_Y + y,
        }
    }

    pub fn from_index(idx: usize) -> Result<Self, BoardError> {
        if idx >= NUM_LINES { return Err(BoardError::BadIndex(idx)); }
        let split = BOX_X * DOT_Y;
        if idx < split {
            Ok(Self::horizontal((idx / DOT_Y) as u8, (idx % DOT_Y) as u8))
        } else {
            let i = idx - split;
            Ok(Self::vertical((i / BOX_Y) as u8, (i % BOX_Y) as u8))
        }
    }

    pub fn is_drawn(self, board: &BoardLines) -> bool {
        board[self.x as usize][self.y as usize][self.orientation.as_u8() as usize]
    }

    pub fn set(self, board: &mut BoardLines, drawn: bool) {
        board[self.x as usize][self.y as usize][self.orientation.as_u8() as usize] = drawn;
    }

    /// The boxes on either side of this line, as `(x, y)`.
    pub fn boxes(self) -> impl Iterator<Item = (usize, usize)> {
        let (x, y) = (self.x as usize, self.y as usize);
        let (a, b) = match self.orientation {
            Orientation::Horizontal => ((y < BOX_Y).then_some((x, y)), (y > 0).then(|| (x, y - 1))),
            Orientation::Vertical => ((x < BOX_X).then_some((x, y)), (x > 0).then(|| (x - 1, y))),
        };
        a.into_iter().chain(b)
    }

    /// The half-edges that sit on this line (one at the border, two inside).
    pub fn edges(self) -> impl Iterator<Item = EdgeId> {
        let (x, y) = (self.x as usize, self.y as usize);
        let (a, b) = match self.orientation {
            Orientation::Horizontal => (
                (y < BOX_Y).then(|| edge_id(x, y, 0)),
                (y > 0).then(|| edge_id(x, y - 1, 2)),
            ),
            Orientation::Vertical => (
                (x < BOX_X).then(|| edge_id(x, y, 3)),
                (x > 0).then(|| edge_id(x - 1, y, 1)),
            ),
        };
        a.into_iter().chain(b)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.orientation.as_u8())
    }
}

impl FromStr for Line {
    type Err = BoardError;

    /// Accepts `"x,y,o"` (spaces allowed) or a bare line index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty()).collect();
        let nums: Option<Vec<u8>> = parts.iter().map(|p| p.parse::<u8>().ok()).collect();
        match nums.as_deref() {
            Some([idx]) => Line::from_index(*idx as usize),
            Some([x, y, o]) => Line::new(*x, *y, *o),
            _ => Err(BoardError::Parse(s.to_string())),
        }
    }
}

pub const fn edge_id(x: usize, y: usize, side: usize) -> EdgeId {
    (4 * x + 4 * BOX_X * y + side) as EdgeId
}

/// The line a half-edge lies on.
pub fn edge_line(e: EdgeId) -> Line {
    debug_assert!(e >= 0 && (e as usize) < NUM_EDGE, "not a half-edge: {e}");
    let b = e as usize / 4;
    let (x, y) = ((b % BOX_X) as u8, (b / BOX_X) as u8);
    match e % 4 {
        0 => Line::horizontal(x, y),
        1 => Line::vertical(x + 1, y),
        2 => Line::horizontal(x, y + 1),
        _ => Line::vertical(x, y),
    }
}

pub fn all_lines() -> impl Iterator<Item = Line> {
    (0..NUM_LINES).filter_map(|i| Line::from_index(i).ok())
}

/// Number of real lines drawn on the grid; cells that name no line are ignored.
pub fn drawn_count(board: &BoardLines) -> u32 {
    all_lines().filter(|l| l.is_drawn(board)).count() as u32
}
