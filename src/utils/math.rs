//! # Game Mathematics
//!
//! Axis-aligned bounding boxes, point classification against them and
//! bounded Gaussian sampling.

use crate::game::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed, axis-aligned rectangle in world cells.
///
/// The box covers rows `r..=r + r_len` and columns `c..=c + c_len`, so both
/// edges are part of it. A box with `r_len == 2` spans three rows.
///
/// # Examples
///
/// ```
/// use lantern::{BoundingBox, Position};
///
/// let bb = BoundingBox::new(10, 10, 10, 10);
/// assert!(bb.is_inside(Position::new(10, 20)));
/// assert!(!bb.is_inside(Position::new(10, 21)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub r: i32,
    pub c: i32,
    pub r_len: i32,
    pub c_len: i32,
}

/// Where a point lies relative to a [`BoundingBox`].
///
/// `None` means no box was available to classify against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BBLocation {
    None,
    Inside,
    OutsideTop,
    OutsideTopLeft,
    OutsideLeft,
    OutsideBottomLeft,
    OutsideBottom,
    OutsideBottomRight,
    OutsideRight,
    OutsideTopRight,
}

impl BBLocation {
    /// True for any of the eight outside zones.
    pub fn is_outside(self) -> bool {
        !matches!(self, BBLocation::None | BBLocation::Inside)
    }
}

impl BoundingBox {
    pub fn new(r: i32, c: i32, r_len: i32, c_len: i32) -> Self {
        Self { r, c, r_len, c_len }
    }

    pub fn top(&self) -> i32 {
        self.r
    }

    pub fn bottom(&self) -> i32 {
        self.r + self.r_len
    }

    pub fn left(&self) -> i32 {
        self.c
    }

    pub fn right(&self) -> i32 {
        self.c + self.c_len
    }

    /// Top-left corner.
    pub fn pos(&self) -> Position {
        Position::new(self.r, self.c)
    }

    pub fn center(&self) -> Position {
        Position::new(self.r + self.r_len / 2, self.c + self.c_len / 2)
    }

    /// Inclusive containment test.
    pub fn is_inside(&self, pos: Position) -> bool {
        self.is_inside_offset(pos, 0, 0)
    }

    /// Containment test against the box grown by `offs_r` rows and `offs_c`
    /// columns on every side. Negative offsets shrink it.
    pub fn is_inside_offset(&self, pos: Position, offs_r: i32, offs_c: i32) -> bool {
        self.top() - offs_r <= pos.r
            && pos.r <= self.bottom() + offs_r
            && self.left() - offs_c <= pos.c
            && pos.c <= self.right() + offs_c
    }

    /// Interior test: the box shrunk by one cell on each side, i.e. the floor
    /// of a walled room.
    pub fn is_inside_interior(&self, pos: Position) -> bool {
        self.is_inside_offset(pos, -1, -1)
    }

    /// Classifies `pos` into inside or one of the eight outside zones.
    pub fn classify(&self, pos: Position) -> BBLocation {
        let above = pos.r < self.top();
        let below = pos.r > self.bottom();
        let left_of = pos.c < self.left();
        let right_of = pos.c > self.right();
        match (above, below, left_of, right_of) {
            (true, _, true, _) => BBLocation::OutsideTopLeft,
            (true, _, _, true) => BBLocation::OutsideTopRight,
            (true, _, _, _) => BBLocation::OutsideTop,
            (_, true, true, _) => BBLocation::OutsideBottomLeft,
            (_, true, _, true) => BBLocation::OutsideBottomRight,
            (_, true, _, _) => BBLocation::OutsideBottom,
            (_, _, true, _) => BBLocation::OutsideLeft,
            (_, _, _, true) => BBLocation::OutsideRight,
            _ => BBLocation::Inside,
        }
    }

    /// Number of cells covered, both edges included.
    pub fn cell_count(&self) -> usize {
        ((self.r_len + 1).max(0) * (self.c_len + 1).max(0)) as usize
    }

    /// Checks if this box shares any cell with another box.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.right() < other.left()
            || other.right() < self.left()
            || self.bottom() < other.top()
            || other.bottom() < self.top())
    }
}

/// Samples a normal distribution centred in `[lo, hi]` with the range
/// spanning six standard deviations, clamped to the range.
///
/// Uses the Box-Muller transform.
pub fn randn_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    let u1: f32 = rng.gen::<f32>().max(f32::EPSILON);
    let u2: f32 = rng.gen::<f32>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    let mean = 0.5 * (lo + hi);
    let sigma = (hi - lo) / 6.0;
    (mean + z * sigma).clamp(lo, hi)
}

/// Integer flavour of [`randn_range`].
pub fn randn_range_int<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    randn_range(rng, lo as f32, hi as f32).round() as i32
}
