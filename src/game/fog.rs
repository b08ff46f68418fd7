//! # Fog of War
//!
//! One boolean per cell of a room's or corridor's closed bounding box.
//! Cells start fogged and are only ever revealed.

use crate::game::Position;
use crate::utils::BoundingBox;
use serde::{Deserialize, Serialize};

/// Visibility bitmap for a box of `(r_len + 1) x (c_len + 1)` cells.
///
/// Cell `(r, c)` in box-local coordinates lives at
/// `index = r * (c_len + 1) + c`. All access goes through [`FogGrid::index`].
///
/// # Examples
///
/// ```
/// use lantern::{FogGrid, Position};
///
/// // A box with r_len = 2, c_len = 4 has 3 * 5 cells.
/// let grid = FogGrid::new(2, 4);
/// assert_eq!(grid.len(), 15);
/// assert_eq!(grid.index(Position::new(2, 4)), Some(14));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogGrid {
    r_len: i32,
    c_len: i32,
    fogged: Vec<bool>,
}

impl FogGrid {
    /// Creates a fully fogged grid.
    pub fn new(r_len: i32, c_len: i32) -> Self {
        let r_len = r_len.max(0);
        let c_len = c_len.max(0);
        Self {
            r_len,
            c_len,
            fogged: vec![true; ((r_len + 1) * (c_len + 1)) as usize],
        }
    }

    /// Extent of the covered box as `(r_len, c_len)`.
    pub fn extent(&self) -> Position {
        Position::new(self.r_len, self.c_len)
    }

    pub fn len(&self) -> usize {
        self.fogged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fogged.is_empty()
    }

    /// Flat index of a box-local cell, `None` outside the box.
    pub fn index(&self, local: Position) -> Option<usize> {
        if local.r < 0 || local.c < 0 || local.r > self.r_len || local.c > self.c_len {
            return None;
        }
        Some((local.r * (self.c_len + 1) + local.c) as usize)
    }

    /// Whether a box-local cell is still fogged. Cells outside the box
    /// count as fogged.
    pub fn is_fogged(&self, local: Position) -> bool {
        self.index(local)
            .and_then(|idx| self.fogged.get(idx).copied())
            .unwrap_or(true)
    }

    /// Reveals one box-local cell. Out-of-box cells are ignored.
    pub fn reveal(&mut self, local: Position) {
        if let Some(idx) = self.index(local) {
            if let Some(cell) = self.fogged.get_mut(idx) {
                *cell = false;
            }
        }
    }

    /// True when every cell revealed in `earlier` is revealed here too.
    pub fn is_superset_of(&self, earlier: &FogGrid) -> bool {
        self.fogged.len() == earlier.fogged.len()
            && self
                .fogged
                .iter()
                .zip(&earlier.fogged)
                .all(|(now, before)| *before || !*now)
    }

    /// Reveals the sight neighbourhood of an agent at world position `pos`
    /// inside the box `bb` this grid belongs to.
    ///
    /// ```text
    ///    ###
    ///   #####
    ///    ###
    /// ```
    ///
    /// When the agent is within one cell of an edge, the edge cell in line
    /// with it is revealed too, and the box corner when it is near two edges.
    pub fn reveal_around(&mut self, bb: &BoundingBox, pos: Position) {
        let local = pos - bb.pos();

        self.reveal(local);
        for dc in -1..=1 {
            self.reveal(local + Position::new(-1, dc));
            self.reveal(local + Position::new(1, dc));
        }
        for dc in -2..=2 {
            self.reveal(local + Position::new(0, dc));
        }

        let edge_r = if pos.r - bb.top() <= 1 {
            Some(0)
        } else if bb.bottom() - pos.r <= 1 {
            Some(bb.r_len)
        } else {
            None
        };
        let edge_c = if pos.c - bb.left() <= 1 {
            Some(0)
        } else if bb.right() - pos.c <= 1 {
            Some(bb.c_len)
        } else {
            None
        };

        if let Some(r) = edge_r {
            self.reveal(Position::new(r, local.c));
        }
        if let Some(c) = edge_c {
            self.reveal(Position::new(local.r, c));
        }
        if let (Some(r), Some(c)) = (edge_r, edge_c) {
            self.reveal(Position::new(r, c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed(grid: &FogGrid) -> usize {
        let extent = grid.extent();
        (0..=extent.r)
            .flat_map(|r| (0..=extent.c).map(move |c| Position::new(r, c)))
            .filter(|pos| !grid.is_fogged(*pos))
            .count()
    }

    #[test]
    fn test_new_grid_is_fully_fogged() {
        let grid = FogGrid::new(10, 10);
        assert_eq!(grid.len(), 121);
        assert_eq!(revealed(&grid), 0);
        assert!(grid.is_fogged(Position::new(5, 5)));
    }

    #[test]
    fn test_index_bounds() {
        let grid = FogGrid::new(2, 4);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(1, 0)), Some(5));
        assert_eq!(grid.index(Position::new(3, 0)), None);
        assert_eq!(grid.index(Position::new(0, 5)), None);
        assert_eq!(grid.index(Position::new(-1, 0)), None);
    }

    #[test]
    fn test_reveal_around_centre_pattern() {
        let bb = BoundingBox::new(0, 0, 10, 10);
        let mut grid = FogGrid::new(10, 10);
        grid.reveal_around(&bb, Position::new(5, 5));

        // 3 + 5 + 3 cells
        assert_eq!(revealed(&grid), 11);
        assert!(!grid.is_fogged(Position::new(5, 3)));
        assert!(!grid.is_fogged(Position::new(5, 7)));
        assert!(!grid.is_fogged(Position::new(4, 6)));
        assert!(grid.is_fogged(Position::new(4, 7)));
        assert!(grid.is_fogged(Position::new(3, 5)));
    }

    #[test]
    fn test_reveal_around_is_clipped_to_box() {
        let bb = BoundingBox::new(10, 10, 4, 4);
        let mut grid = FogGrid::new(4, 4);
        grid.reveal_around(&bb, Position::new(10, 10));
        assert!(!grid.is_fogged(Position::new(0, 0)));
        assert!(!grid.is_fogged(Position::new(0, 2)));
        assert!(!grid.is_fogged(Position::new(1, 1)));
        assert!(revealed(&grid) <= grid.len());
    }

    #[test]
    fn test_edge_glimpse_reveals_wall_in_line() {
        let bb = BoundingBox::new(0, 0, 10, 20);
        let mut grid = FogGrid::new(10, 20);
        // One row below the top wall, far from the side walls.
        grid.reveal_around(&bb, Position::new(1, 10));
        assert!(!grid.is_fogged(Position::new(0, 10)));

        // Hugging the right wall reveals the wall cell on the same row.
        let mut grid = FogGrid::new(10, 20);
        grid.reveal_around(&bb, Position::new(5, 19));
        assert!(!grid.is_fogged(Position::new(5, 20)));
    }

    #[test]
    fn test_superset_check() {
        let bb = BoundingBox::new(0, 0, 6, 6);
        let mut grid = FogGrid::new(6, 6);
        grid.reveal_around(&bb, Position::new(2, 2));
        let before = grid.clone();
        grid.reveal_around(&bb, Position::new(4, 4));
        assert!(grid.is_superset_of(&before));
        assert!(!before.is_superset_of(&grid));
    }
}
