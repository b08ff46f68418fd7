//! # Viewport
//!
//! The world-space rectangle shown on screen and the policies that move it
//! along with the player.

use crate::game::Position;
use crate::{LanternError, LanternResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the viewport follows the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenScrollingMode {
    /// Recentered on the player every tick
    #[default]
    AlwaysCentered,
    /// Recentered once the player enters the margin along the edges
    PageWise,
    /// Shifted by one screen once the player leaves it
    WhenOutsideScreen,
}

impl FromStr for ScreenScrollingMode {
    type Err = LanternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "centered" | "always_centered" => Ok(Self::AlwaysCentered),
            "page" | "page_wise" => Ok(Self::PageWise),
            "outside" | "when_outside_screen" => Ok(Self::WhenOutsideScreen),
            other => Err(LanternError::InvalidConfiguration(format!(
                "unknown scrolling mode '{}'",
                other
            ))),
        }
    }
}

/// A screen-sized window onto the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// World position drawn at screen cell (0, 0)
    pub top_left: Position,
    /// Rows and columns on screen
    pub size: Position,
}

impl Viewport {
    pub fn new(size: Position) -> Self {
        Self {
            top_left: Position::origin(),
            size,
        }
    }

    pub fn center_on(&mut self, pos: Position) {
        self.top_left = pos - self.size / 2;
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.contains_with_margin(pos, 0, 0)
    }

    /// Like [`Viewport::contains`] with the window shrunk by `margin_r`
    /// rows and `margin_c` columns on every side.
    pub fn contains_with_margin(&self, pos: Position, margin_r: i32, margin_c: i32) -> bool {
        let local = pos - self.top_left;
        local.r >= margin_r
            && local.c >= margin_c
            && local.r < self.size.r - margin_r
            && local.c < self.size.c - margin_c
    }

    pub fn to_screen(&self, world_pos: Position) -> Position {
        world_pos - self.top_left
    }

    /// Moves the window according to `mode` so that it keeps up with `pos`.
    pub fn follow(&mut self, pos: Position, mode: ScreenScrollingMode, scroll_fraction: f32) {
        match mode {
            ScreenScrollingMode::AlwaysCentered => self.center_on(pos),
            ScreenScrollingMode::PageWise => {
                let margin_r = (self.size.r as f32 * scroll_fraction).round() as i32;
                let margin_c = (self.size.c as f32 * scroll_fraction).round() as i32;
                if !self.contains_with_margin(pos, margin_r, margin_c) {
                    self.center_on(pos);
                }
            }
            ScreenScrollingMode::WhenOutsideScreen => {
                let local = self.to_screen(pos);
                if local.r < 0 {
                    self.top_left.r -= self.size.r;
                } else if local.r >= self.size.r {
                    self.top_left.r += self.size.r;
                } else if local.c < 0 {
                    self.top_left.c -= self.size.c;
                } else if local.c >= self.size.c {
                    self.top_left.c += self.size.c;
                }
            }
        }
    }
}

/// Checks a page-wise scroll fraction.
pub fn validate_scroll_fraction(fraction: f32) -> LanternResult<()> {
    if fraction.is_finite() && fraction > 0.0 && fraction < 1.0 {
        Ok(())
    } else {
        Err(LanternError::InvalidConfiguration(format!(
            "scroll fraction must lie in (0, 1), got {}",
            fraction
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Viewport {
        let mut vp = Viewport::new(Position::new(20, 40));
        vp.center_on(Position::new(50, 50));
        vp
    }

    #[test]
    fn test_centering() {
        let vp = screen();
        assert_eq!(vp.top_left, Position::new(40, 30));
        assert_eq!(vp.to_screen(Position::new(50, 50)), Position::new(10, 20));
    }

    #[test]
    fn test_page_wise_waits_for_margin() {
        let mut vp = screen();
        // Margin is 4 rows and 8 columns.
        vp.follow(Position::new(55, 60), ScreenScrollingMode::PageWise, 0.2);
        assert_eq!(vp.top_left, Position::new(40, 30));
        vp.follow(Position::new(56, 60), ScreenScrollingMode::PageWise, 0.2);
        assert_eq!(vp.top_left, Position::new(46, 40));
    }

    #[test]
    fn test_outside_screen_shifts_one_page_on_exit_axis() {
        let mut vp = screen();
        vp.follow(Position::new(59, 69), ScreenScrollingMode::WhenOutsideScreen, 0.2);
        assert_eq!(vp.top_left, Position::new(40, 30));
        vp.follow(Position::new(50, 70), ScreenScrollingMode::WhenOutsideScreen, 0.2);
        assert_eq!(vp.top_left, Position::new(40, 70));
        vp.follow(Position::new(39, 75), ScreenScrollingMode::WhenOutsideScreen, 0.2);
        assert_eq!(vp.top_left, Position::new(20, 70));
    }

    #[test]
    fn test_mode_parsing_and_fraction_bounds() {
        assert_eq!("page".parse::<ScreenScrollingMode>().unwrap(), ScreenScrollingMode::PageWise);
        assert_eq!(
            "Outside".parse::<ScreenScrollingMode>().unwrap(),
            ScreenScrollingMode::WhenOutsideScreen
        );
        assert!("sideways".parse::<ScreenScrollingMode>().is_err());
        assert!(validate_scroll_fraction(0.2).is_ok());
        assert!(validate_scroll_fraction(0.0).is_err());
        assert!(validate_scroll_fraction(1.5).is_err());
    }
}
