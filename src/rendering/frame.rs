//! # Frame Primitives
//!
//! Box, fog and panel drawing shared by every frame. Callers draw back to
//! front; each write replaces what is already in the cell.

use crate::game::{Direction, FogGrid, Position};
use crate::rendering::{Color, DrawSurface, FloorType, RoomStyle, Style, WallType};

const FOG_GLYPH: char = '.';
const FOG_STYLE: Style = Style::new(Color::Black, Color::Black);
const PANEL_STYLE: Style = Style::new(Color::White, Color::DarkGray);
const PANEL_HIGHLIGHT: Style = Style::new(Color::Black, Color::Yellow);

/// Draws a box whose top-left wall corner sits at `top_left` and whose
/// opposite corner is `r_len` rows and `c_len` columns away.
///
/// Interior cells get the floor fill. When the style casts shadows, the
/// interior band along the wall facing the sun is drawn with the shadow
/// style instead.
pub fn draw_box<S: DrawSurface + ?Sized>(
    surface: &mut S,
    top_left: Position,
    r_len: i32,
    c_len: i32,
    style: &RoomStyle,
    shadow_dir: Direction,
) {
    let glyphs = style.wall_type.glyphs();
    let shadow = if style.casts_shadow() {
        shadow_dir.to_delta()
    } else {
        Position::origin()
    };

    for r in 0..=r_len {
        for c in 0..=c_len {
            let pos = Position::new(top_left.r + r, top_left.c + c);
            let on_row_edge = r == 0 || r == r_len;
            let on_col_edge = c == 0 || c == c_len;
            if on_row_edge && on_col_edge {
                surface.put(pos, glyphs.corner, style.wall_style);
            } else if on_row_edge {
                surface.put(pos, glyphs.horizontal, style.wall_style);
            } else if on_col_edge {
                surface.put(pos, glyphs.vertical, style.wall_style);
            } else {
                let in_shadow = (shadow.c < 0 && c == c_len - 1)
                    || (shadow.c > 0 && c == 1)
                    || (shadow.r < 0 && r == r_len - 1)
                    || (shadow.r > 0 && r == 1);
                let fill_style = if in_shadow {
                    style.shadow_style()
                } else {
                    style.fill_style()
                };
                surface.put(pos, style.fill_glyph(), fill_style);
            }
        }
    }
}

/// Blanks every still-fogged cell of a box.
pub fn draw_fog<S: DrawSurface + ?Sized>(surface: &mut S, top_left: Position, fog: &FogGrid) {
    let extent = fog.extent();
    for r in 0..=extent.r {
        for c in 0..=extent.c {
            let local = Position::new(r, c);
            if fog.is_fogged(local) {
                surface.put(top_left + local, FOG_GLYPH, FOG_STYLE);
            }
        }
    }
}

/// Draws the inventory panel over the map with one line per entry.
pub fn draw_inventory<S: DrawSurface + ?Sized>(
    surface: &mut S,
    entries: &[String],
    selected: usize,
) {
    let rows = surface.rows();
    let cols = surface.cols();
    let panel = RoomStyle {
        wall_type: WallType::Line,
        wall_style: PANEL_STYLE,
        floor_type: FloorType::None,
        is_underground: false,
    };
    draw_panel_box(surface, Position::new(2, 2), rows - 5, cols - 5, &panel);

    let title = "Inventory";
    let title_c = (cols - title.len() as i32) / 2;
    surface.put_str(Position::new(4, title_c), title, PANEL_STYLE);

    if entries.is_empty() {
        surface.put_str(Position::new(6, 5), "(empty)", PANEL_STYLE);
        return;
    }
    for (idx, entry) in entries.iter().enumerate() {
        let row = 6 + idx as i32;
        if row >= rows - 4 {
            break;
        }
        let style = if idx == selected {
            PANEL_HIGHLIGHT
        } else {
            PANEL_STYLE
        };
        surface.put_str(Position::new(row, 5), entry, style);
    }
}

fn draw_panel_box<S: DrawSurface + ?Sized>(
    surface: &mut S,
    top_left: Position,
    r_len: i32,
    c_len: i32,
    style: &RoomStyle,
) {
    let glyphs = style.wall_type.glyphs();
    for r in 0..=r_len {
        for c in 0..=c_len {
            let pos = Position::new(top_left.r + r, top_left.c + c);
            let on_row_edge = r == 0 || r == r_len;
            let on_col_edge = c == 0 || c == c_len;
            let glyph = match (on_row_edge, on_col_edge) {
                (true, true) => glyphs.corner,
                (true, false) => glyphs.horizontal,
                (false, true) => glyphs.vertical,
                (false, false) => ' ',
            };
            surface.put(pos, glyph, style.wall_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::TextSurface;

    fn lit_style() -> RoomStyle {
        RoomStyle {
            wall_type: WallType::Hash,
            wall_style: Style::new(Color::DarkGray, Color::LightGray),
            floor_type: FloorType::Sand,
            is_underground: false,
        }
    }

    #[test]
    fn test_box_walls_and_fill() {
        let mut surface = TextSurface::new(10, 10);
        draw_box(&mut surface, Position::new(1, 1), 4, 5, &lit_style(), Direction::None);
        let lines = surface.lines();
        assert_eq!(&lines[1][1..7], "######");
        assert_eq!(&lines[3][1..7], "#::::#");
        assert_eq!(&lines[5][1..7], "######");
        assert_eq!(surface.glyph_at(Position::new(6, 1)), Some(' '));
    }

    #[test]
    fn test_shadow_band_faces_the_sun() {
        let style = lit_style();
        let mut surface = TextSurface::new(10, 10);
        // Sun in the east casts shadows westwards from the east wall.
        draw_box(&mut surface, Position::origin(), 4, 4, &style, Direction::West);
        assert_eq!(surface.style_at(Position::new(2, 3)), Some(style.shadow_style()));
        assert_eq!(surface.style_at(Position::new(2, 1)), Some(style.fill_style()));
    }

    #[test]
    fn test_underground_box_has_no_shadow() {
        let style = RoomStyle {
            is_underground: true,
            ..lit_style()
        };
        let mut surface = TextSurface::new(10, 10);
        draw_box(&mut surface, Position::origin(), 4, 4, &style, Direction::West);
        assert_eq!(surface.style_at(Position::new(2, 3)), Some(style.fill_style()));
    }

    #[test]
    fn test_fog_blanks_only_fogged_cells() {
        let mut surface = TextSurface::new(6, 6);
        draw_box(&mut surface, Position::origin(), 3, 3, &lit_style(), Direction::None);
        let mut fog = FogGrid::new(3, 3);
        fog.reveal(Position::new(1, 1));
        draw_fog(&mut surface, Position::origin(), &fog);
        assert_eq!(surface.glyph_at(Position::new(1, 1)), Some(':'));
        assert_eq!(surface.glyph_at(Position::new(2, 2)), Some('.'));
        assert_eq!(surface.count_glyph('.'), 15);
    }

    #[test]
    fn test_inventory_panel_lists_entries() {
        let mut surface = TextSurface::new(20, 40);
        let entries = vec!["Key 3".to_string(), "Lamp (isotropic)".to_string()];
        draw_inventory(&mut surface, &entries, 1);
        let lines = surface.lines();
        assert!(lines[4].contains("Inventory"));
        assert!(lines[6].contains("Key 3"));
        assert_eq!(surface.style_at(Position::new(7, 5)), Some(PANEL_HIGHLIGHT));
        assert_eq!(surface.glyph_at(Position::new(2, 2)), Some('+'));
    }
}
