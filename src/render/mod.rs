use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;
use chrono::{DateTime, Local};

use crate::data::StyleClass;
use crate::data::themes::Palette;
use crate::engine::Calculator;
use crate::personality::{ALIGNMENTS, Alignment, RenderButton};

pub const PICKER_Y: i32 = 3;
pub const PICKER_X: i32 = 2;
pub const PICKER_CELL_W: i32 = 8;

pub const DISPLAY_X: i32 = 2;
pub const DISPLAY_Y: i32 = 5;
pub const DISPLAY_W: i32 = 36;

pub const GRID_X: i32 = 3;
pub const GRID_Y: i32 = 10;
pub const GRID_COLS: i32 = 4;
pub const CELL_W: i32 = 9;
pub const CELL_H: i32 = 3;

pub const CHAT_X: i32 = 42;
pub const CHAT_Y: i32 = 5;
pub const CHAT_W: i32 = 36;
pub const CHAT_H: i32 = 24;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    pub stamp: DateTime<Local>,
}

impl ChatEntry {
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            stamp: Local::now(),
        }
    }

    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            stamp: Local::now(),
        }
    }
}

pub fn draw_alignment_picker(ctx: &mut BTerm, active: Alignment, palette: &Palette) {
    for (idx, alignment) in ALIGNMENTS.iter().enumerate() {
        let x = PICKER_X + idx as i32 * PICKER_CELL_W;
        let (fg, marker) = if *alignment == active {
            (palette.accent, '*')
        } else {
            (palette.secondary, '·')
        };
        ctx.set(x, PICKER_Y, fg, RGB::named(BLACK), marker as u16);
        ctx.print_color(
            x + 1,
            PICKER_Y,
            fg,
            RGB::named(BLACK),
            format!("F{}:{}", idx + 1, alignment.abbrev()),
        );
    }
}

pub fn draw_display(ctx: &mut BTerm, calc: &Calculator, palette: &Palette) {
    ctx.draw_box(
        DISPLAY_X,
        DISPLAY_Y,
        DISPLAY_W,
        3,
        palette.primary,
        RGB::named(BLACK),
    );

    let history = match (calc.previous(), calc.pending_operator()) {
        (Some(previous), Some(op)) => {
            format!("{} {}", crate::engine::format_number(previous), op.symbol())
        }
        _ => String::new(),
    };
    ctx.print_color(
        DISPLAY_X + 2,
        DISPLAY_Y + 1,
        palette.secondary,
        RGB::named(BLACK),
        &history,
    );

    // value right-aligned inside the box
    let value = calc.display();
    let value_x = DISPLAY_X + DISPLAY_W - 1 - value.len() as i32;
    ctx.print_color(
        value_x.max(DISPLAY_X + 1),
        DISPLAY_Y + 2,
        palette.display_content,
        palette.display,
        value,
    );
}

fn style_color(style: StyleClass, palette: &Palette) -> RGB {
    match style {
        StyleClass::Digit => palette.buttons_content,
        StyleClass::Operator => palette.accent,
        StyleClass::Function => palette.secondary,
        StyleClass::Equals => palette.primary,
    }
}

pub fn draw_buttons(ctx: &mut BTerm, pad: &[RenderButton], palette: &Palette) {
    for (idx, button) in pad.iter().enumerate() {
        let col = idx as i32 % GRID_COLS;
        let row = idx as i32 / GRID_COLS;
        let x = GRID_X + col * CELL_W;
        let y = GRID_Y + row * CELL_H;
        let fg = style_color(button.style, palette);
        ctx.draw_box(x, y, CELL_W - 1, CELL_H - 1, palette.buttons, RGB::named(BLACK));
        let label: String = button.label.chars().take((CELL_W - 2) as usize).collect();
        let label_x = x + ((CELL_W - label.len() as i32) / 2).max(1);
        ctx.print_color(label_x, y + 1, fg, RGB::named(BLACK), &label);
    }
}

/// Maps a mouse point to a button index in the grid, if it lands on one.
pub fn button_at(count: usize, mouse: Point) -> Option<usize> {
    if mouse.x < GRID_X || mouse.y < GRID_Y {
        return None;
    }
    let col = (mouse.x - GRID_X) / CELL_W;
    let row = (mouse.y - GRID_Y) / CELL_H;
    if col >= GRID_COLS {
        return None;
    }
    let idx = (row * GRID_COLS + col) as usize;
    (idx < count).then_some(idx)
}

/// Maps a mouse point to an alignment picker slot.
pub fn alignment_at(mouse: Point) -> Option<usize> {
    if mouse.y != PICKER_Y || mouse.x < PICKER_X {
        return None;
    }
    let idx = ((mouse.x - PICKER_X) / PICKER_CELL_W) as usize;
    (idx < ALIGNMENTS.len()).then_some(idx)
}

pub fn draw_chat(ctx: &mut BTerm, chat: &[ChatEntry], palette: &Palette) {
    ctx.draw_box(
        CHAT_X,
        CHAT_Y,
        CHAT_W,
        CHAT_H,
        palette.primary,
        RGB::named(BLACK),
    );
    ctx.print_color(
        CHAT_X + 2,
        CHAT_Y + 1,
        palette.accent,
        RGB::named(BLACK),
        "Chat",
    );

    let max_rows = (CHAT_H - 3) as usize / 2;
    for (row, entry) in chat.iter().take(max_rows).enumerate() {
        let y = CHAT_Y + 2 + row as i32 * 2;
        let (fg, who) = match entry.sender {
            Sender::User => (palette.secondary, "you"),
            Sender::Bot => (palette.display_content, "bot"),
        };
        let header = format!("[{}] {who}:", entry.stamp.format("%H:%M:%S"));
        ctx.print_color(CHAT_X + 2, y, fg, RGB::named(BLACK), &header);
        let line: String = entry.text.chars().take((CHAT_W - 4) as usize).collect();
        ctx.print_color(CHAT_X + 3, y + 1, fg, RGB::named(BLACK), &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_hit_test_maps_cells_to_indices() {
        // center of the first cell
        assert_eq!(button_at(19, Point::new(GRID_X + 4, GRID_Y + 1)), Some(0));
        // last cell of the first row
        assert_eq!(
            button_at(19, Point::new(GRID_X + 3 * CELL_W + 1, GRID_Y + 1)),
            Some(3)
        );
        // first cell of the second row
        assert_eq!(
            button_at(19, Point::new(GRID_X + 1, GRID_Y + CELL_H + 1)),
            Some(4)
        );
        // the 19th button sits at row 4, col 2
        assert_eq!(
            button_at(
                19,
                Point::new(GRID_X + 2 * CELL_W + 1, GRID_Y + 4 * CELL_H + 1)
            ),
            Some(18)
        );
    }

    #[test]
    fn button_hit_test_rejects_outside_points() {
        assert_eq!(button_at(19, Point::new(0, 0)), None);
        assert_eq!(button_at(19, Point::new(GRID_X + GRID_COLS * CELL_W + 1, GRID_Y)), None);
        // below the last occupied cell
        assert_eq!(button_at(19, Point::new(GRID_X + 3 * CELL_W + 1, GRID_Y + 4 * CELL_H + 1)), None);
    }

    #[test]
    fn picker_hit_test_spans_nine_slots() {
        assert_eq!(alignment_at(Point::new(PICKER_X, PICKER_Y)), Some(0));
        assert_eq!(
            alignment_at(Point::new(PICKER_X + 8 * PICKER_CELL_W + 2, PICKER_Y)),
            Some(8)
        );
        assert_eq!(
            alignment_at(Point::new(PICKER_X + 9 * PICKER_CELL_W, PICKER_Y)),
            None
        );
        assert_eq!(alignment_at(Point::new(PICKER_X, PICKER_Y + 1)), None);
    }
}
