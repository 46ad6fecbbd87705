//! BoardView: maps a [`BoardSnapshot`] (plus an optional [`Playback`]) into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). The same [`BoardLayout`] that places cells on
//! screen also maps mouse coordinates back to board cells, so hit-testing and
//! drawing cannot disagree.

use tui_blast_core::BoardSnapshot;
use tui_blast_types::{ColorId, Pos, Tier};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::playback::Playback;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

const PALETTE: [Rgb; 8] = [
    Rgb::new(220, 80, 80),
    Rgb::new(80, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(80, 220, 220),
    Rgb::new(255, 165, 0),
    Rgb::new(230, 230, 230),
];

pub fn color_rgb(color: ColorId) -> Rgb {
    PALETTE[color as usize % PALETTE.len()]
}

/// Two-character marker drawn inside a block for its group tier.
pub fn tier_glyph(tier: Tier) -> &'static str {
    match tier {
        Tier::Default => "  ",
        Tier::Tier1 => "<>",
        Tier::Tier2 => "[]",
        Tier::Tier3 => "##",
    }
}

/// Screen placement of the board for one viewport.
///
/// `origin_*` is the top-left of the first cell, inside the border. It can be
/// negative when the board is taller than the terminal; the board is then
/// bottom-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_w: u16,
    pub cell_h: u16,
    pub rows: i32,
    pub columns: i32,
}

impl BoardLayout {
    /// Board cell under the terminal position, if any.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Pos> {
        let dx = x as i32 - self.origin_x;
        let dy = y as i32 - self.origin_y;
        if dx < 0 || dy < 0 {
            return None;
        }
        let pos = Pos::new(dy / self.cell_h as i32, dx / self.cell_w as i32);
        (pos.row < self.rows && pos.col < self.columns).then_some(pos)
    }

    /// Board row drawn on the first terminal line. Negative when there is
    /// room above the board.
    pub fn viewport_top_row(&self) -> i32 {
        (-self.origin_y).div_euclid(self.cell_h as i32)
    }

    fn screen_x(&self, col: i32) -> i32 {
        self.origin_x + col * self.cell_w as i32
    }

    fn screen_y(&self, row: f32) -> i32 {
        self.origin_y + (row * self.cell_h as f32).round() as i32
    }

    fn inner_h(&self) -> i32 {
        self.rows * self.cell_h as i32
    }
}

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps cells roughly square and leaves room for tier markers.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
        }
    }

    /// Where a `rows x columns` board lands in `viewport`. The last terminal
    /// line is reserved for the status line.
    pub fn layout(&self, rows: i32, columns: i32, viewport: Viewport) -> BoardLayout {
        let frame_w = columns * self.cell_w as i32 + 2;
        let frame_h = rows * self.cell_h as i32 + 2;
        let usable_h = viewport.height as i32 - 1;

        let start_x = ((viewport.width as i32 - frame_w) / 2).max(0);
        let start_y = if frame_h <= usable_h {
            (usable_h - frame_h) / 2
        } else {
            usable_h - frame_h
        };

        BoardLayout {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            rows,
            columns,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Cells whose block is still in flight are drawn empty; the block is
    /// drawn at its interpolated position instead.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        playback: Option<&Playback>,
        cursor: Option<Pos>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> BoardLayout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(snap.rows, snap.columns, viewport);
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(
            fb,
            layout.origin_x - 1,
            layout.origin_y - 1,
            snap.columns * self.cell_w as i32 + 2,
            layout.inner_h() + 2,
            border,
        );

        for row in 0..snap.rows {
            for col in 0..snap.columns {
                let pos = Pos::new(row, col);
                let in_flight = playback.is_some_and(|p| p.is_animating(pos));
                match snap.color(row, col) {
                    Some(color) if !in_flight => {
                        let tier = snap.tier(row, col).unwrap_or_default();
                        self.draw_block(fb, &layout, row as f32, col, color, tier, false);
                    }
                    _ => self.draw_empty(fb, &layout, pos),
                }
            }
        }

        if let Some(playback) = playback {
            for sprite in playback.sprites() {
                self.draw_block(
                    fb,
                    &layout,
                    sprite.row,
                    sprite.col,
                    sprite.color,
                    Tier::Default,
                    sprite.popping,
                );
            }
        }

        if let Some(cursor) = cursor {
            self.draw_cursor(fb, &layout, cursor);
        }

        self.draw_status(fb, snap, viewport);
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &BoardSnapshot,
        playback: Option<&Playback>,
        cursor: Option<Pos>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, playback, cursor, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        row: f32,
        col: i32,
        color: ColorId,
        tier: Tier,
        popping: bool,
    ) {
        let mut bg = color_rgb(color);
        if popping {
            bg = bg.darken(140);
        }
        let fill = Style::new(bg.darken(90), bg).glyph(' ');
        let top = layout.screen_y(row);
        let left = layout.screen_x(col);

        for dy in 0..self.cell_h as i32 {
            // Sprites entering from above stay inside the frame.
            if top + dy < layout.origin_y || top + dy >= layout.origin_y + layout.inner_h() {
                continue;
            }
            for dx in 0..self.cell_w as i32 {
                put(fb, left + dx, top + dy, fill);
            }
        }

        let mid = top + (self.cell_h as i32 - 1) / 2;
        if mid >= layout.origin_y && mid < layout.origin_y + layout.inner_h() {
            let marker_x = left + (self.cell_w as i32 - 2) / 2;
            let style = Style::new(bg.darken(90), bg).bold();
            for (i, ch) in tier_glyph(tier).chars().enumerate() {
                put(fb, marker_x + i as i32, mid, style.glyph(ch));
            }
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &BoardLayout, pos: Pos) {
        let style = Style::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let left = layout.screen_x(pos.col);
        let top = layout.screen_y(pos.row as f32);
        for dy in 0..self.cell_h as i32 {
            for dx in 0..self.cell_w as i32 {
                put(fb, left + dx, top + dy, style.glyph(' '));
            }
        }
        put(fb, left + (self.cell_w as i32 - 1) / 2, top, style.glyph('·'));
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &BoardLayout, cursor: Pos) {
        let on_board = (0..layout.rows).contains(&cursor.row) && (0..layout.columns).contains(&cursor.col);
        if !on_board {
            return;
        }
        let left = layout.screen_x(cursor.col);
        let right = left + self.cell_w as i32 - 1;
        let top = layout.screen_y(cursor.row as f32);
        let bottom = top + self.cell_h as i32 - 1;
        let corners = [
            (left, top, '▛'),
            (right, top, '▜'),
            (left, bottom, '▙'),
            (right, bottom, '▟'),
        ];
        for (x, y, ch) in corners {
            let bg = fb
                .get(x.max(0) as u16, y.max(0) as u16)
                .map(|g| g.style.bg)
                .unwrap_or(BOARD_BG);
            put(fb, x, y, Style::new(Rgb::new(255, 255, 255), bg).bold().glyph(ch));
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, viewport: Viewport) {
        if viewport.height == 0 {
            return;
        }
        let y = viewport.height - 1;
        let label = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = Style::new(Rgb::new(160, 160, 160), Rgb::new(0, 0, 0)).dim();

        let status = format!(
            "cycle {}  seed {}  {}",
            snap.cycle,
            snap.seed,
            snap.phase.as_str()
        );
        fb.put_str(0, y, &status, label);
        let help = "click/space blast  r restart  q quit";
        let help_x = viewport.width.saturating_sub(help.len() as u16);
        if help_x as usize > status.len() + 1 {
            fb.put_str(help_x, y, help, value);
        }
    }
}

fn put(fb: &mut FrameBuffer, x: i32, y: i32, glyph: Glyph) {
    if x >= 0 && y >= 0 && x <= u16::MAX as i32 && y <= u16::MAX as i32 {
        fb.set(x as u16, y as u16, glyph);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    put(fb, x, y, style.glyph('┌'));
    put(fb, right, y, style.glyph('┐'));
    put(fb, x, bottom, style.glyph('└'));
    put(fb, right, bottom, style.glyph('┘'));
    for dx in x + 1..right {
        put(fb, dx, y, style.glyph('─'));
        put(fb, dx, bottom, style.glyph('─'));
    }
    for dy in y + 1..bottom {
        put(fb, x, dy, style.glyph('│'));
        put(fb, right, dy, style.glyph('│'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_blast_core::{Board, BoardConfig, Grid};

    fn three_by_three() -> Board {
        let grid = Grid::from_color_rows(&[[0, 0, 1], [0, 1, 1], [2, 2, 2]]).unwrap();
        Board::from_grid(BoardConfig::default().with_size(3, 3).with_colors(3), grid).unwrap()
    }

    #[test]
    fn layout_centers_board_and_hit_tests_cells() {
        let view = BoardView::new(4, 2);
        let layout = view.layout(3, 3, Viewport::new(40, 21));
        // frame 14x8, usable height 20
        assert_eq!(layout.origin_x, 14);
        assert_eq!(layout.origin_y, 7);

        assert_eq!(layout.cell_at(14, 7), Some(Pos::new(0, 0)));
        assert_eq!(layout.cell_at(17, 8), Some(Pos::new(0, 0)));
        assert_eq!(layout.cell_at(18, 9), Some(Pos::new(1, 1)));
        assert_eq!(layout.cell_at(25, 12), Some(Pos::new(2, 2)));
        assert_eq!(layout.cell_at(26, 12), None);
        assert_eq!(layout.cell_at(13, 7), None);
        assert_eq!(layout.cell_at(14, 13), None);
    }

    #[test]
    fn viewport_top_row_reflects_space_above_board() {
        let view = BoardView::new(4, 2);
        let roomy = view.layout(3, 3, Viewport::new(40, 21));
        assert_eq!(roomy.viewport_top_row(), -4);

        let cramped = view.layout(10, 3, Viewport::new(40, 11));
        // frame 22 tall in 10 usable lines: bottom aligned, top rows cut off
        assert_eq!(cramped.origin_y, -11);
        assert_eq!(cramped.viewport_top_row(), 5);
    }

    #[test]
    fn render_draws_tier_markers_and_status() {
        let board = three_by_three();
        let view = BoardView::new(4, 2);
        let viewport = Viewport::new(40, 21);
        let fb = view.render(&board.snapshot(), None, None, viewport);

        // Row 0 middle line: (0,0) and (0,1) are in the size-3 group, Default tier.
        let line = fb.row_text(7);
        assert!(line.contains('│'));
        assert!(!line.contains("<>"));
        assert!(fb.row_text(20).starts_with("cycle 0  seed"));
        assert!(fb.row_text(20).contains("idle"));

        let tiered = view.render(&tiered_snapshot(), None, None, viewport);
        assert!(tiered.row_text(7).contains("<>"));
    }

    fn tiered_snapshot() -> BoardSnapshot {
        // A five-block group is Tier1 with the default thresholds.
        let grid = Grid::from_color_rows(&[[0, 0, 0], [0, 0, 1], [2, 1, 2]]).unwrap();
        Board::from_grid(BoardConfig::default().with_size(3, 3).with_colors(3), grid)
            .unwrap()
            .snapshot()
    }

    #[test]
    fn in_flight_cells_are_drawn_empty_until_landed() {
        let mut board = three_by_three();
        let report = match board.click(0, 0).unwrap() {
            tui_blast_types::ClickOutcome::Resolved(report) => report,
            other => panic!("unexpected outcome {:?}", other),
        };
        let mut playback = Playback::new(&report).with_settled_colors(&board.snapshot());
        let view = BoardView::new(4, 2);
        let viewport = Viewport::new(40, 21);

        let mid_flight = view.render(&board.snapshot(), Some(&playback), None, viewport);
        // (0,0) is refilled from above; its dot is still showing.
        assert_eq!(mid_flight.get(15, 7).map(|g| g.ch), Some('·'));
        assert!(mid_flight.row_text(20).contains("settling"));

        playback.tick(10_000);
        board.animation_finished();
        let landed = view.render(&board.snapshot(), Some(&playback), None, viewport);
        assert_eq!(landed.get(15, 7).map(|g| g.ch), Some(' '));
        assert!(landed.row_text(20).contains("idle"));
    }

    #[test]
    fn cursor_marks_cell_corners() {
        let board = three_by_three();
        let view = BoardView::new(4, 2);
        let fb = view.render(&board.snapshot(), None, Some(Pos::new(1, 1)), Viewport::new(40, 21));
        assert_eq!(fb.get(18, 9).map(|g| g.ch), Some('▛'));
        assert_eq!(fb.get(21, 10).map(|g| g.ch), Some('▟'));
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(color_rgb(0), color_rgb(PALETTE.len() as ColorId));
    }
}
