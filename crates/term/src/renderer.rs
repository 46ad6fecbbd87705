//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! re-emitted. A size change (or [`TerminalRenderer::invalidate`]) forces a
//! full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller is expected to clear
    /// and redraw; no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) => prev,
            None => FrameBuffer::new(0, 0),
        };

        self.buf.clear();
        let diff_base = (prev.width() == fb.width() && prev.height() == fb.height())
            .then_some(&prev);
        encode_frame_into(diff_base, fb, &mut self.buf)?;
        self.flush_buf()?;

        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode `next` as terminal commands into `out`.
///
/// With `prev` only the changed runs are emitted; without it the screen is
/// cleared and every glyph is printed.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Style> = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if current != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` runs of glyphs that differ from `prev`, or whole rows when
/// there is nothing to diff against.
fn changed_runs(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    let Some(prev) = prev else {
        return (0..h).filter(|_| w > 0).map(|y| (0, y, w)).collect();
    };

    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);
    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !differs(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, Style::default().glyph('X'));
        }
        b.set(5, 1, Style::default().glyph('Y'));

        assert_eq!(changed_runs(Some(&a), &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn full_redraw_covers_every_row() {
        let b = FrameBuffer::new(4, 3);
        assert_eq!(changed_runs(None, &b), vec![(0, 0, 4), (0, 1, 4), (0, 2, 4)]);
    }

    #[test]
    fn identical_frames_emit_no_glyphs() {
        let mut a = FrameBuffer::new(3, 1);
        a.put_str(0, 0, "abc", Style::default());
        let b = a.clone();

        let mut out = Vec::new();
        encode_frame_into(Some(&a), &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains("abc"));

        out.clear();
        encode_frame_into(None, &b, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("abc"));
    }
}
