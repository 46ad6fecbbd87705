//! Time-based replay of a [`CycleReport`].
//!
//! Each move becomes a track: it waits for its column's stagger delay, then
//! slides from `from` to `to` with a cubic ease-out. Spawned blocks also
//! "pop" in (drawn dim) for the first few milliseconds of their track.
//!
//! The board has already committed the final grid by the time a report
//! exists, so playback only decides where to draw the blocks in flight.

use tui_blast_core::BoardSnapshot;
use tui_blast_types::{
    BlockId, BlockMove, ColorId, CycleReport, Pos, COLUMN_STAGGER_MS, DROP_SPEED_ROWS_PER_SEC,
    MAX_DROP_MS, MIN_DROP_MS, SPAWN_POP_MS,
};

/// Travel time for a drop of `rows`, clamped to the drop window.
pub fn drop_duration_ms(rows: u32) -> u32 {
    let ms = (rows as f32 / DROP_SPEED_ROWS_PER_SEC * 1000.0).round() as u32;
    ms.clamp(MIN_DROP_MS, MAX_DROP_MS)
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    mv: BlockMove,
    delay_ms: u32,
    duration_ms: u32,
}

impl Track {
    fn end_ms(&self) -> u32 {
        self.delay_ms + self.duration_ms
    }

    fn progress(&self, elapsed_ms: u32) -> f32 {
        let local = elapsed_ms.saturating_sub(self.delay_ms);
        (local as f32 / self.duration_ms as f32).min(1.0)
    }
}

/// A block drawn at a fractional row while its track runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub block: BlockId,
    pub color: ColorId,
    pub row: f32,
    pub col: i32,
    /// Spawned block still popping in
    pub popping: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Playback {
    tracks: Vec<Track>,
    elapsed_ms: u32,
    total_ms: u32,
}

impl Playback {
    pub fn new(report: &CycleReport) -> Self {
        let tracks: Vec<Track> = report
            .moves
            .iter()
            .map(|mv| Track {
                mv: *mv,
                delay_ms: mv.to.col.max(0) as u32 * COLUMN_STAGGER_MS,
                duration_ms: drop_duration_ms(mv.distance()),
            })
            .collect();
        let total_ms = tracks.iter().map(Track::end_ms).max().unwrap_or(0);
        Self {
            tracks,
            elapsed_ms: 0,
            total_ms,
        }
    }

    /// Take sprite colors from the settled board.
    ///
    /// Move colors are recorded before a reshuffle recolors the board, so a
    /// cycle that ended in one would otherwise land with the old colors.
    pub fn with_settled_colors(mut self, settled: &BoardSnapshot) -> Self {
        for track in &mut self.tracks {
            if let Some(color) = settled.color(track.mv.to.row, track.mv.to.col) {
                track.mv.color = color;
            }
        }
        self
    }

    /// Advance the clock. Returns true once every track has landed.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.total_ms);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn total_ms(&self) -> u32 {
        self.total_ms
    }

    /// Whether the block that will rest at `pos` is still in flight.
    pub fn is_animating(&self, pos: Pos) -> bool {
        self.tracks
            .iter()
            .any(|t| t.mv.to == pos && self.elapsed_ms < t.end_ms())
    }

    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.tracks
            .iter()
            .filter(|t| self.elapsed_ms < t.end_ms())
            .map(|t| {
                let eased = ease_out_cubic(t.progress(self.elapsed_ms));
                let from = t.mv.from.row as f32;
                let to = t.mv.to.row as f32;
                let since_start = self.elapsed_ms.saturating_sub(t.delay_ms);
                Sprite {
                    block: t.mv.block,
                    color: t.mv.color,
                    row: from + (to - from) * eased,
                    col: t.mv.to.col,
                    popping: t.mv.is_new && since_start < SPAWN_POP_MS,
                }
            })
    }
}
