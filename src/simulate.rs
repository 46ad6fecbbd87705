//! Headless auto-play: clicks the first available move until the click
//! budget is spent, emitting one JSON line per resolved cycle.

use std::io::Write;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use crate::core::{Board, BoardConfig};
use crate::types::{ClickOutcome, CycleReport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub seed: u32,
    pub rows: i32,
    pub columns: i32,
    pub cycles: u32,
    pub removed: usize,
    pub spawned: usize,
    pub largest_group: usize,
    pub reshuffles: u32,
    pub board_hash: u64,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Line<'a> {
    Cycle(&'a CycleReport),
    Summary(&'a SimulationSummary),
}

/// Play up to `clicks` cycles, handing each report to `on_cycle`.
///
/// Stops early only if the board has no move at all, which a reshuffle
/// cannot fix on boards with fewer than two blocks.
pub fn simulate(
    config: BoardConfig,
    clicks: u32,
    mut on_cycle: impl FnMut(&CycleReport) -> Result<()>,
) -> Result<SimulationSummary> {
    let mut board = Board::new(config)?;
    let mut summary = SimulationSummary {
        seed: config.seed,
        rows: config.rows,
        columns: config.columns,
        cycles: 0,
        removed: 0,
        spawned: 0,
        largest_group: 0,
        reshuffles: 0,
        board_hash: 0,
    };

    for _ in 0..clicks {
        let Some((target, _)) = board.hint() else {
            info!("simulate: no move left after {} cycles", summary.cycles);
            break;
        };
        match board.click(target.row, target.col)? {
            ClickOutcome::Resolved(report) => {
                summary.cycles += 1;
                summary.removed += report.removed.len();
                summary.spawned += report.spawned().count();
                summary.largest_group = summary.largest_group.max(report.removed.len());
                on_cycle(&report)?;
                board.animation_finished();
            }
            other => {
                return Err(anyhow!(
                    "simulate: move at ({}, {}) did not resolve: {:?}",
                    target.row,
                    target.col,
                    other
                ))
            }
        }
    }

    summary.reshuffles = board.reshuffles();
    summary.board_hash = board.snapshot().board_hash;
    debug!("simulate: {:?}", summary);
    Ok(summary)
}

/// [`simulate`], writing JSON lines to `out`: one `cycle` per resolved click
/// then a `summary`.
pub fn run(config: BoardConfig, clicks: u32, out: &mut impl Write) -> Result<SimulationSummary> {
    let summary = simulate(config, clicks, |report| {
        serde_json::to_writer(&mut *out, &Line::Cycle(report))?;
        out.write_all(b"\n")?;
        Ok(())
    })?;
    serde_json::to_writer(&mut *out, &Line::Summary(&summary))?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(summary)
}
