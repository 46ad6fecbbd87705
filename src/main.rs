//! Terminal blast runner (default binary).
//!
//! `tui-blast [--seed N] [--rows N] [--columns N] [--colors N] [--config PATH] [--log PATH]`
//! plays interactively; `tui-blast simulate [...] [--clicks N]` auto-plays
//! headless and prints JSON lines.
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, trace};

use tui_blast::cli::{init_logging, parse_args, Command};
use tui_blast::core::{Board, BoardConfig};
use tui_blast::input::{handle_key_event, handle_mouse_event, should_quit, Cursor};
use tui_blast::simulate;
use tui_blast::term::{BoardView, FrameBuffer, Playback, TerminalRenderer, Viewport};
use tui_blast::types::{BoardAction, ClickOutcome, Pos, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    init_logging(command.board().log.as_deref(), command.is_headless())?;
    let config = command.board().board_config()?;

    match command {
        Command::Simulate { clicks, .. } => {
            let mut out = io::stdout().lock();
            simulate::run(config, clicks, &mut out)?;
            Ok(())
        }
        Command::Play(_) => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run(&mut term, config);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn run(term: &mut TerminalRenderer, config: BoardConfig) -> Result<()> {
    let mut board = Board::new(config)?;
    info!(
        "started {}x{} board with {} colors, seed {}",
        board.rows(),
        board.columns(),
        board.color_count(),
        board.seed()
    );

    let view = BoardView::default();
    let mut cursor = Cursor::new(board.rows(), board.columns());
    let mut playback: Option<Playback> = None;
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let layout = view.render_into(
            &board.snapshot(),
            playback.as_ref(),
            Some(cursor.pos()),
            Viewport::new(w, h),
            &mut fb,
        );
        board.set_viewport_top(Some(layout.viewport_top_row()));
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    handle_key_event(key).and_then(|cmd| cursor.apply(cmd))
                }
                Event::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, |x, y| layout.cell_at(x, y));
                    if let Some(BoardAction::Select { row, col }) = action {
                        cursor.set(Pos::new(row, col));
                    }
                    action
                }
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            match action {
                Some(BoardAction::Select { row, col }) => match board.click(row, col)? {
                    ClickOutcome::Resolved(report) => {
                        let settled = board.snapshot();
                        playback = Some(Playback::new(&report).with_settled_colors(&settled));
                    }
                    other => trace!("click ({}, {}): {:?}", row, col, other),
                },
                Some(BoardAction::Restart) => {
                    let seed = board.seed().wrapping_add(1);
                    board.restart(seed)?;
                    playback = None;
                    cursor.resize(board.rows(), board.columns());
                    info!("restarted with seed {}", seed);
                }
                None => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let dt_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            let landed = playback.as_mut().is_some_and(|p| p.tick(dt_ms));
            if landed {
                playback = None;
                board.animation_finished();
            }
        }
    }
}
