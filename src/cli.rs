//! Command-line parsing and process setup shared by both run modes.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use env_logger::{Env, Target};
use log::LevelFilter;

use crate::core::BoardConfig;

/// Number of cycles `simulate` plays when `--clicks` is not given.
pub const DEFAULT_SIMULATE_CLICKS: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u32>,
    pub rows: Option<i32>,
    pub columns: Option<i32>,
    pub colors: Option<u8>,
    pub log: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(BoardOptions),
    Simulate { board: BoardOptions, clicks: u32 },
}

impl Command {
    pub fn board(&self) -> &BoardOptions {
        match self {
            Command::Play(board) | Command::Simulate { board, .. } => board,
        }
    }

    pub fn is_headless(&self) -> bool {
        matches!(self, Command::Simulate { .. })
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let (simulate, rest) = match args.first().map(String::as_str) {
        Some("simulate") => (true, &args[1..]),
        _ => (false, args),
    };
    let mode = if simulate { "simulate" } else { "play" };

    let mut board = BoardOptions::default();
    let mut clicks = DEFAULT_SIMULATE_CLICKS;
    let mut i = 0usize;
    while i < rest.len() {
        let flag = rest[i].as_str();
        match flag {
            "--config" => board.config = Some(PathBuf::from(take_value(rest, &mut i, mode)?)),
            "--log" => board.log = Some(PathBuf::from(take_value(rest, &mut i, mode)?)),
            "--seed" => board.seed = Some(parse_value(rest, &mut i, mode)?),
            "--rows" => board.rows = Some(parse_value(rest, &mut i, mode)?),
            "--columns" => board.columns = Some(parse_value(rest, &mut i, mode)?),
            "--colors" => board.colors = Some(parse_value(rest, &mut i, mode)?),
            "--clicks" if simulate => clicks = parse_value(rest, &mut i, mode)?,
            other => return Err(anyhow!("{}: unknown argument: {}", mode, other)),
        }
        i += 1;
    }

    Ok(if simulate {
        Command::Simulate { board, clicks }
    } else {
        Command::Play(board)
    })
}

/// Value following the flag at `*i`; advances `*i` onto it.
fn take_value<'a>(args: &'a [String], i: &mut usize, mode: &str) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{}: missing value for {}", mode, flag))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, mode: &str) -> Result<T> {
    let flag = args[*i].clone();
    let v = take_value(args, i, mode)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("{}: invalid {} value: {}", mode, flag, v))
}

impl BoardOptions {
    /// Config file (if any) with command-line overrides applied, validated.
    pub fn board_config(&self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BoardConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(colors) = self.colors {
            config.color_count = colors;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<BoardConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Install the global logger.
///
/// The interactive runner owns the terminal, so it only logs when given a
/// file. Headless runs fall back to stderr.
pub fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating log {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if headless => {
            builder.target(Target::Stderr);
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder
        .try_init()
        .map_err(|e| anyhow!("logger already initialised: {}", e))
}
