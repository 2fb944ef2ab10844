// CLASSIFICATION: COMMUNITY
// Filename: cli.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! `qca-pins` command line.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::warn;

use crate::board::{self, BoardDescriptor, BoardId};
use crate::config::BoardConfig;
use crate::gpio::shared_dev_mem;

/// CLI arguments for `qca-pins`.
#[derive(Debug, Parser)]
#[command(name = "qca-pins", about = "8devices pin capability inspector", version = "0.1")]
pub struct Cli {
    /// TOML file overriding probe paths.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip detection and use this board name.
    #[arg(long)]
    pub board: Option<String>,

    /// Incremental verbosity (`-v`, `-vv`, etc.)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every physical pin with its resolved capabilities.
    List,
    /// Print detected i2c, spi and uart buses.
    Buses,
    /// Read the gpio on a physical pin.
    Read { pin: usize },
    /// Drive the gpio on a physical pin.
    Write {
        pin: usize,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        value: u8,
    },
}

impl Cli {
    /// Log filter implied by `-v` flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn open_board(cli: &Cli) -> Result<BoardDescriptor> {
    let config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let Some(name) = &cli.board else {
        return Ok(board::qca_8devices(&config)?);
    };
    let id = BoardId::from_board_name(name).ok_or_else(|| anyhow!("unknown board {name}"))?;
    let window = id.definition().soc.window(config.map_base);
    let map = shared_dev_mem(&config.mem_path, window)?;
    Ok(board::build_board(id, &config, map)?)
}

fn list(board: &BoardDescriptor) {
    println!("{} ({} gpio)", board.platform_name, board.gpio_count);
    for (index, pin) in board.pins.iter().enumerate().skip(1) {
        println!(
            "{index:>3}  {:<12} gpio {:>2}  {}",
            pin.name,
            pin.gpio,
            pin.caps.labels().join(",")
        );
    }
}

fn buses(board: &BoardDescriptor) {
    println!("i2c: {:?}", board.buses.i2c);
    println!("spi: {:?}", board.buses.spi);
    for uart in &board.buses.uart {
        println!("uart: {}", uart.display());
    }
}

fn access(board: &BoardDescriptor, pin: usize, value: Option<bool>) -> Result<u8> {
    let mut ctx = board.gpio_context(pin)?;
    if let Err(e) = board.mmap_setup(&mut ctx, true) {
        warn!("mapped access unavailable, using {:?}: {e}", board.backend().kind());
        let backend = board.backend();
        return match value {
            Some(v) => backend.write(ctx.gpio(), v).map(|_| u8::from(v)),
            None => backend.read(ctx.gpio()),
        }
        .with_context(|| format!("gpio {}", ctx.gpio()));
    }
    let result = match (ctx.mapped(), value) {
        (Some(mapped), Some(v)) => mapped.write(v).map(|_| u8::from(v)),
        (Some(mapped), None) => mapped.read(),
        (None, _) => Err(crate::error::BoardError::InvalidHandle("mapped gpio missing")),
    };
    board.mmap_setup(&mut ctx, false)?;
    Ok(result?)
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let board = open_board(&cli)?;
    match cli.cmd {
        Command::List => list(&board),
        Command::Buses => buses(&board),
        Command::Read { pin } => println!("{}", access(&board, pin, None)?),
        Command::Write { pin, value } => {
            access(&board, pin, Some(value == 1))?;
        }
    }
    Ok(())
}
