//! Shared plumbing for the lostfound binaries.

use std::path::Path;

use anyhow::Context;
use lostfound_board::DefaultBoard;
use lostfound_core::config::{Config, Settings};
use lostfound_core::item_loader::ItemLoader;
use lostfound_core::types::{ItemRecord, MatchCandidate};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for results. `RUST_LOG`
/// overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load().context("loading config")?;
    Ok(config.settings()?)
}

pub fn load_board(items: &Path, settings: &Settings) -> anyhow::Result<DefaultBoard> {
    let records = ItemLoader::new()
        .load_path(items)
        .with_context(|| format!("loading items from {}", items.display()))?;
    let mut board = DefaultBoard::from_settings(settings);
    let submitted = board.submit_all(records)?;
    tracing::info!(items = submitted, "board ready");
    Ok(board)
}

/// Value following `flag`, if both are present.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).map(String::as_str)
}

/// Arguments that are neither flags nor flag values.
pub fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if arg == "--json" {
            continue;
        } else if arg.starts_with("--") {
            skip_next = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

pub fn percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

pub fn describe(record: &ItemRecord) -> String {
    let mut line = format!("[{}] {} ({}, {})", record.id(), record.name(), record.category(), record.kind());
    if !record.color().is_empty() {
        line.push_str(&format!(" color={}", record.color()));
    }
    line
}

pub fn print_matches(matches: &[MatchCandidate<'_>]) {
    if matches.is_empty() {
        println!("No likely matches.");
        return;
    }
    for (i, m) in matches.iter().enumerate() {
        println!("\n  {}. {}  score={}", i + 1, describe(m.record), percent(m.score));
        println!(
            "     name={}  description={}  color={}  same category={}",
            percent(m.name_score),
            percent(m.desc_score),
            percent(m.color_score),
            m.category_match
        );
        if !m.record.description().is_empty() {
            println!("     📝 {}", m.record.description());
        }
    }
}
