use std::env;

use anyhow::Context;
use lostfound_cli::{describe, flag_value, init_tracing, load_board, load_settings, positional, print_matches};
use lostfound_core::config::expand_path;

const DEFAULT_TOP: usize = 5;

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {prog} <match|search|stats> <items.json|dir> [args...]");
    eprintln!("  {prog} match <items> <id> [--top N] [--json]");
    eprintln!("  {prog} search <items> <term>");
    eprintln!("  {prog} stats <items>");
    std::process::exit(1);
}

fn parse_args() -> (String, String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        usage(&prog);
    }
    let cmd = args.remove(0);
    (prog, cmd, args)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;
    let (prog, cmd, args) = parse_args();
    let pos = positional(&args);
    let Some(items) = pos.first().map(expand_path) else { usage(&prog) };

    match cmd.as_str() {
        "match" => {
            let Some(id) = pos.get(1) else { usage(&prog) };
            let top = flag_value(&args, "--top")
                .map(str::parse::<usize>)
                .transpose()
                .context("--top expects a number")?
                .unwrap_or(DEFAULT_TOP);
            let board = load_board(&items, &settings)?;
            let matches = board.matches_for(id)?;
            let shown = &matches[..matches.len().min(top)];
            if args.iter().any(|a| a == "--json") {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                let record = board.get(id).context("item vanished from board")?;
                println!("🔍 Matches for {}", describe(record));
                println!("Threshold: {:.2}  showing {} of {}", settings.matching.threshold, shown.len(), matches.len());
                print_matches(shown);
            }
        }
        "search" => {
            let term = pos[1..].join(" ");
            let mut board = load_board(&items, &settings)?;
            let results = board.search(&term);
            println!("🔍 Found {} items for: \"{}\"", results.len(), term.trim());
            for record in results {
                println!("  {}", describe(record));
            }
        }
        "stats" => {
            let board = load_board(&items, &settings)?;
            println!("📊 {} lost, {} found", board.lost().len(), board.found().len());
            println!("{}", serde_json::to_string_pretty(&board.index_stats())?);
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            usage(&prog);
        }
    }
    Ok(())
}
