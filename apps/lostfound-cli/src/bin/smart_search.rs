use std::env;

use anyhow::Context;
use lostfound_cli::{flag_value, init_tracing, load_board, load_settings, positional, print_matches};
use lostfound_core::config::expand_path;
use lostfound_core::types::{Category, ItemKind, ItemRecord};

const PROBE_ID: &str = "smart-search";

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();
    let pos = positional(&args);
    let (Some(items), Some(name), Some(category)) =
        (pos.first(), flag_value(&args, "--name"), flag_value(&args, "--category"))
    else {
        eprintln!("Usage: lostfound-smart-search <items> --name <name> --category <category> [--description <text>] [--color <color>] [--kind lost|found]");
        eprintln!("Example: lostfound-smart-search demo_data/items.json --name 'iPhone' --category electronics --color black");
        std::process::exit(1);
    };

    let category: Category = category.parse()?;
    let kind = match flag_value(&args, "--kind") {
        Some("found") => ItemKind::Found,
        Some("lost") | None => ItemKind::Lost,
        Some(other) => anyhow::bail!("--kind must be lost or found, got '{other}'"),
    };
    let probe = ItemRecord::new(PROBE_ID, name, category, kind)
        .context("building probe")?
        .with_description(flag_value(&args, "--description").unwrap_or_default())
        .with_color(flag_value(&args, "--color").unwrap_or_default());

    let settings = load_settings()?;
    let board = load_board(&expand_path(items), &settings)?;
    let matches = board.check(&probe);
    println!("🔍 lostfound-smart-search\n==================");
    println!("Looking for {} reports like: {} ({})", kind.opposite(), probe.name(), probe.category());
    print_matches(&matches);
    Ok(())
}
