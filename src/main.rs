use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use stocklog::{
    config::Config,
    core::store::InventoryStore,
    export,
    insight::gemini::GeminiGenerator,
    item::ItemDraft,
    runtime::handle::spawn_inventory,
    telemetry,
};

#[derive(Parser)]
#[command(name = "stocklog")]
#[command(about = "Inventory snapshot, CSV export and optional insights")]
struct Cli {
    /// JSON array of item drafts to seed the store with.
    seed: Option<PathBuf>,
    /// Directory the CSV export is written to.
    #[arg(long = "out", default_value = ".")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    insights: bool,
}

fn load_seed(path: &Path) -> Result<InventoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let drafts: Vec<ItemDraft> = serde_json::from_str(&raw).context("parsing seed drafts")?;

    let mut store = InventoryStore::new();
    // Adds prepend, so feed in reverse to keep file order on screen.
    for draft in drafts.into_iter().rev() {
        store.add(draft)?;
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let args = Cli::parse();
    let cfg = Config::from_env();

    let store = match &args.seed {
        Some(path) => load_seed(path)?,
        None => InventoryStore::new(),
    };

    let agg = store.aggregates();
    println!("Total inventory value: Ksh {}", agg.total_value.normalize());
    println!("Total items in stock:  {}", agg.total_items);
    println!("Low stock alerts:      {}", agg.low_stock_count);
    println!("Unique categories:     {}", agg.category_count);
    for total in store.category_totals() {
        println!("  {:<24} Ksh {}", total.category, total.total_value.normalize());
    }

    let path = export::write_csv(&args.out_dir, &cfg.product, store.records())?;
    println!("Exported {}", path.display());

    if args.insights {
        let generator = GeminiGenerator::new(cfg.insight.clone())?;
        let handle = spawn_inventory(store, generator, cfg.runtime.clone());
        let result = handle.generate_insights().await;
        handle.shutdown().await?;
        println!("\n{}", result?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_dir_without_insights() {
        let cli = Cli::try_parse_from(["stocklog"]).unwrap();
        assert!(cli.seed.is_none());
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(!cli.insights);
    }

    #[test]
    fn seed_out_and_insights() {
        let cli =
            Cli::try_parse_from(["stocklog", "seed.json", "--out", "exports", "--insights"]).unwrap();
        assert_eq!(cli.seed, Some(PathBuf::from("seed.json")));
        assert_eq!(cli.out_dir, PathBuf::from("exports"));
        assert!(cli.insights);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["stocklog", "--bogus"]).is_err());
    }
}
