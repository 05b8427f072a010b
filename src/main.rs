use anyhow::{Context, Result};

use claude_usageline::cache::UsageCache;
use claude_usageline::cli::Args;
use claude_usageline::display::{self, FALLBACK_TEXT};
use claude_usageline::models::StatusInput;
use claude_usageline::settings;
use claude_usageline::usage_api::fetch_usage;
use claude_usageline::utils::{claude_paths, read_stdin};

fn main() {
    let args = Args::parse();
    display::set_colors(!args.no_color && std::env::var_os("NO_COLOR").is_none());

    // A statusline must never break the host UI: any failure collapses to a
    // single fallback line and the process still exits 0.
    if let Err(err) = run(&args) {
        println!("{FALLBACK_TEXT} · {err:#}");
    }
}

fn run(args: &Args) -> Result<()> {
    let stdin = read_stdin()?;
    if stdin.is_empty() {
        println!("{FALLBACK_TEXT}");
        return Ok(());
    }
    let input: StatusInput = serde_json::from_slice(&stdin).context("parse status json")?;

    let paths = claude_paths(args.claude_config_dir.as_deref());

    // An empty payload renders the bare fallback label; skip the usage
    // lookup entirely so it cannot trigger a network call.
    let usage = if input.model.display_name.trim().is_empty() {
        None
    } else {
        UsageCache::new().resolve(|| fetch_usage(&paths))
    };
    let settings = settings::load(&paths);

    for line in display::render_status(&input, usage.as_ref(), &settings, args.bar_width) {
        println!("{line}");
    }
    Ok(())
}
