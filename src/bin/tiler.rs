use std::process;

use anyhow::{Context, bail};
use clap::Parser;
use tiler::common::config::Config;
use tiler::common::log;
use tiler::host::Host;
use tiler::host::virtual_host::VirtualHost;
use tiler::layout_engine::{Arrange, EvenlySplitLayout, TileCommand, TileEngine};

/// Tile panes on a simulated display surface, cycling through the
/// configured strategies on each invocation.
#[derive(Parser)]
struct Cli {
    /// Register a pane with this display name. Repeat for more panes; the
    /// order given is the host's pane list order.
    #[arg(long = "pane", value_name = "NAME")]
    panes: Vec<String>,

    /// Number of panes shown before tiling, stacked in list order.
    #[arg(long, default_value_t = 1)]
    visible: usize,

    /// Pane to focus before tiling.
    #[arg(long, value_name = "NAME")]
    focus: Option<String>,

    /// Number of panes to tile. Defaults to the number of visible regions.
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Run this strategy instead of the next one in rotation.
    #[arg(long)]
    strategy: Option<String>,

    /// Step backwards through the rotation.
    #[arg(long)]
    reverse: bool,

    /// Number of consecutive invocations.
    #[arg(long, default_value_t = 1)]
    times: usize,

    /// Surface size in character cells.
    #[arg(long, default_value_t = 160)]
    width: u32,

    #[arg(long, default_value_t = 48)]
    height: u32,

    /// Print the configured rotation and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    sigpipe::reset();
    let opt = Cli::parse();
    log::init_logging();

    if let Err(e) = run(opt) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(opt: Cli) -> anyhow::Result<()> {
    let config = Config::builtin();
    let issues = config.validate();
    if !issues.is_empty() {
        bail!("invalid configuration:\n{}", issues.join("\n"));
    }
    let mut engine = TileEngine::from_config(&config)?;

    if opt.list {
        let upcoming = engine.rotation().upcoming().map(|s| s.name().to_string());
        for strategy in engine.rotation().strategies() {
            let marker = if Some(strategy.name()) == upcoming.as_deref() { "*" } else { " " };
            println!("{} {:<14} {:?}", marker, strategy.name(), strategy.fetcher());
        }
        return Ok(());
    }

    let mut host = build_host(&opt)?;
    println!("{}", host.draw_tree());

    let command = TileCommand {
        window_count: opt.count,
        strategy: opt.strategy.clone(),
        reverse: opt.reverse,
    };
    for _ in 0..opt.times {
        engine.handle_command(&mut host, &command)?;
        let name = engine.rotation().last_executed().map(|s| s.name()).unwrap_or("-");
        println!("== {}", name);
        println!("{}", host.draw_tree());
    }
    Ok(())
}

fn build_host(opt: &Cli) -> anyhow::Result<VirtualHost> {
    let mut host = VirtualHost::new(opt.width, opt.height);
    let panes: Vec<_> = opt.panes.iter().map(|name| host.add_pane(name.as_str())).collect();

    let shown = &panes[..opt.visible.max(1).min(panes.len())];
    EvenlySplitLayout::wide()
        .apply(&mut host, shown)
        .context("could not show initial panes")?;

    if let Some(name) = &opt.focus {
        let Some(pane) = host.pane_by_name(name) else {
            bail!("no pane named {name:?}");
        };
        host.focus_pane(pane)?;
    }
    tracing::debug!(visible = ?host.visible_panes(), "initial surface");
    Ok(host)
}
