#![deny(unsafe_code)]
pub mod commands;
mod version;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());
use commands::collapse_cells::CollapseCells;
use commands::collapse_pooled::CollapsePooled;
use commands::collapse_umis::CollapseUmis;
use commands::command::Command;
use commands::filter_cells::FilterCells;
use commands::pipeline::Pipeline;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::{debug, info};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
enum Subcommand {
    // Collapsing
    #[command(display_order = 1)]
    CollapseUmis(CollapseUmis),
    #[command(display_order = 2)]
    CollapsePooled(CollapsePooled),
    #[command(display_order = 3)]
    CollapseCells(CollapseCells),

    // Filtering
    #[command(display_order = 4)]
    FilterCells(FilterCells),

    // Workflows
    #[command(display_order = 5)]
    Pipeline(Pipeline),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!("Running umi-collapse version {}", version::VERSION.as_str());
    debug!("Command line: {}", std::env::args().collect::<Vec<_>>().join(" "));
    args.subcommand.execute()
}
