//! Blockpad CLI — runs a block graph headless and prints the captured output.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockpad_codegen::CodeGenerator;
use blockpad_graph::{BlockGraph, Catalog};
use blockpad_runner::{init, RunController};

#[derive(Parser, Debug)]
#[command(name = "blockpad")]
#[command(about = "Runs a blockpad block graph and prints the captured output")]
#[command(version)]
struct Args {
    /// Block graph JSON file; the built-in example graph when omitted
    #[arg(value_name = "GRAPH")]
    graph: Option<PathBuf>,

    /// Print the generated program text instead of running it
    #[arg(long)]
    dump_code: bool,

    /// Print captured output events as JSON
    #[arg(long)]
    json: bool,

    /// Show event ids and timestamps alongside the output
    #[arg(short, long)]
    verbose: bool,
}

// The pipeline is single-threaded and cooperative; one thread is plenty.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // One-time wiring: stock catalog and generators, plus the custom print
    // block. The sink is the controller's own channel.
    let mut catalog = Catalog::stock();
    let mut generator = CodeGenerator::with_builtins();
    init::install_print_block(&mut catalog, &mut generator);

    let graph = match &args.graph {
        Some(path) => load_graph(path)?,
        None => init::seed_example_graph(&catalog)?,
    };

    if args.dump_code {
        let code = generator.generate(&graph)?;
        print!("{code}");
        return Ok(());
    }

    let mut controller = RunController::new(generator);
    controller.start(&graph).await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(controller.channel().events())?
        );
        return Ok(());
    }

    for event in controller.channel().events() {
        if args.verbose {
            let millis = event
                .timestamp
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis();
            println!("[{:?} @ {millis}] {}", event.id, event.text);
        } else {
            println!("{}", event.text);
        }
    }

    Ok(())
}

fn load_graph(path: &Path) -> anyhow::Result<BlockGraph> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing graph file {}", path.display()))
}
