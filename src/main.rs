use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

use ecoflow_lca::normalize::normalize_product;
use ecoflow_lca::{CatalogResolver, FactorTables, LcaEngine, ProductDescription, RawProduct};

#[derive(Parser)]
#[command(name = "ecoflow-lca")]
#[command(version)]
#[command(about = "Lifecycle CO2e breakdown for a product description")]
struct Cli {
    /// Product description JSON file, or `-` for stdin.
    input: PathBuf,

    /// Disposal scenario (baseline, best_case, worst_case, or any configured name).
    #[arg(short, long, default_value = "baseline")]
    scenario: String,

    /// Replace the builtin factor tables with a JSON configuration.
    #[arg(long, value_name = "PATH")]
    factors: Option<PathBuf>,

    /// Input is raw extractor output; resolve material names first.
    #[arg(long)]
    raw: bool,

    /// Print end-of-life totals for every scenario instead of the full result.
    #[arg(long)]
    compare: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> Result<(), Box<dyn Error>> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env()?
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("error,ecoflow_lca={level}"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let tables = match &cli.factors {
        Some(path) => {
            info!(path = %path.display(), "loading factor tables");
            FactorTables::load(path)?
        }
        None => FactorTables::builtin(),
    };

    let input = read_input(&cli.input)?;
    let description: ProductDescription = if cli.raw {
        let raw: RawProduct = serde_json::from_str(&input)?;
        normalize_product(&CatalogResolver::new(&tables), &raw)
    } else {
        serde_json::from_str(&input)?
    };
    debug!(?description, "product description");

    let engine = LcaEngine::new(&tables);
    let result = engine.compute(&description, &cli.scenario)?;
    if result.scenario_used != cli.scenario {
        info!(
            requested = %cli.scenario,
            used = %result.scenario_used,
            "unknown scenario, using baseline"
        );
    }

    if cli.compare {
        let eol = engine.compare_scenarios(&result.per_material_weights)?;
        for (name, value) in eol {
            println!("{name},{value:.4}");
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
