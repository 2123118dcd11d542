use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use strandcut::catalog::ProductCatalog;
use strandcut::config::AnalysisConfig;
use strandcut::ScResult;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra product families (JSON array), merged over the built-in catalog.
    #[arg(global = true, long)]
    catalog: Option<String>,

    /// Analysis settings file (JSON). Flags given on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List product families.
    Catalog,
    /// Plank outline and core voids for a product and cut.
    Outline(cmd::outline::OutlineArgs),
    /// Strands that survive a cut.
    Active(cmd::active::ActiveArgs),
    /// Slippage statistics for a set of readings.
    Stats(cmd::stats::StatsArgs),
    /// Full analysis bundle for exporters.
    Report(cmd::report::ReportArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> ScResult<()> {
    let mut catalog = ProductCatalog::standard();
    if let Some(path) = &cli.catalog {
        info!("📂 Loading product catalog: {}", path);
        catalog.extend(ProductCatalog::load_from_file(path)?);
    }

    match &cli.command {
        Commands::Catalog => {
            reports::print_catalog(&catalog);
            Ok(())
        }
        Commands::Outline(args) => cmd::outline::run(args, &catalog),
        Commands::Active(args) => {
            let config = resolve_config(cli, &args.config, matches, "active")?;
            cmd::active::run(args, &catalog, &config)
        }
        Commands::Stats(args) => {
            let config = resolve_config(cli, &args.config, matches, "stats")?;
            cmd::stats::run(args, &config)
        }
        Commands::Report(args) => {
            let config = resolve_config(cli, &args.config, matches, "report")?;
            cmd::report::run(args, &catalog, &config)
        }
    }
}

/// File config as the base, explicit subcommand flags on top.
fn resolve_config(
    cli: &Cli,
    cli_config: &AnalysisConfig,
    matches: &ArgMatches,
    subcommand: &str,
) -> ScResult<AnalysisConfig> {
    let config = match (&cli.config, matches.subcommand_matches(subcommand)) {
        (Some(path), Some(sub_matches)) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = AnalysisConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        _ => cli_config.clone(),
    };

    config.validate()?;
    Ok(config)
}
