use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usagescope::analysis::{Analyzer, Ecosystem, ScanInput};
use usagescope::config::AnalysisConfig;
use usagescope::export::{export, ExportFormat};

#[derive(Parser)]
#[command(name = "usagescope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Dependency usage analyzer with waste ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a scan of imports and declared dependencies
    Analyze {
        /// Scan file (JSON) produced by a language front end
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: json, csv, markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Number of ranked dependencies to keep (0 keeps all)
        #[arg(short, long)]
        top: Option<usize>,

        /// Usage percentage below which a dependency counts as low usage
        #[arg(long)]
        threshold: Option<u8>,

        /// Override the ecosystem recorded in the scan
        #[arg(short, long)]
        ecosystem: Option<Ecosystem>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show version information
    Version,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("usagescope=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Reports go to stdout; logs stay on stderr.
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn load_config(
    path: Option<&PathBuf>,
    top: Option<usize>,
    threshold: Option<u8>,
) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(top) = top {
        config.top_n = top;
    }
    if let Some(threshold) = threshold {
        config.usage_threshold = threshold;
    }
    config.validate().context("invalid configuration")?;

    debug!(?config, "configuration loaded");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            input,
            config,
            format,
            top,
            threshold,
            ecosystem,
            verbose,
        }) => {
            init_logger(verbose);

            let config = load_config(config.as_ref(), top, threshold)?;
            let mut scan = ScanInput::from_file(&input)
                .with_context(|| format!("failed to load scan from {}", input.display()))?;
            if let Some(ecosystem) = ecosystem {
                scan.ecosystem = ecosystem;
            }

            let outcome = Analyzer::new(config).analyze(&scan);

            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(format, &outcome, &mut writer).context("failed to write report")?;
            writer.flush()?;
        }
        Some(Commands::Version) => {
            println!("usagescope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("usagescope - Dependency Usage Analyzer");
            println!("Run 'usagescope analyze --input scan.json' to analyze a scan");
            println!("Run 'usagescope --help' for more information");
        }
    }

    Ok(())
}
