use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use gp_app::{AppError, AppResult};
use gp_catalog::QueryKind;
use gp_project::TransformDef;
use gp_query::TimeWindow;
use tracing::debug;

#[derive(Parser)]
#[command(name = "gp-cli")]
#[command(about = "genpost CLI - post-processing of fuel cycle simulation output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an analysis file
    Validate {
        /// Path to the analysis YAML or JSON file
        analysis_path: PathBuf,
    },
    /// Run an analysis file: query, transforms, plot and export
    Run {
        /// Path to the analysis YAML or JSON file
        analysis_path: PathBuf,
    },
    /// Execute a query against a store and print a summary of the result
    Inspect {
        /// Simulation output database
        store: PathBuf,
        /// Query kind: material, resource or contaminants
        #[arg(long)]
        kind: QueryKind,
        #[command(flatten)]
        window: WindowArgs,
        /// Transforms to apply in order (repeatable)
        #[arg(long, value_enum)]
        collapse: Vec<TransformArg>,
    },
    /// Print annual totals of resources received by an agent
    ReceivedBy {
        /// Simulation output database
        store: PathBuf,
        /// Receiving agent ID
        agent: i64,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// List repository components and their types
    Components {
        /// Simulation output database
        store: PathBuf,
    },
}

#[derive(clap::Args)]
struct WindowArgs {
    /// First month of the window (inclusive)
    #[arg(long, default_value_t = 0)]
    t0: i64,
    /// End of the window in months (exclusive)
    #[arg(long, default_value_t = 1200)]
    tf: i64,
}

impl WindowArgs {
    fn window(&self) -> AppResult<TimeWindow> {
        Ok(TimeWindow::new(self.t0, self.tf)?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TransformArg {
    Isotopes,
    Senders,
    Receivers,
    SendersAndReceivers,
    Time,
}

impl From<TransformArg> for TransformDef {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Isotopes => TransformDef::CollapseIsotopes,
            TransformArg::Senders => TransformDef::CollapseSenders,
            TransformArg::Receivers => TransformDef::CollapseReceivers,
            TransformArg::SendersAndReceivers => TransformDef::CollapseSendersAndReceivers,
            TransformArg::Time => TransformDef::IntegrateOverTime,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { analysis_path } => cmd_validate(&analysis_path),
        Commands::Run { analysis_path } => cmd_run(&analysis_path),
        Commands::Inspect {
            store,
            kind,
            window,
            collapse,
        } => cmd_inspect(&store, kind, &window, &collapse),
        Commands::ReceivedBy {
            store,
            agent,
            window,
        } => cmd_received_by(&store, agent, &window),
        Commands::Components { store } => cmd_components(&store),
    }
}

fn cmd_validate(analysis_path: &Path) -> AppResult<()> {
    println!("Validating analysis: {}", analysis_path.display());
    let analysis = gp_app::load_analysis(analysis_path)?;
    gp_app::validate_analysis(&analysis)?;
    println!("✓ Analysis '{}' is valid", analysis.name);
    Ok(())
}

fn cmd_run(analysis_path: &Path) -> AppResult<()> {
    println!("Running analysis: {}", analysis_path.display());
    let outcome = gp_app::run_analysis_file(analysis_path)?;

    println!("✓ Analysis '{}' completed", outcome.name);
    println!(
        "  Rows read: {} ({} skipped)",
        outcome.report.rows_read, outcome.report.rows_skipped
    );
    println!("{}", outcome.summary);
    if let Some(plot) = &outcome.plot {
        println!("  Plot: {}", plot.display());
    }
    if let Some(dir) = &outcome.export_dir {
        println!("  Export: {}", dir.display());
    }
    Ok(())
}

fn cmd_inspect(
    store: &Path,
    kind: QueryKind,
    window: &WindowArgs,
    collapse: &[TransformArg],
) -> AppResult<()> {
    let transforms: Vec<TransformDef> = collapse.iter().copied().map(TransformDef::from).collect();
    debug!(?transforms, "inspecting store");
    let summary = gp_app::inspect_store(store, kind, window.window()?, &transforms)?;
    println!("{}", summary);
    Ok(())
}

fn cmd_received_by(store: &Path, agent: i64, window: &WindowArgs) -> AppResult<()> {
    let window = window.window()?;
    let totals = gp_app::annual_receipts(store, agent, window)?;
    if totals.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "window [{}, {}) contains no whole or partial year",
            window.t0(),
            window.tf()
        )));
    }

    println!("Resources received by agent {}:", agent);
    for (year, total) in totals.iter().enumerate() {
        let start = window.t0() + 12 * year as i64;
        println!("  year {:>3} (months {:>5}..{:<5}) {:>14.3}", year, start, start + 12, total);
    }
    Ok(())
}

fn cmd_components(store: &Path) -> AppResult<()> {
    let components = gp_app::list_components(store)?;
    if components.is_empty() {
        println!("No repository components found");
    } else {
        println!("Repository components:");
        for (id, kind) in components {
            println!("  {} - {}", id, kind);
        }
    }
    Ok(())
}
