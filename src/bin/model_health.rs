use anyhow::{Context, Result};
use clap::Parser;
use model_health::collector::HealthMetrics;
use model_health::command::{ExternalCommand, ModelHealthCommand, SummaryPresenter};
use model_health::config::AppConfig;
use model_health::metrics::{install_recorder, render_metrics};
use model_health::model::DocumentSnapshot;
use model_health::publisher::TelemetryPublisher;
use std::path::PathBuf;

/// Collect health metrics from an exported model snapshot and push them to
/// the dashboard ingestion endpoint.
#[derive(Parser, Debug)]
#[command(name = "model-health", version)]
struct Cli {
    /// Model snapshot exported by the host, as JSON
    #[arg(long, value_name = "PATH")]
    model: PathBuf,

    /// TOML config file (endpoint, api_key, timeout_secs)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Print instrumentation in Prometheus text format before exiting
    #[arg(long)]
    print_metrics: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Prints the summary the host would show in a dialog.
struct ConsolePresenter;

impl SummaryPresenter for ConsolePresenter {
    fn present(&self, title: &str, metrics: &HealthMetrics) {
        println!("Model Health: {title}");
        println!("{}", metrics.summary());
        for (family, count) in metrics.family_instance_counts() {
            println!("  {family}: {count}");
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("model_health=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("model_health=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let model = DocumentSnapshot::from_file(&cli.model)
        .with_context(|| format!("failed to load model snapshot {}", cli.model.display()))?;

    if cli.dry_run {
        let (metrics, body) = model_health::command::preview(&model)?;
        ConsolePresenter.present(&model.title, &metrics);
        println!("{body}");
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let command = ModelHealthCommand::with_presenter(TelemetryPublisher::from_config(&config), ConsolePresenter);

    let report = command
        .execute(&model)
        .with_context(|| format!("{} failed", command.name()))?;

    println!(
        "Published to {} (HTTP {}, {} bytes, {:?})",
        config.endpoint.redacted(),
        report.receipt.status,
        report.receipt.payload_bytes,
        report.receipt.elapsed
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.print_metrics {
        install_recorder().context("failed to install metrics recorder")?;
    }

    let result = run(&cli);

    if cli.print_metrics {
        if let Some(rendered) = render_metrics() {
            print!("{rendered}");
        }
    }

    result
}
