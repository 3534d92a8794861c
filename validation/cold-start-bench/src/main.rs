//! Cold-start benchmark CLI.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use cold_start_bench::config::parse_worker_count;
use cold_start_bench::control::wait_for_quit;
use cold_start_bench::{
    logging, BenchConfig, BenchError, Console, EmbeddedStore, ExternalTarget, Harness,
    ResultsReport, TargetService,
};

#[derive(Parser, Debug)]
#[command(name = "cold-start-bench")]
#[command(about = "Measure cold start and steady-state latency of the album storefront")]
struct Cli {
    /// Number of request workers (overrides the config file)
    #[arg(env = "BENCH_WORKERS", value_parser = parse_worker_count)]
    workers: Option<u32>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target URL; implies --external
    #[arg(long)]
    url: Option<String>,

    /// Listen address for the embedded storefront
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Benchmark an already running service instead of hosting one
    #[arg(long)]
    external: bool,

    /// Milliseconds tracing stays enabled per controller cycle
    #[arg(long)]
    tracing_interval_ms: Option<u64>,

    /// Completed requests between per-worker reports
    #[arg(long)]
    report_every: Option<u64>,

    /// Diagnostic trace file
    #[arg(long)]
    diagnostic_log: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Summary format: table (default), json
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> Result<BenchConfig, BenchError> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(workers) = self.workers {
            config.worker_count = workers;
        }
        if let Some(url) = &self.url {
            config.target_url = url.clone();
            config.embedded_target = false;
        }
        if self.external {
            config.embedded_target = false;
        }
        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(interval) = self.tracing_interval_ms {
            config.tracing_interval_ms = interval;
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
        }
        if let Some(path) = &self.diagnostic_log {
            config.diagnostic_log = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = cli.worker_threads {
        runtime_builder.worker_threads(threads);
    }
    let runtime = runtime_builder.build()?;

    let result = runtime.block_on(async_main(cli, config));

    // Stdin reads park a blocking thread; don't wait on it at exit.
    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}

async fn async_main(cli: Cli, config: BenchConfig) -> Result<()> {
    let diagnostic_path = config.diagnostic_log_path();
    let facility = logging::init(&cli.log_level, &diagnostic_path)?;
    info!(path = %diagnostic_path.display(), "Diagnostic trace file ready");

    let target: Box<dyn TargetService> = if config.embedded_target {
        Box::new(EmbeddedStore::new(config.listen))
    } else {
        Box::new(ExternalTarget::new(config.target_url.clone()))
    };

    let console = Console::stdout();
    let harness = Harness::new(config, target, Arc::new(facility), console.clone());

    let stop = async move {
        tokio::select! {
            result = wait_for_quit(BufReader::new(tokio::io::stdin()), &console) => result,
            result = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                result.map_err(BenchError::from)
            }
        }
    };

    let summary = match harness.run(stop).await {
        Ok(summary) => summary,
        Err(e) => {
            if e.is_target_failure() {
                error!(error = %e, "Target is broken, aborting");
            }
            return Err(e.into());
        }
    };

    println!();
    match cli.output.as_str() {
        "json" => println!("{}", ResultsReport::format_json(&summary)?),
        _ => println!("{}", ResultsReport::format_table(&summary)),
    }

    Ok(())
}
