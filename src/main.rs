/*!
 * MLQ Simulator - Main Entry Point
 *
 * Runs one batch through the multilevel queue scheduler:
 * - Levels from MLQ_CONFIG (JSON file) or MLQ_LEVELS (e.g. `rr:2,rr:4,fcfs`)
 * - Workload from MLQ_WORKLOAD (JSON array of specs) or the built-in batch
 * - Outcome written to stdout as JSON, logs to stderr
 */

use miette::{IntoDiagnostic, Result};
use tracing::info;

use mlq_sim::core::limits::{ENV_CONFIG, ENV_WORKLOAD};
use mlq_sim::{init_tracing, simulate, ConfigError, ProcessSpec, SchedulerConfig};

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::var(ENV_CONFIG) {
        Ok(path) => SchedulerConfig::load(path)?,
        Err(_) => SchedulerConfig::from_env()?,
    };
    info!(levels = config.level_count(), "Scheduler configured");

    let specs = match std::env::var(ENV_WORKLOAD) {
        Ok(path) => load_workload(&path)?,
        Err(_) => {
            info!("{} not set, running the built-in batch", ENV_WORKLOAD);
            builtin_workload()
        }
    };

    let outcome = simulate(config, specs)?;

    info!(
        run_id = %outcome.run_id,
        throughput = outcome.aggregates.throughput,
        trace = %outcome.trace_labels().join(","),
        "Run complete"
    );

    println!("{}", outcome.to_json_pretty().into_diagnostic()?);
    Ok(())
}

fn load_workload(path: &str) -> std::result::Result<Vec<ProcessSpec>, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let specs: Vec<ProcessSpec> = serde_json::from_str(&raw)?;
    info!(path, processes = specs.len(), "Workload loaded");
    Ok(specs)
}

/// Three levels' worth of work plus a late high-priority arrival that preempts
fn builtin_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 0, 4, 0),
        ProcessSpec::new("P2", 1, 3, 1),
        ProcessSpec::new("P3", 2, 5, 2),
        ProcessSpec::new("P4", 5, 2, 0),
    ]
}
