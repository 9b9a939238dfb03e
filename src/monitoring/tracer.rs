/*!
 * Structured Tracing
 * Subscriber setup and the per-run span
 *
 * Features:
 * - Run ID generation for correlating all events of one simulation
 * - JSON-formatted logs for structured parsing
 * - Run outcome recorded on the span when it closes
 */

use crate::core::limits::ENV_TRACE_JSON;
use crate::core::types::Tick;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MLQ_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr; stdout carries the JSON outcome
    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct RunSpan {
    span: tracing::Span,
    run_id: String,
}

impl RunSpan {
    pub fn new(processes: usize, levels: usize) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "simulation",
            run_id = %run_id,
            processes = processes,
            levels = levels,
            final_tick = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(run_id = %run_id, "simulation span opened");
        drop(_entered);

        Self { span, run_id }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn record_final_tick(&self, tick: Tick) {
        self.span.record("final_tick", tick);
    }

    pub fn record_result(&self, success: bool) {
        self.span.record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}
