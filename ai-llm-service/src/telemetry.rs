use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Target prefixes of the workspace crates.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "ai_llm_service",
    "contract_pairs",
    "rag_store",
    "contextor",
    "api",
];

/// RFC3339 UTC timer via `chrono`, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Compact single-line formatting layer.
///
/// RFC3339 timestamps, target and `file:line`, span close durations for
/// `#[instrument]`ed calls, ANSI only on a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
}

/// Level directives for every workspace crate, e.g. `rag_store=debug`.
pub fn level_directives(level: Level) -> Vec<Directive> {
    let lvl = level.as_str().to_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|t| format!("{t}={lvl}").parse::<Directive>().ok())
        .collect()
}

/// `RUST_LOG` (or `default`) plus `level` for the workspace crates.
///
/// Directives already present in `RUST_LOG` for a workspace crate win.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    for directive in level_directives(level) {
        let crate_name = directive.to_string();
        let crate_name = crate_name.split('=').next().unwrap_or_default();
        let overridden = from_env
            .as_deref()
            .is_some_and(|env| env.split(',').any(|d| d.trim().starts_with(crate_name)));
        if !overridden {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Service default: `info` everywhere unless `RUST_LOG` says otherwise.
pub fn default_filter() -> EnvFilter {
    env_filter_with_level("info", Level::INFO)
}
