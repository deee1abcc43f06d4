use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

// RUST_LOG wins over the filter passed on the command line
pub fn setup(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NEW)
        .with_target(false)
        .with_env_filter(env_filter)
        .compact()
        .init();
}
