use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "XMLFILE_LOG";

/// The xmlfile crates log at info; everything else only warns.
pub const DEFAULT_DIRECTIVES: &str = "warn,xmlfile_core=info,xmlfile_content=info,xmlfile_fs=info";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Initialize a tracing subscriber for binaries and tests embedding xmlfile.
///
/// Directives come from `XMLFILE_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_DIRECTIVES`]. Output goes to stderr so documents rendered to
/// stdout stay clean. Fails if a global subscriber is already installed.
pub fn init() -> Result<(), BoxError> {
    let directives = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter(directives.as_deref())?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Build the filter for `directives`, falling back to the defaults when
/// none are given.
fn filter(directives: Option<&str>) -> Result<EnvFilter, BoxError> {
    let directives = directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVES);
    Ok(EnvFilter::try_new(directives)?)
}
