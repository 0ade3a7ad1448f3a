//! Logging integration for formwright.
//!
//! Provides helpers for installing a [`tracing`] subscriber and for creating
//! the span a single form render runs in.

/// Sets up the global tracing subscriber.
///
/// `level` is an env-filter directive (e.g. "debug", "info", "formwright_forms=trace").
/// When `pretty` is set a human-readable format is used; otherwise structured
/// JSON is written.
///
/// Installing a second subscriber is silently ignored.
pub fn setup_logging(level: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one pass of the render pipeline.
///
/// # Examples
///
/// ```
/// use formwright_core::logging::render_span;
///
/// let span = render_span("contact");
/// let _guard = span.enter();
/// tracing::info!("rendering");
/// ```
pub fn render_span(form_id: &str) -> tracing::Span {
    tracing::info_span!("render", form = form_id)
}
