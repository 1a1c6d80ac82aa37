use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    // stdout is reserved for results; diagnostics go to stderr
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
