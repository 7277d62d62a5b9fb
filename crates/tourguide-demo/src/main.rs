#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    if let Err(error) = tourguide_demo::run_from_env() {
        tracing::error!(message = "demo.failed", error = %error, exit_code = error.exit_code());
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
