use clap::Parser as _;
use schematika_cli::Config;

fn main() {
    let config = Config::parse();

    let default_filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = schematika_cli::run(&config) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
