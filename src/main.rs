use beach_kml::Config;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();

    // Diagnostics go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    let mut stdout = std::io::stdout().lock();
    match beach_kml::run(&config, &mut stdout) {
        Ok(extraction) => {
            tracing::debug!(
                placemarks = extraction.placemarks(),
                discarded = extraction.discarded(),
                "done"
            );
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}
