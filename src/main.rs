use std::env;
use std::process::ExitCode;

use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let level = if args.iter().any(|arg| arg == "--verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let code = assetlint::cli::run_with_args(&args).await;
    ExitCode::from(code as u8)
}
