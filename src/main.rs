//! `plantpress` - build-time PlantUML diagram rendering pipeline

use clap::Parser;

use plantpress::cli::args::{Cli, LogFormatChoice};
use plantpress::cli::commands;
use plantpress::error::ExitCode;
use plantpress::observability::{init_logging, LogFormat};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        let format = match cli.log_format {
            LogFormatChoice::Human => LogFormat::Human,
            LogFormatChoice::Json => LogFormat::Json,
        };
        init_logging(format, cli.verbose, cli.color);
    }

    let result = commands::dispatch(cli).await;

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
