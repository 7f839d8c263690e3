mod app;

use app::cli::Cli;
use app::models::ExitStatus;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    match app::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            log::error!("❌ {:#}", err);
            ExitStatus::Internal.into()
        }
    }
}
