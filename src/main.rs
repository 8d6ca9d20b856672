#[macro_use]
extern crate vitter;
extern crate clap;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate voxell_timer;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use crate::cli::{Cli, Command};
use clap::Parser;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Config { command } => cli::config::config(command),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if_tracing! {
                tracing::error!(%err, "command failed");
            }
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
