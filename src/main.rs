use std::process::ExitCode;

use clap::{Parser, Subcommand};
use modexec::{Failure, ModExec, ModExecConfig, ModExecError};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    ModExec(#[from] ModExecError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Failure(#[from] Failure),
    #[error("dispenser call completed without a reply")]
    NoReply,
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::NoReply => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "modexec", about = "Call module functions through a modexec dispenser")]
struct Cli {
    /// Origin the dispenser paths are resolved against. Overrides `MODEXEC_ORIGIN`.
    #[arg(long)]
    origin: Option<String>,

    /// Use the secure dispenser.
    #[arg(long)]
    secure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Invoke one function and print its result.
    Call {
        module: String,
        function: String,
        /// Arguments as JSON.
        #[arg(long)]
        args: Option<String>,
    },
    /// Print the resolved dispenser and asset URLs.
    Endpoints,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ModExecConfig::from_env()?;
    if let Some(origin) = cli.origin {
        config = config.with_origin(origin);
    }

    match cli.command {
        Command::Call { module, function, args } => {
            let args = parse_args(args.as_deref())?;
            let modexec = ModExec::new(config, cli.secure);
            match modexec.call(&module, &function, args.as_ref()).await? {
                Some(Ok(payload)) => print_json(&payload),
                Some(Err(failure)) => Err(failure.into()),
                None => Err(CliError::NoReply),
            }
        }
        Command::Endpoints => {
            println!("dispenser: {}", config.endpoint_url(false));
            println!("secure_dispenser: {}", config.endpoint_url(true));
            println!("modexec_path: {}", config.asset_url(""));
            Ok(())
        }
    }
}

fn parse_args(raw: Option<&str>) -> Result<Option<Value>, CliError> {
    raw.map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(CliError::from)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
