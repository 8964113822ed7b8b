use std::{io, process::ExitCode};

use clap::Parser;
use deal_client_scripts::{
    cli::{Cli, Command},
    errors::ScriptError,
    utils::setup_client,
};

#[tokio::main]
async fn main() -> ExitCode {
    let Cli {
        priv_key,
        rpc_url,
        chain_id,
        command,
    } = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version requests exit successfully
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Stdout is reserved for script output
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(io::stderr)
        .init();

    match run(command, priv_key.as_deref(), &rpc_url, chain_id).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Sets up the signing client and runs the command
async fn run(
    command: Command,
    priv_key: Option<&str>,
    rpc_url: &str,
    chain_id: Option<u64>,
) -> Result<(), ScriptError> {
    let client = setup_client(priv_key, rpc_url, chain_id)?;
    command.run(client).await
}
