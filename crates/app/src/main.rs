use std::process::ExitCode;

use shared_types::GENERIC_FAILURE;
use studio_app::console::{parse_args, run};
use studio_client::{config, session, telemetry, StudioClient};

#[tokio::main]
async fn main() -> ExitCode {
    let config = config::load_config();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e.message);
            return ExitCode::from(2);
        }
    };

    let client = match StudioClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match run(invocation, config, &client, session::global()).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(kind = ?e.kind, "Command failed");
            eprintln!("{}", e.user_message(GENERIC_FAILURE));
            ExitCode::FAILURE
        }
    }
}
