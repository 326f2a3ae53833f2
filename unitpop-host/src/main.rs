//! unitpop Host
//!
//! Drives the popup converter over line-delimited JSON-RPC 2.0 on
//! stdin/stdout. Logs go to stderr.
//!
//! Methods:
//! - initialize, ping
//! - popup/state, popup/selectCategory, popup/setInput, popup/setFromUnit,
//!   popup/setToUnit, popup/swap, popup/categories, popup/units
//! - i18n/resolve, i18n/render
//! - options/get, options/set

mod config;
mod protocol;
mod server;

use std::process::ExitCode;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::HostConfig;
use server::{Server, SERVER_VERSION};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = HostConfig::from_env();
    info!(
        version = SERVER_VERSION,
        data_path = %config.data_path.display(),
        prefs_file = %config.prefs_file.display(),
        "unitpop host started"
    );

    let mut server = match Server::start(&config).await {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "failed to start");
            return ExitCode::FAILURE;
        }
    };

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    info!("server ready, waiting for requests");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = server.handle_line(line).await else {
            continue;
        };

        let written = async {
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        };
        if let Err(e) = written.await {
            error!(error = %e, "error writing response");
            break;
        }
    }

    info!("server shutting down");
    ExitCode::SUCCESS
}
