mod cli;
mod output;

use std::io;
use std::time::Duration;

use clap::Parser;
use cli::Command;
use rest_client::{
    ClientOptions, HeaderList, PathSpec, QueryParams, Response, RestClient, RestError,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

const BASE_URL_ENV: &str = "REST_BASE_URL";

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let base_url = match cli.base_url.clone().or_else(|| std::env::var(BASE_URL_ENV).ok()) {
        Some(url) => url,
        None => {
            tracing::error!("--base-url or the {BASE_URL_ENV} environment variable is required");
            std::process::exit(2);
        }
    };

    let mut headers = HeaderList::new();
    for raw in &cli.headers {
        match cli::parse_header(raw) {
            Some((name, value)) => headers.push(name, value),
            None => {
                tracing::error!(header = %raw, "expected a header of the form `Name: value`");
                std::process::exit(2);
            }
        }
    }

    let mut options = ClientOptions::new();
    if let Some(ms) = cli.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }
    if !headers.is_empty() {
        options = options.with_headers(headers);
    }

    let client = RestClient::new(base_url, options);
    info!(base_url = %client.base_url(), "rest-client starting");

    let cancel = setup_signal_handlers();

    let result = tokio::select! {
        res = run(&client, cli.command) => res,
        _ = cancel.cancelled() => {
            info!("request aborted");
            std::process::exit(130);
        }
    };

    let mut stdout = io::stdout().lock();
    match result {
        Ok(resp) => {
            if let Err(e) = output::write_response(&resp, cli.raw, &mut stdout) {
                tracing::error!(error = %e, "failed to write response");
                std::process::exit(1);
            }
        }
        Err(err) => {
            if let Err(e) = output::write_error(&err, cli.raw, &mut stdout) {
                tracing::error!(error = %e, "failed to write error");
            }
            std::process::exit(1);
        }
    }
}

async fn run(client: &RestClient, command: Command) -> Result<Response<Value>, RestError> {
    match command {
        Command::Get(args) => {
            let mut params = QueryParams::new();
            for raw in &args.params {
                let (key, value) = cli::parse_param(raw);
                params.append(key, value);
            }
            let params = (!params.is_empty()).then_some(params);
            client
                .get(path_spec(args.path), params.as_ref(), None)
                .await
        }
        Command::Post(args) => {
            client
                .post(path_spec(args.path), args.body.as_deref(), None)
                .await
        }
        Command::Put(args) => {
            client
                .put(path_spec(args.path), args.body.as_deref(), None)
                .await
        }
        Command::Delete(args) => {
            client
                .delete(path_spec(args.path), args.body.as_deref(), None)
                .await
        }
    }
}

/// A single argument is used verbatim; several are joined as segments.
fn path_spec(mut parts: Vec<String>) -> PathSpec {
    if parts.len() == 1 {
        PathSpec::Single(parts.remove(0))
    } else {
        PathSpec::Segments(parts)
    }
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
