use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use sessiongate::navigate::LogNavigator;
use sessiongate::notify::TracingNotifier;
use sessiongate::route::LOGIN_ROUTE;
use sessiongate::{
    ClientConfig, ConfigError, EnvMode, HttpClient, HttpError, MemorySession, NavigationGuard, RouteError,
    RouteTable, Router, SessionStore,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid header {0:?}; expected NAME:VALUE")]
    InvalidHeader(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

#[derive(Parser, Debug)]
#[command(name = "sessiongate", about = "Session-aware API client and route guard")]
struct Cli {
    /// Overrides API_BASE_URL and the mode default.
    #[arg(long)]
    base_url: Option<String>,

    /// `production` or `development`; overrides APP_ENV.
    #[arg(long)]
    mode: Option<String>,

    /// Origin for a relative base URL; overrides APP_ORIGIN.
    #[arg(long)]
    origin: Option<String>,

    #[arg(long, env = "SESSIONGATE_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one request and print the unwrapped payload.
    Request {
        method: String,
        path: String,
        /// JSON request body.
        #[arg(long)]
        body: Option<String>,
        /// Extra header, `NAME:VALUE`. Repeatable.
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,
    },
    /// Run a path through the route guard and print where it lands.
    Navigate { path: String },
    /// List the route table.
    Routes,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let session: Arc<MemorySession> = Arc::new(match cli.token.as_deref() {
        Some(token) => MemorySession::with_token(token),
        None => MemorySession::new(),
    });

    match cli.command {
        Command::Request { method, path, body, headers } => {
            let mut config = ClientConfig::from_env()?;
            if let Some(mode) = cli.mode.as_deref() {
                config = config.with_mode(EnvMode::parse(mode)?);
            }
            if let Some(base_url) = cli.base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(origin) = cli.origin {
                config = config.with_origin(origin);
            }

            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| CliError::InvalidMethod(method))?;
            let body = body.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let headers = parse_headers(&headers)?;

            let client = HttpClient::new(
                &config,
                session.clone(),
                Arc::new(TracingNotifier),
                Arc::new(LogNavigator),
            )?;
            match client.request::<Value>(method, &path, body, Some(headers)).await {
                Ok(payload) => {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                    Ok(())
                }
                Err(err) => {
                    client.settle_redirects().await;
                    if session.token().is_none() && cli.token.is_some() {
                        tracing::info!("session token was cleared by the server response");
                    }
                    Err(err.into())
                }
            }
        }
        Command::Navigate { path } => {
            let guard = NavigationGuard::new(session, LOGIN_ROUTE);
            let mut router = Router::new(RouteTable::default_app(), guard);
            let navigation = router.push(&path)?;
            let suffix = if navigation.redirected { " (redirected)" } else { "" };
            println!("{} {}{suffix}", navigation.route.name, navigation.route.path);
            Ok(())
        }
        Command::Routes => {
            for route in RouteTable::default_app().iter() {
                let access = if route.requires_auth { "protected" } else { "public" };
                println!("{:<10} {:<10} {access}", route.name, route.path);
            }
            Ok(())
        }
    }
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, CliError> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let invalid = || CliError::InvalidHeader(entry.clone());
        let (name, value) = entry.split_once(':').ok_or_else(invalid)?;
        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
        headers.append(name, value);
    }
    Ok(headers)
}
