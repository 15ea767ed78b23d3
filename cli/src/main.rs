mod form;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use authshell::config::{DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH, DEFAULT_STORAGE_PATH};
use authshell::guard::{HOME_ROUTE, LOGIN_ROUTE};
use authshell::{
    Access, AuthorizedClient, FileStorage, HttpTransport, Navigator, RequestError, RouteGuard, SessionConfig,
    SessionManager, TransportError,
};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Form(#[from] form::FormError),
    #[error("login failed: {0}")]
    Login(#[from] TransportError),
    #[error("login required; run `authshell login` first")]
    LoginRequired,
    #[error("request failed: {0}")]
    Request(#[from] RequestError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "authshell", about = "Email/password session CLI")]
struct Cli {
    #[arg(long, env = "AUTHSHELL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "AUTHSHELL_LOGIN_PATH", default_value = DEFAULT_LOGIN_PATH)]
    login_path: String,

    #[arg(long = "storage", env = "AUTHSHELL_STORAGE_PATH", default_value = DEFAULT_STORAGE_PATH)]
    storage_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHSHELL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show whether a session is present.
    Status,
    /// Authenticated GET against the API.
    Get { path: String },
}

/// Navigation for a terminal: tell the user where they ended up.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        eprintln!("-> {route}");
    }
}

struct CliContext {
    session: Arc<SessionManager>,
    guard: RouteGuard,
    client: AuthorizedClient,
}

impl CliContext {
    fn new(config: &SessionConfig) -> Self {
        let transport = Arc::new(HttpTransport::from_config(config));
        let storage = Arc::new(FileStorage::new(&config.storage_path));
        let session = Arc::new(SessionManager::new(transport, storage));
        let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
        Self {
            guard: RouteGuard::new(session.clone(), navigator.clone()),
            client: AuthorizedClient::new(config.base_url.clone(), session.clone(), navigator),
            session,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    load_dotenv();

    let cli = Cli::parse();
    let config = SessionConfig { base_url: cli.base_url, login_path: cli.login_path, storage_path: cli.storage_path };
    let ctx = CliContext::new(&config);

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Logout => run_logout(&ctx),
        Command::Status => run_status(&ctx),
        Command::Get { path } => run_get(&ctx, &path).await,
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let credentials = form::validate_credentials(email, password)?;
    let response = ctx.session.login(&credentials).await?;
    print_json(&serde_json::to_value(&response)?)?;
    ctx.guard.enter(HOME_ROUTE, Access::Protected);
    Ok(())
}

fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    ctx.session.logout();
    println!("logged out");
    ctx.guard.enter(LOGIN_ROUTE, Access::GuestOnly);
    Ok(())
}

fn run_status(ctx: &CliContext) -> Result<(), CliError> {
    println!("{}", status::status_line(ctx.session.current_user().as_ref()));
    Ok(())
}

async fn run_get(ctx: &CliContext, path: &str) -> Result<(), CliError> {
    if !ctx.guard.enter(path, Access::Protected) {
        return Err(CliError::LoginRequired);
    }
    let body = ctx.client.get(path).await?;
    print_json(&body)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
