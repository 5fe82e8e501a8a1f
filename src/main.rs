use clap::{Parser, Subcommand};
use rpc_console::config::ConsoleConfig;
use rpc_console::console::{render_menu, Console};
use rpc_console::error::{ConsoleError, FormError};
use rpc_console::form::values::parse_pair;
use rpc_console::mock::AppState;
use rpc_console::router::create_app_router;
use rpc_console::rpc::RpcClient;
use rpc_console::ui::to_text;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-RPC endpoint (overrides RPC_CONSOLE_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Extra header sent with every call, as name=value
    #[arg(long = "header", global = true)]
    headers: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the mock JSON-RPC backend
    ServeMock {
        /// Bind address (overrides RPC_CONSOLE_MOCK_ADDR)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Print the navigation menu of the backend
    List,
    /// Print the input form of an operation
    Describe { operation: String },
    /// Call an operation and print its result
    Call {
        operation: String,

        /// Parameter value, as name=value
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Print the raw response envelope
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<FormError> for CliError {
    fn from(error: FormError) -> Self {
        Self::Console(error.into())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cwd = std::env::current_dir()?;
    let mut config = ConsoleConfig::from_env(&cwd);

    if let Some(endpoint) = cli.endpoint {
        config.client = config.client.with_endpoint(endpoint);
    }
    for header in &cli.headers {
        let (name, value) = parse_pair(header)?;
        config.client = config.client.with_header(name, value);
    }

    match cli.command {
        Command::ServeMock { addr } => {
            let addr = addr.unwrap_or(config.mock_addr);
            let app = create_app_router(Arc::new(AppState::new()));

            let listener = tokio::net::TcpListener::bind(addr).await?;
            log::info!("[MOCK] Server running on http://{}/jsonrpc", addr);
            axum::serve(listener, app).await?;
        }
        Command::List => {
            let console = Console::load(RpcClient::new(config.client)).await?;
            print!("{}", render_menu(console.menu()));
        }
        Command::Describe { operation } => {
            let mut console = Console::load(RpcClient::new(config.client)).await?;
            console.select(&operation)?;
            print!("{}", console.render_form()?);
        }
        Command::Call {
            operation,
            params,
            raw,
        } => {
            let mut console = Console::load(RpcClient::new(config.client)).await?;
            console.select(&operation)?;
            console.apply_pairs(params.iter().map(String::as_str))?;
            console.submit(raw)?;

            if let Some(tree) = console.outcome().await? {
                print!("{}", to_text(&tree));
            }
        }
    }

    Ok(())
}
