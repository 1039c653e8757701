use crate::{
    commands::{Commands, InputArgs},
    error::CliError,
};
use clap::Parser;
use ddl_syntax::Dialect;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "ddlparse",
    version = "0.1.0",
    about = "CREATE TABLE parser for SQLite, PostgreSQL and MySQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, help = "Log pipeline progress to stderr")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Parse { input, output } => {
            let (ddl, dialect) = load_input(&input).await?;
            let tables = ddl_syntax::parse(&ddl, dialect)?;
            info!("Parsed {} table(s)", tables.len());
            output::emit(&tables, &output).await?;
        }
        Commands::Validate { input } => {
            let (ddl, dialect) = load_input(&input).await?;
            ddl_syntax::validate(&ddl, dialect)?;
            println!("OK");
        }
        Commands::Tokens { input, output } => {
            let (ddl, dialect) = load_input(&input).await?;
            let tokens = ddl_syntax::tokenize(&ddl, dialect)?;
            output::emit(&tokens, &output).await?;
        }
    }
    Ok(())
}

async fn load_input(args: &InputArgs) -> Result<(String, Dialect), CliError> {
    let dialect = args.dialect.parse::<Dialect>()?;

    let ddl = match &args.path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    debug!(
        "Loaded {} bytes of {} DDL from {}",
        ddl.len(),
        dialect,
        args.path.as_deref().unwrap_or("stdin")
    );
    Ok((ddl, dialect))
}
