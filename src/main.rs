use clap::{Parser as ClapParser, Subcommand};
use cosmoql::cli::{self, CliError, RunOptions};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "cosmoql")]
#[command(about = "cosmoql - Parse and run Cosmos-style select queries against JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a query, one per line
    Tokens {
        /// The query to tokenize
        query: String,
    },

    /// Print the parsed query as JSON
    Parse {
        /// The query to parse
        query: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run a query against JSON documents
    Run {
        /// The query to execute
        query: String,

        /// Container the documents belong to
        #[arg(short, long)]
        container: String,

        /// JSON document or array of documents (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Match the container name case-insensitively
        #[arg(long)]
        ignore_case: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmoql=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokens { query } => run_tokens(&query),
        Commands::Parse { query, pretty } => {
            cli::execute_parse(&query).and_then(|parsed| print_json(&parsed, pretty))
        }
        Commands::Run {
            query,
            container,
            input,
            pretty,
            ignore_case,
        } => run_query(query, container, input, pretty, ignore_case),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_tokens(query: &str) -> Result<(), CliError> {
    for token in cli::execute_tokens(query)? {
        println!("{}", token);
    }
    Ok(())
}

fn run_query(
    query: String,
    container: String,
    input: Option<String>,
    pretty: bool,
    ignore_case: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        query,
        container,
        input,
        ignore_case,
    };

    let rows = cli::execute_run(&options)?;
    print_json(&serde_json::Value::Array(rows), pretty)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }?;
    println!("{}", json);
    Ok(())
}
