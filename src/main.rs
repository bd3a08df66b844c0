use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

use currency_converter::cli;
use currency_converter::config::Config;
use currency_converter::models::{parse_amount, ConversionRequest};
use currency_converter::{log, ConvertError, ExchangeRateApi};

#[derive(Debug, Parser)]
#[command(name = "currency_converter", version, about = "Convert an amount between currencies")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Exchange-rate API base URL (overrides EXCHANGE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert without prompting
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: String,
        from: String,
        to: String,
    },
    /// List every rate for a base currency
    Rates {
        #[arg(default_value = "USD")]
        base: String,
    },
}

async fn dispatch(command: Option<Command>, api: &ExchangeRateApi) -> Result<(), ConvertError> {
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match command {
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            cli::run_interactive(api, &mut input, &mut output).await?;
        }
        Some(Command::Convert { amount, from, to }) => {
            let request = ConversionRequest::new(parse_amount(&amount)?, &from, &to);
            cli::run_conversion(api, request, &mut output).await?;
        }
        Some(Command::Rates { base }) => {
            cli::run_list_rates(api, &base, &mut output).await?;
        }
    }
    output.flush()?;
    Ok(())
}

fn run(args: Cli) -> Result<Result<(), ConvertError>> {
    let config = Config::load(args.api_url.as_deref());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    Ok(runtime.block_on(async {
        let api = ExchangeRateApi::from_config(&config)?;
        dispatch(args.command, &api).await
    }))
}

fn main() -> ExitCode {
    dotenv().ok();
    let args = Cli::parse();
    log::init_logging(args.verbose);
    debug!(?args, "Parsed arguments");

    match run(args) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
