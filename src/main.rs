//! cartline CLI
//!
//! Sends one cart request and prints what the page would show afterwards.

use std::{io, process};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use cartline::{
    api::CartApi,
    config::{self, CartConfig, LoggingConfig},
    handler::parse_displayed_quantity,
    ids::{CartId, ControlKind},
    observability,
    report::UpdateReport,
};

#[derive(Debug, Parser)]
#[command(name = "cartline", about = "Cart endpoint client", long_about = None)]
struct Cli {
    #[command(flatten)]
    cart: CartConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add one to a cart line
    Plus(LineArgs),

    /// Take one from a cart line
    Minus(MinusArgs),

    /// Delete a cart line
    Remove(LineArgs),
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Cart line identifier, as carried in the control's `pid` attribute
    cart_id: String,
}

#[derive(Debug, Args)]
struct MinusArgs {
    #[command(flatten)]
    line: LineArgs,

    /// Quantity currently displayed; nothing is sent unless it is above one
    #[arg(long)]
    displayed: Option<String>,
}

#[tokio::main]
pub async fn main() {
    config::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported to the terminal"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    observability::init(&cli.logging).map_err(|error| error.to_string())?;

    let api = cli.cart.api().map_err(|error| error.to_string())?;

    let report = match cli.command {
        Commands::Plus(args) => {
            let cart_id = cart_id(args.cart_id)?;
            let update = api
                .plus_cart(cart_id.clone())
                .await
                .map_err(|error| format!("plus cart failed: {error}"))?;

            UpdateReport::quantity(ControlKind::Increase, cart_id, &update)
        }
        Commands::Minus(args) => {
            let cart_id = cart_id(args.line.cart_id)?;

            if let Some(displayed) = args.displayed {
                match parse_displayed_quantity(&displayed) {
                    Some(current) if current > 1 => {}
                    _ => {
                        info!(%cart_id, %displayed, "quantity at floor, not decrementing");

                        return print(&format!(
                            "quantity `{displayed}` is not above 1; no request sent"
                        ));
                    }
                }
            }

            let update = api
                .minus_cart(cart_id.clone())
                .await
                .map_err(|error| format!("minus cart failed: {error}"))?;

            UpdateReport::quantity(ControlKind::Decrease, cart_id, &update)
        }
        Commands::Remove(args) => {
            let cart_id = cart_id(args.cart_id)?;
            let update = api
                .remove_cart(cart_id.clone())
                .await
                .map_err(|error| format!("remove cart failed: {error}"))?;

            UpdateReport::removal(cart_id, &update)
        }
    };

    report
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to write report: {error}"))
}

fn cart_id(raw: String) -> Result<CartId, String> {
    CartId::new(raw).ok_or_else(|| "cart id cannot be empty".to_string())
}

fn print(message: &str) -> Result<(), String> {
    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("{message}");
    }

    Ok(())
}
