use anyhow::Context;
use asg_till::common::init_logger_with_file;
use asg_till::{Config, ReceiptRenderer, commands, session_from_config};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::ApiResponse;
use shared::models::PaymentMethod;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "asg-till")]
#[command(about = "ASG point-of-sale till: catalog, checkout and receipt printing")]
struct Cli {
    /// Print the startup banner
    #[arg(long, global = true)]
    banner: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the product catalog as JSON
    Products,

    /// List receipt printers visible to the spooler
    Printers,

    /// Check out a cart and print its receipt
    Print {
        /// Cart line as PRODUCT_ID:QUANTITY (repeatable)
        #[arg(long = "item", value_name = "ID:QTY", required = true, value_parser = parse_item)]
        items: Vec<(i64, u32)>,

        /// cash, card or mobile
        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,
    },

    /// Check out a cart and write the receipt bytes to a file instead of printing
    Render {
        /// Cart line as PRODUCT_ID:QUANTITY (repeatable)
        #[arg(long = "item", value_name = "ID:QTY", required = true, value_parser = parse_item)]
        items: Vec<(i64, u32)>,

        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,

        /// Output file for the ESC/POS stream
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    if cli.banner {
        asg_till::print_banner();
    }

    tracing::debug!(environment = %config.environment, "ASG till starting");

    match cli.command {
        Command::Products => emit(&ApiResponse::success(commands::get_products())),
        Command::Printers => {
            let session = session_from_config(&config)?;
            emit(&commands::list_printers(&session).await)
        }
        Command::Print { items, payment } => {
            let checkout = commands::checkout(&items, payment);
            let Some(sale) = checkout.data.as_ref() else {
                return emit(&checkout);
            };

            let session = session_from_config(&config)?;
            emit(&commands::print_receipt(&session, sale).await)
        }
        Command::Render {
            items,
            payment,
            output,
        } => {
            let checkout = commands::checkout(&items, payment);
            let Some(sale) = checkout.data.as_ref() else {
                return emit(&checkout);
            };

            let renderer = ReceiptRenderer::new(config.receipt_columns, config.timezone);
            let data = renderer.render(sale)?;
            tokio::fs::write(&output, &data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            tracing::info!(path = %output.display(), bytes = data.len(), "Receipt rendered");
            emit(&checkout)
        }
    }
}

/// Write the response as JSON on stdout; the exit code mirrors `success`
fn emit<T: Serialize>(response: &ApiResponse<T>) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Parse `ID:QTY`; a bare `ID` means quantity 1
fn parse_item(s: &str) -> Result<(i64, u32), String> {
    let (id, qty) = match s.split_once(':') {
        Some((id, qty)) => (id, qty),
        None => (s, "1"),
    };

    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id '{}'", id))?;
    let qty: u32 = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", qty))?;
    if qty == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok((id, qty))
}
