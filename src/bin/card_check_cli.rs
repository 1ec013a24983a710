use card_check::core::normalize::normalize;
use card_check::utils::logger;
use card_check::{CardEngine, SystemClock};
use clap::Parser;
use serde_json::json;

#[derive(Parser)]
#[command(name = "card-check-cli")]
#[command(about = "Validate a card number locally and print the API response")]
struct Args {
    /// Card number; spaces and dashes are ignored
    number: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    if args.verbose {
        eprintln!("🔎 {}", normalize(&args.number).grouped());
    }

    let engine = CardEngine::new(SystemClock);
    let (body, exit_code) = match engine.validate(Some(&args.number)) {
        Ok(details) => (serde_json::to_value(&details)?, 0),
        Err(e) => {
            let code = if e.is_client_error() { 2 } else { 1 };
            (json!({ "error": e.to_string() }), code)
        }
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", rendered);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
