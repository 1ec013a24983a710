use card_check::adapters::http;
use card_check::domain::ports::ServerSettings;
use card_check::utils::{logger, validation::Validate};
use card_check::{CardEngine, CliConfig, SystemClock};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(config.json_logs(), config.verbose);

    tracing::info!("Starting card-check");
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if config.allows_any_origin() {
        tracing::info!("🌐 CORS: any origin");
    } else {
        tracing::info!("🌐 CORS: {}", config.allowed_origins.join(", "));
    }

    let engine = Arc::new(CardEngine::new(SystemClock));

    let result = async {
        let cors = http::cors_layer(&config)?;
        let listener = http::bind(&config).await?;
        http::serve(listener, http::router(engine, cors), http::shutdown_signal()).await
    }
    .await;

    if let Err(e) = result {
        tracing::error!("❌ Server failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
