use clap::Parser;
use santa_o_matic::domain::ports::ConfigProvider;
use santa_o_matic::utils::{logger, validation::Validate};
use santa_o_matic::{
    CliConfig, ExchangeEngine, LetterPipeline, LocalStorage, RunConfig, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting santa-o-matic");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let toml = match TomlConfig::from_file(&cli.config) {
        Ok(toml) => toml,
        Err(e) => {
            tracing::error!("❌ Could not load configuration '{}': {}", cli.config, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = toml.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = RunConfig::new(toml, &cli);

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = LetterPipeline::new(storage, config);
    let engine = ExchangeEngine::new(pipeline);

    match engine.run() {
        Ok(output) => {
            tracing::info!("✅ Secret santa draw completed successfully!");
            println!("✅ Secret santa draw completed successfully!");
            println!("📁 Letters: {}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                santa_o_matic::utils::error::ErrorSeverity::Low => 0,
                santa_o_matic::utils::error::ErrorSeverity::Medium => 2,
                santa_o_matic::utils::error::ErrorSeverity::High => 1,
                santa_o_matic::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
