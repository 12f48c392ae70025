use clap::Parser;
use repairo::adapters::AnyRoster;
use repairo::core::ConfigProvider;
use repairo::utils::error::{ErrorSeverity, RepairoError};
use repairo::utils::{logger, validation::Validate};
use repairo::{
    CliConfig, FileRoster, HttpRoster, LocalStorage, RecommendEngine, RecommendPipeline,
    SeedRoster, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting repairo");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(config_path) => {
            let config = match TomlConfig::from_file(config_path) {
                Ok(config) => config,
                Err(e) => {
                    report_failure(&e);
                    std::process::exit(exit_code(&e));
                }
            };
            if let Err(e) = config.validate() {
                report_failure(&e);
                std::process::exit(exit_code(&e));
            }
            let roster = roster_from_toml(&config);
            run(roster, config).await
        }
        None => {
            if let Err(e) = cli.validate() {
                report_failure(&e);
                std::process::exit(exit_code(&e));
            }
            let roster = roster_from_cli(&cli);
            run(roster, cli).await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Recommendation run completed");
            println!("✅ Shortlist ready");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(&e));
        }
    }
}

async fn run<C: ConfigProvider>(roster: AnyRoster, config: C) -> repairo::Result<String> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RecommendPipeline::new(roster, storage, config);
    RecommendEngine::new(pipeline).run().await
}

fn roster_from_toml(config: &TomlConfig) -> AnyRoster {
    match config.roster.r#type.as_str() {
        "http" => AnyRoster::Http(HttpRoster::new(
            config.roster.endpoint.clone().unwrap_or_default(),
        )),
        "file" => AnyRoster::File(FileRoster::new(
            config.roster.file.clone().unwrap_or_default(),
        )),
        // validate_config already rejected anything else
        _ => AnyRoster::Seed(SeedRoster::new()),
    }
}

fn roster_from_cli(cli: &CliConfig) -> AnyRoster {
    if let Some(endpoint) = &cli.roster_endpoint {
        AnyRoster::Http(HttpRoster::new(endpoint.clone()))
    } else if let Some(file) = &cli.roster_file {
        AnyRoster::File(FileRoster::new(file.clone()))
    } else {
        tracing::info!("No roster source given, using the built-in seed roster");
        AnyRoster::Seed(SeedRoster::new())
    }
}

fn report_failure(e: &RepairoError) {
    tracing::error!("❌ Recommendation run failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn exit_code(e: &RepairoError) -> i32 {
    match e.severity() {
        ErrorSeverity::Fatal => 1,
        ErrorSeverity::Config => 2,
        ErrorSeverity::Retryable => 3,
    }
}
