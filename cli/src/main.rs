//! CLI entrypoint for Debate Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use arena_application::{NoProgress, PipelineConfig, ProgressNotifier, RunPipelineUseCase};
use arena_domain::{Model, ResilienceStrategy, Severity, Topic};
use arena_infrastructure::{ConfigLoader, FileConfig, OpenAiGateway};
use arena_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, SimpleProgress,
};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v; logs go to stderr so stdout carries only the result
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Debate Arena");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    report_config_issues(&file_config);

    let topic = Topic::try_new(cli.topic.clone().context("A debate topic is required")?)?;
    let config = apply_overrides(file_config.to_pipeline_config(), &cli);
    let output_config = OutputConfig::resolve(
        &cli,
        file_config.output.format,
        file_config.output.color,
    );
    output_config.apply_color();

    info!(
        model = %config.model(),
        strategy = %config.params().strategy,
        resilience = %config.params().resilience,
        "Pipeline configured"
    );

    // === Dependency Injection ===
    let backend = &file_config.backend;
    let gateway = OpenAiGateway::new(&backend.base_url, backend.resolve_api_key())
        .context("Failed to create HTTP client")?
        .with_api_key_env(backend.api_key_env.clone());

    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                token.cancel();
            }
        });
    }

    let use_case =
        RunPipelineUseCase::new(Arc::new(gateway), config).with_cancellation(cancellation);

    let progress: Box<dyn ProgressNotifier> = if !output_config.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let output = use_case
        .execute_with_progress(&topic, progress.as_ref())
        .await?;

    info!(
        source = output.source.as_str(),
        attempts = output.attempts,
        "Pipeline finished"
    );

    println!("{}", ConsoleFormatter.render(&output, output_config.format));

    Ok(())
}

/// CLI flags take precedence over file configuration.
fn apply_overrides(config: PipelineConfig, cli: &Cli) -> PipelineConfig {
    let mut params = config.params().clone();
    if let Some(strategy) = cli.strategy {
        params = params.with_strategy(strategy);
    }
    if cli.no_retry {
        params = params.with_resilience(ResilienceStrategy::None);
    }

    let config = config.with_params(params);
    match &cli.model {
        Some(model) => config.with_model(Model::from(model.as_str())),
        None => config,
    }
}

fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::GenerationStrategy;

    #[test]
    fn test_flags_override_file_config() {
        let cli = Cli::try_parse_from([
            "debate-arena",
            "--strategy",
            "combined",
            "--no-retry",
            "--model",
            "gpt-4o-mini",
            "话题",
        ])
        .unwrap();
        let config = apply_overrides(PipelineConfig::default(), &cli);

        assert_eq!(config.params().strategy, GenerationStrategy::Combined);
        assert_eq!(config.params().resilience, ResilienceStrategy::None);
        assert_eq!(config.model(), &Model::Gpt4oMini);
    }

    #[test]
    fn test_no_flags_keep_file_config() {
        let cli = Cli::try_parse_from(["debate-arena", "话题"]).unwrap();
        let file = PipelineConfig::default().with_model(Model::DeepSeekV31);
        let config = apply_overrides(file, &cli);

        assert_eq!(config.model(), &Model::DeepSeekV31);
        assert_eq!(config.params().strategy, GenerationStrategy::Batched);
        assert_eq!(
            config.params().resilience,
            ResilienceStrategy::RetryFallback
        );
    }
}
