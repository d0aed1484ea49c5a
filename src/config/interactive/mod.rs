
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;
use std::time::Duration;

use super::{Config, ConfigError, EmbeddingProvider, OllamaConfig};
use crate::embeddings::OllamaClient;

#[inline]
pub fn run_interactive_config() -> Result<()> {
    eprintln!("{}", style("🔧 Suwon Eats Configuration Setup").bold().cyan());
    eprintln!();

    let mut config = load_existing_config()?;

    eprintln!("{}", style("Restaurant Data").bold().yellow());
    configure_data(&mut config)?;

    eprintln!();
    eprintln!("{}", style("Embedding Configuration").bold().yellow());
    eprintln!("Choose how restaurant descriptions are embedded for recommendations.");
    eprintln!();

    config.embedding.provider = select_provider(config.embedding.provider)?;

    if config.embedding.provider == EmbeddingProvider::Ollama {
        configure_ollama(&mut config.ollama)?;

        eprintln!();
        eprintln!("{}", style("Testing configuration...").yellow());

        if test_ollama_connection(&config.ollama)? {
            eprintln!("{}", style("✓ Ollama connection successful!").green());
        } else {
            eprintln!(
                "{}",
                style("⚠ Warning: Could not connect to Ollama").yellow()
            );
            eprintln!(
                "You can continue, but make sure Ollama is running and the model is pulled before searching."
            );
        }
    }

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_file_path().display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Data:").bold().yellow());
    eprintln!(
        "  CSV Path: {}",
        style(config.data.csv_path.display()).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Embedding:").bold().yellow());
    eprintln!(
        "  Provider: {}",
        style(config.embedding.provider.as_str()).cyan()
    );
    match config.embedding.provider {
        EmbeddingProvider::Ollama => {
            eprintln!("  Host: {}", style(&config.ollama.host).cyan());
            eprintln!("  Port: {}", style(config.ollama.port).cyan());
            eprintln!("  Model: {}", style(&config.ollama.model).cyan());
            eprintln!("  Batch Size: {}", style(config.ollama.batch_size).cyan());
            match config.ollama_url() {
                Ok(url) => eprintln!("  Ollama URL: {}", style(url).cyan()),
                Err(e) => eprintln!("  Ollama URL: {} ({})", style("Invalid").red(), e),
            }
        }
        EmbeddingProvider::Hashing => {
            eprintln!(
                "  Dimension: {}",
                style(config.embedding.hashing_dimension).cyan()
            );
        }
    }

    eprintln!();
    eprintln!("{}", style("Recommender:").bold().yellow());
    eprintln!(
        "  Retrieval Size: {}",
        style(config.recommender.retrieval_k).cyan()
    );
    eprintln!(
        "  Filter Limit: {}",
        style(config.recommender.filter_limit).cyan()
    );
    eprintln!(
        "  Recommendations: {}",
        style(config.recommender.max_recommendations).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Geocoder:").bold().yellow());
    eprintln!("  URL: {}", style(&config.geocoder.base_url).cyan());
    eprintln!(
        "  Timeout: {}s",
        style(config.geocoder.timeout_seconds).cyan()
    );

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

fn load_existing_config() -> Result<Config> {
    Config::load().or_else(|_| {
        eprintln!(
            "{}",
            style("No existing configuration found. Using defaults.").yellow()
        );
        let base_dir = Config::config_dir().context("Failed to determine config directory")?;
        Ok(Config {
            base_dir,
            ..Config::default()
        })
    })
}

fn configure_data(config: &mut Config) -> Result<()> {
    let csv_path: String = Input::new()
        .with_prompt("Restaurant CSV path")
        .default(config.data.csv_path.display().to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Path cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    config.data.csv_path = PathBuf::from(csv_path.trim());
    Ok(())
}

fn select_provider(current: EmbeddingProvider) -> Result<EmbeddingProvider> {
    let names = EmbeddingProvider::ALL.map(EmbeddingProvider::as_str);
    let default_index = EmbeddingProvider::ALL
        .iter()
        .position(|&p| p == current)
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Embedding provider")
        .default(default_index)
        .items(&names)
        .interact()?;

    Ok(EmbeddingProvider::ALL[index])
}

fn configure_ollama(ollama: &mut OllamaConfig) -> Result<()> {
    let protocols = &["http", "https"];
    let default_index = protocols
        .iter()
        .position(|&p| p == ollama.protocol)
        .unwrap_or(0);

    let protocol_index = Select::new()
        .with_prompt("Ollama protocol")
        .default(default_index)
        .items(protocols)
        .interact()?;

    let protocol = protocols[protocol_index].to_string();

    let host: String = Input::new()
        .with_prompt("Ollama host")
        .default(ollama.host.clone())
        .validate_with(|input: &String| -> Result<(), ConfigError> {
            let temp_config = OllamaConfig {
                protocol: protocol.clone(),
                host: input.clone(),
                ..OllamaConfig::default()
            };
            temp_config.validate()?;
            Ok(())
        })
        .interact_text()?;

    let port: u16 = Input::new()
        .with_prompt("Ollama port")
        .default(ollama.port)
        .validate_with(|input: &u16| -> Result<(), &str> {
            if *input == 0 {
                Err("Port must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let model: String = Input::new()
        .with_prompt("Embedding model")
        .default(ollama.model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let batch_size: u32 = Input::new()
        .with_prompt("Batch size for embedding generation")
        .default(ollama.batch_size)
        .validate_with(|input: &u32| -> Result<(), &str> {
            if *input == 0 {
                Err("Batch size must be greater than 0")
            } else if *input > 1000 {
                Err("Batch size must be 1000 or less")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    ollama.set_protocol(protocol)?;
    ollama.set_host(host)?;
    ollama.set_port(port)?;
    ollama.set_model(model)?;
    ollama.set_batch_size(batch_size)?;

    Ok(())
}

fn test_ollama_connection(ollama: &OllamaConfig) -> Result<bool> {
    let client = OllamaClient::new(ollama)?
        .with_timeout(Duration::from_secs(5))
        .with_retry_attempts(1);

    match client.health_check() {
        Ok(()) => Ok(true),
        Err(e) => {
            eprintln!("  {}", style(format!("{e:#}")).dim());
            Ok(false)
        }
    }
}
