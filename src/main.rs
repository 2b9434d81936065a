use anyhow::Context;
use std::env;
use tracing_subscriber::EnvFilter;

mod game;
mod soak;

use game::config::SnakeConfig;

fn load_snake_config() -> anyhow::Result<SnakeConfig> {
  let Some(path) = env::var("SNAKE_CONFIG")
    .ok()
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
  else {
    return SnakeConfig::from_env().context("invalid snake settings in environment");
  };

  let text = std::fs::read_to_string(&path)
    .with_context(|| format!("failed to read snake config {path}"))?;
  SnakeConfig::from_json(&text).with_context(|| format!("invalid snake config {path}"))
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = load_snake_config()?;
  let soak_config = soak::SoakConfig::from_env()?;
  tracing::info!(?config, seed = soak_config.seed, frames = soak_config.frames, "starting soak");

  let report = soak::run(&soak_config, config)?;
  let json = serde_json::to_string_pretty(&report).context("failed to serialize soak report")?;
  println!("{json}");

  Ok(())
}
