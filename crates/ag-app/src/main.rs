use std::io::{BufWriter, Write};

use ag_core::config::ConvertConfig;
use ag_term::formatter::{AnsiFormatter, ColorDepth};
use anyhow::{Context, Result};
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.clamp_all();
    config.validate().context("Option invalide")?;

    // 4. Convertir
    let formatter = AnsiFormatter::new(ColorDepth::detect());
    log::debug!("Profondeur de couleur : {:?}", formatter.depth());
    let lines = pipeline::render_image(&cli.image, &config, cli.width, cli.height, &formatter)?;

    // 5. Écrire
    let mut out = BufWriter::new(std::io::stdout().lock());
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Config file when present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    if cli.config.exists() {
        ag_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConvertConfig::default())
    }
}
