//! `waldzell get`

use colored::Colorize;
use waldzell_core::{Config, MetagameLibrary};

/// Print a metagame's markdown to stdout.
pub fn execute(config: &Config, name: &str) -> anyhow::Result<()> {
    let library = MetagameLibrary::from_config(&config.metagames);

    match library.get_document(name) {
        Ok(text) => {
            print!("{text}");
            Ok(())
        }
        Err(e) if e.is_invalid_name() => Err(anyhow::anyhow!(
            "Invalid metagame name: {}. Run {} to see what is available.",
            name,
            "waldzell list".bright_blue()
        )),
        Err(e) => Err(anyhow::anyhow!("Failed to read metagame {}: {}", name, e)),
    }
}
