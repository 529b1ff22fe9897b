//! `waldzell list` and `waldzell tree`

use clap::Args;
use colored::Colorize;
use waldzell_core::metagames::index::tree_len;
use waldzell_core::{Complexity, Config, ListFilter, ListFormat, MetagameLibrary};

/// Filters shared by `list` and `tree`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only metagames in this category (first directory level)
    #[arg(long)]
    pub category: Option<String>,

    /// Only metagames in this subcategory (second directory level)
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Only metagames of this complexity (beginner, intermediate, advanced, expert)
    #[arg(long)]
    pub complexity: Option<String>,

    /// Tag(s), comma-separated. Accepted but not yet applied.
    #[arg(long)]
    pub tag: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> anyhow::Result<ListFilter> {
        let complexity = self
            .complexity
            .as_deref()
            .map(str::parse::<Complexity>)
            .transpose()
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        let tags = self
            .tag
            .as_deref()
            .map(|t| t.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        Ok(ListFilter {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            complexity,
            tags,
        })
    }
}

/// List metagames as a table, or as a JSON payload when `--json` or
/// `--format` is given.
pub fn execute_list(
    config: &Config,
    args: &FilterArgs,
    format: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let library = MetagameLibrary::from_config(&config.metagames);
    let filter = args.to_filter()?;

    if json || format.is_some() {
        let format: ListFormat = format.map_or(Ok(ListFormat::List), str::parse::<ListFormat>)?;
        println!("{}", library.list_documents(&filter, format)?);
        return Ok(());
    }

    let metagames = library.index().list(&filter)?;
    if metagames.is_empty() {
        println!("No metagames found under {}", library.root().display());
        return Ok(());
    }

    println!("{:<45} {:<14} {:<50}", "URI", "Complexity", "Description");
    println!("{}", "-".repeat(110));

    for metagame in &metagames {
        let complexity = match metagame.complexity {
            Some(c @ Complexity::Beginner) => c.to_string().green().to_string(),
            Some(c @ Complexity::Intermediate) => c.to_string().cyan().to_string(),
            Some(c @ Complexity::Advanced) => c.to_string().yellow().to_string(),
            Some(c @ Complexity::Expert) => c.to_string().red().to_string(),
            None => "-".dimmed().to_string(),
        };

        let description = if metagame.description.chars().count() > 48 {
            let truncated: String = metagame.description.chars().take(45).collect();
            format!("{truncated}...")
        } else {
            metagame.description.clone()
        };

        println!("{:<45} {:<14} {:<50}", metagame.identifier, complexity, description);
    }

    println!();
    println!("{} metagame(s)", metagames.len());
    Ok(())
}

/// Print metagames grouped by category and subcategory.
pub fn execute_tree(config: &Config, args: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let library = MetagameLibrary::from_config(&config.metagames);
    let filter = args.to_filter()?;

    if json {
        println!("{}", library.list_documents(&filter, ListFormat::Tree)?);
        return Ok(());
    }

    let tree = library.index().tree(&filter)?;
    if tree.is_empty() {
        println!("No metagames found under {}", library.root().display());
        return Ok(());
    }

    for (category, subcategories) in &tree {
        println!("{}", category.bold());
        for (subcategory, names) in subcategories {
            println!("  {}", subcategory.cyan());
            for name in names {
                println!("    {name}");
            }
        }
    }

    println!();
    println!("{} metagame(s)", tree_len(&tree));
    Ok(())
}
