use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::recipe::{RecipeId, Step};

#[derive(Parser, Debug)]
#[command(name = "recipe-timer", version, about = "Step-by-step recipe countdown timer")]
pub struct Cli {
    /// Config file (default: ~/.config/recipe-timer/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Recipe file (overrides the config's store_path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved recipes
    List,

    /// Print a recipe's steps
    Show { id: RecipeId },

    /// Add a recipe
    Add {
        #[arg(long)]
        name: String,

        /// Step as description:seconds[:auto][:alert] (repeatable)
        #[arg(long = "step", value_parser = parse_step, required = true)]
        steps: Vec<Step>,
    },

    /// Rename a recipe or replace its steps
    Edit {
        id: RecipeId,

        #[arg(long)]
        name: Option<String>,

        /// Replaces the whole step list when given
        #[arg(long = "step", value_parser = parse_step)]
        steps: Vec<Step>,
    },

    /// Delete a recipe
    Delete { id: RecipeId },

    /// Walk through a recipe with the countdown timer
    Run {
        id: RecipeId,

        /// Exit once the last step completes
        #[arg(long)]
        exit_on_finish: bool,
    },

    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

/// Parse `description:seconds[:auto][:alert]`.
fn parse_step(spec: &str) -> Result<Step, String> {
    let mut parts = spec.split(':');
    let description = parts.next().unwrap_or_default().trim();
    let seconds = parts
        .next()
        .ok_or_else(|| format!("missing duration in step {spec:?}"))?;
    let seconds: u32 = seconds
        .trim()
        .parse()
        .map_err(|e| format!("invalid duration {seconds:?}: {e}"))?;

    let mut step = Step::new(description, seconds);
    for flag in parts {
        match flag.trim() {
            "auto" => step = step.with_auto_advance(true),
            "alert" => step = step.with_alert(true),
            other => return Err(format!("unknown step flag {other:?} (expected auto or alert)")),
        }
    }
    Ok(step)
}
