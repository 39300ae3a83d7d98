//! Glyphveil - Chat Message Obfuscation
//!
//! Command-line front end for the obfuscation engine: transform text, single
//! message nodes or whole conversations stored as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use unicode_normalization::UnicodeNormalization;

use glyphveil::{random, transformers, Config, Conversation, MessageNode, ObfuscationType};

#[derive(Parser)]
#[command(name = "glyphveil")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reversible obfuscation for chat message text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate text given as an argument or on stdin
    Apply {
        /// Text to transform (reads stdin when omitted)
        text: Option<String>,

        /// Mode: cyrillic-to-latin, invisible-chars or homoglyphs
        #[arg(short, long)]
        mode: Option<String>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print changed offsets as JSON on a second line
        #[arg(long)]
        offsets: bool,
    },

    /// Obfuscate the selected variant of a message node stored as JSON
    Node {
        /// Path to the node JSON file
        file: PathBuf,

        #[arg(short, long)]
        mode: Option<String>,

        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Obfuscate every message of a conversation stored as JSON
    Conversation {
        /// Path to the conversation JSON file
        file: PathBuf,

        #[arg(short, long)]
        mode: Option<String>,

        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Report invisible characters in text
    Detect {
        /// Text to inspect (reads stdin when omitted)
        text: Option<String>,
    },

    /// List obfuscation modes
    Modes,

    /// Show the configuration file and its values
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Some(e) = config_error {
        warn!("Using default configuration: {:#}", e);
    }

    match cli.command {
        Commands::Apply {
            text,
            mode,
            seed,
            offsets,
        } => apply_text(&config, text, mode.as_deref(), seed, offsets)?,
        Commands::Node { file, mode, seed } => {
            obfuscate_node(&config, &file, mode.as_deref(), seed)?
        }
        Commands::Conversation { file, mode, seed } => {
            obfuscate_conversation(&config, &file, mode.as_deref(), seed)?
        }
        Commands::Detect { text } => detect_invisible(text)?,
        Commands::Modes => list_modes(),
        Commands::Config => show_config(&config)?,
    }

    Ok(())
}

/// Resolve the mode from the command line, falling back to the config
fn resolve_mode(config: &Config, mode: Option<&str>) -> Result<ObfuscationType> {
    match mode {
        Some(name) => name.parse::<ObfuscationType>().with_context(|| {
            let available: Vec<&str> = ObfuscationType::ALL.iter().map(|m| m.cli_name()).collect();
            format!("Available modes: {}", available.join(", "))
        }),
        None => Ok(config.default_mode),
    }
}

/// Text from the argument, or all of stdin
fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Obfuscate a piece of text
fn apply_text(
    config: &Config,
    text: Option<String>,
    mode: Option<&str>,
    seed: Option<u64>,
    offsets: bool,
) -> Result<()> {
    let mode = resolve_mode(config, mode)?;
    let mut input = read_input(text)?;
    if config.normalize_input {
        input = input.nfc().collect();
    }

    let mut rng = random::from_seed(seed.or(config.seed));
    let outcome = mode.apply(&input, &mut rng);

    info!(
        "Applied {}: {} chars → {} chars",
        mode.display_name(),
        input.chars().count(),
        outcome.text.chars().count()
    );

    println!("{}", outcome.text);
    if offsets || config.show_offsets {
        println!("{}", serde_json::to_string(&outcome.changed_indices)?);
    }

    Ok(())
}

/// Obfuscate a message node read from a JSON file
fn obfuscate_node(
    config: &Config,
    path: &Path,
    mode: Option<&str>,
    seed: Option<u64>,
) -> Result<()> {
    let mode = resolve_mode(config, mode)?;
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read node file {}", path.display()))?;
    let mut node: MessageNode =
        serde_json::from_str(&data).context("Failed to parse node file")?;
    if config.normalize_input {
        node.normalize_text();
    }

    let mut rng = random::from_seed(seed.or(config.seed));
    let result = node.obfuscate(mode, &mut rng)?;

    info!(
        "Applied {} to node {} ({} offsets)",
        mode.display_name(),
        result.node.id,
        result.changed_indices.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Obfuscate every node of a conversation read from a JSON file
fn obfuscate_conversation(
    config: &Config,
    path: &Path,
    mode: Option<&str>,
    seed: Option<u64>,
) -> Result<()> {
    let mode = resolve_mode(config, mode)?;
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read conversation file {}", path.display()))?;
    let mut conversation: Conversation =
        serde_json::from_str(&data).context("Failed to parse conversation file")?;
    if config.normalize_input {
        conversation.normalize_text();
    }

    let mut rng = random::from_seed(seed.or(config.seed));
    let result = conversation.obfuscate_all(mode, &mut rng)?;

    info!(
        "Applied {} to {} messages of \"{}\"",
        mode.display_name(),
        result.message_nodes.len(),
        result.title
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Report invisible characters
fn detect_invisible(text: Option<String>) -> Result<()> {
    let input = read_input(text)?;
    let count = transformers::count_invisible_chars(&input);

    if count == 0 {
        println!("No invisible characters found");
    } else {
        println!("Found {} invisible characters", count);
    }

    Ok(())
}

/// List obfuscation modes
fn list_modes() {
    println!("Obfuscation modes:\n");

    for mode in ObfuscationType::ALL {
        println!("  {:<20} {}", mode.cli_name(), mode.display_name());
        println!("  {:<20} {}", "", mode.description());
        println!();
    }
}

/// Show config path and values
fn show_config(config: &Config) -> Result<()> {
    println!("Config file: {}", Config::config_path()?.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
