//! commentmark - serialize rich-text editor content into comment HTML.
//!
//! # Usage
//!
//! ```bash
//! commentmark comment.json
//! commentmark --format html --escape comment.json
//! editor-export | commentmark --format json -
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use commentmark::config::{
    ConfigFlags, OutputFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use commentmark::content::RawContent;
use commentmark::perf;
use commentmark::render::{RenderOptions, markup_table, render};

/// Serialize rich-text editor content into comment HTML
#[derive(Parser, Debug)]
#[command(name = "commentmark", version, about, long_about = None)]
struct Cli {
    /// Raw editor content JSON (`-` or omitted reads stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON markup table overriding the default tags
    #[arg(long, value_name = "PATH")]
    markup: Option<PathBuf>,

    /// Escape HTML special characters in comment text
    #[arg(long)]
    escape: bool,

    /// Do not highlight @tags
    #[arg(long)]
    no_tags: bool,

    /// Comment author shown in the card
    #[arg(long)]
    author: Option<String>,

    /// Avatar image URL shown in the card
    #[arg(long, value_name = "URL")]
    avatar: Option<String>,

    /// Date shown in the card
    #[arg(long)]
    date: Option<String>,

    /// Enable timing output
    #[arg(long)]
    perf: bool,

    /// Write per-block serialization events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            escape: self.escape,
            no_tags: self.no_tags,
            perf: self.perf,
            format: self.format,
            markup: self.markup.clone(),
            author: self.author.clone(),
            avatar: self.avatar.clone(),
            date: self.date.clone(),
            debug_log: self.debug_log.clone(),
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging. Timings are only emitted when --perf is set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
                .add_directive("commentmark::perf=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("COMMENTMARK_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            %err,
            "failed to initialize debug log"
        );
    }

    // Saving or clearing defaults without input is a complete run.
    if (cli.save || cli.clear) && cli.file.is_none() {
        return Ok(());
    }

    let _run_scope = perf::scope("main.run");
    let input = read_input(cli.file.as_deref())?;
    let raw = RawContent::parse(&input)?;
    tracing::debug!(blocks = raw.blocks.len(), has_text = raw.has_text(), "parsed input");

    let table = markup_table(&effective)?;
    let output = render(&raw, &table, &RenderOptions::from_flags(&effective))?;
    println!("{output}");
    Ok(())
}
