//! Batch analysis of a playback log file

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use uvt_core::{
    engine::window_from_text,
    report::{render_report, ReportOptions},
    EngineConfig, TimeOffset, UvtEngine,
};

/// Settings for a single `analyze` run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Log file to read, `-` for standard input
    pub input: PathBuf,
    /// Window start, raw or clock form
    pub start: Option<String>,
    /// Window end, raw or clock form
    pub end: Option<String>,
    /// User id for records with no user field
    pub default_user: Option<String>,
    /// Report rendering
    pub options: ReportOptions,
    /// Emit the result as JSON instead of a report
    pub json: bool,
}

/// Read the log named by `path`
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read playback log from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read playback log: {}", path.display()))
}

/// Analyze the log described by `args` and write the output to `out`
pub fn run<W: Write>(args: &AnalyzeArgs, out: &mut W) -> Result<()> {
    let text = read_input(&args.input)?;
    analyze_text(&text, args, out)
}

/// Analyze already loaded log text
pub fn analyze_text<W: Write>(text: &str, args: &AnalyzeArgs, out: &mut W) -> Result<()> {
    let mut config = EngineConfig::default();
    if let Some(user) = &args.default_user {
        config.default_user.clone_from(user);
    }

    let mut engine = UvtEngine::with_config(text, config)
        .with_context(|| format!("Invalid playback log: {}", args.input.display()))?;
    info!(
        "loaded {} records from {}",
        engine.events().len(),
        args.input.display()
    );

    for bound in [&args.start, &args.end].into_iter().flatten() {
        if TimeOffset::parse(bound).is_none() {
            warn!("ignoring analysis window: '{bound}' is not a valid time");
        }
    }
    let window = window_from_text(args.start.as_deref(), args.end.as_deref())
        .context("Invalid analysis window")?;
    if let Some(window) = &window {
        debug!("analysis window {window}");
    }
    engine.set_window(window);

    let result = engine.run().context("Analysis failed")?;
    debug!("analyzed {} users", result.user_count());

    if args.json {
        let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out, "{}", render_report(result, &args.options))?;
    }

    Ok(())
}
