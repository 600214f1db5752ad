//! Interactive line-oriented shell
//!
//! Every line that is not a command is buffered as a playback record.
//! `run [start end]` analyzes the buffer and prints the report; analysis
//! errors are reported and the loop carries on.
//!
//! A command word must start the line. A line with leading whitespace is
//! always buffered, even if its first word is a command; blank lines are
//! dropped.

use std::io::{self, BufRead, Write};

use log::{error, info, warn};
use uvt_core::{
    report::{render_report, ReportOptions},
    TimeOffset, UvtEngine,
};

/// Prompt printed before every line read
pub const PROMPT: &str = "uvt> ";

/// Horizontal rule framing reports and the banner
const RULE: &str = "=========================================";
/// Lighter rule around a report
const REPORT_RULE: &str = "-----------------------------------------";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Read the next line
    Continue,
    /// Leave the shell
    Exit,
}

/// Shell state: the record buffer and report settings
#[derive(Debug, Default)]
pub struct Shell {
    /// Buffered record lines, in entry order
    buffer: Vec<String>,
    /// How reports are rendered
    options: ReportOptions,
}

impl Shell {
    /// Create a shell with an empty buffer
    #[must_use]
    pub fn new(options: ReportOptions) -> Self {
        Self {
            buffer: Vec::new(),
            options,
        }
    }

    /// Records entered since the last reset
    #[must_use]
    pub fn buffered(&self) -> &[String] {
        &self.buffer
    }

    /// Read lines from `input` until it ends or `exit` is entered
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        print_banner(out)?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            if self.handle_line(&line?, out)? == Control::Exit {
                break;
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        writeln!(out, "Live long and prosper!")
    }

    /// Interpret one line of input
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Control> {
        let mut pieces = line.split_whitespace();
        let command = if line.starts_with(char::is_whitespace) {
            None
        } else {
            pieces.next()
        };

        match command {
            Some("run") => self.run_analysis(pieces.next(), pieces.next(), out)?,
            Some("reset") => {
                self.buffer.clear();
                writeln!(out, "Fragment buffer emptied.")?;
            }
            Some("help") => {
                writeln!(out, "{RULE}")?;
                writeln!(out, "UNIQUE VIEW TIME ANALYZER - HELP")?;
                writeln!(out)?;
                print_help(out)?;
                writeln!(out, "{RULE}")?;
            }
            Some("exit") => return Ok(Control::Exit),
            _ if line.trim().is_empty() => {}
            _ => self.buffer.push(line.trim().to_string()),
        }

        Ok(Control::Continue)
    }

    /// Analyze the buffer and print the report or the error
    fn run_analysis<W: Write>(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        out: &mut W,
    ) -> io::Result<()> {
        for bound in [start, end].into_iter().flatten() {
            if TimeOffset::parse(bound).is_none() {
                warn!("ignoring analysis window: '{bound}' is not a valid time");
            }
        }

        info!("analyzing {} buffered records", self.buffered().len());
        writeln!(out, "{REPORT_RULE}")?;
        match UvtEngine::analyze(&self.buffer.join("\n"), start, end) {
            Ok(engine) => {
                if let Some(result) = engine.result() {
                    writeln!(out, "{}", render_report(result, &self.options))?;
                }
            }
            Err(err) => {
                error!("analysis failed: {err}");
                writeln!(out, "error: {err}")?;
                if let Some(hint) = err.suggestion() {
                    writeln!(out, "hint: {hint}")?;
                }
            }
        }
        writeln!(out, "{REPORT_RULE}")
    }
}

/// Welcome text shown when the shell starts
fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "WELCOME TO THE UNIQUE VIEW TIME ANALYZER!")?;
    writeln!(out)?;
    print_help(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Enter or paste the list of fragments to analyze:")
}

/// Record format and command summary
pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    const HELP: &str = "\
Fragment entries should be in the
following format:
    VIDEOID,FRAGMENT_START,FRAGMENT_END[,USERID]
Where FRAGMENT_START and FRAGMENT_END
are milliseconds or in the format:
    hh:mm:ss.fff
    (hours `hh:` and `.fff` are optional)

Commands:
    help - shows this message
    reset - clears the input fragment buffer
    exit - exit this shell
    run [start end] - analyzes the fragments entered
          and prints the report";
    writeln!(out, "{HELP}")
}
