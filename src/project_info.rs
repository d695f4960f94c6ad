//! Parser for `xcodebuild -list` output
//!
//! The report is a flat, line-delimited micro-language: a header line, then
//! `Targets:` / `Build Configurations:` / `Schemes:` sections, each a list of
//! names terminated by a blank line. A single forward pass with one line of
//! lookahead is all it takes; the parser never backtracks.
//!
//! The parser is strict on purpose: malformed build-tool output must surface
//! immediately rather than silently producing a wrong target name.

use crate::error::{SimsyncError, SimsyncResult};

/// Header every report starts with
const REPORT_HEADER: &str = "Information about project";

/// Informational footer xcodebuild appends below the configuration list
const CONFIG_FOOTER: &str = "If no build configuration";

/// Noise line that can appear anywhere in the output; filtered at the
/// lookahead boundary so section parsing never sees it
const NOISE_LINE: &str = "Log record's backing file";

/// Parsed build report: the targets, build configurations, and schemes a
/// project declares, each in the order the report listed them.
///
/// `targets[0]` is treated as "the" target when none is specified explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub targets: Vec<String>,
    pub build_configurations: Vec<String>,
    pub schemes: Vec<String>,
}

impl BuildReport {
    /// First target named in the report, if any
    pub fn first_target(&self) -> Option<&str> {
        self.targets.first().map(String::as_str)
    }
}

/// Parse the text output of `xcodebuild -list` into a [`BuildReport`]
pub fn parse(text: &str) -> SimsyncResult<BuildReport> {
    Scanner::new(text).parse()
}

/// Single-pass line scanner with one line of lookahead
struct Scanner<'a> {
    report: &'a str,
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    fn new(report: &'a str) -> Self {
        Self {
            report,
            lines: report.lines().map(str::trim).collect(),
            cursor: 0,
        }
    }

    fn fail(&self, line: &str) -> SimsyncError {
        SimsyncError::Parse {
            line: line.to_string(),
            report: self.report.to_string(),
        }
    }

    /// Look at the next line without consuming it, skipping noise lines
    fn peek(&mut self) -> Option<&'a str> {
        while let Some(line) = self.lines.get(self.cursor) {
            if line.contains(NOISE_LINE) {
                self.cursor += 1;
                continue;
            }
            return Some(line);
        }
        None
    }

    /// Consume and return the next line; end of input is a parse error
    fn read(&mut self) -> SimsyncResult<&'a str> {
        let line = self.peek().ok_or_else(|| self.fail("<end of report>"))?;
        self.cursor += 1;
        Ok(line)
    }

    /// Accumulate section entries until a blank line or end of input.
    ///
    /// A header immediately followed by a blank line yields an empty but
    /// present section, which is valid.
    fn read_section(&mut self, into: &mut Vec<String>) -> SimsyncResult<()> {
        while self.peek().is_some() {
            let entry = self.read()?;
            if entry.is_empty() {
                break;
            }
            into.push(entry.to_string());
        }
        Ok(())
    }

    fn parse(mut self) -> SimsyncResult<BuildReport> {
        match self.peek() {
            Some(line) if line.starts_with(REPORT_HEADER) => {
                self.read()?;
            }
            Some(line) => return Err(self.fail(line)),
            None => return Err(self.fail("<end of report>")),
        }

        let mut info = BuildReport::default();
        while self.peek().is_some() {
            let line = self.read()?;
            if line.is_empty() || line.starts_with(CONFIG_FOOTER) {
                continue;
            }
            if line.starts_with("Targets:") {
                self.read_section(&mut info.targets)?;
            } else if line.starts_with("Build Configurations:") {
                self.read_section(&mut info.build_configurations)?;
            } else if line.starts_with("Schemes:") {
                self.read_section(&mut info.schemes)?;
            } else {
                return Err(self.fail(line));
            }
        }

        Ok(info)
    }
}
