//! Encoder tick logs: one `left right` sample of cumulative counts per line.
//!
//! Fields may be separated by whitespace or a comma. Blank lines and anything
//! after `#` are ignored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Cumulative encoder counts of both wheels at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSample {
    pub left: i64,
    pub right: i64,
}

pub fn read_tick_log(path: &Path) -> Result<Vec<TickSample>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tick log {}", path.display()))?;
    parse_tick_log(&text).with_context(|| format!("invalid tick log {}", path.display()))
}

pub fn parse_tick_log(text: &str) -> Result<Vec<TickSample>> {
    let mut samples = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        let [left, right] = fields.as_slice() else {
            bail!("line {}: expected 2 tick counts, found {}", line_no, fields.len());
        };

        samples.push(TickSample {
            left: left
                .parse()
                .with_context(|| format!("line {}: invalid left tick count {:?}", line_no, left))?,
            right: right
                .parse()
                .with_context(|| format!("line {}: invalid right tick count {:?}", line_no, right))?,
        });
    }
    Ok(samples)
}
