//! Parser for the libphonenumber geocoding text format.
//!
//! Each record sits on its own line as `<digits>|<location>`, e.g.
//! `1408|California`. Comment lines start with `#`. Anything that doesn't
//! fit the record pattern is skipped, not treated as an error.

use tracing::{debug, trace};

use crate::prefix::{Prefix, PrefixRecord};

/// Result of parsing a source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Records in file order.
    pub records: Vec<PrefixRecord>,
    /// Non-blank, non-comment lines that were not valid records.
    pub skipped: usize,
}

/// Parse the whole source text.
pub fn parse_source(text: &str) -> ParsedSource {
    let mut parsed = ParsedSource::default();

    for (idx, line) in text.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some(record) => parsed.records.push(record),
            None => {
                trace!(line = idx + 1, content = line, "skipping malformed record");
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "parsed prefix source"
    );
    parsed
}

/// Parse one `<digits>|<location>` line.
fn parse_line(line: &str) -> Option<PrefixRecord> {
    let (digits, location) = line.split_once('|')?;
    let prefix = Prefix::parse(digits).ok()?;
    if location.is_empty() {
        return None;
    }
    Some(PrefixRecord::new(prefix, location))
}
