use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Prefix the launch instrumentation uses for its own diagnostic lines,
/// which end up interleaved with symbol names in the raw log.
pub const LOG_LINE_PREFIX: &str = "[OrderFile]";

/// Symbols in first-seen order with duplicates dropped: a hash set for
/// membership plus an append-only list holding the order. A symbol appears
/// at most once, at the position of its first occurrence.
#[derive(Debug, Default)]
pub struct SymbolOrder {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl SymbolOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw log line. Blank lines, instrumentation log lines and
    /// symbols already seen in this run are dropped silently. Returns
    /// whether the line contributed a new symbol.
    pub fn push(&mut self, line: &str) -> bool {
        let symbol = line.trim();
        if symbol.is_empty() || symbol.starts_with(LOG_LINE_PREFIX) {
            return false;
        }
        if self.seen.contains(symbol) {
            return false;
        }
        self.seen.insert(symbol.to_string());
        self.ordered.push(symbol.to_string());
        true
    }

    /// Reads a raw symbol log line by line. A missing file is an error up
    /// front, before anything else happens.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("raw symbol file does not exist: {}", path.display());
        }

        let file = File::open(path)
            .with_context(|| format!("failed to open raw symbol file {}", path.display()))?;
        let mut order = Self::new();
        for line in BufReader::new(file).lines() {
            let line =
                line.with_context(|| format!("failed to read from {}", path.display()))?;
            order.push(&line);
        }
        Ok(order)
    }

    pub fn symbols(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Writes the order file: one symbol per line, newline terminated,
    /// creating or overwriting the destination.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create order file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        for symbol in &self.ordered {
            writeln!(out, "{}", symbol)
                .with_context(|| format!("failed to write to {}", path.display()))?;
        }
        out.flush()
            .with_context(|| format!("failed to write to {}", path.display()))?;
        Ok(())
    }
}
