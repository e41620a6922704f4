// src/export/mod.rs
// =============================================================================
// This module writes the result table to disk.
//
// Three formats are available:
// - Full: every row, columns type,level,search,result_1..result_5
// - ResultsOnly: only Result rows, columns level,search,result_1..result_5
// - Gephi: only Result rows, columns search,result_1..result_5, no header,
//   ';' separated, every field quoted. Import into Gephi as an undirected
//   graph and sum parallel edges.
//
// File names are built from the seed term and the level the crawl ended at,
// e.g. results_cats_depth2.csv.
// =============================================================================

mod csv;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::crawl::ResultTable;

pub use self::csv::{write_full, write_gephi, write_results_only};

/// The export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Full,
    ResultsOnly,
    Gephi,
}

impl ExportKind {
    fn prefix(&self) -> &'static str {
        match self {
            ExportKind::Full => "results",
            ExportKind::ResultsOnly => "results_only",
            ExportKind::Gephi => "gephi",
        }
    }

    /// Name of the file this export is written to.
    ///
    /// Example: ExportKind::Gephi, "big cats", 3 -> "gephi_big_cats_depth3.csv"
    pub fn file_name(&self, seed: &str, level: u32) -> String {
        format!("{}_{}_depth{}.csv", self.prefix(), seed.replace(' ', "_"), level)
    }
}

/// Writes `table` in the `kind` format into `dir` and returns the file path.
pub fn export_table(
    kind: ExportKind,
    table: &ResultTable,
    seed: &str,
    level: u32,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(kind.file_name(seed, level));

    let file = File::create(&path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let writer = BufWriter::new(file);

    let written = match kind {
        ExportKind::Full => write_full(table, writer),
        ExportKind::ResultsOnly => write_results_only(table, writer),
        ExportKind::Gephi => write_gephi(table, writer),
    };
    written.with_context(|| format!("Could not write {}", path.display()))?;

    info!(path = %path.display(), ?kind, "saved csv");
    Ok(path)
}
