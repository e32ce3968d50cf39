//! `ms_sm_node_convert.txt` loader.

use std::path::Path;

use log::{info, warn};

use mx_trips::SkippedLine;

use crate::{NodeMapping, RemapError, RemapLine, RemapResult, parse_line};

/// Outcome of reading the remap file.
#[derive(Clone, Debug, Default)]
pub struct RemapReport {
    pub mapping_lines:    usize,
    pub coordinate_lines: usize,
    pub skipped:          Vec<SkippedLine>,
    /// Targets still at `(0, 0)` after the whole file was read.
    pub untranslated:     Vec<u64>,
}

/// Read the remap file at `path`.
pub fn load_remap(path: &Path) -> RemapResult<(NodeMapping, RemapReport)> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| RemapError::Read { path: path.to_owned(), source })?;
    load_remap_str(&text)
}

/// Like [`load_remap`] but parses an in-memory string.
///
/// Coordinate lines may only name targets introduced by an earlier mapping
/// line.
pub fn load_remap_str(text: &str) -> RemapResult<(NodeMapping, RemapReport)> {
    let mut mapping = NodeMapping::new();
    let mut report = RemapReport::default();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(trimmed) {
            Some(RemapLine::Map { sources, target }) => {
                for source in sources {
                    mapping.map(source, target)?;
                }
                report.mapping_lines += 1;
            }
            Some(RemapLine::Coordinates { target, x, y }) => {
                mapping.set_coordinates(target, x, y)?;
                report.coordinate_lines += 1;
            }
            None => {
                let line_no = idx as u64 + 1;
                warn!("remap: skipped line {line_no}: {trimmed:?}");
                report.skipped.push(SkippedLine {
                    line:   line_no,
                    text:   trimmed.to_owned(),
                    reason: "no remap shape matches".to_owned(),
                });
            }
        }
    }

    report.untranslated = mapping.untranslated();
    for id in &report.untranslated {
        warn!("node id not translated: {id}");
    }
    info!(
        "remap: {} sources onto {} targets ({} untranslated)",
        mapping.source_count(),
        mapping.target_count(),
        report.untranslated.len()
    );

    Ok((mapping, report))
}
