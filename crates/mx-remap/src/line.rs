//! Remap file line grammar.
//!
//! ```text
//! 122 => 60896                  (a) one source
//! {45:1, 45:2, 57} => 60910     (b) several sources, synthetic ids allowed
//! 60896 = (3714955,14324512)    (c) target coordinates
//! ```
//!
//! Shapes are tried in that order.  Text after a `#` is ignored.

use mx_core::NodeId;

/// One meaningful line of the remap file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemapLine {
    /// Shapes (a) and (b).
    Map { sources: Vec<NodeId>, target: u64 },
    /// Shape (c).
    Coordinates { target: u64, x: i64, y: i64 },
}

/// Parse one line.  Returns `None` for lines that match no shape, including
/// blank and comment-only lines.
pub fn parse_line(line: &str) -> Option<RemapLine> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return None;
    }

    if let Some((lhs, rhs)) = line.split_once("=>") {
        let target = parse_target(rhs)?;
        let lhs = lhs.trim();
        if let Ok(source) = lhs.parse::<NodeId>() {
            return Some(RemapLine::Map { sources: vec![source], target });
        }
        let sources = parse_source_list(lhs)?;
        return Some(RemapLine::Map { sources, target });
    }

    let (lhs, rhs) = line.split_once('=')?;
    let target = parse_target(lhs)?;
    let (x, y) = rhs.trim().strip_prefix('(')?.strip_suffix(')')?.split_once(',')?;
    Some(RemapLine::Coordinates { target, x: x.trim().parse().ok()?, y: y.trim().parse().ok()? })
}

fn parse_target(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `{a, b c}`: separators are commas and whitespace.
fn parse_source_list(s: &str) -> Option<Vec<NodeId>> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    let sources = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<NodeId>().ok())
        .collect::<Option<Vec<_>>>()?;
    (!sources.is_empty()).then_some(sources)
}
