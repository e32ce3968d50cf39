//! Reader for MITSIM's whitespace-separated output files.
//!
//! `dep.out`, `vehicle.out` and `trajectory.out` are columns separated by
//! runs of spaces, sometimes followed by free-form trailing data (the path
//! of a vehicle).  They are read with a headerless, flexible, space-delimited
//! `csv::Reader`; empty fields produced by repeated blanks are dropped, the
//! first `arity` fields are deserialized positionally into a row struct, and
//! anything after them is ignored.
//!
//! Lines with too few fields or fields of the wrong type are not fatal: they
//! are logged and returned as [`SkippedLine`]s.  Times, positions and speeds
//! are plain unsigned decimals in these files, so `NaN`, `inf` and negative
//! values count as the wrong type.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use log::warn;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;

use crate::TripResult;

/// A line that could not be parsed and was left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line:   u64,
    pub text:   String,
    pub reason: String,
}

/// Deserialize every parsable line of `reader` into `T` and hand it to `f`
/// together with its line number.
///
/// Errors returned by `f` abort the read; unparsable lines do not.
pub(crate) fn for_each_row<R, T, F>(
    reader: R,
    arity: usize,
    source: &'static str,
    mut f: F,
) -> TripResult<Vec<SkippedLine>>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(u64, T) -> TripResult<()>,
{
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut skipped = Vec::new();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let fields: Vec<&str> = record
            .iter()
            .flat_map(|f| f.split('\t'))
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();

        match parse_fields::<T>(&fields, arity) {
            Ok(row) => f(line, row)?,
            Err(reason) => {
                let text = fields.join(" ");
                warn!("{source}: skipped line {line}: {text:?} ({reason})");
                skipped.push(SkippedLine { line, text, reason });
            }
        }
    }

    Ok(skipped)
}

fn parse_fields<T: DeserializeOwned>(fields: &[&str], arity: usize) -> Result<T, String> {
    if fields.len() < arity {
        return Err(format!("expected {arity} fields, found {}", fields.len()));
    }
    let row = StringRecord::from(fields[..arity].to_vec());
    row.deserialize(None).map_err(|e| e.to_string())
}

/// `deserialize_with` helper for decimal columns that must be finite and
/// non-negative.
pub(crate) fn non_negative<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(de)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("{value} is not a non-negative number")))
    }
}
