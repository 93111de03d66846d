//! Plain-text export of stored tracks.
//!
//! Every track with at least two points becomes one file:
//!
//! ```text
//! <out_dir>/<shard_index>/track_<n>.txt
//! ```
//!
//! where `n` counts exported tracks across all shards, zero-padded to a
//! width estimated from the first shard. Each line holds one point as
//! `<longitude> <latitude> <unix-timestamp> <online>`.

use crate::error::CoreResult;
use crate::shard::{ShardIndex, ShardStore};
use crate::types::{Ping, Track};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Outcome of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Shards read.
    pub shards: ShardIndex,
    /// Track files written.
    pub exported: u64,
    /// Tracks skipped for having fewer than two points.
    pub skipped: u64,
}

/// Writes every tracked track in `store` to `out_dir`.
///
/// # Errors
///
/// Returns an error if a shard cannot be read or a file cannot be written.
pub fn export_tracks(store: &ShardStore, out_dir: &Path) -> CoreResult<ExportSummary> {
    let mut summary = ExportSummary {
        shards: store.shard_count()?,
        ..ExportSummary::default()
    };
    let mut width_estimate = None;

    for shard in store.iter()? {
        let (index, tracks) = shard?;
        let shard_dir = out_dir.join(index.to_string());
        fs::create_dir_all(&shard_dir)?;

        let shard_count = summary.shards as usize;
        let width =
            *width_estimate.get_or_insert_with(|| index_width(tracks.len() * shard_count));

        for track in &tracks {
            if !track.is_tracked() {
                summary.skipped += 1;
                continue;
            }

            let path = shard_dir.join(format!("track_{:0width$}.txt", summary.exported));
            let mut writer = BufWriter::new(File::create(&path)?);
            write_track(&mut writer, track)?;
            writer.flush()?;

            summary.exported += 1;
        }

        debug!(shard = index, exported = summary.exported, "exported shard");
    }

    Ok(summary)
}

/// Writes the points of `track`, one per line.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_track<W: Write>(writer: &mut W, track: &Track) -> io::Result<()> {
    for ping in &track.points {
        writeln!(writer, "{}", format_point(ping))?;
    }
    Ok(())
}

/// Formats one point as `<longitude> <latitude> <unix-timestamp> <online>`.
///
/// Numbers are written by [`format_float`]; the flag is `True` or `False`.
#[must_use]
pub fn format_point(ping: &Ping) -> String {
    format!(
        "{} {} {} {}",
        format_float(ping.longitude),
        format_float(ping.latitude),
        format_float(ping.unix_timestamp()),
        if ping.online { "True" } else { "False" }
    )
}

/// Formats a float the way Python's `repr` does.
///
/// Uses the shortest digits that round-trip. Magnitudes in `[1e-4, 1e16)`
/// are positional with at least one fractional digit (`0.0001`, `12.0`).
/// Anything else uses an exponent with a sign and at least two digits
/// (`1e-05`, `1.5e+16`).
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    if !(-4..16).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{zeros}.0")
    } else {
        let (int_part, fraction) = digits.split_at(int_len);
        format!("{sign}{int_part}.{fraction}")
    }
}

/// Digits needed to print indices `0..estimate`, at least one.
fn index_width(estimate: usize) -> usize {
    let mut largest = estimate.saturating_sub(1);
    let mut digits = 1;
    while largest >= 10 {
        largest /= 10;
        digits += 1;
    }
    digits
}
