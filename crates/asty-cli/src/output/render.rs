//! Human and JSON writers for [`ResultRecord`] trees.

use std::io::Write;

use super::models::ResultRecord;
use crate::errors::AppError;

/// Writes one line per result, nesting captures by two spaces.
pub(crate) fn render_human<W: Write>(records: &[ResultRecord], out: &mut W) -> Result<(), AppError> {
    if records.is_empty() {
        return writeln!(out, "no matches").map_err(AppError::WriteOutput);
    }
    let mut stack: Vec<(usize, &ResultRecord)> = records.iter().rev().map(|record| (0, record)).collect();
    while let Some((depth, record)) = stack.pop() {
        write_line(out, depth, record).map_err(AppError::WriteOutput)?;
        for (_, results) in record.captures.0.iter().rev() {
            stack.extend(results.iter().rev().map(|child| (depth + 1, child)));
        }
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, depth: usize, record: &ResultRecord) -> std::io::Result<()> {
    let indent = "  ".repeat(depth);
    let capture = record.capture.as_deref().unwrap_or("-");
    match &record.summary {
        Some(summary) => writeln!(out, "{indent}{capture} {} {summary}", record.kind),
        None => writeln!(out, "{indent}{capture} {}", record.kind),
    }
}

/// Writes the results as a pretty-printed JSON array.
pub(crate) fn render_json<W: Write>(records: &[ResultRecord], out: &mut W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, records).map_err(AppError::SerialiseOutput)?;
    writeln!(out).map_err(AppError::WriteOutput)
}
