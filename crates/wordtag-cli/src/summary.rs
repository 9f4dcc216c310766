//! Console summaries for featurized batches.
//!
//! A compact per-column view of the numeric features (min/mean/max) plus
//! a table preview of the row-level columns a human can actually read;
//! the flat feature vector is reported by width, not printed slot by slot.

use arrow::array::{Array, Float32Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

/// Columns worth showing row by row in the preview table.
const PREVIEW_COLUMNS: &[&str] = &[
    "Label",
    "WordNum",
    "Word",
    "ContextBefore",
    "ContextAfter",
];

/// Print schema shape and per-column ranges for a featurized batch.
pub fn print_batch_summary(batch: &RecordBatch, total_rows: usize) -> anyhow::Result<()> {
    println!(
        "{} rows, {} columns after featurization",
        total_rows,
        batch.num_columns()
    );
    println!();

    let schema = batch.schema();
    for (idx, field) in schema.fields().iter().enumerate() {
        match field.data_type() {
            DataType::Float32 => {
                let arr = batch
                    .column(idx)
                    .as_any()
                    .downcast_ref::<Float32Array>()
                    .unwrap();
                if let Some((min, mean, max)) = float_range(arr) {
                    println!(
                        "  {:<24} min {:>8.2}  mean {:>8.2}  max {:>8.2}",
                        field.name(),
                        min,
                        mean,
                        max
                    );
                }
            }
            DataType::FixedSizeList(item, width) if item.data_type() == &DataType::Float32 => {
                println!("  {:<24} feature vector, width {}", field.name(), width);
            }
            _ => {}
        }
    }
    println!();
    Ok(())
}

/// Render the human-readable columns of a batch as a table.
pub fn print_preview(batch: &RecordBatch) -> anyhow::Result<()> {
    let schema = batch.schema();
    let indices: Vec<usize> = PREVIEW_COLUMNS
        .iter()
        .filter_map(|name| schema.index_of(name).ok())
        .collect();
    let projected = batch.project(&indices)?;
    println!("{}", pretty_format_batches(&[projected])?);
    Ok(())
}

fn float_range(arr: &Float32Array) -> Option<(f32, f32, f32)> {
    if arr.is_empty() {
        return None;
    }
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for i in 0..arr.len() {
        if arr.is_null(i) {
            continue;
        }
        let v = arr.value(i);
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((min, (sum / count as f64) as f32, max))
}
