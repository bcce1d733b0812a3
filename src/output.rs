use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use anyhow::{Context, Result};
use serde_json::{Map, Value};

// Bucket-keyed aggregate for the map frontend: serde_json stringifies the
// integer keys, which is exactly the WebGL-globe series shape it expects.
pub fn write_data_json(file_path: &str, buckets: &BTreeMap<i64, Vec<Value>>) -> Result<()> {
    let file = File::create(file_path).with_context(|| format!("creating {}", file_path))?;
    serde_json::to_writer(BufWriter::new(file), buckets)
        .with_context(|| format!("writing {}", file_path))?;
    Ok(())
}

// Enriched per-event records, array form.
pub fn write_events_json(file_path: &str, events: &[Map<String, Value>]) -> Result<()> {
    let file = File::create(file_path).with_context(|| format!("creating {}", file_path))?;
    serde_json::to_writer(BufWriter::new(file), events)
        .with_context(|| format!("writing {}", file_path))?;
    Ok(())
}

// Modified copy of the input dataset: label column replaced by the
// synthetic MODEL_SCORE column, rows in input order.
pub fn write_modified_csv(file_path: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(file_path).with_context(|| format!("creating {}", file_path))?;
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
