use std::collections::HashMap;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

// One input row: the typed fields the pipeline needs, plus every original
// column value in header order so the writers can reproduce them.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<i32>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionData {
    pub headers: Vec<String>,
    pub records: Vec<TransactionRecord>,
}

impl TransactionData {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// Timestamps arrive in a couple of shapes across dataset exports; accept
// RFC 3339, the "+00:00" space-separated form, and bare naive UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(anyhow!("unrecognized timestamp format: {:?}", raw))
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| anyhow!("input CSV is missing required column {:?}", name))
}

// Reads the base transaction dataset. Header order is preserved so the
// modified CSV can mirror the input; the label column is optional since
// scored exports have already dropped it.
pub fn read_transactions(file_path: &str) -> Result<TransactionData> {
    let mut rdr = csv::Reader::from_path(file_path)
        .with_context(|| format!("opening transaction CSV {}", file_path))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let id_idx = column_index(&headers, "EVENT_ID")?;
    let ts_idx = column_index(&headers, "EVENT_TIMESTAMP")?;
    let lat_idx = column_index(&headers, "billing_latitude")?;
    let lon_idx = column_index(&headers, "billing_longitude")?;
    let label_idx = headers.iter().position(|h| h == "EVENT_LABEL");

    let mut records = Vec::new();
    for (row_num, row) in rdr.records().enumerate() {
        let row = row?;
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        let event_id = values[id_idx].clone();

        let record = (|| -> Result<TransactionRecord> {
            let timestamp = parse_timestamp(&values[ts_idx])?;
            let latitude: f64 = values[lat_idx].parse()?;
            let longitude: f64 = values[lon_idx].parse()?;
            let label = match label_idx {
                Some(i) => Some(values[i].parse()?),
                None => None,
            };
            Ok(TransactionRecord {
                event_id,
                timestamp,
                latitude,
                longitude,
                label,
                values,
            })
        })()
        .with_context(|| format!("parsing input row {}", row_num + 1))?;

        records.push(record);
    }

    Ok(TransactionData { headers, records })
}

// Side file mapping event ids to the detector's raw score text, used when a
// run should emit real model scores instead of sampled baselines.
#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "EVENT_ID")]
    event_id: String,
    #[serde(rename = "MODEL_SCORE")]
    raw_score: String,
}

// Pulls the first embedded number out of the raw score text, e.g.
// "[{'MODEL_SCORE': 725.0}]" -> 725.
pub fn extract_score(raw: &str) -> Option<i64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let number: String = raw[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.parse::<f64>().ok().map(|s| s.round() as i64)
}

pub fn read_score_map(file_path: &str) -> Result<HashMap<String, i64>> {
    let mut rdr = csv::Reader::from_path(file_path)
        .with_context(|| format!("opening score CSV {}", file_path))?;

    let mut scores = HashMap::new();
    for row in rdr.deserialize() {
        let row: ScoreRow = row?;
        let score = extract_score(&row.raw_score).ok_or_else(|| {
            anyhow!(
                "no numeric score in {:?} for event {}",
                row.raw_score,
                row.event_id
            )
        })?;
        scores.insert(row.event_id, score);
    }

    Ok(scores)
}
