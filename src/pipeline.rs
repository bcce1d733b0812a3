use std::collections::{BTreeMap, HashMap};
use anyhow::{bail, Result};
use rand::Rng;
use serde_json::{Map, Value};

use crate::attack::{assign_score, ScorePath};
use crate::bucket::{bucket_timestamp, build_bucket_grid};
use crate::config::GeneratorConfig;
use crate::csv_reader::TransactionData;

// Tallies reported in the run summary.
#[derive(Debug, Default)]
pub struct RunCounters {
    pub rows_read: usize,
    pub skipped_labeled: usize,
    pub skipped_out_of_range: usize,
    pub localized_modifications: usize,
    pub diffuse_modifications: usize,
}

// Everything one pass produces: the bucket-keyed point lists for the map,
// the enriched event records, and the modified CSV rows.
pub struct PipelineOutput {
    pub buckets: BTreeMap<i64, Vec<Value>>,
    pub events: Vec<Map<String, Value>>,
    pub csv_headers: Vec<String>,
    pub csv_rows: Vec<Vec<String>>,
    pub counters: RunCounters,
}

// Runs the full aggregation pass.
// Inputs: run configuration, parsed transaction data, optional real-score
//         lookup, and the RNG driving the sampled scores
// Outputs: PipelineOutput, or an error on the first malformed row or
//          bucket-grid miss
// Key steps:
// 1. Pre-populate the bucket grid over the configured range
// 2. Filter each row per the label and time-range toggles
// 3. Score the row and append (lat, lon, score[, id]) to its bucket
// 4. Accumulate the enriched event record and the modified CSV row
pub fn run_pipeline<R: Rng>(
    config: &GeneratorConfig,
    data: &TransactionData,
    real_scores: Option<&HashMap<String, i64>>,
    rng: &mut R,
) -> Result<PipelineOutput> {
    let mut buckets = build_bucket_grid(config.grid_start, config.grid_end);
    let mut events = Vec::new();
    let mut csv_rows = Vec::new();
    let mut counters = RunCounters::default();

    let label_idx = data.headers.iter().position(|h| h == "EVENT_LABEL");
    let csv_headers: Vec<String> = data
        .headers
        .iter()
        .filter(|h| h.as_str() != "EVENT_LABEL")
        .cloned()
        .chain(std::iter::once("MODEL_SCORE".to_string()))
        .collect();

    for record in &data.records {
        counters.rows_read += 1;

        // Rows already labeled as fraud keep their real outcome so the map
        // shows some background fraud.
        if config.skip_labeled_fraud && record.label == Some(1) {
            counters.skipped_labeled += 1;
            continue;
        }

        if config.time_range_filter
            && (record.timestamp < config.grid_start || record.timestamp > config.grid_end)
        {
            counters.skipped_out_of_range += 1;
            continue;
        }

        let real_score = real_scores.and_then(|scores| scores.get(&record.event_id).copied());
        let (score, path) = assign_score(
            config,
            record.timestamp,
            record.latitude,
            record.longitude,
            &record.event_id,
            real_score,
            rng,
        );
        match path {
            ScorePath::Localized => counters.localized_modifications += 1,
            ScorePath::Diffuse => counters.diffuse_modifications += 1,
            ScorePath::Real | ScorePath::Baseline => {}
        }

        // A missing bucket means the grid bounds do not cover the input
        // data range, which invalidates the whole run.
        let bucket_key = bucket_timestamp(record.timestamp);
        let points = match buckets.get_mut(&bucket_key) {
            Some(points) => points,
            None => bail!(
                "bucket {} (event {} at {}) is outside the configured grid range",
                bucket_key,
                record.event_id,
                record.timestamp
            ),
        };
        points.push(Value::from(record.latitude));
        points.push(Value::from(record.longitude));
        points.push(Value::from(score));
        if config.include_event_id {
            points.push(Value::from(record.event_id.clone()));
        }

        let mut event = Map::new();
        for (header, value) in data.headers.iter().zip(&record.values) {
            if config.strip_fields.contains(header) {
                continue;
            }
            event.insert(header.clone(), Value::from(value.clone()));
        }
        event.insert("MODEL_SCORE".to_string(), Value::from(score));
        event.insert("EVENT_TS_BUCKET".to_string(), Value::from(bucket_key));
        events.push(event);

        let mut csv_row: Vec<String> = record
            .values
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != label_idx)
            .map(|(_, v)| v.clone())
            .collect();
        csv_row.push(score.to_string());
        csv_rows.push(csv_row);
    }

    Ok(PipelineOutput {
        buckets,
        events,
        csv_headers,
        csv_rows,
        counters,
    })
}
