// Main module for the fraud-map attack dataset generator. Orchestrates data loading, attack scoring, and output writing.
use anyhow::Result;
use log::info;

use config::GeneratorConfig;
use csv_reader::{read_score_map, read_transactions};
use pipeline::run_pipeline;

//imports other modules in the generator
mod attack;
mod bucket;
mod config;
mod csv_reader;
mod geo;
mod output;
mod pipeline;

const INPUT_CSV_PATH: &str = "transaction_data_100K_full.csv";
const SCORE_CSV_PATH: Option<&str> = None;
const OUTPUT_CSV_PATH: &str = "attack_data_modified.csv";
const DATA_JSON_PATH: &str = "data.json";
const EVENTS_JSON_PATH: &str = "events.json";

// Main entry point for the dataset generator
// Inputs: None (all parameters come from GeneratorConfig defaults)
// Outputs: Result indicating success or error
// Key steps:
// 1. Load the base transaction dataset (and the optional real-score file)
// 2. Run the single aggregation pass over all rows
// 3. Write the bucket aggregate, event records, and modified CSV
// 4. Log the run summary
fn main() -> Result<()> {
    env_logger::init();

    let config = GeneratorConfig::default();
    let data = read_transactions(INPUT_CSV_PATH)?;
    if data.is_empty() {
        info!("no input rows in {}, nothing to do", INPUT_CSV_PATH);
        return Ok(());
    }

    let real_scores = match SCORE_CSV_PATH {
        Some(path) => Some(read_score_map(path)?),
        None => None,
    };

    let mut rng = rand::thread_rng();
    let result = run_pipeline(&config, &data, real_scores.as_ref(), &mut rng)?;

    output::write_data_json(DATA_JSON_PATH, &result.buckets)?;
    output::write_events_json(EVENTS_JSON_PATH, &result.events)?;
    output::write_modified_csv(OUTPUT_CSV_PATH, &result.csv_headers, &result.csv_rows)?;

    let counters = &result.counters;
    info!("rows read: {}", counters.rows_read);
    info!("skipped (already fraud): {}", counters.skipped_labeled);
    info!("skipped (out of range): {}", counters.skipped_out_of_range);
    info!(
        "attack modifications: {} localized, {} diffuse",
        counters.localized_modifications, counters.diffuse_modifications
    );
    info!("events written: {}", result.events.len());

    Ok(())
}
