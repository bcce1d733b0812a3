use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde_json::Value;

// Map rendering aggregates events into fixed half-hour windows.
pub const BUCKET_SECONDS: i64 = 1800;

// Rounds a timestamp to the nearest half-hour boundary and returns it as
// integer epoch seconds. Seconds and sub-seconds are zeroed; minute < 15
// floors to :00, 15..45 rounds to :30 of the same hour, and >= 45 rounds
// up to :00 of the next hour.
pub fn bucket_timestamp(t: DateTime<Utc>) -> i64 {
    let secs = t.timestamp();
    let hour = secs.div_euclid(3600) * 3600;
    let minute = (secs - hour) / 60;

    if minute < 15 {
        hour
    } else if minute < 45 {
        hour + BUCKET_SECONDS
    } else {
        hour + 3600
    }
}

// Pre-populates the full bucket range with empty point lists, one per
// 30-minute step from the aligned start through the aligned end. Every
// bucket key the aggregator will ever look up must come from this grid.
pub fn build_bucket_grid(start: DateTime<Utc>, end: DateTime<Utc>) -> BTreeMap<i64, Vec<Value>> {
    let mut grid = BTreeMap::new();
    let mut key = bucket_timestamp(start);
    let end_key = bucket_timestamp(end);

    while key <= end_key {
        grid.insert(key, Vec::new());
        key += BUCKET_SECONDS;
    }

    grid
}
