use chrono::{DateTime, TimeZone, Utc};

// A scripted fraud spike tied to a specific time and geographic point.
// Events within `duration_minutes` of the center time and `radius_miles`
// of the center point get an attack score.
#[derive(Debug, Clone)]
pub struct LocalizedAttack {
    pub center_time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_miles: f64,
    pub duration_minutes: i64,
}

// A scripted fraud spike applied probabilistically regardless of location,
// simulating a distributed attack from various parts of the country.
#[derive(Debug, Clone)]
pub struct DiffuseAttack {
    pub center_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub probability: f64,
}

// How an attack-matched event is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackScoreMode {
    // Every attacked event gets this exact score.
    Fixed(i64),
    // Uniform integer in [cutoff_score, max_score].
    SampledHigh,
}

// All run parameters in one place: attack script, score bounds, bucket grid
// bounds, and the per-run behavior toggles.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub localized_attacks: Vec<LocalizedAttack>,
    pub diffuse_attack: Option<DiffuseAttack>,
    pub score_mode: AttackScoreMode,

    // Model score bounds; baseline scores sample [min, cutoff], attack
    // scores sample or sit in [cutoff, max].
    pub min_score: i64,
    pub cutoff_score: i64,
    pub max_score: i64,

    // Bucket grid bounds; every accepted event must bucket inside this range.
    pub grid_start: DateTime<Utc>,
    pub grid_end: DateTime<Utc>,

    // Skip events whose timestamp falls outside [grid_start, grid_end]
    // instead of aborting on the bucket miss.
    pub time_range_filter: bool,
    // Skip rows already labeled as fraud so the map keeps some background
    // fraud from the real score distribution.
    pub skip_labeled_fraud: bool,
    // Append the event id as a fourth scalar to each bucketed point.
    pub include_event_id: bool,
    // Columns removed from the enriched event records before emission.
    pub strip_fields: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            // Two location based attacks, Houston on 07-01 and New York on
            // 07-15, both at 12:00 GMT.
            localized_attacks: vec![
                LocalizedAttack {
                    center_time: Utc.with_ymd_and_hms(2021, 7, 1, 12, 0, 0).unwrap(),
                    latitude: 29.758,
                    longitude: -95.381,
                    radius_miles: 35.0,
                    duration_minutes: 300,
                },
                LocalizedAttack {
                    center_time: Utc.with_ymd_and_hms(2021, 7, 15, 12, 0, 0).unwrap(),
                    latitude: 40.8,
                    longitude: -74.06,
                    radius_miles: 35.0,
                    duration_minutes: 300,
                },
            ],
            // Country-wide attack on 08-03: around this time all events have
            // a higher likelihood of fraud.
            diffuse_attack: Some(DiffuseAttack {
                center_time: Utc.with_ymd_and_hms(2021, 8, 3, 12, 0, 0).unwrap(),
                duration_minutes: 300,
                probability: 0.05,
            }),
            score_mode: AttackScoreMode::SampledHigh,
            min_score: 100,
            cutoff_score: 750,
            max_score: 900,
            grid_start: Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap(),
            grid_end: Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap(),
            time_range_filter: false,
            skip_labeled_fraud: true,
            include_event_id: true,
            strip_fields: vec!["EVENT_LABEL".to_string()],
        }
    }
}
