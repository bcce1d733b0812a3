use chrono::{DateTime, Utc};
use log::info;
use rand::Rng;

use crate::config::{AttackScoreMode, GeneratorConfig};
use crate::geo::haversine_miles;

// Which branch produced a score; the pipeline tallies these for the run
// summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePath {
    Localized,
    Diffuse,
    Real,
    Baseline,
}

fn within_window(t: DateTime<Utc>, center: DateTime<Utc>, duration_minutes: i64) -> bool {
    (t - center).num_seconds().abs() < duration_minutes * 60
}

fn attack_score<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> i64 {
    match config.score_mode {
        AttackScoreMode::Fixed(score) => score,
        AttackScoreMode::SampledHigh => rng.gen_range(config.cutoff_score..=config.max_score),
    }
}

// Produces the model score for one event. Localized attacks are checked in
// list order and the first match wins; the diffuse attack is an independent
// per-event draw inside its window. Unattacked events keep the real score
// when one is available, otherwise they sample the baseline range.
pub fn assign_score<R: Rng>(
    config: &GeneratorConfig,
    t: DateTime<Utc>,
    lat: f64,
    lon: f64,
    event_id: &str,
    real_score: Option<i64>,
    rng: &mut R,
) -> (i64, ScorePath) {
    for attack in &config.localized_attacks {
        if within_window(t, attack.center_time, attack.duration_minutes)
            && haversine_miles(lat, lon, attack.latitude, attack.longitude) < attack.radius_miles
        {
            info!("location attack modification: event {}", event_id);
            return (attack_score(config, rng), ScorePath::Localized);
        }
    }

    if let Some(diffuse) = &config.diffuse_attack {
        if within_window(t, diffuse.center_time, diffuse.duration_minutes)
            && rng.gen::<f64>() < diffuse.probability
        {
            info!("global attack modification: event {}", event_id);
            return (attack_score(config, rng), ScorePath::Diffuse);
        }
    }

    match real_score {
        Some(score) => (score, ScorePath::Real),
        None => (
            rng.gen_range(config.min_score..=config.cutoff_score),
            ScorePath::Baseline,
        ),
    }
}
