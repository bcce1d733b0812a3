// Mean Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.7613;

// Great-circle distance between two (latitude, longitude) points in miles,
// standard haversine formula.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push a fractionally past 1.0 for near-antipodal points,
    // which would make asin return NaN.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_MILES * c
}
