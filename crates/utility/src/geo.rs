pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Average walking pace used to derive walking time from distance.
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in meters.
pub fn haversine_distance_m(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Walking time in whole minutes, rounded up. Zero distance walks in zero minutes.
pub fn walking_minutes(distance_m: f64) -> u32 {
    if distance_m <= 0.0 {
        return 0;
    }
    (distance_m / WALKING_SPEED_M_PER_MIN).ceil() as u32
}
