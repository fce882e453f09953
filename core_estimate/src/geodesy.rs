use estimate_runtime::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points using the haversine formula.
///
/// Total over its inputs: NaN components propagate to a NaN distance.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Item closest to `origin`. Earlier items win ties.
pub fn nearest<'a, T>(
    origin: Coordinate,
    items: &'a [T],
    position: impl Fn(&T) -> Coordinate,
) -> Option<(&'a T, f64)> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let distance = distance_km(origin, position(item));
        let better = match best {
            None => true,
            Some((_, current)) => distance < current,
        };
        if better {
            best = Some((item, distance));
        }
    }
    best
}

/// Item furthest from `origin`. Earlier items win ties.
pub fn furthest<'a, T>(
    origin: Coordinate,
    items: &'a [T],
    position: impl Fn(&T) -> Coordinate,
) -> Option<(&'a T, f64)> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let distance = distance_km(origin, position(item));
        let better = match best {
            None => true,
            Some((_, current)) => distance > current,
        };
        if better {
            best = Some((item, distance));
        }
    }
    best
}
