//! Human-readable metric formatting.

/// Formats a distance in meters: `850 m` below a kilometer, `4.1 km` above.
///
/// # Examples
///
/// ```
/// use paratransit_routing::models::format_distance;
///
/// assert_eq!(format_distance(850.0), "850 m");
/// assert_eq!(format_distance(4120.0), "4.1 km");
/// ```
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

/// Formats a duration in seconds as whole minutes: `12m`, or `1h 5m` from
/// an hour up.
///
/// # Examples
///
/// ```
/// use paratransit_routing::models::format_duration;
///
/// assert_eq!(format_duration(720.0), "12m");
/// assert_eq!(format_duration(3900.0), "1h 5m");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}
