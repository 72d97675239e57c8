/// seconds in one service day, used for the single same-day correction
/// applied to negative stop-to-stop differences.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// parses a GTFS `HH:MM:SS` time of day into seconds since the start of the
/// service day. hours may exceed 23 for trips that run past midnight, so
/// this is deliberately not parsed as a clock time.
///
/// # Returns
///
/// * `None` if the value does not have exactly three numeric components or if
///   minutes or seconds are out of range
pub fn parse_gtfs_time(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let h = parts.next()?.trim().parse::<u32>().ok()?;
    let m = parts.next()?.trim().parse::<u32>().ok()?;
    let s = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() || m >= 60 || s >= 60 {
        return None;
    }
    h.checked_mul(3600)?.checked_add(m * 60 + s)
}

/// in-vehicle travel time in seconds from a departure to a later arrival.
///
/// a negative difference is corrected once by adding a service day; anything
/// still negative after that is rejected.
pub fn travel_seconds(departure: u32, arrival: u32) -> Option<f64> {
    let mut dt = arrival as i64 - departure as i64;
    if dt < 0 {
        dt += SECONDS_PER_DAY;
    }
    if dt < 0 {
        None
    } else {
        Some(dt as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_past_midnight() {
        assert_eq!(parse_gtfs_time("25:10:05"), Some(25 * 3600 + 10 * 60 + 5));
        assert_eq!(parse_gtfs_time("7:00:00"), Some(7 * 3600));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_gtfs_time(""), None);
        assert_eq!(parse_gtfs_time("12:00"), None);
        assert_eq!(parse_gtfs_time("12:00:00:00"), None);
        assert_eq!(parse_gtfs_time("12:61:00"), None);
        assert_eq!(parse_gtfs_time("ab:00:00"), None);
    }

    #[test]
    fn test_travel_seconds_wraps_once() {
        let dep = parse_gtfs_time("23:59:00").unwrap();
        let arr = parse_gtfs_time("00:01:00").unwrap();
        assert_eq!(travel_seconds(dep, arr), Some(120.0));
        assert_eq!(travel_seconds(100, 160), Some(60.0));
    }

    #[test]
    fn test_travel_seconds_rejects_more_than_a_day_backwards() {
        let dep = parse_gtfs_time("49:00:00").unwrap();
        let arr = parse_gtfs_time("01:00:00").unwrap();
        assert_eq!(travel_seconds(dep, arr), None);
    }
}
