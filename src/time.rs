use chrono::{DateTime, Datelike, Timelike, Utc};

const J2000: f64 = 2451545.0;
const DAYS_PER_CENTURY: f64 = 36525.0;
const SECONDS_PER_DAY: f64 = 86400.0;

/// Calculates the Julian date for a given point in time.
///
/// Gregorian calendar throughout (Meeus, chapter 7); January and February
/// count as months 13 and 14 of the preceding year.
pub fn julian_date(date: DateTime<Utc>) -> f64 {
    let (mut year, mut month) = (date.year(), date.month() as i32);
    if month <= 2 {
        year -= 1;
        month += 12;
    }
    let a = (year as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day = date.day() as f64
        + julian_fraction_of_day(date.hour(), date.minute(), date.second(), date.nanosecond());

    (365.25 * (year as f64 + 4716.0)).floor() + (30.6001 * (month as f64 + 1.0)).floor() + day + b
        - 1524.5
}

pub fn julian_fraction_of_day(h: u32, m: u32, s: u32, ns: u32) -> f64 {
    (h as f64 / 24.0)
        + (m as f64 / (24.0 * 60.0))
        + (s as f64 / SECONDS_PER_DAY)
        + (ns as f64 / (SECONDS_PER_DAY * 1.0e+9))
}

/// Greenwich Mean Sidereal Time in degrees, normalized into `[0, 360)`.
pub fn gmst_degrees(date: DateTime<Utc>) -> f64 {
    let d = julian_date(date) - J2000;
    let t = d / DAYS_PER_CENTURY;
    let gmst = 280.46061837 + 360.98564736629 * d + t * t * (0.000387933 - t / 38710000.0);
    let gmst = gmst.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if gmst >= 360.0 {
        gmst - 360.0
    } else {
        gmst
    }
}

/// Calculates the Greenwich Mean Sidereal Time (GMST) in radians at a point in time.
pub fn gmst(date: DateTime<Utc>) -> f64 {
    gmst_degrees(date).to_radians()
}

/// Signed minutes from `from` to `to`, at nanosecond resolution where it fits.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / 60.0e9,
        None => delta.num_milliseconds() as f64 / 60.0e3,
    }
}
