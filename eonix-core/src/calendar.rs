//! Gregorian calendar utilities (proleptic)
//!
//! Epoch-day <-> civil-date conversion, leap-year and month-length rules,
//! and the millisecond unit constants shared across the workspace.

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Supported civil year range for construction; field arithmetic clamps
/// to it. Matches the span of a JS Date (±8.64e15 ms), leaving ample i64
/// headroom for the millisecond math.
pub const MIN_YEAR: i32 = -271_821;
pub const MAX_YEAR: i32 = 275_760;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from year 0 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        m if (1..=12).contains(&m) => DAYS_IN_MONTH[(m - 1) as usize],
        _ => 0,
    }
}

/// Convert a civil date to days since the Unix epoch.
///
/// `day` may exceed the length of the month (or be zero/negative); excess
/// days roll into the adjacent months, which is how field addition and the
/// year-boundary rule of the difference engine normalize overflow
/// (e.g. Feb 29 of a non-leap year resolves to Mar 1).
///
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn days_from_civil(year: i32, month: u32, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Convert days since the Unix epoch to a civil date.
///
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m as u32, d as u32)
}

/// ISO weekday (1=Monday, 7=Sunday) for a count of days since the Unix epoch
pub fn weekday_from_days(days: i64) -> u32 {
    // 1970-01-01 was a Thursday
    ((days + 3).rem_euclid(7) + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
    }

    #[test]
    fn test_civil_round_trip() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(days_from_civil(2024, 2, 29)), (2024, 2, 29));
        assert_eq!(civil_from_days(days_from_civil(1969, 12, 31)), (1969, 12, 31));
        assert_eq!(civil_from_days(days_from_civil(1920, 1, 1)), (1920, 1, 1));
    }

    #[test]
    fn test_day_overflow_rolls_forward() {
        // Feb 29 in a non-leap year resolves to Mar 1
        assert_eq!(civil_from_days(days_from_civil(2021, 2, 29)), (2021, 3, 1));
        // Feb 31 resolves to Mar 3 (non-leap)
        assert_eq!(civil_from_days(days_from_civil(2023, 2, 31)), (2023, 3, 3));
        // day past December rolls into the next year
        assert_eq!(civil_from_days(days_from_civil(2023, 12, 32)), (2024, 1, 1));
    }

    #[test]
    fn test_weekday_from_days() {
        // epoch day 0 was Thursday
        assert_eq!(weekday_from_days(0), 4);
        assert_eq!(weekday_from_days(3), 7); // Sunday
        assert_eq!(weekday_from_days(4), 1); // Monday
        assert_eq!(weekday_from_days(-1), 3); // Wednesday, Dec 31 1969
    }
}
