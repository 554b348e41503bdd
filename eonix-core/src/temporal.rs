//! TemporalValue: the wrapped point-in-time type
//!
//! Internally stores milliseconds since the Unix epoch (1970-01-01T00:00:00Z).
//! Calendar fields are always extracted in UTC; an optional offset label is
//! recorded only by timezone conversion and never participates in
//! comparison. Field-wise addition mutates the receiver and returns it for
//! fluent chaining; `plus` is the non-mutating variant.

use crate::calendar::{
    civil_from_days, days_from_civil, days_in_month, is_leap_year, weekday_from_days,
    MAX_YEAR, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MIN_YEAR,
};
use crate::error::EonixError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// ============================================================================
// TemporalValue
// ============================================================================

/// A point in time with millisecond precision
///
/// Two values constructed from equal instants compare equal regardless of
/// how they were constructed; the offset label is ignored by `Eq`/`Ord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalValue {
    /// Milliseconds since Unix epoch (negative for pre-1970 instants)
    millis: i64,
    /// Offset in whole hours from UTC recorded by timezone conversion
    /// (None = UTC)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    offset_hours: Option<i32>,
}

impl TemporalValue {
    // ========== Construction ==========

    /// Create from milliseconds since Unix epoch
    pub fn from_unix_millis(millis: i64) -> Self {
        Self { millis, offset_hours: None }
    }

    /// Create a date (time = 00:00:00.000)
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, EonixError> {
        Self::from_ymd_hms_milli(year, month, day, 0, 0, 0, 0)
    }

    /// Create from date and time components
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, EonixError> {
        Self::from_ymd_hms_milli(year, month, day, hour, minute, second, 0)
    }

    /// Create from components with milliseconds
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self, EonixError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EonixError::InvalidDate(format!(
                "year {} out of supported range {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(EonixError::InvalidDate(format!(
                "month {} out of range 1-12",
                month
            )));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(EonixError::InvalidDate(format!(
                "day {} invalid for {:04}-{:02}",
                day, year, month
            )));
        }
        if hour > 23 || minute > 59 || second > 59 || milli > 999 {
            return Err(EonixError::InvalidDate(format!(
                "time {:02}:{:02}:{:02}.{:03} out of range",
                hour, minute, second, milli
            )));
        }

        let days = days_from_civil(year, month, day as i64);
        let time = (hour as i64) * MILLIS_PER_HOUR
            + (minute as i64) * MILLIS_PER_MINUTE
            + (second as i64) * MILLIS_PER_SECOND
            + milli as i64;

        Ok(Self {
            millis: days * MILLIS_PER_DAY + time,
            offset_hours: None,
        })
    }

    // ========== Accessors ==========

    /// Milliseconds since Unix epoch
    pub fn as_unix_millis(&self) -> i64 {
        self.millis
    }

    /// Offset in hours recorded by timezone conversion (None = UTC)
    pub fn offset_hours(&self) -> Option<i32> {
        self.offset_hours
    }

    /// True when no non-zero offset has been recorded
    pub fn is_utc(&self) -> bool {
        self.offset_hours.unwrap_or(0) == 0
    }

    /// Decompose into year, month, day (UTC)
    pub fn to_ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.millis.div_euclid(MILLIS_PER_DAY))
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.to_ymd().0
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.to_ymd().1
    }

    /// Day component (1-31)
    pub fn day(&self) -> u32 {
        self.to_ymd().2
    }

    /// Hour component (0-23)
    pub fn hour(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_DAY) / MILLIS_PER_HOUR) as u32
    }

    /// Minute component (0-59)
    pub fn minute(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_HOUR) / MILLIS_PER_MINUTE) as u32
    }

    /// Second component (0-59)
    pub fn second(&self) -> u32 {
        (self.millis.rem_euclid(MILLIS_PER_MINUTE) / MILLIS_PER_SECOND) as u32
    }

    /// Millisecond component (0-999)
    pub fn millisecond(&self) -> u32 {
        self.millis.rem_euclid(MILLIS_PER_SECOND) as u32
    }

    // ========== Calendar queries ==========

    /// ISO weekday (1=Monday, 7=Sunday)
    pub fn weekday(&self) -> u32 {
        weekday_from_days(self.millis.div_euclid(MILLIS_PER_DAY))
    }

    /// Ordinal day within the current year (1-366)
    pub fn day_of_year(&self) -> u32 {
        let (year, month, day) = self.to_ymd();
        (days_from_civil(year, month, day as i64) - days_from_civil(year, 1, 1) + 1) as u32
    }

    /// Week number within the current year
    ///
    /// Week 1 starts on the Monday of the week containing January 4th.
    /// Dates before that Monday fall in week 0; late-December dates can
    /// reach week 53 without wrapping into the next year's numbering.
    pub fn week_number(&self) -> u32 {
        let jan4 = days_from_civil(self.year(), 1, 4);
        let first_monday = jan4 - (weekday_from_days(jan4) as i64 - 1);
        let days = self.millis.div_euclid(MILLIS_PER_DAY);
        ((days - first_monday).div_euclid(7) + 1) as u32
    }

    /// Gregorian leap-year test on the year component
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    // ========== Cloning and timezone conversion ==========

    /// Independent copy, optionally shifted into a UTC offset
    ///
    /// With an offset the copy's instant is shifted so that its wall clock
    /// reads as local time in that offset; the original is untouched.
    pub fn clone_with(&self, offset: Option<i32>) -> Self {
        let mut cloned = self.clone();
        if let Some(hours) = offset {
            cloned.convert_to_time_zone(hours);
        }
        cloned
    }

    /// Shift the instant into a UTC offset (whole hours) and record it
    pub fn convert_to_time_zone(&mut self, hours: i32) -> &mut Self {
        self.millis -= (hours as i64) * MILLIS_PER_HOUR;
        self.offset_hours = Some(hours);
        self
    }

    // ========== Sorting ==========

    /// Sort any number of date-like inputs ascending by instant.
    ///
    /// Stable for equal instants. Fails with `EmptyInput` when given zero
    /// items and propagates `InvalidDate` from conversion.
    pub fn sort<I>(dates: I) -> Result<Vec<TemporalValue>, EonixError>
    where
        I: IntoIterator,
        I::Item: TemporalInput,
    {
        let mut sorted = Vec::new();
        for date in dates {
            sorted.push(date.into_temporal()?);
        }
        if sorted.is_empty() {
            return Err(EonixError::EmptyInput);
        }
        sorted.sort();
        Ok(sorted)
    }

    // ========== Arithmetic ==========

    /// Add calendar fields in place, largest unit first.
    ///
    /// Years are applied first, then months, each renormalizing the
    /// calendar fields before the next step (day overflow rolls into the
    /// following month, so Jan 31 plus one month lands in early March).
    /// Weeks and days are then applied as a single day shift, followed by
    /// flat millisecond arithmetic for the time fields.
    ///
    /// Fails with `InvalidArgument` when the amount sets no field.
    pub fn add(&mut self, amount: &TimeAmount) -> Result<&mut Self, EonixError> {
        if amount.is_empty() {
            return Err(EonixError::InvalidArgument(
                "amount must set at least one field".to_string(),
            ));
        }
        self.shift(
            amount.years.unwrap_or(0),
            amount.months.unwrap_or(0),
            amount.weeks.unwrap_or(0) * 7 + amount.days.unwrap_or(0),
            amount.hours.unwrap_or(0) * MILLIS_PER_HOUR
                + amount.minutes.unwrap_or(0) * MILLIS_PER_MINUTE
                + amount.seconds.unwrap_or(0) * MILLIS_PER_SECOND
                + amount.milliseconds.unwrap_or(0),
        );
        Ok(self)
    }

    /// Non-mutating variant of [`add`](Self::add)
    pub fn plus(&self, amount: &TimeAmount) -> Result<TemporalValue, EonixError> {
        let mut result = self.clone();
        result.add(amount)?;
        Ok(result)
    }

    /// Add years in place
    pub fn add_years(&mut self, years: i64) -> &mut Self {
        self.shift(years, 0, 0, 0);
        self
    }

    /// Add months in place
    pub fn add_months(&mut self, months: i64) -> &mut Self {
        self.shift(0, months, 0, 0);
        self
    }

    /// Add weeks in place
    pub fn add_weeks(&mut self, weeks: i64) -> &mut Self {
        self.shift(0, 0, weeks * 7, 0);
        self
    }

    /// Add days in place
    pub fn add_days(&mut self, days: i64) -> &mut Self {
        self.shift(0, 0, days, 0);
        self
    }

    /// Add hours in place
    pub fn add_hours(&mut self, hours: i64) -> &mut Self {
        self.shift(0, 0, 0, hours * MILLIS_PER_HOUR);
        self
    }

    /// Add minutes in place
    pub fn add_minutes(&mut self, minutes: i64) -> &mut Self {
        self.shift(0, 0, 0, minutes * MILLIS_PER_MINUTE);
        self
    }

    /// Add seconds in place
    pub fn add_seconds(&mut self, seconds: i64) -> &mut Self {
        self.shift(0, 0, 0, seconds * MILLIS_PER_SECOND);
        self
    }

    /// Add milliseconds in place
    pub fn add_milliseconds(&mut self, milliseconds: i64) -> &mut Self {
        self.shift(0, 0, 0, milliseconds);
        self
    }

    /// Amounts large enough to leave the supported year range clamp to
    /// its bounds; the millisecond arithmetic saturates and never wraps
    fn shift(&mut self, years: i64, months: i64, days: i64, millis: i64) {
        if years != 0 {
            let (year, month, day) = self.to_ymd();
            let target = (year as i64)
                .saturating_add(years)
                .clamp(MIN_YEAR as i64, MAX_YEAR as i64) as i32;
            self.set_date_overflowing(target, month, day as i64);
        }
        if months != 0 {
            // re-read components: the year step may have rolled the date
            let (year, month, day) = self.to_ymd();
            let total = (year as i64 * 12 + (month as i64 - 1))
                .saturating_add(months)
                .clamp(MIN_YEAR as i64 * 12, MAX_YEAR as i64 * 12 + 11);
            self.set_date_overflowing(
                total.div_euclid(12) as i32,
                (total.rem_euclid(12) + 1) as u32,
                day as i64,
            );
        }
        self.millis = self
            .millis
            .saturating_add(days.saturating_mul(MILLIS_PER_DAY))
            .saturating_add(millis);
    }

    /// Rebuild the date portion, keeping the time of day; `day` may
    /// overflow the month and rolls forward
    fn set_date_overflowing(&mut self, year: i32, month: u32, day: i64) {
        let time = self.millis.rem_euclid(MILLIS_PER_DAY);
        self.millis = days_from_civil(year, month, day)
            .saturating_mul(MILLIS_PER_DAY)
            .saturating_add(time);
    }

    // ========== Parsing and formatting ==========

    /// Parse an ISO 8601 datetime string.
    ///
    /// Supported formats:
    /// - 2023-06-30
    /// - 2023-06-30T14:30
    /// - 2023-06-30T14:30:00
    /// - 2023-06-30T14:30:00Z
    /// - 2023-06-30T14:30:00.123Z
    /// - 2023-06-30T14:30:00+05:30
    /// - 2023-06-30 14:30:00
    ///
    /// A trailing offset shifts the parsed wall-clock components to the
    /// true UTC instant; the resulting value carries no offset label.
    pub fn parse(s: &str) -> Result<Self, EonixError> {
        let s = s.trim();

        // Date only: YYYY-MM-DD
        if s.len() == 10 && s.as_bytes()[4] == b'-' && s.as_bytes()[7] == b'-' {
            let (year, month, day) = Self::parse_date_part(s)?;
            return Self::from_ymd(year, month, day);
        }

        let separator = s.find('T').or_else(|| s.find(' '));
        if let Some(pos) = separator {
            return Self::parse_datetime(&s[..pos], &s[pos + 1..]);
        }

        Err(EonixError::InvalidDate(format!(
            "unrecognized format: {}",
            s
        )))
    }

    fn parse_date_part(s: &str) -> Result<(i32, u32, u32), EonixError> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(EonixError::InvalidDate(format!(
                "expected YYYY-MM-DD, got {}",
                s
            )));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid year in {}", s)))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid month in {}", s)))?;
        let day: u32 = parts[2]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid day in {}", s)))?;
        Ok((year, month, day))
    }

    fn parse_datetime(date_part: &str, time_part: &str) -> Result<Self, EonixError> {
        let (year, month, day) = Self::parse_date_part(date_part)?;
        let (time_str, offset_secs) = Self::extract_offset(time_part)?;

        let (time_no_frac, milli) = if let Some(dot) = time_str.find('.') {
            (&time_str[..dot], Self::parse_fractional(&time_str[dot + 1..])?)
        } else {
            (time_str, 0u32)
        };

        let parts: Vec<&str> = time_no_frac.split(':').collect();
        if parts.len() < 2 {
            return Err(EonixError::InvalidDate(format!(
                "expected HH:MM[:SS], got {}",
                time_part
            )));
        }
        let hour: u32 = parts[0]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid hour in {}", time_part)))?;
        let minute: u32 = parts[1]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid minute in {}", time_part)))?;
        let second: u32 = if parts.len() >= 3 {
            parts[2]
                .parse()
                .map_err(|_| EonixError::InvalidDate(format!("invalid second in {}", time_part)))?
        } else {
            0
        };

        let mut value = Self::from_ymd_hms_milli(year, month, day, hour, minute, second, milli)?;
        if let Some(offset) = offset_secs {
            // wall clock in the given offset -> UTC instant
            value.millis -= offset as i64 * MILLIS_PER_SECOND;
        }
        Ok(value)
    }

    fn extract_offset(time_part: &str) -> Result<(&str, Option<i32>), EonixError> {
        if let Some(stripped) = time_part.strip_suffix('Z') {
            return Ok((stripped, Some(0)));
        }
        if let Some(plus) = time_part.rfind('+') {
            let offset = Self::parse_offset_secs(&time_part[plus + 1..])?;
            return Ok((&time_part[..plus], Some(offset)));
        }
        // '-' is only an offset after the HH:MM portion
        if let Some(minus) = time_part.rfind('-') {
            if minus >= 5 {
                let offset = Self::parse_offset_secs(&time_part[minus + 1..])?;
                return Ok((&time_part[..minus], Some(-offset)));
            }
        }
        Ok((time_part, None))
    }

    fn parse_offset_secs(s: &str) -> Result<i32, EonixError> {
        let parts: Vec<&str> = s.split(':').collect();
        let hours: i32 = parts[0]
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid offset hours in {}", s)))?;
        let minutes: i32 = if parts.len() > 1 {
            parts[1]
                .parse()
                .map_err(|_| EonixError::InvalidDate(format!("invalid offset minutes in {}", s)))?
        } else {
            0
        };
        Ok(hours * 3600 + minutes * 60)
    }

    fn parse_fractional(s: &str) -> Result<u32, EonixError> {
        // pad or truncate to millisecond precision
        let padded = if s.len() >= 3 {
            s[..3].to_string()
        } else {
            format!("{:0<3}", s)
        };
        padded
            .parse()
            .map_err(|_| EonixError::InvalidDate(format!("invalid fractional seconds: {}", s)))
    }

    /// Format as ISO 8601 UTC string with milliseconds
    pub fn to_iso_string(&self) -> String {
        let (year, month, day) = self.to_ymd();
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            month,
            day,
            self.hour(),
            self.minute(),
            self.second(),
            self.millisecond()
        )
    }
}

// Comparison considers the instant only; the offset label is display state.

impl PartialEq for TemporalValue {
    fn eq(&self, other: &Self) -> bool {
        self.millis == other.millis
    }
}

impl Eq for TemporalValue {}

impl PartialOrd for TemporalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TemporalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.millis.cmp(&other.millis)
    }
}

impl Hash for TemporalValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.millis.hash(state);
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl FromStr for TemporalValue {
    type Err = EonixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for TemporalValue {
    fn from(millis: i64) -> Self {
        Self::from_unix_millis(millis)
    }
}

// ============================================================================
// TemporalInput
// ============================================================================

/// Conversion from date-like inputs: ISO strings, epoch milliseconds, or
/// existing values
pub trait TemporalInput {
    fn into_temporal(self) -> Result<TemporalValue, EonixError>;
}

impl TemporalInput for TemporalValue {
    fn into_temporal(self) -> Result<TemporalValue, EonixError> {
        Ok(self)
    }
}

impl TemporalInput for &TemporalValue {
    fn into_temporal(self) -> Result<TemporalValue, EonixError> {
        Ok(self.clone())
    }
}

impl TemporalInput for i64 {
    fn into_temporal(self) -> Result<TemporalValue, EonixError> {
        Ok(TemporalValue::from_unix_millis(self))
    }
}

impl TemporalInput for &str {
    fn into_temporal(self) -> Result<TemporalValue, EonixError> {
        TemporalValue::parse(self)
    }
}

impl TemporalInput for String {
    fn into_temporal(self) -> Result<TemporalValue, EonixError> {
        TemporalValue::parse(&self)
    }
}

// ============================================================================
// TimeAmount
// ============================================================================

/// Calendar-field amount for [`TemporalValue::add`]
///
/// Builder-style: fields left unset default to zero, but an amount with no
/// field set at all is rejected by `add`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAmount {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub years: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weeks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub milliseconds: Option<i64>,
}

impl TimeAmount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, years: i64) -> Self {
        self.years = Some(years);
        self
    }

    pub fn months(mut self, months: i64) -> Self {
        self.months = Some(months);
        self
    }

    pub fn weeks(mut self, weeks: i64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    pub fn hours(mut self, hours: i64) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn seconds(mut self, seconds: i64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn milliseconds(mut self, milliseconds: i64) -> Self {
        self.milliseconds = Some(milliseconds);
        self
    }

    /// True when no field has been set
    pub fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.weeks.is_none()
            && self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
            && self.milliseconds.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
