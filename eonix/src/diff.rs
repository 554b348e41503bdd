//! Calendar difference engine
//!
//! Decomposes the signed interval between two instants into a
//! largest-unit-first breakdown. The direction of the original argument
//! order is captured once at construction; the decomposition itself always
//! runs on the chronologically sorted pair and the sign is applied to the
//! results.

use eonix_core::calendar::{
    days_from_civil, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
    MILLIS_PER_WEEK,
};
use eonix_core::{EonixError, TemporalInput, TemporalValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Unit
// ============================================================================

/// Difference unit, declared in descending-magnitude canonical order.
///
/// The derived `Ord` follows declaration order, so a `BTreeMap` keyed by
/// `Unit` iterates years first and milliseconds last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Unit {
    /// All units, canonical order
    pub const CANONICAL: [Unit; 8] = [
        Unit::Years,
        Unit::Months,
        Unit::Weeks,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
        Unit::Milliseconds,
    ];

    /// Default request set for [`Diff::in_units`]; weeks is excluded so a
    /// month remainder spills into days
    pub const DEFAULT_SET: [Unit; 7] = [
        Unit::Years,
        Unit::Months,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
        Unit::Milliseconds,
    ];
}

// ============================================================================
// Diff
// ============================================================================

/// Calendar-aware difference between two instants
///
/// `start`/`end` are chronologically sorted at construction; `is_inversed`
/// remembers whether the original first argument came after the second and
/// signs every result.
#[derive(Debug, Clone)]
pub struct Diff {
    start: TemporalValue,
    end: TemporalValue,
    is_inversed: bool,
}

impl Diff {
    /// Build a difference from two date-like inputs
    pub fn new(start: impl TemporalInput, end: impl TemporalInput) -> Result<Self, EonixError> {
        let first = start.into_temporal()?;
        let second = end.into_temporal()?;
        let is_inversed = first > second;
        let (start, end) = if is_inversed {
            (second, first)
        } else {
            (first, second)
        };
        Ok(Self { start, end, is_inversed })
    }

    /// Chronologically earlier bound
    pub fn start(&self) -> &TemporalValue {
        &self.start
    }

    /// Chronologically later bound
    pub fn end(&self) -> &TemporalValue {
        &self.end
    }

    /// Whether the original first argument was chronologically after the
    /// second
    pub fn is_inversed(&self) -> bool {
        self.is_inversed
    }

    /// Copy with the direction flag cleared: every accessor then reports
    /// the unsigned magnitude regardless of the original argument order
    pub fn absolute(&self) -> Self {
        Self {
            is_inversed: false,
            ..self.clone()
        }
    }

    /// Signed difference in a single unit over the full span
    pub fn in_unit(&self, unit: Unit) -> i64 {
        let span = unit_span(unit, &self.start, &self.end);
        if self.is_inversed {
            -span
        } else {
            span
        }
    }

    pub fn in_years(&self) -> i64 {
        self.in_unit(Unit::Years)
    }

    pub fn in_months(&self) -> i64 {
        self.in_unit(Unit::Months)
    }

    pub fn in_weeks(&self) -> i64 {
        self.in_unit(Unit::Weeks)
    }

    pub fn in_days(&self) -> i64 {
        self.in_unit(Unit::Days)
    }

    pub fn in_hours(&self) -> i64 {
        self.in_unit(Unit::Hours)
    }

    pub fn in_minutes(&self) -> i64 {
        self.in_unit(Unit::Minutes)
    }

    pub fn in_seconds(&self) -> i64 {
        self.in_unit(Unit::Seconds)
    }

    pub fn in_milliseconds(&self) -> i64 {
        self.in_unit(Unit::Milliseconds)
    }

    /// Decompose the span into the requested units, largest first.
    ///
    /// An empty `units` slice selects [`Unit::DEFAULT_SET`]. A cursor
    /// starts at the earlier bound; each requested unit consumes as much
    /// of the remaining gap as it can and advances the cursor, so a unit
    /// left out of the request spills its share into the next finer
    /// requested unit. Units not requested are absent from the map, not
    /// zero. When the original arguments were inversed every entry is
    /// negated.
    ///
    /// Adding every entry of the full default breakdown back onto the
    /// earlier bound reproduces the later bound exactly.
    pub fn in_units(&self, units: &[Unit]) -> BTreeMap<Unit, i64> {
        let requested: &[Unit] = if units.is_empty() {
            &Unit::DEFAULT_SET
        } else {
            units
        };

        let mut cursor = self.start.clone();
        let mut breakdown = BTreeMap::new();

        for unit in Unit::CANONICAL {
            if !requested.contains(&unit) {
                continue;
            }
            // signed: a coarser step may have overshot the end, in which
            // case this count walks the cursor back
            let count = unit_between(unit, &cursor, &self.end);
            breakdown.insert(unit, if self.is_inversed { -count } else { count });
            if unit != Unit::Milliseconds {
                advance(&mut cursor, unit, count);
            }
        }

        breakdown
    }
}

// ============================================================================
// Per-unit calculations
// ============================================================================

/// Signed single-unit difference between two cursors
fn unit_between(unit: Unit, a: &TemporalValue, b: &TemporalValue) -> i64 {
    if a > b {
        -unit_span(unit, b, a)
    } else {
        unit_span(unit, a, b)
    }
}

/// Single-unit difference for a sorted pair (`start <= end`)
fn unit_span(unit: Unit, start: &TemporalValue, end: &TemporalValue) -> i64 {
    let gap = end.as_unix_millis() - start.as_unix_millis();
    match unit {
        Unit::Years => years_span(start, end),
        Unit::Months => months_span(start, end),
        Unit::Weeks => gap.div_euclid(MILLIS_PER_WEEK),
        Unit::Days => gap.div_euclid(MILLIS_PER_DAY),
        Unit::Hours => gap.div_euclid(MILLIS_PER_HOUR),
        Unit::Minutes => gap.div_euclid(MILLIS_PER_MINUTE),
        Unit::Seconds => gap.div_euclid(MILLIS_PER_SECOND),
        Unit::Milliseconds => gap,
    }
}

/// Whole calendar years from `start` to `end` (`start <= end`)
fn years_span(start: &TemporalValue, end: &TemporalValue) -> i64 {
    let years = (end.year() - start.year()) as i64;
    if years == 0 {
        return 0;
    }

    // start's month/day rebuilt in end's year, at midnight; a Feb 29
    // start rolls to Mar 1 when end's year is not a leap year
    let adjusted = days_from_civil(end.year(), start.month(), start.day() as i64) * MILLIS_PER_DAY;
    if adjusted > end.as_unix_millis() {
        years - 1
    } else {
        years
    }
}

/// Whole calendar months from `start` to `end` (`start <= end`)
fn months_span(start: &TemporalValue, end: &TemporalValue) -> i64 {
    let mut years = years_span(start, end);
    let mut months = end.month() as i64 - start.month() as i64;

    if start.is_leap_year() && !end.is_leap_year() && end.month() == 2 && end.day() == 28 {
        // leap-day start against a Feb 28 non-leap end: the missing leap
        // day already cost a year, so the month count is pinned to eleven
        months = 11;
    } else if start.day() > end.day() {
        // the day of month has not been reached yet
        months -= 1;
    }

    if months < 0 {
        years += 1;
    }
    months + years * 12
}

/// Advance the cursor by `count` of `unit`
fn advance(cursor: &mut TemporalValue, unit: Unit, count: i64) {
    match unit {
        Unit::Years => cursor.add_years(count),
        Unit::Months => cursor.add_months(count),
        Unit::Weeks => cursor.add_weeks(count),
        Unit::Days => cursor.add_days(count),
        Unit::Hours => cursor.add_hours(count),
        Unit::Minutes => cursor.add_minutes(count),
        Unit::Seconds => cursor.add_seconds(count),
        Unit::Milliseconds => cursor.add_milliseconds(count),
    };
}

// ============================================================================
// Tests
// ============================================================================
