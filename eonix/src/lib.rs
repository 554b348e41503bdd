//! Eonix - calendar arithmetic and difference calculation
//!
//! Wraps a calendar timestamp type (`TemporalValue`) and decomposes the
//! signed interval between two instants into a largest-unit-first
//! breakdown (`Diff`), handling leap years, month-length irregularities
//! and direction normalization.
//!
//! ```
//! use eonix::{diff, Unit};
//!
//! let d = diff("2023-01-01", "2023-06-30").unwrap();
//! assert_eq!(d.in_months(), 5);
//!
//! let breakdown = d.in_units(&[]);
//! assert_eq!(breakdown[&Unit::Months], 5);
//! assert_eq!(breakdown[&Unit::Days], 29);
//! ```

mod diff;

pub use diff::{Diff, Unit};
pub use eonix_core::{calendar, EonixError, TemporalInput, TemporalValue, TimeAmount};

/// Sort any number of date-like inputs ascending by instant
///
/// Stable for equal instants; fails with `EmptyInput` on zero arguments.
pub fn sort<I>(dates: I) -> Result<Vec<TemporalValue>, EonixError>
where
    I: IntoIterator,
    I::Item: TemporalInput,
{
    TemporalValue::sort(dates)
}

/// Build a calendar difference between two date-like inputs
pub fn diff(start: impl TemporalInput, end: impl TemporalInput) -> Result<Diff, EonixError> {
    Diff::new(start, end)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{diff, sort, Diff, EonixError, TemporalInput, TemporalValue, TimeAmount, Unit};
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-add a full default breakdown onto the earlier bound
    fn reapply(start: &TemporalValue, breakdown: &std::collections::BTreeMap<Unit, i64>) -> TemporalValue {
        let mut cursor = start.clone();
        cursor
            .add_years(breakdown[&Unit::Years])
            .add_months(breakdown[&Unit::Months])
            .add_days(breakdown[&Unit::Days])
            .add_hours(breakdown[&Unit::Hours])
            .add_minutes(breakdown[&Unit::Minutes])
            .add_seconds(breakdown[&Unit::Seconds])
            .add_milliseconds(breakdown[&Unit::Milliseconds]);
        cursor
    }

    #[test]
    fn test_round_trip_law() {
        let pairs = [
            ("2023-01-01", "2023-06-30"),
            ("1920-01-01", "2023-01-01"),
            ("2020-02-29", "2021-02-28"),
            ("2020-02-29T12:34:56.789Z", "2023-02-28T01:02:03.004Z"),
            ("2023-01-31", "2023-03-01"),
            // year step overshoots the end; negative fine-unit entries
            // must still sum back exactly
            ("2020-03-15T12:00:00Z", "2021-03-15T06:00:00Z"),
            ("2023-06-30T12:00:00Z", "2023-06-30T12:00:00Z"),
        ];
        for (a, b) in pairs {
            let d = diff(a, b).unwrap();
            let breakdown = d.in_units(&[]);
            let rebuilt = reapply(d.start(), &breakdown);
            assert_eq!(rebuilt, *d.end(), "round trip failed for ({}, {})", a, b);
        }
    }

    #[test]
    fn test_antisymmetry() {
        let fwd = diff("2020-02-29", "2023-06-30T18:45:15Z").unwrap();
        let bwd = diff("2023-06-30T18:45:15Z", "2020-02-29").unwrap();
        assert_eq!(fwd.in_years(), -bwd.in_years());
        assert_eq!(fwd.in_months(), -bwd.in_months());
        assert_eq!(fwd.in_weeks(), -bwd.in_weeks());
        assert_eq!(fwd.in_days(), -bwd.in_days());
        assert_eq!(fwd.in_hours(), -bwd.in_hours());
        assert_eq!(fwd.in_minutes(), -bwd.in_minutes());
        assert_eq!(fwd.in_seconds(), -bwd.in_seconds());
        assert_eq!(fwd.in_milliseconds(), -bwd.in_milliseconds());
    }

    #[test]
    fn test_same_instant_identity() {
        let x = TemporalValue::parse("2023-06-30T12:00:00Z").unwrap();
        let breakdown = diff(&x, &x).unwrap().in_units(&[]);
        assert!(breakdown.values().all(|&v| v == 0));
    }

    #[test]
    fn test_scenario_half_year() {
        let breakdown = diff("2023-01-01", "2023-06-30").unwrap().in_units(&[]);
        assert_eq!(breakdown[&Unit::Years], 0);
        assert_eq!(breakdown[&Unit::Months], 5);
        assert_eq!(breakdown[&Unit::Days], 29);
        assert_eq!(breakdown[&Unit::Hours], 0);
        assert_eq!(breakdown[&Unit::Minutes], 0);
        assert_eq!(breakdown[&Unit::Seconds], 0);
        assert_eq!(breakdown[&Unit::Milliseconds], 0);
    }

    #[test]
    fn test_scenario_century() {
        let breakdown = diff("1920-01-01", "2023-01-01").unwrap().in_units(&[]);
        assert_eq!(breakdown[&Unit::Years], 103);
        assert!(breakdown
            .iter()
            .filter(|(unit, _)| **unit != Unit::Years)
            .all(|(_, &v)| v == 0));
    }

    #[test]
    fn test_sort_free_fn() {
        let sorted = sort(["2023-06-30", "1920-01-01"]).unwrap();
        assert!(sorted[0] < sorted[1]);

        let empty: Vec<&str> = Vec::new();
        assert_eq!(sort(empty), Err(EonixError::EmptyInput));
    }

    #[test]
    fn test_breakdown_serializes_to_json_object() {
        let breakdown = diff("2023-01-01", "2023-06-30").unwrap().in_units(&[]);
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "years": 0,
                "months": 5,
                "days": 29,
                "hours": 0,
                "minutes": 0,
                "seconds": 0,
                "milliseconds": 0
            })
        );
    }

    #[test]
    fn test_amount_serializes_sparse() {
        let amount = TimeAmount::new().months(1).days(31);
        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, serde_json::json!({ "months": 1, "days": 31 }));
    }

    #[test]
    fn test_prelude_surface() {
        use crate::prelude::*;
        let d = diff("2023-01-01", "2023-01-02").unwrap();
        assert_eq!(d.in_days(), 1);
        let _ = sort(["2023-01-01"]).unwrap();
        let _ = TimeAmount::new().days(1);
        let _ = Unit::Days;
    }
}
