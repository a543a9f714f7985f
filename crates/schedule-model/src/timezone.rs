//! Fixed-offset timezones with an optional daylight-saving rule.
//!
//! The model is deliberately small: a base UTC offset in (possibly fractional) hours
//! and, optionally, a yearly DST window described by "Nth weekday of month at hour"
//! transitions. DST is evaluated at the instant being converted, never at "now".

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// One DST boundary in local wall-clock time.
///
/// `week` is 1-based; 5 means "last occurrence in the month".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRule {
    pub month: u32,
    pub week: u8,
    #[serde(with = "crate::days::weekday_name")]
    pub day: Weekday,
    pub hour: u32,
}

impl TransitionRule {
    /// Local wall-clock moment of this transition in `year`.
    fn local_instant(&self, year: i32) -> Option<NaiveDateTime> {
        let week = self.week.clamp(1, 5);
        let date = NaiveDate::from_weekday_of_month_opt(year, self.month, self.day, week)
            .or_else(|| {
                // Not every month has a fifth occurrence.
                (week == 5)
                    .then(|| NaiveDate::from_weekday_of_month_opt(year, self.month, self.day, 4))
                    .flatten()
            })?;
        let time = NaiveTime::from_hms_opt(self.hour, 0, 0)?;
        Some(date.and_time(time))
    }
}

/// Yearly daylight-saving window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightSavingRule {
    /// Hours added to the base offset while DST is active.
    #[serde(default = "default_dst_offset")]
    pub offset_hours: f64,
    /// Transition into DST, in standard local time.
    pub start: TransitionRule,
    /// Transition out of DST, in daylight local time.
    pub end: TransitionRule,
}

fn default_dst_offset() -> f64 {
    1.0
}

impl Default for DaylightSavingRule {
    /// Second Sunday of March 02:00 to first Sunday of November 02:00.
    fn default() -> Self {
        Self {
            offset_hours: default_dst_offset(),
            start: TransitionRule {
                month: 3,
                week: 2,
                day: Weekday::Sun,
                hour: 2,
            },
            end: TransitionRule {
                month: 11,
                week: 1,
                day: Weekday::Sun,
                hour: 2,
            },
        }
    }
}

/// Timezone configuration shared by every schedule in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub utc_offset_hours: f64,
    #[serde(default)]
    pub daylight_saving: Option<DaylightSavingRule>,
}

impl Default for TimezoneInfo {
    fn default() -> Self {
        Self {
            name: "UTC".to_string(),
            utc_offset_hours: 0.0,
            daylight_saving: None,
        }
    }
}

impl TimezoneInfo {
    pub fn fixed(name: impl Into<String>, utc_offset_hours: f64) -> Self {
        Self {
            name: name.into(),
            utc_offset_hours,
            daylight_saving: None,
        }
    }

    pub fn with_daylight_saving(self, rule: DaylightSavingRule) -> Self {
        Self {
            daylight_saving: Some(rule),
            ..self
        }
    }

    /// Whether the DST rule is in effect at `utc`.
    pub fn is_dst_active(&self, utc: DateTime<Utc>) -> bool {
        let Some(rule) = &self.daylight_saving else {
            return false;
        };

        let standard = shift_by_hours(utc.naive_utc(), self.utc_offset_hours);
        let year = standard.year();
        let (Some(start), Some(end_daylight)) =
            (rule.start.local_instant(year), rule.end.local_instant(year))
        else {
            return false;
        };
        // The end transition is written in daylight time; compare in standard time.
        let end = shift_by_hours(end_daylight, -rule.offset_hours);

        if start <= end {
            standard >= start && standard < end
        } else {
            // Southern hemisphere: the window wraps over the new year.
            standard >= start || standard < end
        }
    }

    /// Base offset plus the DST delta when the rule is active at `utc`.
    pub fn total_utc_offset_hours(&self, utc: DateTime<Utc>) -> f64 {
        match &self.daylight_saving {
            Some(rule) if self.is_dst_active(utc) => self.utc_offset_hours + rule.offset_hours,
            _ => self.utc_offset_hours,
        }
    }

    /// Local wall-clock time for `utc`.
    ///
    /// An offset too large to represent leaves the instant unshifted.
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        shift_by_hours(utc.naive_utc(), self.total_utc_offset_hours(utc))
    }
}

/// `base` moved by `hours`, or `base` itself when the result is out of range.
fn shift_by_hours(base: NaiveDateTime, hours: f64) -> NaiveDateTime {
    TimeDelta::try_minutes((hours * 60.0).round() as i64)
        .and_then(|delta| base.checked_add_signed(delta))
        .unwrap_or(base)
}
