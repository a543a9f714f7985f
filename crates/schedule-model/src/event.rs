//! Schedule events and their trigger variants.
//!
//! The variant set is closed: an event fires daily at a UTC time, on selected
//! weekdays at a UTC time, or at a signed minute offset from sunrise or sunset on
//! selected weekdays. Times are stored as full `DateTime<Utc>` instants but only the
//! time of day is meaningful; the date part is ignored downstream.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::days::DaySet;
use crate::error::ScheduleError;

/// Date component used when building an instant from a bare time of day.
pub const TIME_OF_DAY_REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1989, 6, 3) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Time of day assumed when a time-based event has no time to inherit.
pub const DEFAULT_EVENT_TIME: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(time) => time,
    None => panic!("invalid default time"),
};

/// Build the UTC instant that represents `time` on the reference date.
pub fn time_of_day_instant(time: NaiveTime) -> DateTime<Utc> {
    TIME_OF_DAY_REFERENCE_DATE.and_time(time).and_utc()
}

/// Tag for each trigger variant, used by type pickers and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Daily,
    Weekday,
    SunriseOffset,
    SunsetOffset,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Daily,
        EventKind::Weekday,
        EventKind::SunriseOffset,
        EventKind::SunsetOffset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Daily => "Daily",
            EventKind::Weekday => "Weekday",
            EventKind::SunriseOffset => "SunriseOffset",
            EventKind::SunsetOffset => "SunsetOffset",
        }
    }

    /// Fires at an absolute time of day.
    pub fn uses_time(self) -> bool {
        matches!(self, EventKind::Daily | EventKind::Weekday)
    }

    /// Restricted to a set of weekdays.
    pub fn uses_days(self) -> bool {
        !matches!(self, EventKind::Daily)
    }

    /// Fires relative to sunrise or sunset.
    pub fn uses_offset(self) -> bool {
        matches!(self, EventKind::SunriseOffset | EventKind::SunsetOffset)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScheduleError::UnknownEventKind(s.to_string()))
    }
}

/// Variant-specific firing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum Trigger {
    Daily {
        #[serde(rename = "eventTime")]
        time: DateTime<Utc>,
    },
    Weekday {
        #[serde(rename = "eventTime")]
        time: DateTime<Utc>,
        #[serde(rename = "daysOfWeek")]
        days: DaySet,
    },
    SunriseOffset {
        #[serde(rename = "offsetMinutes")]
        offset_minutes: i32,
        #[serde(rename = "daysOfWeek")]
        days: DaySet,
    },
    SunsetOffset {
        #[serde(rename = "offsetMinutes")]
        offset_minutes: i32,
        #[serde(rename = "daysOfWeek")]
        days: DaySet,
    },
}

impl Trigger {
    pub fn kind(&self) -> EventKind {
        match self {
            Trigger::Daily { .. } => EventKind::Daily,
            Trigger::Weekday { .. } => EventKind::Weekday,
            Trigger::SunriseOffset { .. } => EventKind::SunriseOffset,
            Trigger::SunsetOffset { .. } => EventKind::SunsetOffset,
        }
    }
}

/// One immutable automation rule.
///
/// `data` is an opaque action token. By convention `"true"` and `"false"` switch
/// something on or off; any other string is passed through to the device verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default = "default_data")]
    pub data: String,
    #[serde(flatten)]
    pub trigger: Trigger,
}

fn default_data() -> String {
    "true".to_string()
}

impl ScheduleEvent {
    pub fn new(trigger: Trigger, data: impl Into<String>) -> Self {
        Self {
            is_disabled: false,
            data: data.into(),
            trigger,
        }
    }

    pub fn daily(time: DateTime<Utc>, data: impl Into<String>) -> Self {
        Self::new(Trigger::Daily { time }, data)
    }

    /// Daily event at `time` on the reference date.
    pub fn daily_at(time: NaiveTime, data: impl Into<String>) -> Self {
        Self::daily(time_of_day_instant(time), data)
    }

    pub fn weekday(time: DateTime<Utc>, data: impl Into<String>, days: DaySet) -> Self {
        Self::new(Trigger::Weekday { time, days }, data)
    }

    pub fn weekday_at(time: NaiveTime, data: impl Into<String>, days: DaySet) -> Self {
        Self::weekday(time_of_day_instant(time), data, days)
    }

    pub fn sunrise_offset(offset_minutes: i32, data: impl Into<String>, days: DaySet) -> Self {
        Self::new(
            Trigger::SunriseOffset {
                offset_minutes,
                days,
            },
            data,
        )
    }

    pub fn sunset_offset(offset_minutes: i32, data: impl Into<String>, days: DaySet) -> Self {
        Self::new(
            Trigger::SunsetOffset {
                offset_minutes,
                days,
            },
            data,
        )
    }

    /// Returns a copy with the disabled flag replaced.
    pub fn with_disabled(self, is_disabled: bool) -> Self {
        Self {
            is_disabled,
            ..self
        }
    }

    pub fn kind(&self) -> EventKind {
        self.trigger.kind()
    }

    /// The UTC instant for time-based variants.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        match &self.trigger {
            Trigger::Daily { time } | Trigger::Weekday { time, .. } => Some(*time),
            Trigger::SunriseOffset { .. } | Trigger::SunsetOffset { .. } => None,
        }
    }

    /// The weekday set for every variant except `Daily`.
    pub fn days(&self) -> Option<DaySet> {
        match &self.trigger {
            Trigger::Daily { .. } => None,
            Trigger::Weekday { days, .. }
            | Trigger::SunriseOffset { days, .. }
            | Trigger::SunsetOffset { days, .. } => Some(*days),
        }
    }

    /// Signed sunrise/sunset offset in minutes; negative means before.
    pub fn offset_minutes(&self) -> Option<i32> {
        match &self.trigger {
            Trigger::SunriseOffset { offset_minutes, .. }
            | Trigger::SunsetOffset { offset_minutes, .. } => Some(*offset_minutes),
            Trigger::Daily { .. } | Trigger::Weekday { .. } => None,
        }
    }
}
