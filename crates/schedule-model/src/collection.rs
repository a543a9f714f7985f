//! Named schedules and the collection that groups them under one timezone.

use serde::{Deserialize, Serialize};

use crate::event::ScheduleEvent;
use crate::timezone::TimezoneInfo;

/// An ordered list of events. Order is insertion order and only affects display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    #[serde(default)]
    pub events: Vec<ScheduleEvent>,
}

impl Schedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }

    pub fn with_events(name: impl Into<String>, events: Vec<ScheduleEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

/// Every schedule stored in one file, plus the timezone used to display them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleCollection {
    #[serde(default)]
    pub timezone: TimezoneInfo,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl ScheduleCollection {
    pub fn new(timezone: TimezoneInfo) -> Self {
        Self {
            timezone,
            schedules: Vec::new(),
        }
    }

    pub fn schedule(&self, name: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.name == name)
    }

    pub fn event_count(&self) -> usize {
        self.schedules.iter().map(|s| s.events.len()).sum()
    }
}
