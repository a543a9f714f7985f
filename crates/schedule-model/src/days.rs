//! Weekday sets.
//!
//! `DaySet` is a seven-bit set over `chrono::Weekday`. It serializes as a JSON array of
//! full day names so files stay readable, and parses either full or three-letter names.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

const ALL_BITS: u8 = 0b0111_1111;

/// A set of weekdays. Iteration always runs Monday through Sunday.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct DaySet(u8);

impl DaySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(ALL_BITS)
    }

    pub fn from_days<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut set = Self::empty();
        for day in days {
            set.insert(day);
        }
        set
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !bit(day);
    }

    /// Insert or remove `day` depending on `selected`.
    pub fn set(&mut self, day: Weekday, selected: bool) {
        if selected {
            self.insert(day);
        } else {
            self.remove(day);
        }
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when all seven days are present.
    pub fn is_full(&self) -> bool {
        self.0 == ALL_BITS
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.iter().copied().filter(move |d| self.contains(*d))
    }
}

/// Monday-first ordering used for iteration and display.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

/// Three-letter label, e.g. `Mon`.
pub fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Full English name, e.g. `Monday`.
pub fn full_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full or three-letter day name, ignoring case.
pub fn parse_day(name: &str) -> Result<Weekday, ScheduleError> {
    name.trim()
        .parse::<Weekday>()
        .map_err(|_| ScheduleError::UnknownDay(name.to_string()))
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(short_name)).finish()
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::from_days(iter)
    }
}

impl From<DaySet> for Vec<String> {
    fn from(set: DaySet) -> Self {
        set.iter().map(|d| full_name(d).to_string()).collect()
    }
}

impl TryFrom<Vec<String>> for DaySet {
    type Error = ScheduleError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().map(|n| parse_day(n)).collect()
    }
}

/// Serde adapter for a single `Weekday` stored by full name.
pub(crate) mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::full_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::parse_day(&name).map_err(serde::de::Error::custom)
    }
}
