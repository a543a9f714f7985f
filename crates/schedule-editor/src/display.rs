//! Human-readable, timezone-aware descriptions of schedule events.
//!
//! Times are shown in UTC followed by the local wall-clock time. The offset label
//! reflects whether DST is active at the instant being displayed, not at the
//! current real-world moment.

use chrono::{DateTime, Utc};
use schedule_model::days::short_name;
use schedule_model::{DaySet, ScheduleEvent, TimezoneInfo, Trigger};

/// One-line description of when `event` fires.
pub fn time_display(event: &ScheduleEvent, timezone: &TimezoneInfo) -> String {
    match &event.trigger {
        Trigger::Daily { time } => format!(
            "Daily at {} ({})",
            format_time(*time),
            format_local_time(*time, timezone)
        ),
        Trigger::Weekday { time, days } => format!(
            "{} at {} ({})",
            weekday_label(*days),
            format_time(*time),
            format_local_time(*time, timezone)
        ),
        Trigger::SunriseOffset {
            offset_minutes,
            days,
        } => format!(
            "Sunrise {} on {}",
            format_offset(*offset_minutes),
            format_days(*days)
        ),
        Trigger::SunsetOffset {
            offset_minutes,
            days,
        } => format!(
            "Sunset {} on {}",
            format_offset(*offset_minutes),
            format_days(*days)
        ),
    }
}

/// `exactly`, `HH:MM before` or `HH:MM after`.
pub fn format_offset(offset_minutes: i32) -> String {
    if offset_minutes == 0 {
        return "exactly".to_string();
    }
    let magnitude = offset_minutes.unsigned_abs();
    let direction = if offset_minutes < 0 { "before" } else { "after" };
    format!("{:02}:{:02} {}", magnitude / 60, magnitude % 60, direction)
}

/// Comma-separated short day names. Both the full and the empty set read `daily`.
pub fn format_days(days: DaySet) -> String {
    if days.is_empty() || days.is_full() {
        return "daily".to_string();
    }
    join_days(days)
}

/// `UTC-5.0`, `UTC+5.5`, `UTC+0.0`.
pub fn format_utc_offset(hours: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    format!("UTC{:+.1}", hours + 0.0)
}

fn weekday_label(days: DaySet) -> String {
    if days.is_empty() || days.is_full() {
        return "Daily".to_string();
    }
    join_days(days)
}

fn join_days(days: DaySet) -> String {
    days.iter().map(short_name).collect::<Vec<_>>().join(", ")
}

fn format_time(utc: DateTime<Utc>) -> String {
    utc.format("%H:%M").to_string()
}

fn format_local_time(utc: DateTime<Utc>, timezone: &TimezoneInfo) -> String {
    let local = timezone.to_local(utc);
    format!(
        "local {} {}",
        local.format("%H:%M"),
        format_utc_offset(timezone.total_utc_offset_hours(utc))
    )
}
