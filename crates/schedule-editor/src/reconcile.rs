//! Variant reconciliation: fold an overlay into a brand-new immutable event.
//!
//! Reconciliation never fails. Every field resolves to the overlay's override when
//! one is set and to the original event otherwise, and every variant-specific hole
//! has a fixed default:
//!
//! - an empty weekday set becomes `{Monday}`
//! - a time-based event with no time to inherit fires at 12:00 on the reference date
//! - an offset-based event with no offset to inherit fires exactly at sunrise/sunset

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use schedule_model::event::DEFAULT_EVENT_TIME;
use schedule_model::{time_of_day_instant, DaySet, EventKind, ScheduleEvent, Trigger};

use crate::overlay::{DaySelection, EventOverlay, OffsetDirection};

/// Substituted when a day-based event would otherwise carry no days.
pub const DEFAULT_DAY: Weekday = Weekday::Mon;

/// Build the event described by `overlay` on top of `original`.
pub fn reconcile(original: &ScheduleEvent, overlay: &EventOverlay) -> ScheduleEvent {
    let trigger = match resolve_kind(original, overlay) {
        EventKind::Daily => Trigger::Daily {
            time: resolve_instant(original, overlay),
        },
        EventKind::Weekday => Trigger::Weekday {
            time: resolve_instant(original, overlay),
            days: resolve_days(original, overlay),
        },
        EventKind::SunriseOffset => Trigger::SunriseOffset {
            offset_minutes: resolve_offset(original, overlay),
            days: resolve_days(original, overlay),
        },
        EventKind::SunsetOffset => Trigger::SunsetOffset {
            offset_minutes: resolve_offset(original, overlay),
            days: resolve_days(original, overlay),
        },
    };

    ScheduleEvent {
        is_disabled: resolve_disabled(original, overlay),
        data: resolve_payload(original, overlay).to_string(),
        trigger,
    }
}

pub(crate) fn resolve_kind(original: &ScheduleEvent, overlay: &EventOverlay) -> EventKind {
    overlay.kind().unwrap_or_else(|| original.kind())
}

pub(crate) fn resolve_payload<'a>(
    original: &'a ScheduleEvent,
    overlay: &'a EventOverlay,
) -> &'a str {
    overlay.payload().unwrap_or(&original.data)
}

pub(crate) fn resolve_disabled(original: &ScheduleEvent, overlay: &EventOverlay) -> bool {
    overlay.disabled().unwrap_or(original.is_disabled)
}

/// Time of day with no variant default applied.
pub(crate) fn resolve_time(original: &ScheduleEvent, overlay: &EventOverlay) -> Option<NaiveTime> {
    overlay.time().or_else(|| original.time().map(|t| t.time()))
}

/// Unsigned offset magnitude in minutes.
pub(crate) fn resolve_offset_minutes(original: &ScheduleEvent, overlay: &EventOverlay) -> u32 {
    overlay
        .offset_minutes()
        .unwrap_or_else(|| original.offset_minutes().map_or(0, i32::unsigned_abs))
}

pub(crate) fn resolve_offset_direction(
    original: &ScheduleEvent,
    overlay: &EventOverlay,
) -> OffsetDirection {
    overlay
        .offset_direction()
        .unwrap_or_else(|| OffsetDirection::of(original.offset_minutes().unwrap_or(0)))
}

fn resolve_instant(original: &ScheduleEvent, overlay: &EventOverlay) -> DateTime<Utc> {
    match (overlay.time(), original.time()) {
        (Some(time), _) => time_of_day_instant(time),
        (None, Some(instant)) => instant,
        (None, None) => time_of_day_instant(DEFAULT_EVENT_TIME),
    }
}

fn resolve_offset(original: &ScheduleEvent, overlay: &EventOverlay) -> i32 {
    if overlay.offset_minutes().is_none() && overlay.offset_direction().is_none() {
        return original.offset_minutes().unwrap_or(0);
    }
    resolve_offset_direction(original, overlay).apply(resolve_offset_minutes(original, overlay))
}

fn resolve_days(original: &ScheduleEvent, overlay: &EventOverlay) -> DaySet {
    let days = match overlay.days() {
        DaySelection::Touched(days) => days,
        DaySelection::Untouched => original.days().unwrap_or_default(),
    };
    if days.is_empty() {
        DaySet::from_days([DEFAULT_DAY])
    } else {
        days
    }
}
