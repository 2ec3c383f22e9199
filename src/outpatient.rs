//! Disponibilité du personnel de consultation (horaires hebdomadaires fixes).

use crate::calendar::{backend_index, is_weekend};
use crate::leave::LeaveSet;
use crate::model::{StaffMember, WeeklyTemplate};
use chrono::{NaiveDate, NaiveTime};

const DEFAULT_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};
const DEFAULT_END: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// Plage de travail d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Plage de travail de `staff` à `date`, ou `None` s'il ne travaille pas.
///
/// Ordre des règles : fermeture du week-end (quel que soit le gabarit), congé,
/// puis gabarit hebdomadaire (gabarit vide = lun–ven 08:00–17:00).
pub fn working_window(staff: &StaffMember, date: NaiveDate) -> Option<WorkingWindow> {
    if is_weekend(date) {
        return None;
    }
    if LeaveSet::normalize(&staff.leave_markers).is_on_leave(date) {
        return None;
    }

    let fallback;
    let template = if staff.weekly_template.is_empty() {
        fallback = WeeklyTemplate::default_clinic();
        &fallback
    } else {
        &staff.weekly_template
    };

    let day = template.day(backend_index(date))?;
    if !day.enabled {
        return None;
    }
    Some(WorkingWindow {
        start: parse_time(day.start.as_deref()).unwrap_or(DEFAULT_START),
        end: parse_time(day.end.as_deref()).unwrap_or(DEFAULT_END),
    })
}

pub fn is_available(staff: &StaffMember, date: NaiveDate) -> bool {
    working_window(staff, date).is_some()
}

// Heure absente ou illisible : valeur par défaut.
fn parse_time(raw: Option<&str>) -> Option<NaiveTime> {
    let raw = raw?.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
