mod coverage;
mod lookup;
mod rotation;
mod types;

pub use types::{CoverageGap, CoverageOptions, NextShift, ShiftAssignment, ShiftSlot};

use crate::model::{EmergencyRoster, StaffMember};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Garde de `staff` à `date`.
///
/// - `roster` est le sous-roster des urgences déjà trié ; le construire une
///   fois par lot de requêtes.
/// - `now` est l'instant local courant ; il n'influe que sur
///   `is_currently_working` et `next_shift`.
///
/// `None` si `staff` n'appartient pas au roster ou si la date sort du
/// calendrier représentable.
pub fn compute_shift(
    staff: &StaffMember,
    roster: &EmergencyRoster<'_>,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Option<ShiftAssignment> {
    rotation::compute_shift(staff, roster, date, now)
}

/// Membres de garde pour une date et une heure de début.
pub fn staff_on_shift(
    date: NaiveDate,
    shift_start: NaiveTime,
    roster: &EmergencyRoster<'_>,
) -> Vec<String> {
    lookup::staff_on_shift(date, shift_start, roster)
}

/// Couples (date, garde) sous-dotés sur `days` jours à partir de `from`.
pub fn detect_coverage_gaps(
    roster: &EmergencyRoster<'_>,
    from: NaiveDate,
    days: u32,
    opts: CoverageOptions,
) -> Vec<CoverageGap> {
    coverage::detect_coverage_gaps(roster, from, days, opts)
}
