use super::types::{NextShift, ShiftAssignment, ShiftSlot};
use crate::calendar;
use crate::leave::LeaveSet;
use crate::model::{EmergencyRoster, StaffMember};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Garde du jour indépendante de l'horloge.
pub(super) struct DayRotation {
    pub slot: ShiftSlot,
    pub leave: LeaveSet,
}

impl DayRotation {
    pub fn is_working(&self, date: NaiveDate) -> bool {
        !self.leave.is_on_leave(date)
    }
}

/// `(position + semaine ISO) mod 3`. `None` si le membre n'est pas dans le
/// roster ou si la date est hors calendrier.
pub(super) fn rotate(
    staff: &StaffMember,
    roster: &EmergencyRoster<'_>,
    date: NaiveDate,
) -> Option<DayRotation> {
    let Some(position) = roster.position(staff.id) else {
        log_debug!(staff = %staff.id, "staff member not in emergency roster");
        return None;
    };
    let base = position % ShiftSlot::ALL.len();
    let week = calendar::week_number(date)? as usize;
    Some(DayRotation {
        slot: ShiftSlot::from_index(base + week),
        leave: LeaveSet::normalize(&staff.leave_markers),
    })
}

pub(super) fn compute_shift(
    staff: &StaffMember,
    roster: &EmergencyRoster<'_>,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Option<ShiftAssignment> {
    let rotation = rotate(staff, roster, date)?;
    let slot = rotation.slot;
    let is_working_today = rotation.is_working(date);

    let is_today = date == now.date();
    let now_minute = now.hour() * 60 + now.minute();
    let is_currently_working = is_today
        && is_working_today
        && (slot.start_minute()..slot.end_minute()).contains(&now_minute);

    let next_shift = next_shift(slot, date, is_working_today, now)?;

    Some(ShiftAssignment {
        date,
        slot,
        shift_number: slot.number(),
        shift_start: slot.start(),
        shift_end: slot.end(),
        is_working_today,
        is_currently_working,
        weekly_leave_weekdays: rotation.leave.weekly_weekdays(),
        next_shift,
    })
}

// En congé : lendemain, même heure de début (pas de recalcul de rotation).
// En service : le jour même si la garde n'a pas commencé, sinon le lendemain.
fn next_shift(
    slot: ShiftSlot,
    date: NaiveDate,
    is_working: bool,
    now: NaiveDateTime,
) -> Option<NextShift> {
    let tomorrow = date.checked_add_signed(Duration::days(1))?;
    let today = now.date();
    let not_started = if date == today {
        now.hour() * 60 + now.minute() < slot.start_minute()
    } else {
        date > today
    };
    let day = if is_working && not_started { date } else { tomorrow };
    Some(NextShift { date: day, start: slot.start() })
}
