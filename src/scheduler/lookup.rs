use super::rotation;
use crate::model::EmergencyRoster;
use chrono::{NaiveDate, NaiveTime};

/// Noms des membres de garde à `date` sur la garde débutant à `shift_start`,
/// dans l'ordre du roster (ids croissants). Seul chemin de calcul, partagé par
/// la grille et les exports.
pub(super) fn staff_on_shift(
    date: NaiveDate,
    shift_start: NaiveTime,
    roster: &EmergencyRoster<'_>,
) -> Vec<String> {
    roster
        .members()
        .iter()
        .filter(|member| {
            rotation::rotate(member, roster, date)
                .is_some_and(|r| r.is_working(date) && r.slot.start() == shift_start)
        })
        .map(|member| member.display_name())
        .collect()
}
