use crate::calendar::{self, format_date, sunday_index, weekday_from_sunday_index};
use crate::model::{LeaveMarker, RawLeaveMarker};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

static EXACT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid exact-date pattern"));

/// Refus d'une modification de congé.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaveError {
    #[error("leave cannot be placed on a weekend ({0}): the clinic is closed")]
    Weekend(NaiveDate),
    #[error("leave cannot be declared for a past date ({0})")]
    PastDate(NaiveDate),
}

/// Forme canonique d'une collection de marqueurs de congé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveSet {
    exact_dates: BTreeSet<NaiveDate>,
    /// indices 0 = dimanche .. 6 = samedi
    weekdays: BTreeSet<u8>,
}

impl LeaveSet {
    pub fn normalize<'a, I>(markers: I) -> Self
    where
        I: IntoIterator<Item = &'a RawLeaveMarker>,
    {
        let mut set = Self::default();
        for raw in markers {
            match classify(raw) {
                Some(LeaveMarker::ExactDate(date)) => {
                    set.exact_dates.insert(date);
                }
                Some(LeaveMarker::Weekday(weekday)) => {
                    set.weekdays.insert(calendar::weekday_sunday_index(weekday));
                }
                None => {
                    log_debug!(marker = ?raw, "dropping unparseable leave marker");
                }
            }
        }
        set
    }

    /// Date exacte d'abord, puis jour de semaine récurrent (OU logique).
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.exact_dates.contains(&date) || self.weekdays.contains(&sunday_index(date))
    }

    pub fn exact_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.exact_dates
    }

    /// Jours de congé hebdomadaires, dimanche en premier.
    pub fn weekly_weekdays(&self) -> Vec<Weekday> {
        self.weekdays.iter().filter_map(|&i| weekday_from_sunday_index(i)).collect()
    }
}

/// Classe un marqueur brut. `None` pour les entrées inexploitables, qui sont
/// ignorées sans erreur.
pub fn classify(raw: &RawLeaveMarker) -> Option<LeaveMarker> {
    match raw {
        RawLeaveMarker::Number(n) => weekday_from_index(*n),
        RawLeaveMarker::Text(s) if EXACT_DATE.is_match(s) => {
            calendar::parse_date(s).map(LeaveMarker::ExactDate)
        }
        RawLeaveMarker::Text(s) => match s.trim().parse::<i64>() {
            Ok(n) => weekday_from_index(n),
            Err(_) => calendar::parse_loose_date(s)
                .map(|date| LeaveMarker::Weekday(date.weekday())),
        },
        RawLeaveMarker::Other(_) => None,
    }
}

fn weekday_from_index(n: i64) -> Option<LeaveMarker> {
    u8::try_from(n).ok().and_then(weekday_from_sunday_index).map(LeaveMarker::Weekday)
}

fn holds_exact(markers: &[RawLeaveMarker], key: &str) -> bool {
    markers.iter().any(|m| matches!(m, RawLeaveMarker::Text(s) if s == key))
}

/// Ajoute la date si absente, la retire si présente. Refusé le week-end et
/// pour une date strictement antérieure à `today`.
pub fn toggle_leave_date(
    markers: &[RawLeaveMarker],
    date: NaiveDate,
    today: NaiveDate,
) -> Result<Vec<RawLeaveMarker>, LeaveError> {
    if calendar::is_weekend(date) {
        log_warn!(%date, "leave toggle rejected: weekend");
        return Err(LeaveError::Weekend(date));
    }
    if date < today {
        log_warn!(%date, %today, "leave toggle rejected: past date");
        return Err(LeaveError::PastDate(date));
    }

    let key = format_date(date);
    let mut updated = markers.to_vec();
    if holds_exact(markers, &key) {
        updated.retain(|m| !matches!(m, RawLeaveMarker::Text(s) if *s == key));
    } else {
        updated.push(RawLeaveMarker::date(date));
    }
    Ok(updated)
}

/// Application d'un congé approuvé : ajout idempotent de la date exacte.
/// Retourne `true` si la collection a changé.
pub fn apply_approved_leave(markers: &mut Vec<RawLeaveMarker>, date: NaiveDate) -> bool {
    let key = format_date(date);
    if holds_exact(markers, &key) {
        return false;
    }
    markers.push(RawLeaveMarker::date(date));
    true
}

/// Dates concrètes des `weekdays` sur `weeks` semaines à partir de `from`
/// (inclus), triées.
pub fn expand_weekly_pattern(weekdays: &[Weekday], from: NaiveDate, weeks: u32) -> Vec<NaiveDate> {
    let wanted: BTreeSet<u8> = weekdays.iter().map(|&w| calendar::weekday_sunday_index(w)).collect();
    let total_days = i64::from(weeks) * 7;
    (0..total_days)
        .filter_map(|offset| from.checked_add_signed(Duration::days(offset)))
        .filter(|date| wanted.contains(&sunday_index(*date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::EXACT_DATE;

    #[test]
    fn exact_date_pattern_is_ascii_only() {
        assert!(EXACT_DATE.is_match("2025-03-04"));
        assert!(!EXACT_DATE.is_match("２０２５-０３-０４"));
        assert!(!EXACT_DATE.is_match("٢٠٢٥-٠٣-٠٤"));
        assert!(!EXACT_DATE.is_match("2025-3-4"));
    }
}
