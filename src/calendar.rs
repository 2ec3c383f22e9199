use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Format d'échange de toutes les dates : date locale, sans fuseau.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Numéro de semaine ISO-8601 (lundi premier jour, la semaine 1 contient le
/// premier jeudi de l'année).
///
/// La date est ramenée au jeudi de sa semaine lun–dim, puis on compte les
/// semaines depuis le 1er janvier de l'année de ce jeudi. Fin décembre peut
/// donc tomber en semaine 1 de l'année suivante, début janvier en semaine
/// 52/53 de la précédente.
///
/// `None` uniquement aux bornes du calendrier représentable.
pub fn week_number(date: NaiveDate) -> Option<u32> {
    let iso_weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date.checked_add_signed(Duration::days(4 - iso_weekday))?;
    let year_start = NaiveDate::from_ymd_opt(thursday.year(), 1, 1)?;
    let days = thursday.signed_duration_since(year_start).num_days() + 1;
    u32::try_from((days + 6) / 7).ok()
}

/// Indice de jour côté calendrier (0 = dimanche .. 6 = samedi).
pub fn sunday_index(date: NaiveDate) -> u8 {
    weekday_sunday_index(date.weekday())
}

pub fn weekday_sunday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday() est toujours < 7
    weekday.num_days_from_sunday() as u8
}

/// Indice de jour côté stockage des horaires (0 = lundi .. 6 = dimanche).
pub fn backend_index(date: NaiveDate) -> u8 {
    match sunday_index(date) {
        0 => 6,
        js => js - 1,
    }
}

pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Lundi de la semaine de `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(Duration::days(offset))
}

/// Parsing strict `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Sérialise à partir des composantes année/mois/jour.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parsing permissif pour les marqueurs texte libres : on n'en garde que la
/// date calendaire.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
