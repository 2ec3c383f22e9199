use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifiant fort d'un membre du personnel. L'ordre croissant des ids
/// fixe le décalage de rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(i64);

impl StaffId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marqueur de congé tel que stocké : texte (date, indice ou texte libre),
/// nombre, ou toute autre valeur JSON conservée telle quelle et ignorée par le
/// moteur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLeaveMarker {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl RawLeaveMarker {
    pub fn date(date: NaiveDate) -> Self {
        Self::Text(crate::calendar::format_date(date))
    }
}

impl From<&str> for RawLeaveMarker {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for RawLeaveMarker {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Marqueur classifié, produit une seule fois à l'entrée du moteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveMarker {
    ExactDate(NaiveDate),
    Weekday(Weekday),
}

/// Horaires d'un jour du gabarit hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkingDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl WorkingDay {
    pub fn open<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self { start: Some(start.into()), end: Some(end.into()), enabled: true }
    }
    pub fn closed() -> Self {
        Self::default()
    }
}

/// Gabarit hebdomadaire, clé `"0"` (lundi) à `"6"` (dimanche).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyTemplate(BTreeMap<String, WorkingDay>);

impl WeeklyTemplate {
    /// Lundi–vendredi 08:00–17:00, week-end fermé.
    pub fn default_clinic() -> Self {
        let mut days = BTreeMap::new();
        for idx in 0u8..7 {
            let day = if idx < 5 { WorkingDay::open("08:00", "17:00") } else { WorkingDay::closed() };
            days.insert(idx.to_string(), day);
        }
        Self(days)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `backend_weekday` : 0 = lundi .. 6 = dimanche.
    pub fn day(&self, backend_weekday: u8) -> Option<&WorkingDay> {
        self.0.get(&backend_weekday.to_string())
    }

    pub fn set_day(&mut self, backend_weekday: u8, day: WorkingDay) {
        self.0.insert(backend_weekday.to_string(), day);
    }
}

/// Membre du personnel (urgences ou consultation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub is_emergency_staff: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leave_markers: Vec<RawLeaveMarker>,
    #[serde(default, skip_serializing_if = "WeeklyTemplate::is_empty")]
    pub weekly_template: WeeklyTemplate,
}

impl StaffMember {
    pub fn new(id: i64) -> Self {
        Self {
            id: StaffId::new(id),
            full_name: None,
            first_name: None,
            last_name: None,
            username: None,
            is_emergency_staff: false,
            leave_markers: Vec::new(),
            weekly_template: WeeklyTemplate::default(),
        }
    }

    pub fn emergency(id: i64) -> Self {
        Self { is_emergency_staff: true, ..Self::new(id) }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_leave<I, M>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<RawLeaveMarker>,
    {
        self.leave_markers.extend(markers.into_iter().map(Into::into));
        self
    }

    /// Nom affiché : nom complet, puis prénom + nom, puis identifiant de
    /// connexion, sinon `"unknown"`.
    pub fn display_name(&self) -> String {
        if let Some(name) = non_empty(self.full_name.as_deref()) {
            return name.to_owned();
        }
        if let (Some(first), Some(last)) =
            (non_empty(self.first_name.as_deref()), non_empty(self.last_name.as_deref()))
        {
            return format!("{first} {last}");
        }
        non_empty(self.username.as_deref()).unwrap_or("unknown").to_owned()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Roster complet d'un établissement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub staff: Vec<StaffMember>,
}

impl Roster {
    pub fn find_by_id(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == id)
    }
    pub fn find_mut_by_id(&mut self, id: StaffId) -> Option<&mut StaffMember> {
        self.staff.iter_mut().find(|s| s.id == id)
    }

    pub fn emergency(&self) -> EmergencyRoster<'_> {
        EmergencyRoster::new(&self.staff)
    }
}

/// Sous-roster des urgences, trié par id croissant une fois pour tout un lot
/// de requêtes.
#[derive(Debug, Clone)]
pub struct EmergencyRoster<'a> {
    members: Vec<&'a StaffMember>,
}

impl<'a> EmergencyRoster<'a> {
    pub fn new<I>(staff: I) -> Self
    where
        I: IntoIterator<Item = &'a StaffMember>,
    {
        let mut members: Vec<&StaffMember> =
            staff.into_iter().filter(|s| s.is_emergency_staff).collect();
        members.sort_by_key(|s| s.id);
        Self { members }
    }

    pub fn members(&self) -> &[&'a StaffMember] {
        &self.members
    }

    /// Position dans l'ordre trié.
    pub fn position(&self, id: StaffId) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }
}
