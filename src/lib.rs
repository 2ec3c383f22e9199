#![forbid(unsafe_code)]
//! Nobet — moteur de planification des gardes d'urgence et de disponibilité
//! des consultations (sans BD).
//!
//! - Rotation 3 x 8h indexée sur le numéro de semaine ISO.
//! - Congés : dates exactes ou jours de semaine récurrents.
//! - Fenêtres de travail hebdomadaires pour la consultation, week-end fermé.
//! - Fonctions pures : l'instant courant est toujours passé en paramètre.
//! - Dates locales `YYYY-MM-DD`, jamais de conversion UTC.

// Journalisation optionnelle : sans la feature `logging`, ces macros ne
// produisent aucun code.
macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        ::tracing::debug!($($arg)*);
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        ::tracing::warn!($($arg)*);
    };
}

pub mod calendar;
pub mod grid;
pub mod io;
pub mod leave;
pub mod model;
pub mod outpatient;
pub mod scheduler;
pub mod storage;

pub use calendar::week_number;
pub use grid::ScheduleGrid;
pub use leave::{toggle_leave_date, LeaveError, LeaveSet};
pub use model::{
    EmergencyRoster, LeaveMarker, RawLeaveMarker, Roster, StaffId, StaffMember, WeeklyTemplate,
    WorkingDay,
};
pub use outpatient::{is_available, working_window, WorkingWindow};
pub use scheduler::{
    compute_shift, detect_coverage_gaps, staff_on_shift, CoverageGap, CoverageOptions, NextShift,
    ShiftAssignment, ShiftSlot,
};
pub use storage::{JsonStorage, Storage};
