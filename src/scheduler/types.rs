use chrono::{NaiveDate, NaiveTime, Weekday};

/// Une des trois gardes de 8h qui couvrent la journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftSlot {
    Night,
    Day,
    Evening,
}

impl ShiftSlot {
    pub const ALL: [ShiftSlot; 3] = [ShiftSlot::Night, ShiftSlot::Day, ShiftSlot::Evening];
    pub const HOURS: u32 = 8;

    /// Index de rotation (0..3), dans l'ordre 00:00, 08:00, 16:00.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        match self {
            ShiftSlot::Night => 0,
            ShiftSlot::Day => 1,
            ShiftSlot::Evening => 2,
        }
    }

    /// Numéro affiché, 1 à 3.
    pub fn number(self) -> u8 {
        match self {
            ShiftSlot::Night => 1,
            ShiftSlot::Day => 2,
            ShiftSlot::Evening => 3,
        }
    }

    pub fn start_minute(self) -> u32 {
        self.index() as u32 * Self::HOURS * 60
    }

    /// Fin en minutes ; minuit vaut 24:00.
    pub fn end_minute(self) -> u32 {
        self.start_minute() + Self::HOURS * 60
    }

    pub fn start(self) -> NaiveTime {
        hm(self.start_minute())
    }

    /// start + 8h modulo 24h.
    pub fn end(self) -> NaiveTime {
        hm(self.end_minute() % (24 * 60))
    }

    pub fn from_start(start: NaiveTime) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.start() == start)
    }

    /// `"08:00-16:00"`
    pub fn label(self) -> String {
        format!("{}-{}", self.start().format("%H:%M"), self.end().format("%H:%M"))
    }
}

fn hm(minutes: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Prochaine garde projetée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextShift {
    pub date: NaiveDate,
    pub start: NaiveTime,
}

/// Affectation calculée pour un membre et une date. Jamais persistée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignment {
    pub date: NaiveDate,
    pub slot: ShiftSlot,
    pub shift_number: u8,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    pub is_working_today: bool,
    pub is_currently_working: bool,
    pub weekly_leave_weekdays: Vec<Weekday>,
    pub next_shift: NextShift,
}

/// Options du contrôle de couverture
#[derive(Debug, Clone, Copy)]
pub struct CoverageOptions {
    pub min_staff_per_shift: usize,
}

impl Default for CoverageOptions {
    fn default() -> Self {
        Self { min_staff_per_shift: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    pub date: NaiveDate,
    pub slot: ShiftSlot,
    pub staffed: usize,
    pub required: usize,
}
