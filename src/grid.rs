use crate::calendar;
use crate::model::EmergencyRoster;
use crate::scheduler::{staff_on_shift, ShiftSlot};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Grille dates x gardes. Chaque cellule est le résultat de
/// [`staff_on_shift`] ; l'affichage et l'export CSV lisent la même grille.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub slot: ShiftSlot,
    /// une cellule par date, même ordre que `ScheduleGrid::dates`
    pub cells: Vec<Vec<String>>,
}

impl ScheduleGrid {
    /// `days` jours à partir de `from` (inclus).
    pub fn build(roster: &EmergencyRoster<'_>, from: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            bail!("grid must span at least one day");
        }
        let mut dates = Vec::with_capacity(days as usize);
        let mut current = from;
        for _ in 0..days {
            dates.push(current);
            current = current.succ_opt().context("date overflow")?;
        }

        let rows = ShiftSlot::ALL
            .into_iter()
            .map(|slot| GridRow {
                slot,
                cells: dates
                    .iter()
                    .map(|&date| staff_on_shift(date, slot.start(), roster))
                    .collect(),
            })
            .collect();

        Ok(Self { dates, rows })
    }

    /// Semaine lundi–dimanche contenant `date`.
    pub fn week(roster: &EmergencyRoster<'_>, date: NaiveDate) -> Result<Self> {
        let monday = calendar::week_start(date).context("date overflow")?;
        Self::build(roster, monday, 7)
    }

    pub fn month(roster: &EmergencyRoster<'_>, year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("invalid month {year}-{month}"))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .context("date overflow")?;
        let days = next.signed_duration_since(first).num_days();
        Self::build(roster, first, days as u32)
    }

    pub fn cell(&self, slot: ShiftSlot, date: NaiveDate) -> Option<&[String]> {
        let col = self.dates.iter().position(|d| *d == date)?;
        let row = self.rows.iter().find(|r| r.slot == slot)?;
        row.cells.get(col).map(Vec::as_slice)
    }
}
