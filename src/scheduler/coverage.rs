use super::{lookup, CoverageGap, CoverageOptions, ShiftSlot};
use crate::model::EmergencyRoster;
use chrono::{Duration, NaiveDate};

pub(super) fn detect_coverage_gaps(
    roster: &EmergencyRoster<'_>,
    from: NaiveDate,
    days: u32,
    opts: CoverageOptions,
) -> Vec<CoverageGap> {
    let mut out = Vec::new();

    for offset in 0..i64::from(days) {
        let Some(date) = from.checked_add_signed(Duration::days(offset)) else {
            break;
        };
        for slot in ShiftSlot::ALL {
            let staffed = lookup::staff_on_shift(date, slot.start(), roster).len();
            if staffed < opts.min_staff_per_shift {
                out.push(CoverageGap {
                    date,
                    slot,
                    staffed,
                    required: opts.min_staff_per_shift,
                });
            }
        }
    }

    out
}
