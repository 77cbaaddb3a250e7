//! Even split of the total budget across trip days

use std::num::NonZeroU32;

use crate::models::BudgetBreakdown;

#[must_use]
pub fn allocate(total: f64, days: NonZeroU32) -> BudgetBreakdown {
    BudgetBreakdown {
        total,
        per_day: total / f64::from(days.get()),
        days: days.get(),
    }
}
