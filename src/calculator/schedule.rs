//! Amortization schedule generation

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use super::round2;

/// One period of the amortization schedule.
///
/// `principal` and `interest` retire the annuity base; `insurance` carries
/// the flat rider surcharge, so `payment = principal + interest + insurance`
/// holds for every period up to rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Period index, 1-based
    pub month: u32,
    /// Due date, `dd.mm.yyyy`
    pub date: String,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub insurance: f64,
    /// Remaining balance after this payment, clamped at 0
    pub balance: f64,
}

/// Build the full schedule for an annuity of `base_payment` per month over
/// `annuity_base`, with `rider_monthly` added flat to every period.
///
/// Due dates advance by a fixed 30-day step from `start`, not by calendar
/// months. The running balance is kept unrounded between periods.
pub(crate) fn build_schedule(
    annuity_base: f64,
    base_payment: f64,
    rider_monthly: f64,
    annual_rate: f64,
    months: u32,
    start: DateTime<Local>,
) -> Vec<ScheduleEntry> {
    let monthly_rate = annual_rate / 12.0;
    let mut balance = annuity_base;
    let mut schedule = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * monthly_rate;
        let principal = base_payment - interest;
        balance -= principal;

        let due = start + Duration::days(30 * month as i64);
        schedule.push(ScheduleEntry {
            month,
            date: due.format("%d.%m.%Y").to_string(),
            payment: round2(base_payment + rider_monthly),
            principal: round2(principal),
            interest: round2(interest),
            insurance: round2(rider_monthly),
            balance: round2(balance).max(0.0),
        });
    }

    schedule
}
