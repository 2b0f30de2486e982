//! Monthly release table.
//!
//! A schedule is a list of steps, each releasing `amount` tokens in each of
//! `months` consecutive periods. Period 0 starts at `start_time` and is
//! releasable immediately. The cumulative release never decreases, and after
//! the last period it stays at the schedule total.

use crate::errors::VestingError;
use soroban_sdk::{contracttype, Vec};

/// Longest schedule accepted, in periods (50 years of months).
pub const MAX_PERIODS: u32 = 600;

/// `months` consecutive periods each releasing `amount`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleStep {
    pub amount: i128,
    pub months: u32,
}

/// Number of periods covered by the schedule.
pub fn period_count(steps: &Vec<ScheduleStep>) -> u32 {
    steps
        .iter()
        .fold(0u32, |count, step| count.saturating_add(step.months))
}

/// Total released over the whole schedule.
pub fn schedule_total(steps: &Vec<ScheduleStep>) -> Result<i128, VestingError> {
    let mut total: i128 = 0;
    for step in steps.iter() {
        let step_total = step
            .amount
            .checked_mul(step.months as i128)
            .ok_or(VestingError::ArithmeticOverflow)?;
        total = total
            .checked_add(step_total)
            .ok_or(VestingError::ArithmeticOverflow)?;
    }
    Ok(total)
}

/// Tokens released by the end of `period`, inclusive. Periods past the end of
/// the schedule report the schedule total.
pub fn cumulative_at(steps: &Vec<ScheduleStep>, period: u32) -> Result<i128, VestingError> {
    let mut remaining = period.saturating_add(1);
    let mut total: i128 = 0;
    for step in steps.iter() {
        if remaining == 0 {
            break;
        }
        let months = step.months.min(remaining);
        remaining -= months;
        let part = step
            .amount
            .checked_mul(months as i128)
            .ok_or(VestingError::ArithmeticOverflow)?;
        total = total
            .checked_add(part)
            .ok_or(VestingError::ArithmeticOverflow)?;
    }
    Ok(total)
}

/// Period active at `now`, clamped to the last one; `None` before `start_time`.
pub fn period_at(start_time: u64, period_secs: u64, last_period: u32, now: u64) -> Option<u32> {
    if now < start_time || period_secs == 0 {
        return None;
    }
    let elapsed = (now - start_time) / period_secs;
    Some(elapsed.min(last_period as u64) as u32)
}

/// Structural checks run at initialization.
pub fn validate(steps: &Vec<ScheduleStep>) -> Result<(), VestingError> {
    if steps.is_empty() {
        return Err(VestingError::InvalidConfig);
    }
    for step in steps.iter() {
        if step.months == 0 || step.amount < 0 {
            return Err(VestingError::InvalidConfig);
        }
    }
    let periods = period_count(steps);
    if periods > MAX_PERIODS {
        return Err(VestingError::InvalidConfig);
    }
    if schedule_total(steps)? <= 0 {
        return Err(VestingError::InvalidConfig);
    }
    Ok(())
}
