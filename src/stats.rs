use crate::date;
use crate::errors::LedgerError;
use crate::ledger::CompletionLedger;
use crate::models::{Stats, User};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Consecutive-day streak ending at `reference_day` or the day before it.
/// A missing reference day falls back to a streak that ran through
/// yesterday; a gap of two or more days is a broken streak and reports 0.
pub fn current_streak(ledger: &CompletionLedger, reference_day: NaiveDate) -> u32 {
    let anchor = if ledger.contains(reference_day) {
        reference_day
    } else {
        let yesterday = date::previous_day(reference_day);
        if !ledger.contains(yesterday) {
            return 0;
        }
        yesterday
    };

    let mut streak = 0;
    let mut day = anchor;
    while ledger.contains(day) {
        streak += 1;
        day = date::previous_day(day);
    }
    streak
}

/// Batch statistics over every user, evaluated at `reference_day`. Users are
/// scanned in ascending-id order; the first user to reach the maximum keeps
/// the `streak_holder` slot, so ties never overwrite it.
pub fn build_stats(users: &BTreeMap<Uuid, User>, reference_day: NaiveDate) -> Stats {
    let mut stats = Stats::default();

    for (id, user) in users {
        let streak = current_streak(&user.completions, reference_day);
        stats.user_streaks.insert(*id, streak);
        if streak > stats.longest_streak {
            stats.longest_streak = streak;
            stats.streak_holder = Some(user.username.clone());
        }
        if user.completions.contains(reference_day) {
            stats.active_today += 1;
        }
    }

    stats
}

/// Streak for one user out of the snapshot. An id that is not in the
/// snapshot is an error, not a zero: callers must be able to tell "no
/// completions" apart from "no such user".
pub fn user_streak(
    users: &BTreeMap<Uuid, User>,
    user_id: Uuid,
    reference_day: NaiveDate,
) -> Result<u32, LedgerError> {
    users
        .get(&user_id)
        .map(|user| current_streak(&user.completions, reference_day))
        .ok_or(LedgerError::UnknownUser(user_id))
}
