use crate::date;
use crate::models::{GridResponse, GridRow, User};
use crate::stats::{build_stats, current_streak};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const DEFAULT_WINDOW_DAYS: u32 = 10;
pub const MAX_WINDOW_DAYS: u32 = 27;

pub fn clamp_window(days: Option<u32>) -> u32 {
    days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, MAX_WINDOW_DAYS)
}

/// The shared view: one row per user with completion flags for the
/// `window_days` days ending at `reference_day`, most recent first, plus the
/// batch statistics. Rows come out in ascending-id order; any fancier sort
/// (current user first, by streak) is the client's business and never feeds
/// back into the numbers.
pub fn build_grid(
    users: &BTreeMap<Uuid, User>,
    reference_day: NaiveDate,
    window_days: u32,
) -> GridResponse {
    let days: Vec<NaiveDate> = (0..i64::from(window_days))
        .map(|offset| reference_day - Duration::days(offset))
        .collect();

    let rows = users
        .iter()
        .map(|(id, user)| GridRow {
            user_id: *id,
            username: user.username.clone(),
            completed: days.iter().map(|day| user.completions.contains(*day)).collect(),
            current_streak: current_streak(&user.completions, reference_day),
        })
        .collect();

    GridResponse {
        reference_day: date::format_day(reference_day),
        days: days.into_iter().map(date::format_day).collect(),
        users: rows,
        stats: build_stats(users, reference_day),
    }
}
