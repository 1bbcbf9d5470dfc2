use crate::date;
use crate::errors::{AppError, LedgerError};
use crate::models::{
    AvailabilityResponse, CheckUsernameRequest, GridQuery, GridResponse, RecordRequest,
    RecordResponse, SignupRequest, SignupResponse, SweepResponse, User,
};
use crate::state::AppState;
use crate::stats::current_streak;
use crate::storage::persist_data;
use crate::ui::render_index;
use crate::view::{build_grid, clamp_window};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

const MAX_USERNAME_CHARS: usize = 32;

pub async fn index() -> Html<String> {
    Html(render_index(&date::format_day(date::today())))
}

pub async fn check_username(
    State(state): State<AppState>,
    Json(payload): Json<CheckUsernameRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }

    let data = state.data.lock().await;
    Ok(Json(AvailabilityResponse {
        available: data.find_by_username(username).is_none(),
    }))
}

pub async fn save_user(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AppError::bad_request("username is too long"));
    }

    let mut data = state.data.lock().await;
    if data.find_by_username(&username).is_some() {
        return Err(AppError::conflict("username already taken"));
    }

    let id = payload.user_id.unwrap_or_else(Uuid::new_v4);
    if data.users.contains_key(&id) {
        return Err(AppError::conflict("user already exists"));
    }

    data.users.insert(
        id,
        User {
            id,
            username: username.clone(),
            last_active: Utc::now(),
            completions: Default::default(),
        },
    );
    persist_data(&state.data_path, &data).await?;

    info!(user_id = %id, username = %username, "user created");
    Ok(Json(SignupResponse { user_id: id, username }))
}

pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let today = date::today();
    let day = match payload.date.as_deref() {
        Some(value) => date::parse_day(value)?,
        None => today,
    };

    let mut data = state.data.lock().await;
    let (recorded, streak) = {
        let user = data
            .users
            .get_mut(&payload.user_id)
            .ok_or(LedgerError::UnknownUser(payload.user_id))?;
        let recorded = user.completions.insert(day, today)?;
        user.last_active = Utc::now();
        (recorded, current_streak(&user.completions, today))
    };
    persist_data(&state.data_path, &data).await?;

    if recorded {
        debug!(user_id = %payload.user_id, %day, "completion recorded");
    } else {
        debug!(user_id = %payload.user_id, %day, "completion already recorded");
    }

    Ok(Json(RecordResponse {
        date: date::format_day(day),
        current_streak: streak,
    }))
}

pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<GridResponse>, AppError> {
    let window = clamp_window(query.days);
    let data = state.data.lock().await;
    Ok(Json(build_grid(&data.users, date::today(), window)))
}

pub async fn sweep(State(state): State<AppState>) -> Result<Json<SweepResponse>, AppError> {
    let now = Utc::now();
    let threshold = Duration::days(state.idle_days);

    let mut data = state.data.lock().await;
    let removed: Vec<Uuid> = data
        .users
        .iter()
        .filter(|(_, user)| now - user.last_active > threshold)
        .map(|(id, _)| *id)
        .collect();

    for id in &removed {
        data.users.remove(id);
    }
    if !removed.is_empty() {
        persist_data(&state.data_path, &data).await?;
        info!(count = removed.len(), "removed inactive users");
    }

    Ok(Json(SweepResponse {
        removed_count: removed.len(),
        removed_users: removed,
    }))
}
