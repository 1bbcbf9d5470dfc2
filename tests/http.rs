use chrono::{Datelike, Duration, Utc};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupResponse {
    user_id: Uuid,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordResponse {
    date: String,
    current_streak: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    longest_streak: u32,
    streak_holder: Option<String>,
    user_streaks: BTreeMap<Uuid, u32>,
    active_today: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridRow {
    user_id: Uuid,
    username: String,
    completed: Vec<bool>,
    current_streak: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridResponse {
    reference_day: String,
    days: Vec<String>,
    users: Vec<GridRow>,
    stats: Stats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SweepResponse {
    removed_count: usize,
    removed_users: Vec<Uuid>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_grid_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + StdDuration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/grid")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(StdDuration::from_millis(100)).await;
    }
}

async fn spawn_server_with_path(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_grid"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server_with_path(&unique_data_path()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn signup(client: &Client, base_url: &str, username: &str) -> SignupResponse {
    let response = client
        .post(format!("{base_url}/api/save-user"))
        .json(&serde_json::json!({ "username": username }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_signup_and_username_collision() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let name = unique_name("alice");
    let saved = signup(&client, &server.base_url, &name).await;
    assert_eq!(saved.username, name);

    let check = client
        .post(format!("{}/api/check-username", server.base_url))
        .json(&serde_json::json!({ "username": name.to_uppercase() }))
        .send()
        .await
        .unwrap();
    assert!(check.status().is_success());
    let body: serde_json::Value = check.json().await.unwrap();
    assert_eq!(body["available"], false);

    let duplicate = client
        .post(format!("{}/api/save-user", server.base_url))
        .json(&serde_json::json!({ "username": name.to_uppercase() }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), reqwest::StatusCode::CONFLICT);
}

#[tokio::test]
async fn http_record_is_idempotent_and_shows_in_grid() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let saved = signup(&client, &server.base_url, &unique_name("bob")).await;

    for _ in 0..2 {
        let recorded: RecordResponse = client
            .post(format!("{}/api/record", server.base_url))
            .json(&serde_json::json!({ "userId": saved.user_id }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(recorded.current_streak, 1);
        assert!(!recorded.date.is_empty());
    }

    let grid: GridResponse = client
        .get(format!("{}/api/grid", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(grid.days.len(), 10);
    assert_eq!(grid.days[0], grid.reference_day);

    let row = grid
        .users
        .iter()
        .find(|row| row.user_id == saved.user_id)
        .expect("missing user row");
    assert!(row.completed[0]);
    assert!(row.completed[1..].iter().all(|done| !done));
    assert_eq!(row.current_streak, 1);

    assert_eq!(grid.stats.user_streaks[&saved.user_id], 1);
    assert!(grid.stats.active_today >= 1);
    assert!(grid.stats.longest_streak >= 1);
    assert!(grid.stats.streak_holder.is_some());
}

#[tokio::test]
async fn http_record_rejects_far_future_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let saved = signup(&client, &server.base_url, &unique_name("carol")).await;
    let today = habit_grid::date::today();

    let rejected = client
        .post(format!("{}/api/record", server.base_url))
        .json(&serde_json::json!({
            "userId": saved.user_id,
            "date": habit_grid::date::format_day(today + Duration::days(5)),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);

    let garbled = client
        .post(format!("{}/api/record", server.base_url))
        .json(&serde_json::json!({ "userId": saved.user_id, "date": "not-a-day" }))
        .send()
        .await
        .unwrap();
    assert_eq!(garbled.status(), reqwest::StatusCode::BAD_REQUEST);

    // one day of clock skew is tolerated
    let skewed = client
        .post(format!("{}/api/record", server.base_url))
        .json(&serde_json::json!({
            "userId": saved.user_id,
            "date": habit_grid::date::format_day(today + Duration::days(1)),
        }))
        .send()
        .await
        .unwrap();
    assert!(skewed.status().is_success());

    let unknown = client
        .post(format!("{}/api/record", server.base_url))
        .json(&serde_json::json!({ "userId": Uuid::new_v4() }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_grid_window_clamps_to_bounds() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let grid: GridResponse = client
        .get(format!("{}/api/grid?days=12", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(grid.days.len(), 12);

    let clamped: GridResponse = client
        .get(format!("{}/api/grid?days=500", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clamped.days.len(), 27);
}

#[tokio::test]
async fn http_sweep_removes_idle_users_and_migrates_legacy_data() {
    let today = habit_grid::date::today();
    let yesterday = habit_grid::date::previous_day(today);

    // the idle user's ledger uses the old per-month encoding
    let mut months: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for day in [yesterday, today] {
        months
            .entry(day.format("%Y-%m").to_string())
            .or_default()
            .push(day.day());
    }

    let idle_id = Uuid::new_v4();
    let fresh_id = Uuid::new_v4();
    let seeded = serde_json::json!({
        "users": {
            idle_id.to_string(): {
                "userId": idle_id,
                "username": "old-timer",
                "lastActive": (Utc::now() - Duration::days(40)).to_rfc3339(),
                "squats": months,
            },
            fresh_id.to_string(): {
                "userId": fresh_id,
                "username": "newcomer",
                "lastActive": Utc::now().to_rfc3339(),
                "completions": [habit_grid::date::format_day(today)],
            },
        }
    });

    let data_path = unique_data_path();
    std::fs::write(&data_path, serde_json::to_vec_pretty(&seeded).unwrap()).unwrap();
    let server = spawn_server_with_path(&data_path).await;
    let client = Client::new();

    let grid: GridResponse = client
        .get(format!("{}/api/grid", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(grid.users.len(), 2);

    let migrated = grid
        .users
        .iter()
        .find(|row| row.user_id == idle_id)
        .expect("missing migrated row");
    assert!(migrated.completed[0]);
    assert!(migrated.completed[1]);
    assert_eq!(migrated.current_streak, 2);

    let swept: SweepResponse = client
        .post(format!("{}/api/sweep", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(swept.removed_count, 1);
    assert_eq!(swept.removed_users, vec![idle_id]);

    let after: GridResponse = client
        .get(format!("{}/api/grid", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.users.len(), 1);
    assert_eq!(after.users[0].username, "newcomer");
}
