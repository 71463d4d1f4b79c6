use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chorewheel::api::{create_router, AppContext};
use chorewheel::config::{Config, HouseholdConfig};
use chorewheel::models::{AppState, Assignment, Chore, Member, WeekState};
use chorewheel::store::{FileStore, Revision, Store};
use chrono::{Duration, Utc};
use tempfile::TempDir;

fn member(id: &str, name: &str, is_admin: bool) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        phone: format!("+1555{id}"),
        is_admin,
    }
}

fn chore(id: &str, name: &str, description: &str) -> Chore {
    Chore {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn test_config() -> Config {
    Config {
        household: HouseholdConfig {
            name: "Test House".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            rotation_day: 0,
            rotation_hour: 17,
            reminder_hours_after: 24,
        },
        members: vec![member("m1", "Alice", true), member("m2", "Bob", false)],
        chores: vec![
            chore("c1", "Kitchen", "Clean kitchen"),
            chore("c2", "Bathroom", "Clean bathroom"),
        ],
    }
}

fn assignment(member_id: &str, chore_id: &str, token: &str) -> Assignment {
    Assignment {
        member_id: member_id.to_string(),
        chore_id: chore_id.to_string(),
        assigned_at: Utc::now(),
        confirmation_token: token.to_string(),
        confirmed_at: None,
        reminder_sent_at: None,
    }
}

fn seeded_state() -> AppState {
    AppState {
        current_week: WeekState {
            week_of: Some(Utc::now()),
            rotation_index: 0,
            assignments: vec![
                assignment("m1", "c1", "tok-alice"),
                assignment("m2", "c2", "tok-bob"),
            ],
        },
        history: vec![WeekState {
            week_of: Some(Utc::now() - Duration::weeks(1)),
            rotation_index: 1,
            assignments: vec![
                assignment("m1", "c2", "old-alice"),
                assignment("m2", "c1", "old-bob"),
            ],
        }],
        last_updated: Utc::now(),
    }
}

/// Server over a tempdir-backed file store seeded with `state`. The TempDir
/// keeps the store alive for the duration of the test.
async fn setup(state: Option<AppState>) -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::File(FileStore::new(dir.path().join("state.json")));

    if let Some(mut state) = state {
        store
            .save(&mut state, &Revision::initial(), "seed")
            .await
            .expect("seed state");
    }

    let ctx = AppContext {
        config: Arc::new(test_config()),
        store: Arc::new(store),
    };
    let server = TestServer::new(create_router(ctx)).expect("test server");
    (server, dir)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (server, _dir) = setup(None).await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod confirm {
    use super::*;

    #[tokio::test]
    async fn records_a_completion_and_thanks_the_member() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/confirm").add_query_param("token", "tok-alice").await;

        response.assert_status_ok();
        let page = response.text();
        assert!(page.contains("Chore Confirmed!"));
        assert!(page.contains("Thank you, Alice!"));
        assert!(page.contains("Kitchen"));
    }

    #[tokio::test]
    async fn persists_the_confirmation() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        server.get("/confirm").add_query_param("token", "tok-bob").await;

        // A second attempt sees the stored timestamp.
        let response = server.get("/confirm").add_query_param("token", "tok-bob").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("already been confirmed"));
    }

    #[tokio::test]
    async fn rejects_an_unknown_token() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/confirm").add_query_param("token", "garbage").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("invalid or has expired"));
    }

    #[tokio::test]
    async fn rejects_a_missing_token() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/confirm").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_any_token_when_no_state_exists() {
        let (server, _dir) = setup(None).await;

        let response = server.get("/confirm").add_query_param("token", "tok-alice").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn shows_the_member_recent_weeks() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/history").add_query_param("token", "tok-alice").await;

        response.assert_status_ok();
        let page = response.text();
        assert!(page.contains("Alice's Chore History"));
        assert!(page.contains("Kitchen"));
        assert!(page.contains("Bathroom"));
    }

    #[tokio::test]
    async fn treats_archived_tokens_as_expired() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/history").add_query_param("token", "old-alice").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("may have expired"));
    }

    #[tokio::test]
    async fn rejects_a_missing_token() {
        let (server, _dir) = setup(Some(seeded_state())).await;

        let response = server.get("/history").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
