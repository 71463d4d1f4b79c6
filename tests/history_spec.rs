use chorewheel::config::{Config, HouseholdConfig};
use chorewheel::models::{AppState, Assignment, Chore, Member, WeekState};
use chorewheel::services::{HistoryService, MAX_HISTORY_WEEKS};
use chrono::{DateTime, Duration, Utc};
use speculate2::speculate;

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

fn weeks_ago(n: i64) -> DateTime<Utc> {
    Utc::now() - Duration::weeks(n)
}

fn week(week_of: DateTime<Utc>, rotation_index: i32, assignments: Vec<Assignment>) -> WeekState {
    WeekState {
        week_of: Some(week_of),
        rotation_index,
        assignments,
    }
}

fn empty_state() -> AppState {
    AppState::empty()
}

/// Current week plus `archived` past weeks, all with both members assigned.
fn state_with_weeks(archived: usize) -> AppState {
    let mut state = empty_state();
    state.current_week = week(
        weeks_ago(0),
        0,
        vec![
            assignment("m1", "c1", "cur-alice"),
            assignment("m2", "c2", "cur-bob"),
        ],
    );
    for n in 1..=archived {
        state.history.push(week(
            weeks_ago(n as i64),
            (n % 2) as i32,
            vec![
                assignment("m1", "c2", &format!("old{n}-alice")),
                assignment("m2", "c1", &format!("old{n}-bob")),
            ],
        ));
    }
    state
}

speculate! {
    before {
        let config = test_config();
        let history = HistoryService::new(&config);
    }

    describe "archive_current_week" {
        it "does nothing when the current week is empty" {
            let mut state = empty_state();

            history.archive_current_week(&mut state);

            assert!(state.history.is_empty());
        }

        it "prepends the current week to history" {
            let mut state = state_with_weeks(1);

            history.archive_current_week(&mut state);

            assert_eq!(state.history.len(), 2);
            assert_eq!(
                state.history[0].assignments[0].confirmation_token,
                "cur-alice"
            );
        }

        it "snapshots by value, not by reference" {
            let mut state = state_with_weeks(0);

            history.archive_current_week(&mut state);
            state.current_week.assignments[0].confirmed_at = Some(Utc::now());

            assert!(state.history[0].assignments[0].confirmed_at.is_none());
        }

        it "discards the oldest week beyond the cap" {
            let mut state = state_with_weeks(MAX_HISTORY_WEEKS);
            let oldest = state.history[MAX_HISTORY_WEEKS - 1].week_of;

            history.archive_current_week(&mut state);

            assert_eq!(state.history.len(), MAX_HISTORY_WEEKS);
            assert!(state.history.iter().all(|w| w.week_of != oldest));
        }
    }

    describe "member_history" {
        it "returns the current week first, then most recent archived" {
            let state = state_with_weeks(2);

            let entries = history.member_history(&state, "m1");

            assert_eq!(entries.len(), 3);
            assert_eq!(entries[0].chore_name, "Kitchen");
            assert_eq!(entries[1].chore_name, "Bathroom");
            assert!(entries[0].week_of > entries[1].week_of);
            assert!(entries[1].week_of > entries[2].week_of);
        }

        it "caps the view at four weeks" {
            let state = state_with_weeks(5);

            let entries = history.member_history(&state, "m1");

            assert_eq!(entries.len(), 4);
        }

        it "skips weeks without an assignment for the member without losing a slot" {
            let mut state = state_with_weeks(5);
            // Bob is missing from the most recent archived week; with four
            // later matches he still gets a full view.
            state.history[0]
                .assignments
                .retain(|a| a.member_id != "m2");

            let entries = history.member_history(&state, "m2");

            assert_eq!(entries.len(), 4);
            // The skipped week's slot is filled by an older one.
            assert!(entries[1].week_of < state.history[0].week_of.unwrap());
        }

        it "skips weeks whose chore no longer resolves" {
            let mut state = state_with_weeks(1);
            state.history[0].assignments[0].chore_id = "gone".to_string();

            let entries = history.member_history(&state, "m1");

            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].chore_name, "Kitchen");
        }

        it "reports confirmation status per week" {
            let mut state = state_with_weeks(1);
            let confirmed_at = Utc::now();
            state.history[0].assignments[0].confirmed_at = Some(confirmed_at);

            let entries = history.member_history(&state, "m1");

            assert!(!entries[0].confirmed);
            assert!(entries[1].confirmed);
            assert_eq!(entries[1].confirmed_at, Some(confirmed_at));
        }

        it "is empty for a member with no assignments" {
            let state = state_with_weeks(2);
            assert!(history.member_history(&state, "ghost").is_empty());
        }
    }

    describe "find_member_by_token" {
        it "resolves a live current-week token" {
            let state = state_with_weeks(1);

            assert_eq!(
                history.find_member_by_token(&state, "cur-bob"),
                Some("m2")
            );
        }

        it "treats archived tokens as expired" {
            let state = state_with_weeks(1);

            assert!(history
                .find_member_by_token(&state, "old1-alice")
                .is_none());
        }
    }

    describe "completion_rate" {
        it "counts the current week and all retained history" {
            let mut state = state_with_weeks(1);
            state.history[0].assignments[0].confirmed_at = Some(Utc::now());

            let rate = history.completion_rate(&state, "m1");

            assert_eq!(rate.completed, 1);
            assert_eq!(rate.total, 2);
        }

        it "scans more weeks than the history view shows" {
            let mut state = state_with_weeks(5);
            for archived in &mut state.history {
                archived.assignments[0].confirmed_at = Some(Utc::now());
            }

            let rate = history.completion_rate(&state, "m1");

            assert_eq!(rate.completed, 5);
            assert_eq!(rate.total, 6);
        }

        it "is zero for a member with no assignments" {
            let state = state_with_weeks(1);

            let rate = history.completion_rate(&state, "ghost");

            assert_eq!(rate.completed, 0);
            assert_eq!(rate.total, 0);
        }
    }
}
