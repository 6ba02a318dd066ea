//! Session-level tests: history, tutorials, and persistence working together.

use gitsim::core::config::Config;
use gitsim::core::snapshot::SnapshotStore;
use gitsim::engine::{Explanation, Intent, Session};
use gitsim::tutorial::TUTORIALS;

use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn session() -> Session {
    Session::new(&Config::default())
}

fn commit() -> Intent {
    Intent::Commit { message: None }
}

fn branch(name: &str) -> Intent {
    Intent::Branch { name: name.into() }
}

fn checkout(name: &str) -> Intent {
    Intent::Checkout { name: name.into() }
}

/// Run `intents`, returning the ids of steps completed along the way.
fn run(session: &mut Session, intents: Vec<Intent>) -> Vec<&'static str> {
    let mut completed = Vec::new();
    for intent in intents {
        let report = session.execute(intent.clone());
        assert!(
            report.outcome.is_applied(),
            "{intent:?} aborted: {:?}",
            report.outcome.error()
        );
        if let Some(advance) = report.tutorial {
            completed.push(advance.completed.id);
        }
    }
    completed
}

fn step_ids(tutorial: &str) -> Vec<&'static str> {
    TUTORIALS
        .iter()
        .find(|t| t.id == tutorial)
        .expect("tutorial exists")
        .steps
        .iter()
        .map(|s| s.id)
        .collect()
}

// =============================================================================
// Tutorials
// =============================================================================

#[test]
fn feature_flow_completes() {
    let mut session = session();
    session.start_tutorial("feature-flow").unwrap();

    let completed = run(
        &mut session,
        vec![
            branch("feature"),
            commit(),
            commit(),
            commit(),
            checkout("main"),
            Intent::Merge {
                source: "feature".into(),
            },
        ],
    );

    assert_eq!(completed, step_ids("feature-flow"));
    assert!(session.tutorials().is_complete());
}

#[test]
fn rebase_flow_completes() {
    let mut session = session();
    session.start_tutorial("rebase-flow").unwrap();

    let completed = run(
        &mut session,
        vec![
            branch("refactor"),
            commit(),
            commit(),
            checkout("main"),
            commit(),
            checkout("refactor"),
            Intent::Rebase {
                target: "main".into(),
            },
        ],
    );

    assert_eq!(completed, step_ids("rebase-flow"));
}

#[test]
fn cherry_pick_flow_completes() {
    let mut session = session();
    session.start_tutorial("cherry-pick-flow").unwrap();

    let mut completed = run(&mut session, vec![branch("hotfix"), commit(), commit(), checkout("main")]);
    let fix = session.state().head_of("hotfix").cloned().unwrap();
    completed.extend(run(
        &mut session,
        vec![Intent::CherryPick {
            commit: fix.to_string(),
        }],
    ));

    assert_eq!(completed, step_ids("cherry-pick-flow"));
}

#[test]
fn stash_flow_completes() {
    let mut session = session();
    session.start_tutorial("stash-flow").unwrap();

    let completed = run(
        &mut session,
        vec![
            commit(),
            Intent::StashSave { message: None },
            branch("bugfix"),
            commit(),
            checkout("main"),
            Intent::StashPop,
        ],
    );

    assert_eq!(completed, step_ids("stash-flow"));
}

#[test]
fn remote_collab_completes() {
    let mut session = session();
    session.start_tutorial("remote-collab").unwrap();

    let completed = run(
        &mut session,
        vec![
            Intent::Push,
            Intent::RemoteCommit,
            Intent::Pull,
            commit(),
            Intent::Push,
        ],
    );

    assert_eq!(completed, step_ids("remote-collab"));
}

#[test]
fn steps_are_never_skipped() {
    let mut session = session();
    session.start_tutorial("feature-flow").unwrap();

    // Commits on main satisfy nothing; the first step still waits
    run(&mut session, vec![commit(), commit(), commit()]);
    assert_eq!(session.tutorials().step_index(), 0);

    // One step per applied intent even when later steps already hold
    let completed = run(&mut session, vec![branch("feature"), checkout("main")]);
    assert_eq!(completed, vec!["create-feature"]);
    assert_eq!(session.tutorials().step_index(), 1);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn undo_walks_back_through_every_operation() {
    let mut session = session();
    let initial = session.state();
    run(&mut session, vec![branch("feature"), commit(), checkout("main")]);

    for _ in 0..3 {
        let report = session.execute(Intent::Undo);
        assert_eq!(
            report.outcome.applied().map(|a| a.explanation),
            Some(Explanation::Undo)
        );
    }
    assert_eq!(session.state(), initial);
    assert_eq!(
        session.execute(Intent::Undo).outcome.error(),
        Some("Nothing to undo.")
    );

    for _ in 0..3 {
        assert!(session.execute(Intent::Redo).outcome.is_applied());
    }
    assert_eq!(session.state().current_branch, "main");
    assert_eq!(session.state().commits.len(), 2);
}

#[test]
fn undo_after_redo_and_new_work_returns_to_redone_state() {
    let mut session = session();
    let message = |m: &str| Intent::Commit {
        message: Some(m.into()),
    };

    run(&mut session, vec![message("A"), message("B")]);
    let after_b = session.state();

    run(&mut session, vec![Intent::Undo, Intent::Redo]);
    assert_eq!(session.state(), after_b);

    run(&mut session, vec![message("C"), Intent::Undo]);
    assert_eq!(session.state(), after_b);

    run(&mut session, vec![Intent::Undo]);
    let messages: Vec<_> = session.state().commits.into_iter().map(|c| c.message).collect();
    assert_eq!(messages, vec!["Initial commit", "A"]);
}

#[test]
fn history_limit_comes_from_config() {
    let config: gitsim::core::config::SimConfig = toml::from_str("history_limit = 2").unwrap();
    let config = Config::from_file(config).unwrap();
    let mut session = Session::new(&config);

    run(&mut session, vec![commit(), commit(), commit()]);
    assert_eq!(session.history().past_len(), 2);
    assert!(session.execute(Intent::Undo).outcome.is_applied());
    assert!(session.execute(Intent::Undo).outcome.is_abort());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn saved_session_resumes_mid_tutorial() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("nested/state.json"));

    let mut first = session().with_store(store.clone());
    first.start_tutorial("stash-flow").unwrap();
    run(&mut first, vec![commit(), Intent::StashSave { message: Some("wip".into()) }]);
    first.save().unwrap();

    let mut second = session().with_store(store);
    assert!(second.load().unwrap());
    assert_eq!(second.state().stash[0].message, "wip");
    assert_eq!(second.tutorials().step_index(), 2);

    let completed = run(
        &mut second,
        vec![branch("bugfix"), commit(), checkout("main"), Intent::StashPop],
    );
    assert_eq!(completed.len(), 4);
    assert!(second.tutorials().is_complete());
}
