//! Property-based tests for graph algorithms and the operations engine.
//!
//! These tests use proptest to check that invariants hold across randomly
//! generated inputs and operation sequences.

use std::collections::BTreeMap;

use proptest::prelude::*;

use gitsim::core::config::Config;
use gitsim::core::graph::{collect_ancestors, is_ancestor};
use gitsim::core::naming::validate_branch_name;
use gitsim::core::verify::verify_state;
use gitsim::engine::{Intent, Session};

/// Branch names the random sequences draw from, including invalid ones.
const NAMES: [&str; 6] = ["main", "feature", "hotfix", "topic/a", "bad..name", "-dash"];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES.to_vec()).prop_map(String::from)
}

/// Strategy for a single user intent.
fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        3 => Just(Intent::Commit { message: None }),
        2 => name().prop_map(|name| Intent::Branch { name }),
        2 => name().prop_map(|name| Intent::Checkout { name }),
        1 => name().prop_map(|source| Intent::Merge { source }),
        1 => name().prop_map(|target| Intent::Rebase { target }),
        1 => Just(Intent::StashSave { message: None }),
        1 => Just(Intent::StashPop),
        1 => Just(Intent::StashDrop),
        1 => Just(Intent::Fetch),
        1 => Just(Intent::Push),
        1 => Just(Intent::Pull),
        1 => Just(Intent::RemoteCommit),
        1 => Just(Intent::Undo),
        1 => Just(Intent::Redo),
    ]
}

/// Strategy for branch name characters, valid and not.
fn name_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
        Just('/'),
        Just('@'),
        Just('{'),
        Just(' '),
    ]
}

fn session_after(intents: Vec<Intent>) -> Session {
    let mut session = Session::new(&Config::default());
    for intent in intents {
        session.execute(intent);
    }
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No operation sequence ever leaves a dangling parent or head.
    #[test]
    fn random_sequences_keep_invariants(intents in prop::collection::vec(intent(), 0..40)) {
        let session = session_after(intents);
        let result = verify_state(&session.state());
        prop_assert!(result.ok, "{:?}", result.errors);
    }

    /// Ancestor sets contain their start and are closed under parents.
    #[test]
    fn ancestors_are_closed(intents in prop::collection::vec(intent(), 0..30)) {
        let state = session_after(intents).state();
        for commit in &state.commits {
            let ancestors = collect_ancestors(&state.commits, &commit.id);
            prop_assert!(ancestors.contains(&commit.id));
            for id in &ancestors {
                let member = state.commit(id).unwrap();
                for parent in &member.parents {
                    prop_assert!(ancestors.contains(parent));
                    prop_assert!(is_ancestor(&state.commits, parent, &commit.id));
                }
            }
            if commit.parents.is_empty() {
                prop_assert_eq!(ancestors.len(), 1);
            }
        }
    }

    /// Undo followed by redo restores the exact pre-undo state.
    #[test]
    fn undo_redo_round_trip(intents in prop::collection::vec(intent(), 1..30)) {
        let mut session = session_after(intents);
        let before = session.state();
        if session.execute(Intent::Undo).outcome.is_applied() {
            prop_assert!(session.execute(Intent::Redo).outcome.is_applied());
            prop_assert_eq!(session.state(), before);
        }
    }

    /// Aborted intents never change state.
    #[test]
    fn aborts_change_nothing(
        intents in prop::collection::vec(intent(), 0..20),
        last in intent(),
    ) {
        let mut session = session_after(intents);
        let before = session.state();
        let report = session.execute(last);
        if report.outcome.is_abort() {
            prop_assert_eq!(session.state(), before);
        }
    }

    /// Accepted names follow every naming rule.
    #[test]
    fn accepted_names_follow_rules(chars in prop::collection::vec(name_char(), 0..20)) {
        let name: String = chars.into_iter().collect();
        let branches: BTreeMap<String, ()> = BTreeMap::new();
        if validate_branch_name(&name, &branches).is_valid() {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.starts_with('-'));
            prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()));
            prop_assert!(!name.ends_with('/') && !name.ends_with(".lock"));
            prop_assert!(!name.contains("..") && !name.contains("//") && !name.contains("@{"), "invalid ref name accepted: {}", name);
            prop_assert!(!name.contains(' '));
        }
    }

    /// A taken name is always rejected as a duplicate.
    #[test]
    fn taken_names_are_rejected(name in "[a-z][a-z0-9]{0,10}") {
        let mut branches = BTreeMap::new();
        branches.insert(name.clone(), ());
        prop_assert_eq!(
            validate_branch_name(&name, &branches).reason(),
            Some("Branch already exists.")
        );
    }
}
