mod common;

use common::{at, init_logging, items, started};
use pretty_assertions::assert_eq;
use review_core::{
    update, Decision, DecisionRecord, Effect, ItemId, Msg, Pending, SaveMode, SessionPhase,
    StatusLine,
};

#[test]
fn deny_then_advance_twice_exports_default_accept() {
    init_logging();
    let (state, _) = started(SaveMode::Export, "alice", items(&["item1", "item2"]));

    let (state, effects) = update(
        state,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(1),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.cursor(), 0);

    let (state, _) = update(state, Msg::AdvanceClicked { at: at(2) });
    let (state, effects) = update(state, Msg::AdvanceClicked { at: at(3) });
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SessionPhase::Complete);
    assert!(state.view().can_export);

    let (state, effects) = update(state, Msg::ExportClicked { at: at(4) });
    assert_eq!(
        effects,
        vec![Effect::ExportDecisions {
            rater_label: "alice".to_string(),
            records: vec![
                DecisionRecord {
                    item_id: ItemId::new("item1"),
                    decision: Decision::Deny,
                    recorded_at: at(1),
                },
                DecisionRecord {
                    item_id: ItemId::new("item2"),
                    decision: Decision::Accept,
                    recorded_at: at(3),
                },
            ],
            at: at(4),
        }]
    );
    assert_eq!(state.pending(), Some(&Pending::Export));
    assert_eq!(state.view().status, StatusLine::Exporting);

    let (state, _) = update(
        state,
        Msg::ExportCompleted(Ok("out/image_review_alice.csv".to_string())),
    );
    assert_eq!(state.pending(), None);
    assert_eq!(
        state.view().status,
        StatusLine::Exported("out/image_review_alice.csv".to_string())
    );
}

#[test]
fn decision_does_not_advance_and_can_be_changed() {
    init_logging();
    let (state, _) = started(SaveMode::Export, "alice", items(&["a", "b"]));
    let (state, _) = update(
        state,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(1),
        },
    );
    let (state, _) = update(
        state,
        Msg::DecisionMade {
            decision: Decision::Accept,
            at: at(2),
        },
    );

    assert_eq!(state.cursor(), 0);
    assert_eq!(state.ledger().len(), 1);
    assert_eq!(
        state.view().current.and_then(|c| c.decision),
        Some(Decision::Accept)
    );
}

#[test]
fn repeated_identical_decision_is_idempotent() {
    init_logging();
    let (once, _) = started(SaveMode::Export, "alice", items(&["a"]));
    let twice = once.clone();

    let (once, _) = update(
        once,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(5),
        },
    );
    let (twice, _) = update(
        twice,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(5),
        },
    );
    let (twice, _) = update(
        twice,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(5),
        },
    );

    assert_eq!(once.ledger(), twice.ledger());
}

#[test]
fn advancing_through_all_items_leaves_one_record_each() {
    init_logging();
    let ids = ["a", "b", "c", "d", "e"];
    let (mut state, _) = started(SaveMode::Export, "alice", items(&ids));
    for step in 0..ids.len() {
        if step % 2 == 0 {
            let (next, _) = update(
                state,
                Msg::DecisionMade {
                    decision: Decision::Deny,
                    at: at(step as i64),
                },
            );
            state = next;
        }
        let (next, _) = update(state, Msg::AdvanceClicked { at: at(step as i64) });
        state = next;
    }

    assert_eq!(state.phase(), SessionPhase::Complete);
    assert_eq!(state.cursor(), ids.len());
    assert_eq!(state.ledger().len(), ids.len());

    // Further advances stay put.
    let (state, effects) = update(state, Msg::AdvanceClicked { at: at(99) });
    assert!(effects.is_empty());
    assert_eq!(state.cursor(), ids.len());
}

#[test]
fn export_requires_at_least_one_decision() {
    init_logging();
    let (state, _) = started(SaveMode::Export, "alice", items(&["a", "b"]));
    let (state, effects) = update(state, Msg::ExportClicked { at: at(1) });

    assert!(effects.is_empty());
    assert_eq!(
        state.view().status,
        StatusLine::Error("No decisions to export yet".to_string())
    );
}

#[test]
fn export_before_start_is_ignored() {
    init_logging();
    let (state, _) = update(
        review_core::ReviewState::new(SaveMode::Export),
        Msg::ExportClicked { at: at(1) },
    );
    assert_eq!(state.pending(), None);
    assert_eq!(state.view().status, StatusLine::Idle);
}

#[test]
fn export_mid_session_fills_remaining_items_with_accept() {
    init_logging();
    let (state, _) = started(SaveMode::Export, "alice", items(&["a", "b", "c"]));
    let (state, _) = update(
        state,
        Msg::DecisionMade {
            decision: Decision::Deny,
            at: at(1),
        },
    );
    let (state, effects) = update(state, Msg::ExportClicked { at: at(2) });

    let records = match effects.as_slice() {
        [Effect::ExportDecisions { records, .. }] => records.clone(),
        other => panic!("expected export effect, got {other:?}"),
    };
    let decisions: Vec<_> = records.iter().map(|r| r.decision).collect();
    assert_eq!(
        decisions,
        vec![Decision::Deny, Decision::Accept, Decision::Accept]
    );
    // While the export is pending, decisions are ignored.
    let (state, effects) = update(
        state,
        Msg::DecisionMade {
            decision: Decision::Accept,
            at: at(3),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.ledger().get(&ItemId::new("a")).map(|r| r.decision),
        Some(Decision::Deny)
    );
}

#[test]
fn failed_export_is_reported_and_retryable() {
    init_logging();
    let (state, _) = started(SaveMode::Export, "alice", items(&["a"]));
    let (state, _) = update(state, Msg::AdvanceClicked { at: at(1) });
    let (state, _) = update(state, Msg::ExportClicked { at: at(2) });
    let (state, _) = update(
        state,
        Msg::ExportCompleted(Err("disk full".to_string())),
    );
    assert_eq!(
        state.view().status,
        StatusLine::Error("Export failed: disk full".to_string())
    );

    let (_state, effects) = update(state, Msg::ExportClicked { at: at(3) });
    assert_eq!(effects.len(), 1);
}
