use super::*;
use crate::test_utils::{setup, task_from_domains};

/// Two operators achieving an external `goal` condition; the cheaper one
/// needs only a subset of the other's preconditions.
const SCENARIO: &str = "goal\np1\np2\ncost\n5\n\ngoal\np1\ncost\n1\n\nend_operators\n";

// ========== END TO END ==========

#[test]
fn scenario_synthesizes_goal_and_keeps_the_dominating_operator() {
    let task = setup();
    let graph = RelaxationGraph::build(&task, SCENARIO.as_bytes()).unwrap();

    // One proposition synthesized for `goal`, past the native range.
    assert_eq!(graph.num_task_facts(), 2);
    assert_eq!(graph.num_synthesized(), 1);
    assert_eq!(graph.num_propositions(), 3);
    let goal_prop = graph.lookup("goal").unwrap();
    assert_eq!(goal_prop.index(), 2);
    assert_eq!(graph.synthesized_name(goal_prop), Some("goal"));

    // Only (pre={p1}, effect=goal, cost=1) survives: its precondition set
    // is a strict subset of the other's at lower cost.
    assert_eq!(graph.operators().len(), 1);
    let survivor = &graph.operators()[0];
    assert_eq!(survivor.effect, goal_prop);
    assert_eq!(survivor.base_cost, 1);
    assert_eq!(graph.preconditions(survivor.operator_no), &[graph.prop_id(0, 0)]);

    let stats = graph.stats();
    assert_eq!(stats.parsed_operators, 2);
    assert_eq!(stats.built_operators, 2);
    assert_eq!(stats.removed_operators, 1);
    assert_eq!(stats.synthesized_propositions, 1);
}

#[test]
fn scenario_cross_reference_uses_final_dense_ids() {
    let task = setup();
    let graph = RelaxationGraph::build(&task, SCENARIO.as_bytes()).unwrap();

    let p1 = graph.prop_id(0, 0);
    let p2 = graph.prop_id(0, 1);
    let goal_prop = graph.lookup("goal").unwrap();

    let requiring: Vec<u32> = graph.precondition_of(p1).iter().map(|o| o.raw()).collect();
    assert_eq!(requiring, vec![0]);
    assert!(graph.precondition_of(p2).is_empty());
    assert!(graph.precondition_of(goal_prop).is_empty());

    assert_eq!(graph.proposition(p1).num_precondition_occurrences, 1);
    assert_eq!(graph.proposition(p2).num_precondition_occurrences, 0);
}

#[test]
fn goal_facts_are_flagged() {
    let task = setup(); // goal condition is (0, 1) = p2
    let graph = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap();

    let p2 = graph.prop_id(0, 1);
    assert_eq!(graph.goal_props(), &[p2]);
    assert!(graph.proposition(p2).is_goal);
    assert!(!graph.proposition(graph.prop_id(0, 0)).is_goal);
}

#[test]
fn empty_operator_source_is_an_explicit_choice_not_a_fallback() {
    let task = setup();
    let graph = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap();
    assert!(graph.operators().is_empty());
    assert_eq!(graph.num_propositions(), 2);
}

// ========== DEAD-END RELIABILITY ==========

#[test]
fn dead_ends_are_reliable_without_axioms() {
    let task = setup();
    let graph = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap();
    assert!(graph.dead_ends_reliable());
}

#[test]
fn axioms_make_dead_ends_unreliable() {
    let mut task = setup();
    task.has_axioms = true;
    let graph = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap();
    assert!(!graph.dead_ends_reliable());
}

// ========== FAILURE MODES ==========

#[test]
fn unopenable_source_fails_construction() {
    let task = setup();
    let err = RelaxationGraph::build_from_path(&task, "no/such/operators.txt").unwrap_err();
    assert!(matches!(err, BuildError::Source(SourceError::Unavailable { .. })));
}

#[test]
fn malformed_source_fails_construction() {
    let task = setup();
    let err = RelaxationGraph::build(&task, "goal\np1\ncost\n".as_bytes()).unwrap_err();
    assert!(matches!(err, BuildError::Source(SourceError::Malformed { .. })));
}

#[test]
fn invalid_task_fails_construction() {
    let mut task = setup();
    task.facts.pop();
    let err = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap_err();
    assert!(matches!(err, BuildError::Task(_)));
}

#[test]
fn disabled_synthesis_rejects_external_conditions() {
    let task = setup();
    let err = RelaxationGraph::build_with(
        &task,
        SCENARIO.as_bytes(),
        IngestOptions { synthesize: false },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Ingest(IngestError::UnresolvableCondition { .. })
    ));
}

// ========== POST-CONSTRUCTION SHARING ==========

#[test]
fn graph_is_shareable_across_search_workers() {
    // The result is plain owned data: readable from multiple threads
    // without synchronization, and printable for diagnostics.
    fn assert_shareable<T: Send + Sync + std::fmt::Debug>() {}
    assert_shareable::<RelaxationGraph>();
}

// ========== MULTI-VARIABLE TASKS ==========

#[test]
fn native_ids_follow_the_offset_table() {
    let task = task_from_domains(&[&["a0", "a1"], &["b0", "b1", "b2"]], &[(1, 2)]);
    let graph = RelaxationGraph::build(&task, "end_operators\n".as_bytes()).unwrap();

    assert_eq!(graph.prop_id(1, 0).raw(), 2);
    assert_eq!(graph.lookup("b2"), Some(graph.prop_id(1, 2)));
    assert_eq!(graph.goal_props(), &[graph.prop_id(1, 2)]);
}
