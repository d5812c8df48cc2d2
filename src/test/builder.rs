use super::support::{Call, RecordingEngine, nodes};
use crate::config::Role;
use crate::engine::NodeHandle;
use crate::error::BuildError;
use crate::topo::{Endpoints, build_nodes};
use std::collections::HashSet;

#[test]
fn one_handle_per_declaration_and_single_stack_batch() {
    let mut engine = RecordingEngine::default();
    let topo = build_nodes(&mut engine, &nodes(&["A", "B", "C"])).expect("build");

    assert_eq!(topo.nodes.len(), 3);
    assert_eq!(topo.registry.len(), 3);
    let distinct: HashSet<_> = topo.nodes.iter().copied().collect();
    assert_eq!(distinct.len(), 3);
    for (name, handle) in ["A", "B", "C"].iter().zip(&topo.nodes) {
        assert_eq!(topo.registry.resolve(name).expect("resolve"), *handle);
    }

    let stack_calls: Vec<_> = engine
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::InstallStack(ns) => Some(ns.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(stack_calls, vec![topo.nodes.clone()]);
    assert_eq!(engine.calls.last(), Some(&Call::InstallStack(topo.nodes.clone())));

    assert_eq!(
        topo.endpoints,
        Some(Endpoints {
            first: topo.nodes[0],
            last: topo.nodes[2],
        })
    );
    assert_eq!(topo.role(topo.nodes[0]), Some(Role::Source));
    assert_eq!(topo.role(topo.nodes[1]), Some(Role::Relay));
    assert_eq!(topo.role(topo.nodes[2]), Some(Role::Sink));
    assert_eq!(topo.role(NodeHandle(99)), None);
}

#[test]
fn duplicate_name_aborts_before_stack_install() {
    let mut engine = RecordingEngine::default();
    let err = build_nodes(&mut engine, &nodes(&["A", "B", "A", "C"])).expect_err("duplicate");

    assert!(matches!(err, BuildError::DuplicateName { ref name } if name == "A"));
    assert_eq!(engine.count(|c| matches!(c, Call::CreateNode(_))), 3);
    assert_eq!(engine.count(|c| matches!(c, Call::InstallStack(_))), 0);
}

#[test]
fn single_node_is_both_endpoints() {
    let mut engine = RecordingEngine::default();
    let topo = build_nodes(&mut engine, &nodes(&["solo"])).expect("build");
    let solo = topo.nodes[0];
    assert_eq!(topo.endpoints, Some(Endpoints { first: solo, last: solo }));
}

#[test]
fn empty_node_list_has_no_endpoints() {
    let mut engine = RecordingEngine::default();
    let topo = build_nodes(&mut engine, &[]).expect("build");
    assert!(topo.nodes.is_empty());
    assert!(topo.endpoints.is_none());
}
