use super::support::{Call, RecordingEngine, nodes};
use crate::config::{LinkSpec, TopologySpec};
use crate::driver::{INSTRUMENTED_STOP, RunDriver};
use crate::engine::{AppKind, LocalEngine};
use crate::error::BuildError;
use crate::flow::FLOW_PORT;
use crate::scenario::{Scenario, ScenarioOpts};
use std::net::{Ipv4Addr, SocketAddrV4};

fn abc() -> TopologySpec {
    TopologySpec {
        nodes: nodes(&["A", "B", "C"]),
        links: vec![
            LinkSpec::new("A", "B", "5Mbps", "10ms"),
            LinkSpec::new("B", "C", "5Mbps", "10ms"),
        ],
    }
}

#[test]
fn three_node_chain_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut engine = LocalEngine::new();

    let scenario = Scenario::build(&mut engine, &abc(), &ScenarioOpts::instrumented(dir.path()))
        .expect("build");

    let reg = &scenario.topology.registry;
    let (a, c) = (reg.resolve("A").expect("A"), reg.resolve("C").expect("C"));
    assert_eq!(reg.len(), 3);

    assert_eq!(scenario.links.links[0].block.to_string(), "10.1.0.0/24");
    assert_eq!(scenario.links.links[1].block.to_string(), "10.1.1.0/24");
    let boundary = scenario.links.boundary.expect("boundary");
    assert_eq!(boundary.source_address, Some(Ipv4Addr::new(10, 1, 0, 1)));
    assert_eq!(boundary.dest_address, Some(Ipv4Addr::new(10, 1, 1, 2)));

    let flow = scenario.flow.expect("flow");
    assert_eq!(flow.source, a);
    assert_eq!(flow.sink, c);
    assert_eq!(flow.remote, SocketAddrV4::new(Ipv4Addr::new(10, 1, 1, 2), FLOW_PORT));

    let apps = &engine.world().apps;
    assert_eq!(apps.len(), 2);
    assert!(matches!(apps[0].kind, AppKind::BulkSend(cfg) if cfg.remote == flow.remote && cfg.max_bytes == 0));
    assert!(matches!(apps[1].kind, AppKind::PacketSink(cfg) if cfg.local.ip().is_unspecified()));

    assert!(dir.path().join("src_A_0.pcap").is_file());
    assert!(dir.path().join("dst_C_0.pcap").is_file());

    let report = RunDriver::with_stop(INSTRUMENTED_STOP).run(&mut engine);
    assert_eq!(report.apps_started, 2);
    assert_eq!(report.final_time, INSTRUMENTED_STOP);
    assert!(engine.world().nodes.is_empty(), "engine state destroyed after run");
}

#[test]
fn single_link_captures_both_devices_of_that_link() {
    let dir = tempfile::tempdir().expect("temp dir");
    let spec = TopologySpec {
        nodes: nodes(&["A", "B"]),
        links: vec![LinkSpec::new("A", "B", "5Mbps", "10ms")],
    };
    let mut engine = LocalEngine::new();
    let scenario = Scenario::build(&mut engine, &spec, &ScenarioOpts::instrumented(dir.path()))
        .expect("build");

    assert_eq!(scenario.links.captures.len(), 2);
    assert!(dir.path().join("src_A_0.pcap").is_file());
    assert!(dir.path().join("dst_B_0.pcap").is_file());
    let flow = scenario.flow.expect("flow");
    assert_eq!(flow.remote.ip(), &Ipv4Addr::new(10, 1, 0, 2));
}

#[test]
fn one_node_zero_links_skips_flow() {
    let spec = TopologySpec {
        nodes: nodes(&["solo"]),
        links: vec![],
    };
    let mut engine = RecordingEngine::default();
    let scenario = Scenario::build(&mut engine, &spec, &ScenarioOpts::instrumented("results"))
        .expect("build");

    assert!(scenario.flow.is_none());
    assert_eq!(scenario.topology.nodes.len(), 1);
    assert_eq!(
        engine.count(|c| matches!(c, Call::BulkSend(..) | Call::PacketSink(..) | Call::Capture(..))),
        0
    );
}

#[test]
fn duplicate_name_fails_before_any_link() {
    let spec = TopologySpec {
        nodes: nodes(&["A", "B", "B"]),
        links: vec![LinkSpec::new("A", "B", "5Mbps", "10ms")],
    };
    let mut engine = RecordingEngine::default();
    let err = Scenario::build(&mut engine, &spec, &ScenarioOpts::topology_only())
        .expect_err("duplicate");
    assert!(matches!(err, BuildError::DuplicateName { .. }));
    assert_eq!(engine.links_created(), 0);
}

#[test]
fn topology_only_installs_no_apps_or_captures() {
    let mut engine = LocalEngine::new();
    let scenario =
        Scenario::build(&mut engine, &abc(), &ScenarioOpts::topology_only()).expect("build");
    assert!(scenario.flow.is_none());
    assert!(scenario.links.captures.is_empty());
    assert!(engine.world().apps.is_empty());
    assert_eq!(engine.world().links.len(), 2);

    let report = RunDriver::until_exhausted().run(&mut engine);
    assert_eq!(report.events_executed, 0);
}
