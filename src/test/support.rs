//! Recording engine for boundary assertions.

use crate::engine::{
    AddressBlock, AppHandle, AttributeError, BulkSendConfig, DeviceHandle, EngineError,
    LinkAttributes, LinkHandle, NodeHandle, PacketSinkConfig, RunReport, SimEngine,
};
use crate::sim::SimTime;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateNode(String),
    InstallStack(Vec<NodeHandle>),
    CreateLink(NodeHandle, NodeHandle, LinkAttributes),
    Assign([DeviceHandle; 2], AddressBlock),
    Capture(String, DeviceHandle),
    BulkSend(NodeHandle, BulkSendConfig),
    PacketSink(NodeHandle, PacketSinkConfig),
    StopAt(SimTime),
    Run,
    Destroy,
}

/// Records every primitive call; rejects rates listed in `bad_rates`.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub bad_rates: HashSet<String>,
    nodes: usize,
    devices: usize,
    links: usize,
    apps: usize,
}

impl RecordingEngine {
    pub fn rejecting(rate: &str) -> Self {
        Self {
            bad_rates: HashSet::from([rate.to_string()]),
            ..Self::default()
        }
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn links_created(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateLink(..)))
    }
}

impl SimEngine for RecordingEngine {
    fn create_node(&mut self, name: &str) -> NodeHandle {
        self.calls.push(Call::CreateNode(name.to_string()));
        self.nodes += 1;
        NodeHandle(self.nodes - 1)
    }

    fn install_stack(&mut self, nodes: &[NodeHandle]) -> Result<(), EngineError> {
        self.calls.push(Call::InstallStack(nodes.to_vec()));
        Ok(())
    }

    fn create_p2p_link(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        attrs: &LinkAttributes,
    ) -> Result<(LinkHandle, [DeviceHandle; 2]), EngineError> {
        self.calls.push(Call::CreateLink(a, b, attrs.clone()));
        if self.bad_rates.contains(&attrs.data_rate) {
            return Err(EngineError::Attribute(AttributeError {
                attribute: "DataRate",
                value: attrs.data_rate.clone(),
                reason: "rejected by test engine",
            }));
        }
        self.links += 1;
        self.devices += 2;
        Ok((
            LinkHandle(self.links - 1),
            [DeviceHandle(self.devices - 2), DeviceHandle(self.devices - 1)],
        ))
    }

    fn assign_addresses(
        &mut self,
        devices: [DeviceHandle; 2],
        block: AddressBlock,
    ) -> Result<[Ipv4Addr; 2], EngineError> {
        self.calls.push(Call::Assign(devices, block));
        Ok([block.host(1), block.host(2)])
    }

    fn enable_capture(&mut self, prefix: &str, device: DeviceHandle) -> Result<PathBuf, EngineError> {
        self.calls.push(Call::Capture(prefix.to_string(), device));
        Ok(PathBuf::from(format!("{prefix}_{}.pcap", device.0)))
    }

    fn install_bulk_send(
        &mut self,
        node: NodeHandle,
        cfg: BulkSendConfig,
    ) -> Result<AppHandle, EngineError> {
        self.calls.push(Call::BulkSend(node, cfg));
        self.apps += 1;
        Ok(AppHandle(self.apps - 1))
    }

    fn install_packet_sink(
        &mut self,
        node: NodeHandle,
        cfg: PacketSinkConfig,
    ) -> Result<AppHandle, EngineError> {
        self.calls.push(Call::PacketSink(node, cfg));
        self.apps += 1;
        Ok(AppHandle(self.apps - 1))
    }

    fn stop_at(&mut self, at: SimTime) {
        self.calls.push(Call::StopAt(at));
    }

    fn run(&mut self) -> RunReport {
        self.calls.push(Call::Run);
        RunReport::default()
    }

    fn destroy(&mut self) {
        self.calls.push(Call::Destroy);
    }
}

pub fn nodes(names: &[&str]) -> Vec<crate::config::NodeSpec> {
    names
        .iter()
        .map(|n| crate::config::NodeSpec {
            name: n.to_string(),
        })
        .collect()
}
