//! Engine-facing API used by the build pipeline.
//!
//! The pipeline never touches engine globals; everything goes through an
//! explicit `&mut impl SimEngine`, so tests can swap in a recording engine.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::sim::SimTime;

use super::{
    AddressBlock, AppHandle, BulkSendConfig, DeviceHandle, EngineError, LinkAttributes,
    LinkHandle, NodeHandle, PacketSinkConfig, RunReport,
};

/// Simulation engine primitives consumed by the topology pipeline.
pub trait SimEngine {
    /// Create a node. `name` is informational (logs, capture file names).
    fn create_node(&mut self, name: &str) -> NodeHandle;

    /// Install the network stack on a batch of nodes.
    fn install_stack(&mut self, nodes: &[NodeHandle]) -> Result<(), EngineError>;

    /// Create a point-to-point link. Returns the link and its two devices,
    /// `[a-side, b-side]`. Rate and delay strings are validated here.
    fn create_p2p_link(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        attrs: &LinkAttributes,
    ) -> Result<(LinkHandle, [DeviceHandle; 2]), EngineError>;

    /// Assign sequential host addresses from `block` to the devices, in order.
    fn assign_addresses(
        &mut self,
        devices: [DeviceHandle; 2],
        block: AddressBlock,
    ) -> Result<[Ipv4Addr; 2], EngineError>;

    /// Enable packet capture on a device. Returns the capture file path.
    fn enable_capture(&mut self, prefix: &str, device: DeviceHandle) -> Result<PathBuf, EngineError>;

    fn install_bulk_send(
        &mut self,
        node: NodeHandle,
        cfg: BulkSendConfig,
    ) -> Result<AppHandle, EngineError>;

    fn install_packet_sink(
        &mut self,
        node: NodeHandle,
        cfg: PacketSinkConfig,
    ) -> Result<AppHandle, EngineError>;

    /// Hard stop time for the next `run`.
    fn stop_at(&mut self, at: SimTime);

    /// Process all scheduled events (up to the stop time, if any).
    fn run(&mut self) -> RunReport;

    /// Release all engine state.
    fn destroy(&mut self);
}

