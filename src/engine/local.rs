//! 进程内仿真引擎
//!
//! 以 `sim::Simulator` 为事件循环、以 [`EngineWorld`] 为对象表实现 [`SimEngine`]。

use std::any::Any;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use super::api::SimEngine;
use super::app::StartApplication;
use super::attr::{DataRate, parse_delay};
use super::error::EngineError;
use super::pcap::{LINKTYPE_PPP, write_capture_header};
use super::types::{
    AddressBlock, AppHandle, AppKind, BulkSendConfig, DeviceHandle, LinkAttributes, LinkHandle,
    NodeHandle, PacketSinkConfig, QueueConfig, RunReport,
};
use crate::sim::{SimTime, Simulator, World};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub name: String,
    pub stack_installed: bool,
    pub devices: Vec<DeviceHandle>,
}

#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub node: NodeHandle,
    pub link: LinkHandle,
    /// 在所属节点上的网卡序号
    pub index: usize,
    pub address: Option<Ipv4Addr>,
}

#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub devices: [DeviceHandle; 2],
    pub data_rate: DataRate,
    pub delay: SimTime,
    pub queue: QueueConfig,
}

#[derive(Debug, Clone)]
pub struct AppRecord {
    pub node: NodeHandle,
    pub node_name: String,
    pub kind: AppKind,
    pub started_at: Option<SimTime>,
}

#[derive(Debug, Clone)]
pub struct CaptureRecord {
    pub device: DeviceHandle,
    pub path: PathBuf,
}

/// 引擎对象表：节点、网卡、链路、应用和抓包。
#[derive(Debug, Default)]
pub struct EngineWorld {
    pub nodes: Vec<NodeRecord>,
    pub devices: Vec<DeviceRecord>,
    pub links: Vec<LinkRecord>,
    pub apps: Vec<AppRecord>,
    pub captures: Vec<CaptureRecord>,
}

impl World for EngineWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl EngineWorld {
    fn node(&self, node: NodeHandle) -> Result<&NodeRecord, EngineError> {
        self.nodes.get(node.0).ok_or(EngineError::UnknownNode(node))
    }

    fn device(&self, dev: DeviceHandle) -> Result<&DeviceRecord, EngineError> {
        self.devices.get(dev.0).ok_or(EngineError::UnknownDevice(dev))
    }

    fn stacked_node(&self, node: NodeHandle) -> Result<&NodeRecord, EngineError> {
        let rec = self.node(node)?;
        if !rec.stack_installed {
            return Err(EngineError::NoStack {
                name: rec.name.clone(),
            });
        }
        Ok(rec)
    }

    fn add_device(&mut self, node: NodeHandle, link: LinkHandle) -> DeviceHandle {
        let id = DeviceHandle(self.devices.len());
        let node_rec = &mut self.nodes[node.0];
        let index = node_rec.devices.len();
        node_rec.devices.push(id);
        self.devices.push(DeviceRecord {
            node,
            link,
            index,
            address: None,
        });
        id
    }

    pub(crate) fn mark_started(&mut self, app: AppHandle, now: SimTime) -> Option<&AppRecord> {
        let rec = self.apps.get_mut(app.0)?;
        rec.started_at = Some(now);
        Some(rec)
    }

    fn apps_started(&self) -> usize {
        self.apps.iter().filter(|a| a.started_at.is_some()).count()
    }
}

/// 进程内引擎：一个 `Simulator` 加一张对象表。
#[derive(Default)]
pub struct LocalEngine {
    sim: Simulator,
    world: EngineWorld,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &EngineWorld {
        &self.world
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    /// 队列中尚未执行的事件数
    pub fn pending_events(&self) -> usize {
        self.sim.pending()
    }

    pub fn stop_time(&self) -> Option<SimTime> {
        self.sim.stop_time()
    }

    fn install_app(&mut self, node: NodeHandle, kind: AppKind) -> Result<AppHandle, EngineError> {
        let node_name = self.world.stacked_node(node)?.name.clone();
        let id = AppHandle(self.world.apps.len());
        self.world.apps.push(AppRecord {
            node,
            node_name,
            kind,
            started_at: None,
        });
        self.sim.schedule(kind.start(), StartApplication { app: id });
        Ok(id)
    }
}

/// 节点名只作为文件名的一部分，路径分隔符替换为 `_`。
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

impl SimEngine for LocalEngine {
    fn create_node(&mut self, name: &str) -> NodeHandle {
        let id = NodeHandle(self.world.nodes.len());
        self.world.nodes.push(NodeRecord {
            name: name.to_string(),
            stack_installed: false,
            devices: Vec::new(),
        });
        debug!(node = ?id, name, "创建节点");
        id
    }

    fn install_stack(&mut self, nodes: &[NodeHandle]) -> Result<(), EngineError> {
        // 先整体校验，避免半装状态
        for &n in nodes {
            self.world.node(n)?;
        }
        for &n in nodes {
            self.world.nodes[n.0].stack_installed = true;
        }
        debug!(count = nodes.len(), "安装协议栈");
        Ok(())
    }

    fn create_p2p_link(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        attrs: &LinkAttributes,
    ) -> Result<(LinkHandle, [DeviceHandle; 2]), EngineError> {
        self.world.node(a)?;
        self.world.node(b)?;
        let data_rate: DataRate = attrs.data_rate.parse()?;
        let delay = parse_delay(&attrs.delay)?;

        let link = LinkHandle(self.world.links.len());
        let devices = [self.world.add_device(a, link), self.world.add_device(b, link)];
        self.world.links.push(LinkRecord {
            devices,
            data_rate,
            delay,
            queue: attrs.queue,
        });
        debug!(link = ?link, %data_rate, ?delay, max_packets = attrs.queue.max_packets, "创建点到点链路");
        Ok((link, devices))
    }

    fn assign_addresses(
        &mut self,
        devices: [DeviceHandle; 2],
        block: AddressBlock,
    ) -> Result<[Ipv4Addr; 2], EngineError> {
        for dev in devices {
            let rec = self.world.device(dev)?;
            if rec.address.is_some() {
                return Err(EngineError::AlreadyAddressed(dev));
            }
            self.world.stacked_node(rec.node)?;
        }
        let addrs = [block.host(1), block.host(2)];
        for (dev, addr) in devices.into_iter().zip(addrs) {
            self.world.devices[dev.0].address = Some(addr);
        }
        debug!(%block, a = %addrs[0], b = %addrs[1], "分配地址");
        Ok(addrs)
    }

    fn enable_capture(&mut self, prefix: &str, device: DeviceHandle) -> Result<PathBuf, EngineError> {
        let rec = self.world.device(device)?;
        let node_name = file_safe(&self.world.node(rec.node)?.name);
        let path = PathBuf::from(format!("{prefix}_{node_name}_{}.pcap", rec.index));
        write_capture_header(&path, LINKTYPE_PPP).map_err(|err| EngineError::Capture {
            path: path.clone(),
            err,
        })?;
        info!(device = ?device, path = %path.display(), "📝 启用抓包");
        self.world.captures.push(CaptureRecord {
            device,
            path: path.clone(),
        });
        Ok(path)
    }

    fn install_bulk_send(
        &mut self,
        node: NodeHandle,
        cfg: BulkSendConfig,
    ) -> Result<AppHandle, EngineError> {
        self.install_app(node, AppKind::BulkSend(cfg))
    }

    fn install_packet_sink(
        &mut self,
        node: NodeHandle,
        cfg: PacketSinkConfig,
    ) -> Result<AppHandle, EngineError> {
        self.install_app(node, AppKind::PacketSink(cfg))
    }

    fn stop_at(&mut self, at: SimTime) {
        self.sim.stop_at(at);
    }

    fn run(&mut self) -> RunReport {
        let before = self.sim.executed();
        self.sim.run(&mut self.world);
        RunReport {
            final_time: self.sim.now(),
            events_executed: self.sim.executed() - before,
            apps_started: self.world.apps_started(),
        }
    }

    fn destroy(&mut self) {
        debug!(
            nodes = self.world.nodes.len(),
            links = self.world.links.len(),
            apps = self.world.apps.len(),
            "销毁引擎状态"
        );
        self.sim.destroy();
        self.world = EngineWorld::default();
    }
}
