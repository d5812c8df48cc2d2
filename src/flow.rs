//! 端到端流量插桩
//!
//! 在首个节点上安装 BulkSend，目标为末条链路的目的端地址；
//! 在最后一个节点上安装绑定所有本地地址的 PacketSink。两者都在 t=0 启动。

use crate::engine::{AppHandle, BulkSendConfig, NodeHandle, PacketSinkConfig, SimEngine};
use crate::error::BuildError;
use crate::sim::SimTime;
use crate::topo::{BoundaryAddresses, Endpoints};
use std::net::{Ipv4Addr, SocketAddrV4};
use tracing::info;

/// 参考流的固定端口
pub const FLOW_PORT: u16 = 9;
/// 单次写入字节数
pub const SEND_SIZE: u32 = 1024;

/// 流量参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOpts {
    pub port: u16,
    pub send_size: u32,
    /// 0 表示不限
    pub max_bytes: u64,
}

impl Default for FlowOpts {
    fn default() -> Self {
        Self {
            port: FLOW_PORT,
            send_size: SEND_SIZE,
            max_bytes: 0,
        }
    }
}

/// 已安装的参考流
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPlan {
    pub source: NodeHandle,
    pub sink: NodeHandle,
    pub remote: SocketAddrV4,
    pub sender: AppHandle,
    pub receiver: AppHandle,
}

/// 安装参考流。首尾节点或目的地址缺失时跳过（返回 `None`），不视为错误。
#[tracing::instrument(skip_all)]
pub fn instrument_flow<E: SimEngine + ?Sized>(
    engine: &mut E,
    endpoints: Option<Endpoints>,
    boundary: Option<&BoundaryAddresses>,
    opts: &FlowOpts,
) -> Result<Option<FlowPlan>, BuildError> {
    let (Some(ends), Some(dest)) = (endpoints, boundary.and_then(|b| b.dest_address)) else {
        info!("拓扑不足以形成端到端路径，跳过流量插桩");
        return Ok(None);
    };

    let remote = SocketAddrV4::new(dest, opts.port);
    let sender = engine.install_bulk_send(
        ends.first,
        BulkSendConfig {
            remote,
            max_bytes: opts.max_bytes,
            send_size: opts.send_size,
            start: SimTime::ZERO,
        },
    )?;
    let receiver = engine.install_packet_sink(
        ends.last,
        PacketSinkConfig {
            local: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, opts.port),
            start: SimTime::ZERO,
        },
    )?;

    info!(source = ?ends.first, sink = ?ends.last, %remote, "📡 参考流已安装");
    Ok(Some(FlowPlan {
        source: ends.first,
        sink: ends.last,
        remote,
        sender,
        receiver,
    }))
}
