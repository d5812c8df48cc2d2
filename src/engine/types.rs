//! 引擎句柄与原语参数类型

use crate::sim::SimTime;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

/// 节点句柄（不透明，由引擎分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub usize);

/// 网卡（链路一端）句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceHandle(pub usize);

/// 点到点链路句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkHandle(pub usize);

/// 应用句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppHandle(pub usize);

/// DropTail 队列配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// 队列容量（包数）
    pub max_packets: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { max_packets: 100 }
    }
}

/// 点到点链路属性。速率与时延保持为声明时的原始字符串，由引擎解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAttributes {
    pub data_rate: String,
    pub delay: String,
    pub queue: QueueConfig,
}

/// 一个 /24 地址块，由一条链路独占。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressBlock {
    network: Ipv4Addr,
}

impl AddressBlock {
    pub const PREFIX_LEN: u8 = 24;

    /// 以网络地址构造；主机位会被清零。
    pub fn new(network: Ipv4Addr) -> Self {
        let [a, b, c, _] = network.octets();
        Self {
            network: Ipv4Addr::new(a, b, c, 0),
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// 块内第 `n` 个主机地址（从 1 开始）
    pub fn host(&self, n: u8) -> Ipv4Addr {
        let [a, b, c, _] = self.network.octets();
        Ipv4Addr::new(a, b, c, n)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        addr.octets()[..3] == self.network.octets()[..3]
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, Self::PREFIX_LEN)
    }
}

/// 批量发送应用（BulkSend）配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSendConfig {
    pub remote: SocketAddrV4,
    /// 总发送字节数；0 表示不限
    pub max_bytes: u64,
    /// 单次写入字节数
    pub send_size: u32,
    pub start: SimTime,
}

/// 接收端应用（PacketSink）配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketSinkConfig {
    pub local: SocketAddrV4,
    pub start: SimTime,
}

/// 应用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    BulkSend(BulkSendConfig),
    PacketSink(PacketSinkConfig),
}

impl AppKind {
    pub fn start(&self) -> SimTime {
        match self {
            AppKind::BulkSend(cfg) => cfg.start,
            AppKind::PacketSink(cfg) => cfg.start,
        }
    }
}

/// 一轮运行的摘要（在 `destroy` 之前采集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub final_time: SimTime,
    pub events_executed: u64,
    pub apps_started: usize,
}
