//! 仿真引擎边界
//!
//! 构建流水线只通过 [`SimEngine`] 调用引擎原语；[`LocalEngine`] 是进程内实现，
//! 维护对象图、校验链路属性、调度应用启动事件并写出抓包文件，但不模拟逐包传输。

// 子模块声明
mod api;
mod app;
mod attr;
mod error;
mod local;
mod pcap;
mod types;

// 重新导出公共接口
pub use api::SimEngine;
pub use app::StartApplication;
pub use attr::{AttributeError, DataRate, parse_delay};
pub use error::EngineError;
pub use local::{AppRecord, CaptureRecord, DeviceRecord, EngineWorld, LinkRecord, LocalEngine, NodeRecord};
pub use pcap::{LINKTYPE_PPP, PCAP_HEADER_LEN, write_capture_header};
pub use types::{
    AddressBlock, AppHandle, AppKind, BulkSendConfig, DeviceHandle, LinkAttributes, LinkHandle,
    NodeHandle, PacketSinkConfig, QueueConfig, RunReport,
};
