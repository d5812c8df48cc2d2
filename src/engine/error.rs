//! 引擎原语错误

use super::attr::AttributeError;
use super::types::{DeviceHandle, NodeHandle};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// 链路属性字符串被拒绝
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("unknown node handle {0:?}")]
    UnknownNode(NodeHandle),

    #[error("unknown device handle {0:?}")]
    UnknownDevice(DeviceHandle),

    /// 节点尚未安装协议栈，无法分配地址或安装应用
    #[error("node '{name}' has no network stack installed")]
    NoStack { name: String },

    #[error("device {0:?} already has an address assigned")]
    AlreadyAddressed(DeviceHandle),

    #[error("failed to create capture file {path}: {err}")]
    Capture {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}
