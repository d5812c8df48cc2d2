//! 构建流水线错误
//!
//! 所有错误都在单次构建中同步检测，不重试，也不保留半成品拓扑。

use crate::config::ConfigError;
use crate::engine::{AttributeError, EngineError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("duplicate node name '{name}'")]
    DuplicateName { name: String },

    #[error("unknown node name '{name}'")]
    UnknownName { name: String },

    /// 引擎拒绝了链路的速率或时延字符串
    #[error("link {index} ({from} -> {to}): {err}")]
    Attribute {
        index: usize,
        from: String,
        to: String,
        #[source]
        err: AttributeError,
    },

    /// `10.1.x.0/24` 方案最多 256 个地址块
    #[error("address space exhausted: link {index} needs block 10.1.{index}.0/24, only 256 blocks exist")]
    AddressSpaceExhausted { index: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
