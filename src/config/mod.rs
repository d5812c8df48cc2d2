//! 配置模型
//!
//! YAML 文件读入为通用树（`serde_yaml::Value`），再按路径取出拓扑声明。
//! 构建流水线只读，不修改配置树。

mod topology;
mod tree;

pub use topology::{LinkSpec, NodeSpec, QueueSpec, Role, TopologySpec};
pub use tree::{ConfigError, ConfigTree, lookup, probe, read_config, scalar_string};
