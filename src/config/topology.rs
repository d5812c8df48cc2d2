//! 拓扑声明
//!
//! 节点与链路按配置中的顺序保存：第一个节点是源、最后一个是汇，
//! 链路序号决定地址块与边界链路角色。

use super::tree::{ConfigError, ConfigTree, lookup, scalar_string};
use crate::engine::QueueConfig;
use serde::Deserialize;

/// 节点声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: String,
}

/// 链路队列覆盖项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QueueSpec {
    #[serde(default)]
    pub max_packets: Option<u32>,
}

/// 链路声明。`data_rate`/`delay` 为原始字符串，由引擎解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub source: String,
    pub target: String,
    pub data_rate: String,
    pub delay: String,
    pub queue: Option<QueueSpec>,
}

impl LinkSpec {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        data_rate: impl Into<String>,
        delay: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            data_rate: data_rate.into(),
            delay: delay.into(),
            queue: None,
        }
    }

    /// 合并默认值后的队列配置
    pub fn queue_config(&self) -> QueueConfig {
        let mut q = QueueConfig::default();
        if let Some(max) = self.queue.and_then(|q| q.max_packets) {
            q.max_packets = max;
        }
        q
    }
}

/// 节点在拓扑中的角色，由声明位置推出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Sink,
    Relay,
}

impl Role {
    /// 第一个声明的节点为源；最后一个为汇（至少两个节点时）；其余为中继。
    pub fn from_position(index: usize, count: usize) -> Role {
        if index == 0 {
            Role::Source
        } else if index + 1 == count {
            Role::Sink
        } else {
            Role::Relay
        }
    }
}

/// 完整拓扑声明
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologySpec {
    pub nodes: Vec<NodeSpec>,
    pub links: Vec<LinkSpec>,
}

impl TopologySpec {
    /// 从配置树读取 `topology.nodes` 与 `topology.links`。
    pub fn from_tree(tree: &ConfigTree) -> Result<Self, ConfigError> {
        let nodes = sequence(tree, "topology.nodes")?
            .iter()
            .enumerate()
            .map(|(i, item)| -> Result<NodeSpec, ConfigError> {
                let at = format!("topology.nodes[{i}]");
                Ok(NodeSpec {
                    name: string_field(item, &at, "name")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let links = sequence(tree, "topology.links")?
            .iter()
            .enumerate()
            .map(|(i, item)| -> Result<LinkSpec, ConfigError> {
                let at = format!("topology.links[{i}]");
                let queue = match item.get("queue") {
                    None | Some(ConfigTree::Null) => None,
                    Some(q) => Some(serde_yaml::from_value::<QueueSpec>(q.clone()).map_err(
                        |err| ConfigError::access(format!("{at}.queue"), err.to_string()),
                    )?),
                };
                Ok(LinkSpec {
                    source: string_field(item, &at, "source")?,
                    target: string_field(item, &at, "target")?,
                    data_rate: string_field(item, &at, "data_rate")?,
                    delay: string_field(item, &at, "delay")?,
                    queue,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes, links })
    }

    /// 第 `index` 个节点的角色
    pub fn role_of(&self, index: usize) -> Option<Role> {
        (index < self.nodes.len()).then(|| Role::from_position(index, self.nodes.len()))
    }
}

fn sequence<'a>(tree: &'a ConfigTree, path: &str) -> Result<&'a [ConfigTree], ConfigError> {
    match lookup(tree, path)? {
        // `links:` 留空时按空序列处理
        ConfigTree::Null => Ok(&[] as &[ConfigTree]),
        v => v
            .as_sequence()
            .map(|s| s.as_slice())
            .ok_or_else(|| ConfigError::access(path, "expected a sequence")),
    }
}

fn string_field(item: &ConfigTree, at: &str, key: &str) -> Result<String, ConfigError> {
    let path = format!("{at}.{key}");
    let v = lookup(item, key).map_err(|err| match err {
        ConfigError::Access { reason, .. } => ConfigError::access(path.clone(), reason),
        other => other,
    })?;
    scalar_string(v).ok_or_else(|| ConfigError::access(path, "expected a scalar"))
}
