//! 名字表：拓扑内节点名 -> 引擎节点句柄

use crate::engine::NodeHandle;
use crate::error::BuildError;
use std::collections::HashMap;

/// 节点名字表。保留插入顺序，名字唯一。
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    by_name: HashMap<String, NodeHandle>,
    order: Vec<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册名字；重名返回 `DuplicateName`，表保持不变。
    pub fn register(&mut self, name: &str, handle: NodeHandle) -> Result<(), BuildError> {
        if self.by_name.contains_key(name) {
            return Err(BuildError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.by_name.insert(name.to_string(), handle);
        self.order.push(name.to_string());
        Ok(())
    }

    /// 按名字查找；不存在返回 `UnknownName`。
    pub fn resolve(&self, name: &str) -> Result<NodeHandle, BuildError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| BuildError::UnknownName {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按注册顺序迭代名字
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
