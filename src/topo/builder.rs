//! 拓扑构建：按声明创建节点、注册名字、批量安装协议栈

use super::registry::NameRegistry;
use crate::config::{NodeSpec, Role};
use crate::engine::{NodeHandle, SimEngine};
use crate::error::BuildError;
use tracing::{debug, info};

/// 第一个与最后一个声明的节点（单节点拓扑时二者相同）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub first: NodeHandle,
    pub last: NodeHandle,
}

/// 构建结果：名字表、按声明顺序排列的节点、首尾节点。
#[derive(Debug, Clone, Default)]
pub struct BuiltTopology {
    pub registry: NameRegistry,
    pub nodes: Vec<NodeHandle>,
    pub endpoints: Option<Endpoints>,
}

impl BuiltTopology {
    /// 节点角色（由声明位置推出）
    pub fn role(&self, node: NodeHandle) -> Option<Role> {
        let index = self.nodes.iter().position(|&n| n == node)?;
        Some(Role::from_position(index, self.nodes.len()))
    }
}

/// 创建所有节点并安装协议栈。
///
/// 重名立即中止，已创建的引擎对象由调用方统一销毁。
#[tracing::instrument(skip_all, fields(nodes = specs.len()))]
pub fn build_nodes<E: SimEngine + ?Sized>(
    engine: &mut E,
    specs: &[NodeSpec],
) -> Result<BuiltTopology, BuildError> {
    let mut topo = BuiltTopology::default();

    for spec in specs {
        let handle = engine.create_node(&spec.name);
        topo.registry.register(&spec.name, handle)?;
        topo.nodes.push(handle);
        debug!(name = %spec.name, ?handle, "节点已注册");
    }

    if let (Some(&first), Some(&last)) = (topo.nodes.first(), topo.nodes.last()) {
        topo.endpoints = Some(Endpoints { first, last });
    }

    engine.install_stack(&topo.nodes)?;

    info!(nodes = topo.nodes.len(), "🧱 节点创建完成，协议栈已安装");
    Ok(topo)
}
