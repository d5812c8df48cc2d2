//! 场景流水线：节点 → 链路 → （可选）参考流

use crate::config::TopologySpec;
use crate::engine::SimEngine;
use crate::error::BuildError;
use crate::flow::{FlowOpts, FlowPlan, instrument_flow};
use crate::topo::{BuiltTopology, CaptureOpts, ProvisionOpts, ProvisionedLinks, build_nodes, provision_links};
use std::path::PathBuf;
use tracing::info;

/// 插桩变体写抓包文件的目录
pub const RESULTS_DIR: &str = "results";

#[derive(Debug, Clone, Default)]
pub struct ScenarioOpts {
    pub provision: ProvisionOpts,
    /// `None` 表示不安装参考流
    pub flow: Option<FlowOpts>,
}

impl ScenarioOpts {
    /// 只建节点和链路
    pub fn topology_only() -> Self {
        Self::default()
    }

    /// 参考流 + 边界链路抓包
    pub fn instrumented(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            provision: ProvisionOpts {
                capture: Some(CaptureOpts::new(results_dir)),
            },
            flow: Some(FlowOpts::default()),
        }
    }
}

/// 构建完成的场景
#[derive(Debug, Clone)]
pub struct Scenario {
    pub topology: BuiltTopology,
    pub links: ProvisionedLinks,
    pub flow: Option<FlowPlan>,
}

impl Scenario {
    /// 顺序执行整条流水线，任一步失败即返回。
    #[tracing::instrument(skip_all, fields(nodes = spec.nodes.len(), links = spec.links.len()))]
    pub fn build<E: SimEngine + ?Sized>(
        engine: &mut E,
        spec: &TopologySpec,
        opts: &ScenarioOpts,
    ) -> Result<Scenario, BuildError> {
        let topology = build_nodes(engine, &spec.nodes)?;
        let links = provision_links(engine, &topology.registry, &spec.links, &opts.provision)?;
        let flow = match &opts.flow {
            Some(flow_opts) => {
                instrument_flow(engine, topology.endpoints, links.boundary.as_ref(), flow_opts)?
            }
            None => None,
        };
        info!(
            nodes = topology.nodes.len(),
            links = links.links.len(),
            flow = flow.is_some(),
            captures = links.captures.len(),
            "场景构建完成"
        );
        Ok(Scenario {
            topology,
            links,
            flow,
        })
    }
}
