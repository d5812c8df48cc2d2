//! 链路配置：解析端点、建链、分配地址块、记录边界地址与抓包

use super::address::AddressAllocator;
use super::registry::NameRegistry;
use crate::config::LinkSpec;
use crate::engine::{
    AddressBlock, DeviceHandle, EngineError, LinkAttributes, LinkHandle, NodeHandle, SimEngine,
};
use crate::error::BuildError;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tracing::{debug, info};

/// 边界链路抓包选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOpts {
    /// 抓包文件目录
    pub dir: PathBuf,
}

impl CaptureOpts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `src`/`dst` 前缀（含目录），引擎在其后追加节点名与网卡序号。
    pub fn prefix(&self, side: &str) -> String {
        self.dir.join(side).to_string_lossy().into_owned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProvisionOpts {
    pub capture: Option<CaptureOpts>,
}

/// 一条已建立并完成编址的链路
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedLink {
    pub index: usize,
    pub source: NodeHandle,
    pub target: NodeHandle,
    pub link: LinkHandle,
    /// `[源端网卡, 目的端网卡]`
    pub devices: [DeviceHandle; 2],
    pub block: AddressBlock,
    /// `[源端地址, 目的端地址]`
    pub addresses: [Ipv4Addr; 2],
}

/// 首条链路的源端地址与末条链路的目的端地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryAddresses {
    pub source_address: Option<Ipv4Addr>,
    pub dest_address: Option<Ipv4Addr>,
}

#[derive(Debug, Clone, Default)]
pub struct ProvisionedLinks {
    pub links: Vec<ProvisionedLink>,
    /// 至少有一条链路时才存在
    pub boundary: Option<BoundaryAddresses>,
    /// 已写出的抓包文件
    pub captures: Vec<PathBuf>,
}

/// 按声明顺序建立所有链路。
///
/// 任一链路失败即中止，后续链路不再处理。
#[tracing::instrument(skip_all, fields(links = specs.len(), capture = opts.capture.is_some()))]
pub fn provision_links<E: SimEngine + ?Sized>(
    engine: &mut E,
    registry: &NameRegistry,
    specs: &[LinkSpec],
    opts: &ProvisionOpts,
) -> Result<ProvisionedLinks, BuildError> {
    let mut out = ProvisionedLinks::default();
    let mut alloc = AddressAllocator::new();
    let last_index = specs.len().checked_sub(1);

    for (index, spec) in specs.iter().enumerate() {
        let source = registry.resolve(&spec.source)?;
        let target = registry.resolve(&spec.target)?;

        info!(
            index,
            from = %spec.source,
            to = %spec.target,
            rate = %spec.data_rate,
            delay = %spec.delay,
            "🔗 creating link from {} to {} with rate {} and delay {}",
            spec.source,
            spec.target,
            spec.data_rate,
            spec.delay
        );

        let block = alloc.next_block()?;
        let attrs = LinkAttributes {
            data_rate: spec.data_rate.clone(),
            delay: spec.delay.clone(),
            queue: spec.queue_config(),
        };
        let (link, devices) = engine
            .create_p2p_link(source, target, &attrs)
            .map_err(|err| match err {
                EngineError::Attribute(err) => BuildError::Attribute {
                    index,
                    from: spec.source.clone(),
                    to: spec.target.clone(),
                    err,
                },
                other => BuildError::Engine(other),
            })?;
        let addresses = engine.assign_addresses(devices, block)?;
        debug!(index, %block, src = %addresses[0], dst = %addresses[1], "链路已编址");

        if index == 0 {
            out.boundary.get_or_insert_default().source_address = Some(addresses[0]);
            if let Some(capture) = &opts.capture {
                out.captures
                    .push(engine.enable_capture(&capture.prefix("src"), devices[0])?);
            }
        }
        if Some(index) == last_index {
            out.boundary.get_or_insert_default().dest_address = Some(addresses[1]);
            if let Some(capture) = &opts.capture {
                out.captures
                    .push(engine.enable_capture(&capture.prefix("dst"), devices[1])?);
            }
        }

        out.links.push(ProvisionedLink {
            index,
            source,
            target,
            link,
            devices,
            block,
            addresses,
        });
    }

    info!(
        links = out.links.len(),
        blocks = alloc.allocated(),
        boundary = ?out.boundary,
        "✅ 链路配置完成"
    );
    Ok(out)
}
