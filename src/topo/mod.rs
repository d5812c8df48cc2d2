//! 拓扑构建与链路配置
//!
//! 节点先于链路创建：[`build_nodes`] 填充名字表并批量安装协议栈，
//! [`provision_links`] 按声明顺序解析端点、建链、分配地址块并记录边界地址。

mod address;
mod builder;
mod links;
mod registry;

pub use address::{AddressAllocator, MAX_BLOCKS};
pub use builder::{BuiltTopology, Endpoints, build_nodes};
pub use links::{BoundaryAddresses, CaptureOpts, ProvisionOpts, ProvisionedLink, ProvisionedLinks, provision_links};
pub use registry::NameRegistry;
