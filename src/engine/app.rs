//! 应用启动事件

use super::local::EngineWorld;
use super::types::AppHandle;
use crate::sim::{Event, Simulator, World};
use tracing::{info, warn};

/// 事件：在调度时刻启动一个已安装的应用。
#[derive(Debug)]
pub struct StartApplication {
    pub app: AppHandle,
}

impl Event for StartApplication {
    #[tracing::instrument(skip(self, sim, world), fields(app = ?self.app))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(w) = world.as_any_mut().downcast_mut::<EngineWorld>() else {
            warn!("world is not EngineWorld, skipping application start");
            return;
        };
        let now = sim.now();
        match w.mark_started(self.app, now) {
            Some(record) => info!(
                node = %record.node_name,
                kind = ?record.kind,
                now = %now,
                "🚀 应用启动"
            ),
            None => warn!("应用句柄不存在"),
        }
    }
}
