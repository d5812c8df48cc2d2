//! 运行驱动：设置停止时间、运行事件循环、销毁引擎状态。
//!
//! 每个进程只做一次运行/销毁。

use crate::engine::{RunReport, SimEngine};
use crate::sim::SimTime;
use tracing::{info, warn};

/// 插桩变体的固定仿真时长
pub const INSTRUMENTED_STOP: SimTime = SimTime(60_000_000_000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunDriver {
    pub stop_at: Option<SimTime>,
}

impl RunDriver {
    /// 不设停止时间：运行到事件耗尽
    pub fn until_exhausted() -> Self {
        Self { stop_at: None }
    }

    pub fn with_stop(at: SimTime) -> Self {
        Self { stop_at: Some(at) }
    }

    /// 运行一次并销毁引擎状态；返回销毁前采集的摘要。
    #[tracing::instrument(skip(engine))]
    pub fn run<E: SimEngine + ?Sized>(&self, engine: &mut E) -> RunReport {
        if let Some(at) = self.stop_at {
            engine.stop_at(at);
        }
        let report = engine.run();
        engine.destroy();
        info!(
            final_time = %report.final_time,
            events = report.events_executed,
            apps_started = report.apps_started,
            "🏁 运行结束"
        );
        report
    }

    /// 构建失败后的收尾：丢弃已分配的引擎对象，不再进入事件循环。
    pub fn abort<E: SimEngine + ?Sized>(engine: &mut E) {
        warn!("构建失败，销毁已分配的引擎状态");
        engine.destroy();
    }
}
