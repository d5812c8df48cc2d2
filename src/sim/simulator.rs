//! 仿真器
//!
//! 事件驱动仿真器：维护当前时间、事件队列和可选的停止时间。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动仿真器。
///
/// 一个进程内只跑一轮：`stop_at`（可选）→ `run` → `destroy`。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    stop_at: Option<SimTime>,
    executed: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已设置的停止时间
    pub fn stop_time(&self) -> Option<SimTime> {
        self.stop_at
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 自创建（或上次 `destroy`）以来执行过的事件数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at: at.max(self.now),
            seq,
            ev: Box::new(ev),
        });

        debug!(queue_size = self.q.len(), "事件已加入队列");
    }

    /// 设置硬停止时间：晚于该时刻的事件不会执行。
    pub fn stop_at(&mut self, at: SimTime) {
        debug!(stop_at = ?at, "设置停止时间");
        self.stop_at = Some(at);
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            if let Some(item) = self.q.pop() {
                self.step(item, world);
            }
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件；若设置了停止时间，则运行到停止时间为止。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), stop_at = ?self.stop_at, "初始状态");

        let before = self.executed;
        match self.stop_at {
            Some(until) => self.run_until(until, world),
            None => {
                while let Some(item) = self.q.pop() {
                    self.step(item, world);
                }
            }
        }

        info!(
            total_events = self.executed - before,
            final_time = ?self.now,
            remaining_queue = self.q.len(),
            "✅ 仿真完成"
        );
    }

    /// 丢弃所有未执行事件并重置时钟。
    pub fn destroy(&mut self) {
        debug!(dropped = self.q.len(), "销毁仿真器状态");
        *self = Simulator::default();
    }

    fn step(&mut self, item: ScheduledEvent, world: &mut dyn World) {
        self.executed += 1;
        self.now = item.at;
        trace!(
            event_num = self.executed,
            now = ?self.now,
            seq = item.seq,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        item.ev.execute(self, world);
        world.on_tick(self);
    }
}
