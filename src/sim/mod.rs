//! 仿真核心模块
//!
//! 离散事件仿真的最小内核：仿真时间、事件、世界与事件循环。
//! `engine::LocalEngine` 在其之上实现仿真引擎原语。

// 子模块声明
mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
