//! 拓扑仿真
//!
//! 按 YAML 配置创建节点与点到点链路，运行到事件耗尽。

use clap::Parser;
use satsim_rs::config::{TopologySpec, read_config};
use satsim_rs::driver::RunDriver;
use satsim_rs::engine::LocalEngine;
use satsim_rs::error::BuildError;
use satsim_rs::scenario::{Scenario, ScenarioOpts};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "topology_sim", about = "按 YAML 配置构建节点与链路并运行仿真")]
struct Args {
    /// Path to YAML config file
    #[arg(long)]
    config: PathBuf,
}

fn build(engine: &mut LocalEngine, args: &Args) -> Result<Scenario, BuildError> {
    let config = read_config(&args.config)?;
    info!("Successfully read YAML config");
    let spec = TopologySpec::from_tree(&config)?;
    Scenario::build(engine, &spec, &ScenarioOpts::topology_only())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut engine = LocalEngine::new();

    let scenario = match build(&mut engine, &args) {
        Ok(s) => s,
        Err(err) => {
            error!("topology build failed: {err}");
            RunDriver::abort(&mut engine);
            return ExitCode::FAILURE;
        }
    };

    let report = RunDriver::until_exhausted().run(&mut engine);
    println!(
        "done @ {}, nodes={}, links={}",
        report.final_time,
        scenario.topology.nodes.len(),
        scenario.links.links.len()
    );
    ExitCode::SUCCESS
}
