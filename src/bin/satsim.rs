//! 卫星网络仿真（插桩变体）
//!
//! 构建拓扑后在首尾节点之间安装批量传输流，在边界链路上抓包，仿真 60 秒。

use clap::Parser;
use satsim_rs::config::{TopologySpec, read_config};
use satsim_rs::driver::{INSTRUMENTED_STOP, RunDriver};
use satsim_rs::engine::LocalEngine;
use satsim_rs::error::BuildError;
use satsim_rs::scenario::{RESULTS_DIR, Scenario, ScenarioOpts};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "satsim",
    about = "Build a topology from YAML, run a bulk flow between the first and last node"
)]
struct Args {
    /// Path to YAML config file
    #[arg(long)]
    config: PathBuf,
}

fn build(engine: &mut LocalEngine, args: &Args) -> Result<Scenario, BuildError> {
    let config = read_config(&args.config)?;
    info!("Successfully read YAML config");
    let spec = TopologySpec::from_tree(&config)?;
    Scenario::build(engine, &spec, &ScenarioOpts::instrumented(RESULTS_DIR))
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
            error!("simulation setup failed: {err}");
            RunDriver::abort(&mut engine);
            return ExitCode::FAILURE;
        }
    };

    let report = RunDriver::with_stop(INSTRUMENTED_STOP).run(&mut engine);
    println!(
        "done @ {}, nodes={}, links={}, flow={}, captures={}, apps_started={}",
        report.final_time,
        scenario.topology.nodes.len(),
        scenario.links.links.len(),
        scenario.flow.is_some(),
        scenario.links.captures.len(),
        report.apps_started
    );
    ExitCode::SUCCESS
}
