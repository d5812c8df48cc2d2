//! 配置检查
//!
//! 读取 YAML 配置并报告其内容，然后对空引擎做一次运行/销毁。

use clap::Parser;
use satsim_rs::config::{ConfigError, TopologySpec, probe, read_config, scalar_string};
use satsim_rs::driver::RunDriver;
use satsim_rs::engine::LocalEngine;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "config_check", about = "读取 YAML 拓扑配置并报告内容")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "scratch/yaml-test/config.yaml")]
    config: PathBuf,
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = read_config(&args.config)?;
    info!("Successfully read YAML config");

    if let Some(value) = probe(&config, "test.value").and_then(scalar_string) {
        info!(%value, "test value");
        println!("test value: {value}");
    }
    if probe(&config, "topology").is_some() {
        let topo = TopologySpec::from_tree(&config)?;
        println!("nodes={}, links={}", topo.nodes.len(), topo.links.len());
    }

    let mut engine = LocalEngine::new();
    RunDriver::until_exhausted().run(&mut engine);
    Ok(())
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

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Failed to read config: {err}");
            ExitCode::FAILURE
        }
    }
}
