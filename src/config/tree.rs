//! 通用配置树与路径访问

use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置树：保持声明顺序的标量/序列/映射。
pub type ConfigTree = Value;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {err}")]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("failed to parse config file {path}: {err}")]
    Parse {
        path: PathBuf,
        #[source]
        err: serde_yaml::Error,
    },

    /// 期望的键缺失或类型不符
    #[error("config access error at '{path}': {reason}")]
    Access { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn access(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Access {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// 读取并解析 YAML 配置文件。
#[tracing::instrument]
pub fn read_config(path: &Path) -> Result<ConfigTree, ConfigError> {
    info!("读取配置文件");
    let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        err,
    })?;
    let tree: ConfigTree = serde_yaml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        err,
    })?;
    debug!(bytes = raw.len(), "配置解析完成");
    Ok(tree)
}

/// 按点分路径取子节点（如 `topology.nodes`），缺失即报错。
pub fn lookup<'a>(tree: &'a ConfigTree, path: &str) -> Result<&'a ConfigTree, ConfigError> {
    let mut cur = tree;
    let mut walked = String::new();
    for key in path.split('.') {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(key);
        let map = cur
            .as_mapping()
            .ok_or_else(|| ConfigError::access(walked.clone(), "parent is not a mapping"))?;
        cur = map
            .get(key)
            .ok_or_else(|| ConfigError::access(walked.clone(), "missing key"))?;
    }
    Ok(cur)
}

/// 与 [`lookup`] 相同，但缺失时返回 `None`。
pub fn probe<'a>(tree: &'a ConfigTree, path: &str) -> Option<&'a ConfigTree> {
    lookup(tree, path).ok()
}

/// 标量转字符串：字符串原样返回，数字和布尔值按字面量转换。
pub fn scalar_string(v: &ConfigTree) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(t) => scalar_string(&t.value),
        _ => None,
    }
}
