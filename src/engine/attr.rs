//! 链路属性解析
//!
//! 速率（如 `5Mbps`、`1.5Gb/s`、`10KBps`）与时延（如 `10ms`、`2s`、`250us`）
//! 在引擎边界从字符串解析；构建流水线本身不做单位校验。

use crate::sim::SimTime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 属性字符串被引擎拒绝
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {attribute} '{value}': {reason}")]
pub struct AttributeError {
    pub attribute: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl AttributeError {
    fn data_rate(value: &str, reason: &'static str) -> Self {
        Self {
            attribute: "DataRate",
            value: value.to_string(),
            reason,
        }
    }

    fn delay(value: &str, reason: &'static str) -> Self {
        Self {
            attribute: "Delay",
            value: value.to_string(),
            reason,
        }
    }
}

/// 链路速率（bit/s）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataRate {
    bps: u64,
}

impl DataRate {
    pub fn from_bps(bps: u64) -> Self {
        Self { bps }
    }

    pub fn bps(&self) -> u64 {
        self.bps
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.bps)
    }
}

/// 单位 -> 每单位的 bit/s；不带单位按 bit/s
fn rate_multiplier(unit: &str) -> Option<f64> {
    let m = match unit {
        "" | "bps" | "b/s" => 1.0,
        "Bps" | "B/s" => 8.0,
        "kbps" | "kb/s" | "Kbps" | "Kb/s" => 1e3,
        "kBps" | "kB/s" | "KBps" | "KB/s" => 8e3,
        "Kib/s" => 1024.0,
        "KiB/s" => 8.0 * 1024.0,
        "Mbps" | "Mb/s" => 1e6,
        "MBps" | "MB/s" => 8e6,
        "Mib/s" => 1024.0 * 1024.0,
        "MiB/s" => 8.0 * 1024.0 * 1024.0,
        "Gbps" | "Gb/s" => 1e9,
        "GBps" | "GB/s" => 8e9,
        "Gib/s" => 1024.0 * 1024.0 * 1024.0,
        "GiB/s" => 8.0 * 1024.0 * 1024.0 * 1024.0,
        _ => return None,
    };
    Some(m)
}

/// 单位 -> 每单位的纳秒数
fn time_multiplier(unit: &str) -> Option<f64> {
    let m = match unit {
        "" | "s" => 1e9,
        "ms" => 1e6,
        "us" => 1e3,
        "ns" => 1.0,
        "ps" => 1e-3,
        "fs" => 1e-6,
        "min" => 60e9,
        "h" => 3600e9,
        "d" => 86_400e9,
        _ => return None,
    };
    Some(m)
}

/// 拆分数值部分与单位部分
fn split_quantity(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (&s[..end], s[end..].trim())
}

fn parse_magnitude(num: &str) -> Option<f64> {
    if num.is_empty() {
        return None;
    }
    num.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl FromStr for DataRate {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (num, unit) = split_quantity(trimmed);
        let value =
            parse_magnitude(num).ok_or_else(|| AttributeError::data_rate(s, "missing or malformed number"))?;
        let mult = rate_multiplier(unit).ok_or_else(|| AttributeError::data_rate(s, "unknown unit"))?;
        let bps = value * mult;
        if bps > u64::MAX as f64 {
            return Err(AttributeError::data_rate(s, "value out of range"));
        }
        Ok(DataRate::from_bps(bps.round() as u64))
    }
}

/// 解析时延字符串；不带单位的数值按秒解释。
pub fn parse_delay(s: &str) -> Result<SimTime, AttributeError> {
    let trimmed = s.trim();
    let (num, unit) = split_quantity(trimmed);
    let value = parse_magnitude(num).ok_or_else(|| AttributeError::delay(s, "missing or malformed number"))?;
    let mult = time_multiplier(unit).ok_or_else(|| AttributeError::delay(s, "unknown unit"))?;
    let nanos = value * mult;
    if nanos > u64::MAX as f64 {
        return Err(AttributeError::delay(s, "value out of range"));
    }
    Ok(SimTime(nanos.round() as u64))
}
