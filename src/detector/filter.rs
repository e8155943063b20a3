//! 配置过滤器
//! 过滤垃圾配置：标记词、多重URL编码、超长链接

use std::fmt;
use tracing::warn;

use crate::config::GlobalConfig;
use crate::utils::truncate_chars;

/// 日志中保留的配置前缀长度
const LOG_PREFIX_CHARS: usize = 60;

/// 过滤原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    SpamMarker(String),
    Percent25Count(usize),
    ExcessiveLength(usize),
    DoubleEncodedPercent,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::SpamMarker(marker) => write!(f, "包含标记词'{}'", marker),
            RejectReason::Percent25Count(count) => write!(f, "%25出现次数过多（{}）", count),
            RejectReason::ExcessiveLength(len) => write!(f, "长度过长（{}）", len),
            RejectReason::DoubleEncodedPercent => write!(f, "包含'%2525'"),
        }
    }
}

/// 配置过滤器
#[derive(Debug, Clone)]
pub struct ConfigFilter {
    spam_marker: String,
    min_percent25_count: usize,
    max_config_length: usize,
}

impl Default for ConfigFilter {
    fn default() -> Self {
        Self::new(&GlobalConfig::default())
    }
}

impl ConfigFilter {
    pub fn new(config: &GlobalConfig) -> Self {
        Self {
            spam_marker: config.spam_marker.to_lowercase(),
            min_percent25_count: config.min_percent25_count,
            max_config_length: config.max_config_length,
        }
    }

    /// 纯判定：返回第一个命中的过滤原因
    pub fn check(&self, descriptor: &str) -> Option<RejectReason> {
        if !self.spam_marker.is_empty() && descriptor.to_lowercase().contains(&self.spam_marker) {
            return Some(RejectReason::SpamMarker(self.spam_marker.clone()));
        }

        let percent25_count = descriptor.matches("%25").count();
        if percent25_count >= self.min_percent25_count {
            return Some(RejectReason::Percent25Count(percent25_count));
        }

        let length = descriptor.chars().count();
        if length >= self.max_config_length {
            return Some(RejectReason::ExcessiveLength(length));
        }

        if descriptor.contains("%2525") {
            return Some(RejectReason::DoubleEncodedPercent);
        }

        None
    }

    /// 判定并记录过滤日志
    pub fn should_reject(&self, descriptor: &str) -> bool {
        match self.check(descriptor) {
            Some(reason) => {
                warn!(
                    "过滤配置（{}）：{}...",
                    reason,
                    truncate_chars(descriptor, LOG_PREFIX_CHARS)
                );
                true
            }
            None => false,
        }
    }
}
