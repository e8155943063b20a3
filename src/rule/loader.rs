//! 输入加载管理器
//! 负责读取地址列表和关键词源，缺失任一输入即为致命错误

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::model::{CategorySpec, KeywordSource};
use crate::config::GlobalConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// 输入加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 加载全部输入（抓取开始前调用）
    pub async fn load(config: &GlobalConfig) -> ScrapeResult<(Vec<String>, KeywordSource)> {
        // 1. 先检查两个输入是否都存在，任一缺失直接终止
        for path in [&config.urls_file, &config.keywords_file] {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                error!("输入文件不存在：{}", path.display());
                return Err(ScrapeError::MissingInput(path.clone()));
            }
        }

        // 2. 读取地址列表与关键词源
        let urls = Self::load_urls(&config.urls_file).await?;
        let source = Self::load_keywords(&config.keywords_file).await?;

        info!(
            "已加载 {} 个URL，关键词文件共 {} 个分类",
            urls.len(),
            source.len()
        );
        Ok((urls, source))
    }

    /// 读取地址列表文件
    pub async fn load_urls(path: &Path) -> ScrapeResult<Vec<String>> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse_urls(&content))
    }

    /// 解析地址列表（每行一个，忽略空行）
    pub fn parse_urls(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 读取关键词源文件
    pub async fn load_keywords(path: &Path) -> ScrapeResult<KeywordSource> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse_keywords(&content)
    }

    /// 解析关键词源JSON（保持键顺序）
    pub fn parse_keywords(content: &str) -> ScrapeResult<KeywordSource> {
        let raw: IndexMap<String, Value> = serde_json::from_str(content).map_err(|e| {
            ScrapeError::RuleParseError(format!("关键词文件必须是JSON对象：{}", e))
        })?;

        let mut categories = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let entries = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        other => {
                            debug!("分类 [{}] 中跳过非字符串条目：{}", name, other);
                            None
                        }
                    })
                    // 空关键词会匹配任意名称，加载时直接丢弃
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>(),
                other => {
                    warn!("分类 [{}] 的值不是数组，按空列表处理：{}", name, other);
                    Vec::new()
                }
            };
            categories.push(CategorySpec::new(name, entries));
        }

        Ok(KeywordSource::new(categories))
    }
}
