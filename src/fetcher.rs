//! 页面抓取器
//! 有限并发抓取页面并提取可见文本；单个页面失败不影响其他页面，不重试

use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::GlobalConfig;
use crate::error::ScrapeResult;
use crate::extractor::HtmlTextExtractor;

/// 单个页面的抓取结果（失败时text为None）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub text: Option<String>,
}

impl PageResult {
    pub fn new(url: impl Into<String>, text: Option<String>) -> Self {
        Self {
            url: url.into(),
            text,
        }
    }

    pub fn failed(url: impl Into<String>) -> Self {
        Self::new(url, None)
    }

    /// 非空文本
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// 页面抓取器
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    concurrency: usize,
}

impl PageFetcher {
    /// 按配置构建HTTP客户端
    pub fn new(config: &GlobalConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
        })
    }

    /// 抓取全部页面，结果顺序与输入一致，全部结束后才返回
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<PageResult> {
        let semaphore = Semaphore::new(self.concurrency);

        let tasks = urls.iter().map(|url| {
            let semaphore = &semaphore;
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    warn!("并发信号量已关闭，跳过：{}", url);
                    return PageResult::failed(url.as_str());
                };
                self.fetch_one(url).await
            }
        });

        let pages = join_all(tasks).await;
        let ok = pages.iter().filter(|p| p.text.is_some()).count();
        info!("抓取结束：共{}个页面，成功{}个，失败{}个", pages.len(), ok, pages.len() - ok);
        pages
    }

    /// 抓取单个页面（只尝试一次）
    pub async fn fetch_one(&self, url: &str) -> PageResult {
        match self.fetch_text(url).await {
            Ok(text) => {
                info!("抓取成功：{}", url);
                PageResult::new(url, Some(text))
            }
            Err(e) => {
                warn!("抓取或解析失败 {}：{}", url, e);
                PageResult::failed(url)
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> ScrapeResult<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(HtmlTextExtractor::extract(&html))
    }
}
