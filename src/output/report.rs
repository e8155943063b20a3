//! 汇总报告生成
//! 根据各分类计数生成Markdown报告（协议表 + 国家表）

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::{error, info};

use super::writer::RunSummary;
use crate::config::GlobalConfig;
use crate::rule::{CategorySpec, KeywordSource, is_abbreviation};
use crate::utils::is_persian_like;

/// 报告生成器
pub struct ReportGenerator<'a> {
    config: &'a GlobalConfig,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(config: &'a GlobalConfig) -> Self {
        Self { config }
    }

    /// 按配置的UTC偏移取当前时间
    pub fn now(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.config.report_utc_offset_secs)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset)
    }

    /// 生成报告内容
    pub fn render(
        &self,
        summary: &RunSummary,
        source: &KeywordSource,
        now: DateTime<FixedOffset>,
    ) -> String {
        let timestamp = now.format("%Y-%m-%d %H:%M:%S %:z");
        let mut md = String::new();

        // writeln! 写入String不会失败
        let _ = writeln!(md, "# 📊 提取结果（最后更新：{}）\n", timestamp);
        md.push_str("本文件由程序自动生成。\n\n");
        md.push_str("**说明：** 国家文件只包含名称中出现国家名/缩写（缩写按整词匹配）的配置。\
                     配置名称优先取链接 `#` 之后的部分，没有时从 Vmess/SSR 载荷中解析。\n\n");
        md.push_str("**注意：** 多重URL编码（含大量 `%25`）、过长或含特定标记词的配置已被过滤。\n\n");

        md.push_str("## 📁 协议文件\n\n");
        if summary.protocol_counts.is_empty() {
            md.push_str("未找到任何协议配置。\n");
        } else {
            md.push_str("| 协议 | 总数 | 链接 |\n");
            md.push_str("|---|---|---|\n");
            for (category, count) in &summary.protocol_counts {
                let _ = writeln!(
                    md,
                    "| {} | {} | [`{}.txt`]({}) |",
                    category,
                    count,
                    category,
                    self.file_link(category)
                );
            }
        }
        md.push('\n');

        md.push_str("## 🌍 国家文件\n\n");
        if summary.country_counts.is_empty() {
            md.push_str("未找到任何与国家相关的配置。\n");
        } else {
            md.push_str("| 国家 | 相关配置数 | 链接 |\n");
            md.push_str("|---|---|---|\n");
            for (category, count) in &summary.country_counts {
                let display = country_display(category, source.get(category));
                let _ = writeln!(
                    md,
                    "| {} | {} | [`{}.txt`]({}) |",
                    display,
                    count,
                    category,
                    self.file_link(category)
                );
            }
        }
        md.push('\n');

        md
    }

    /// 生成并写入报告文件，失败只记录日志
    pub async fn write(&self, summary: &RunSummary, source: &KeywordSource) -> bool {
        let content = self.render(summary, source, self.now());
        let path = &self.config.readme_file;
        match tokio::fs::write(path, content).await {
            Ok(()) => {
                info!("报告已生成：{}", path.display());
                true
            }
            Err(e) => {
                error!("写入报告失败 {}：{}", path.display(), e);
                false
            }
        }
    }

    fn file_link(&self, category: &str) -> String {
        let output_dir = self.config.output_dir.to_string_lossy();
        match &self.config.github_repo_path {
            Some(repo) => format!(
                "https://raw.githubusercontent.com/{}/refs/heads/{}/{}/{}.txt",
                repo, self.config.github_branch, output_dir, category
            ),
            None => format!("{}/{}.txt", output_dir, category),
        }
    }
}

/// 国家列展示：`旗帜 名称 (本地名称)`
fn country_display(category: &str, spec: Option<&CategorySpec>) -> String {
    let mut parts = Vec::with_capacity(3);
    let flag = spec.and_then(display_flag);
    if let Some(flag) = flag {
        parts.push(flag.to_string());
    }
    parts.push(category.to_string());
    if let Some(local) = spec.and_then(|s| local_name(s, flag)) {
        parts.push(format!("({})", local));
    }
    parts.join(" ")
}

/// 旗帜/代码：第一个2~7字符且不全为字母数字的条目，否则取1~7字符的最后一项
pub fn display_flag(spec: &CategorySpec) -> Option<&str> {
    let is_flag = |v: &str| {
        let len = v.chars().count();
        (2..=7).contains(&len) && !v.chars().all(char::is_alphanumeric)
    };

    spec.values().find(|v| is_flag(v)).or_else(|| {
        spec.values()
            .last()
            .filter(|v| (1..=7).contains(&v.chars().count()))
    })
}

/// 本地（波斯文）名称：排除旗帜、分类名本身与缩写
pub fn local_name<'s>(spec: &'s CategorySpec, flag: Option<&str>) -> Option<&'s str> {
    spec.values().find(|v| {
        Some(*v) != flag
            && v.to_lowercase() != spec.name.to_lowercase()
            && !is_abbreviation(v)
            && is_persian_like(v)
    })
}
