//! 分类结果输出
//! 每次运行清空输出目录，每个非空分类写入 `<分类>.txt`（排序，每行一条）

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use crate::detector::{Aggregator, Bucket};
use crate::error::ScrapeResult;

/// 运行汇总（仅统计实际写出的分类）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub protocol_counts: BTreeMap<String, usize>,
    pub country_counts: BTreeMap<String, usize>,
}

/// 分类结果写入器
pub struct OutputWriter;

impl OutputWriter {
    /// 清空并重建输出目录
    pub async fn reset_dir(dir: &Path) -> ScrapeResult<()> {
        if tokio::fs::try_exists(dir).await? {
            tokio::fs::remove_dir_all(dir).await?;
        }
        tokio::fs::create_dir_all(dir).await?;
        Ok(())
    }

    /// 写入单个分类，返回写入条数；空分类或写入失败返回None
    pub async fn save_bucket(dir: &Path, category: &str, bucket: &Bucket) -> Option<usize> {
        if bucket.is_empty() {
            return None;
        }

        let file_path = dir.join(format!("{}.txt", category));
        let mut content = String::with_capacity(bucket.iter().map(|c| c.len() + 1).sum());
        for item in bucket {
            content.push_str(item);
            content.push('\n');
        }

        match tokio::fs::write(&file_path, content).await {
            Ok(()) => {
                info!("已保存 {} 条配置到 {}", bucket.len(), file_path.display());
                Some(bucket.len())
            }
            Err(e) => {
                error!("写入文件失败 {}：{}", file_path.display(), e);
                None
            }
        }
    }

    /// 写出全部分类（单个分类失败不影响其他分类）
    pub async fn write_all(dir: &Path, aggregator: &Aggregator) -> ScrapeResult<RunSummary> {
        Self::reset_dir(dir).await?;
        info!("输出目录：{}", dir.display());

        let mut summary = RunSummary::default();
        for (category, bucket) in aggregator.protocol_buckets() {
            if let Some(count) = Self::save_bucket(dir, category, bucket).await {
                summary.protocol_counts.insert(category.clone(), count);
            }
        }
        for (category, bucket) in aggregator.country_buckets() {
            if let Some(count) = Self::save_bucket(dir, category, bucket).await {
                summary.country_counts.insert(category.clone(), count);
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_all_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output_configs");
        tokio::fs::create_dir_all(&out).await.unwrap();
        tokio::fs::write(out.join("Stale.txt"), "old\n").await.unwrap();

        let mut aggregator = Aggregator::new(["Germany"]);
        aggregator.add_protocol("Vless", "vless://b");
        aggregator.add_protocol("Vless", "vless://a");
        aggregator.add_country("Germany", "vless://a");

        let summary = OutputWriter::write_all(&out, &aggregator).await.unwrap();

        assert!(!out.join("Stale.txt").exists());
        assert!(!out.join("Vmess.txt").exists());
        assert_eq!(
            tokio::fs::read_to_string(out.join("Vless.txt")).await.unwrap(),
            "vless://a\nvless://b\n"
        );
        assert_eq!(summary.protocol_counts["Vless"], 2);
        assert_eq!(summary.country_counts["Germany"], 1);
    }

    #[tokio::test]
    async fn test_failed_category_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output_configs");

        // 分类名指向不存在的子目录，写入必然失败
        let mut aggregator = Aggregator::new(["Missing/Germany", "Austria"]);
        aggregator.add_protocol("Vless", "vless://a");
        aggregator.add_country("Missing/Germany", "vless://a");
        aggregator.add_country("Austria", "vless://a");

        let summary = OutputWriter::write_all(&out, &aggregator).await.unwrap();

        assert_eq!(summary.protocol_counts.get("Vless"), Some(&1));
        assert_eq!(summary.country_counts.get("Austria"), Some(&1));
        assert!(!summary.country_counts.contains_key("Missing/Germany"));
        assert!(out.join("Vless.txt").exists());
        assert!(out.join("Austria.txt").exists());
    }
}
