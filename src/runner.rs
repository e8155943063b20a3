//! 完整运行流程：加载输入 → 并发抓取 → 提取/过滤/命名/分类 → 写出结果与报告
use tracing::{debug, info};

use crate::config::GlobalConfig;
use crate::detector::ConfigDetector;
use crate::error::ScrapeResult;
use crate::fetcher::PageFetcher;
use crate::output::{OutputWriter, ReportGenerator, RunSummary};
use crate::rule::RuleLoader;

/// 执行一次完整运行（输出目录会被整体替换）
pub async fn run(config: &GlobalConfig) -> ScrapeResult<RunSummary> {
    // 1. 加载输入，缺失即终止（此时尚未发起任何请求）
    let (urls, source) = RuleLoader::load(config).await?;

    // 2. 编译规则
    let detector = ConfigDetector::new(&source, config);

    // 3. 抓取全部页面
    let fetcher = PageFetcher::new(config)?;
    let pages = fetcher.fetch_all(&urls).await;

    // 4. 单线程处理与聚合
    let aggregator = detector.process_pages(&pages);

    // 5. 写出分类文件与报告
    let summary = OutputWriter::write_all(&config.output_dir, &aggregator).await?;
    ReportGenerator::new(config).write(&summary, &source).await;

    info!(
        "--- 运行结束：协议分类{}个，国家分类{}个 ---",
        summary.protocol_counts.len(),
        summary.country_counts.len()
    );
    if let Ok(json) = serde_json::to_string(&summary) {
        debug!("运行汇总：{}", json);
    }
    Ok(summary)
}
