//! rscategorize 命令行入口
use std::path::PathBuf;

use clap::Parser;
use rscategorize::{ConfigManager, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rscategorize", version, about = "抓取网页中的代理配置并按协议/国家分类")]
struct Cli {
    /// 地址列表文件（每行一个URL）
    #[arg(long, default_value = "urls.txt")]
    urls: PathBuf,

    /// 关键词文件（JSON：分类 -> 正则/关键词列表）
    #[arg(long, default_value = "keywords.json")]
    keywords: PathBuf,

    /// 输出目录（每次运行清空）
    #[arg(short, long, default_value = "output_configs")]
    output_dir: PathBuf,

    /// 汇总报告文件
    #[arg(long, default_value = "README.md")]
    readme: PathBuf,

    /// 最大并发请求数
    #[arg(short = 'c', long, default_value_t = 10)]
    concurrency: usize,

    /// 单个请求超时（秒）
    #[arg(short, long, default_value_t = 15)]
    timeout: u64,

    /// 报告链接使用的GitHub仓库（owner/repo）
    #[arg(long)]
    repo: Option<String>,

    /// 报告链接使用的分支
    #[arg(long, default_value = "main")]
    branch: String,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::custom()
        .urls_file(cli.urls)
        .keywords_file(cli.keywords)
        .output_dir(cli.output_dir)
        .readme_file(cli.readme)
        .concurrency(cli.concurrency)
        .http_timeout(cli.timeout)
        .github_repo_path(cli.repo)
        .github_branch(cli.branch)
        .verbose(cli.verbose)
        .build();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .init();

    run(&config).await?;
    Ok(())
}
