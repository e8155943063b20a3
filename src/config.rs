//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 地址列表文件（每行一个URL）
    pub urls_file: PathBuf,
    // 关键词文件（分类 -> 正则/关键词列表）
    pub keywords_file: PathBuf,
    // 分类结果输出目录（每次运行清空重建）
    pub output_dir: PathBuf,
    // 汇总报告文件
    pub readme_file: PathBuf,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 最大并发请求数
    pub concurrency: usize,
    // 请求User-Agent
    pub user_agent: String,
    // 配置长度上限（达到即过滤）
    pub max_config_length: usize,
    // `%25` 出现次数阈值（达到即过滤）
    pub min_percent25_count: usize,
    // 垃圾配置标记词（忽略大小写）
    pub spam_marker: String,
    // 是否排除装饰性关键词（旗帜emoji等）
    pub exclude_decorative: bool,
    // 报告中的GitHub仓库路径（owner/repo），为空时使用相对链接
    pub github_repo_path: Option<String>,
    // 报告中的GitHub分支
    pub github_branch: String,
    // 报告时间戳的UTC偏移（单位：秒）
    pub report_utc_offset_secs: i32,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            urls_file: PathBuf::from("urls.txt"),
            keywords_file: PathBuf::from("keywords.json"),
            output_dir: PathBuf::from("output_configs"),
            readme_file: PathBuf::from("README.md"),
            http_timeout: 15,
            concurrency: 10,
            user_agent: "Mozilla/5.0 (compatible; rscategorize/0.1)".to_string(),
            max_config_length: 1500,
            min_percent25_count: 15,
            spam_marker: "i_love_".to_string(),
            exclude_decorative: true,
            github_repo_path: None,
            github_branch: "main".to_string(),
            // Asia/Tehran（+03:30，无夏令时）
            report_utc_offset_secs: 3 * 3600 + 30 * 60,
            verbose: false,
        }
    }
}

impl GlobalConfig {
    /// 默认日志级别（未设置 RUST_LOG 时使用）
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn urls_file(mut self, path: PathBuf) -> Self {
        self.config.urls_file = path;
        self
    }

    pub fn keywords_file(mut self, path: PathBuf) -> Self {
        self.config.keywords_file = path;
        self
    }

    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.config.output_dir = path;
        self
    }

    pub fn readme_file(mut self, path: PathBuf) -> Self {
        self.config.readme_file = path;
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// 并发数至少为1
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency.max(1);
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    pub fn max_config_length(mut self, length: usize) -> Self {
        self.config.max_config_length = length;
        self
    }

    pub fn min_percent25_count(mut self, count: usize) -> Self {
        self.config.min_percent25_count = count;
        self
    }

    pub fn spam_marker(mut self, marker: String) -> Self {
        self.config.spam_marker = marker;
        self
    }

    pub fn exclude_decorative(mut self, exclude: bool) -> Self {
        self.config.exclude_decorative = exclude;
        self
    }

    pub fn github_repo_path(mut self, repo: Option<String>) -> Self {
        self.config.github_repo_path = repo;
        self
    }

    pub fn github_branch(mut self, branch: String) -> Self {
        self.config.github_branch = branch;
        self
    }

    pub fn report_utc_offset_secs(mut self, offset: i32) -> Self {
        self.config.report_utc_offset_secs = offset;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
