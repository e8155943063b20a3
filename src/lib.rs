//! rscategorize - 代理配置链接抓取与分类工具

// 导出全局错误类型
pub use self::error::{ScrapeError, ScrapeResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    CategoryKind, CategorySpec, Keyword, KeywordKind, KeywordSource, RuleLoader,
    PROTOCOL_CATEGORIES,
};

// 导出编译模块核心接口
pub use self::compiler::{CompiledRuleLibrary, RuleCompiler, KeywordMatcher};

// 导出提取模块核心接口
pub use self::extractor::{HtmlTextExtractor, PatternExtractor};

// 导出抓取模块核心接口
pub use self::fetcher::{PageFetcher, PageResult};

// 导出工具模块核心接口
pub use self::utils::decode_base64;

// 导出检测模块核心接口
pub use self::detector::{
    Aggregator, ConfigDetector, ConfigFilter, CountryClassifier, NameResolver, RejectReason,
};

// 导出输出模块核心接口
pub use self::output::{OutputWriter, ReportGenerator, RunSummary};

pub use self::runner::run;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod extractor;
pub mod fetcher;
pub mod utils;
pub mod detector;
pub mod output;
pub mod runner;
