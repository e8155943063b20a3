//! 检测模块：过滤、命名、国家分类与聚合
pub mod filter;
pub mod name_resolver;
pub mod classifier;
pub mod aggregator;
pub mod detector;

// 导出核心接口
pub use self::filter::{ConfigFilter, RejectReason};
pub use self::name_resolver::NameResolver;
pub use self::classifier::CountryClassifier;
pub use self::aggregator::{Aggregator, Bucket};
pub use self::detector::ConfigDetector;
