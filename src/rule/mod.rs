//! 规则模块：负责关键词源的加载与数据模型定义
pub mod model;
pub mod loader;

// 导出核心接口
pub use self::model::{
    CategoryKind, CategorySpec, Keyword, KeywordKind, KeywordSource,
    PROTOCOL_CATEGORIES, is_abbreviation, is_protocol_category,
};
pub use self::loader::RuleLoader;
