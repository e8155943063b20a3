//! 提取模块：HTML可见文本与协议链接提取
pub mod html_extractor;
pub mod pattern_extractor;

pub use self::html_extractor::HtmlTextExtractor;
pub use self::pattern_extractor::PatternExtractor;
