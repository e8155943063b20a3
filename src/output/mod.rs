//! 输出模块：分类文件写入与汇总报告
pub mod writer;
pub mod report;

pub use self::writer::{OutputWriter, RunSummary};
pub use self::report::ReportGenerator;
