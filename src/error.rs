//! 全局错误类型定义

use std::path::PathBuf;

use thiserror::Error;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum ScrapeError {
    // 输入相关错误（致命，抓取开始前终止）
    #[error("输入文件不存在：{0}")]
    MissingInput(PathBuf),
    #[error("关键词文件解析失败：{0}")]
    RuleParseError(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type ScrapeResult<T> = Result<T, ScrapeError>;
