//! 工具模块：载荷解码、文本处理
pub mod decoder;
pub mod text;

pub use self::decoder::decode_base64;
pub use self::text::{is_persian_like, percent_decode, truncate_chars};
