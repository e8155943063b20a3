//! Base64载荷解码工具
//! 兼容URL安全字母表（`-`/`_`）与缺失的`=`填充，失败返回None而非报错

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// 宽松标准引擎：允许非规范尾部比特，填充已在调用前补齐
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 解码vmess/ssr等链接中的base64载荷为UTF-8文本
pub fn decode_base64(payload: &str) -> Option<String> {
    // 1. 归一化为标准字母表
    let mut normalized: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    // 2. 补齐到4的倍数
    let missing_padding = normalized.len() % 4;
    if missing_padding != 0 {
        normalized.extend(std::iter::repeat_n('=', 4 - missing_padding));
    }

    // 3. 解码并校验UTF-8
    let bytes = LENIENT_STANDARD.decode(normalized.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}
