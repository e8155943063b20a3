//! 配置名称解析
//! 优先取 `#` 片段，否则按协议从载荷中解析（vmess的ps字段、ssr的remarks参数）

use serde_json::Value;
use tracing::{debug, warn};

use crate::utils::{decode_base64, percent_decode, truncate_chars};

const VMESS_PREFIX: &str = "vmess://";
const SSR_PREFIX: &str = "ssr://";

/// 配置名称解析器
pub struct NameResolver;

impl NameResolver {
    /// 解析配置显示名称，所有方式都失败时返回None
    pub fn resolve(descriptor: &str) -> Option<String> {
        if let Some(name) = Self::fragment_name(descriptor) {
            return Some(name);
        }

        if descriptor.starts_with(SSR_PREFIX) {
            Self::ssr_name(descriptor)
        } else if descriptor.starts_with(VMESS_PREFIX) {
            Self::vmess_name(descriptor)
        } else {
            None
        }
    }

    /// 第一个 `#` 之后的内容，百分号解码并去除首尾空白
    pub fn fragment_name(descriptor: &str) -> Option<String> {
        let (_, fragment) = descriptor.split_once('#')?;
        let name = percent_decode(fragment);
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// vmess://<base64(JSON)> 中的 ps 字段
    pub fn vmess_name(descriptor: &str) -> Option<String> {
        let payload = strip_fragment(descriptor.strip_prefix(VMESS_PREFIX)?);
        let decoded = decode_base64(payload)?;

        let record: Value = match serde_json::from_str(&decoded) {
            Ok(record) => record,
            Err(e) => {
                warn!("解析Vmess名称失败 {}...：{}", truncate_chars(descriptor, 30), e);
                return None;
            }
        };

        match record.get("ps") {
            Some(Value::String(ps)) if !ps.is_empty() => Some(ps.clone()),
            other => {
                debug!("Vmess配置无可用ps字段：{:?}", other);
                None
            }
        }
    }

    /// ssr://<base64(主体/?参数)> 中 remarks 参数（base64编码）
    pub fn ssr_name(descriptor: &str) -> Option<String> {
        let payload = strip_fragment(descriptor.strip_prefix(SSR_PREFIX)?);
        let decoded = decode_base64(payload)?;
        let params = decoded.split("/?").nth(1)?;

        let remarks = url::form_urlencoded::parse(params.as_bytes())
            .find(|(key, value)| key == "remarks" && !value.is_empty())
            .map(|(_, value)| value.into_owned())?;

        decode_base64(&remarks).filter(|name| !name.is_empty())
    }
}

/// 空片段（如 `vmess://...#`）不属于载荷
fn strip_fragment(payload: &str) -> &str {
    payload.split_once('#').map_or(payload, |(body, _)| body)
}
