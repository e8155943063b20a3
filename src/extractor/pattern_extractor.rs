//! 协议链接提取器
//! 用编译后的协议正则扫描页面文本，按分类收集候选配置

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::compiler::{CompiledProtocolRule, RuleCompiler};
use crate::rule::CategorySpec;

/// 协议链接提取器
pub struct PatternExtractor;

impl PatternExtractor {
    /// 提取各协议分类的候选配置（去除首尾空白，省略无匹配的分类）
    pub fn extract(
        text: &str,
        rules: &[CompiledProtocolRule],
    ) -> HashMap<String, HashSet<String>> {
        let mut matches: HashMap<String, HashSet<String>> = HashMap::new();

        for rule in rules {
            for pattern in &rule.patterns {
                let found: Vec<String> = pattern
                    .find_all(text)
                    .into_iter()
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();

                if !found.is_empty() {
                    matches.entry(rule.name.clone()).or_default().extend(found);
                }
            }
        }

        debug!(
            "页面提取完成：{}个分类命中，共{}条候选",
            matches.len(),
            matches.values().map(HashSet::len).sum::<usize>()
        );
        matches
    }

    /// 直接使用分类定义提取（仅协议分类参与匹配）
    pub fn extract_specs(
        text: &str,
        specs: &[CategorySpec],
    ) -> HashMap<String, HashSet<String>> {
        let source = crate::rule::KeywordSource::new(specs.to_vec());
        let library = RuleCompiler::compile(&source, true);
        Self::extract(text, &library.protocol_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<CategorySpec> {
        vec![
            CategorySpec::new("Vmess", ["vmess://[A-Za-z0-9+/=_-]+"]),
            CategorySpec::new("Trojan", ["trojan://[^\\s<>]+", "(bad"]),
            CategorySpec::new("Hysteria2", ["hy2://[^\\s]+"]),
            CategorySpec::new("Germany", ["vmess://"]),
        ]
    }

    #[test]
    fn test_extract_by_category() {
        let text = "vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9\n\
                    TROJAN://secret@1.2.3.4:443#Node   \n\
                    vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9 again";
        let matches = PatternExtractor::extract_specs(text, &specs());

        assert_eq!(matches.len(), 2);
        assert_eq!(matches["Vmess"].len(), 1);
        assert!(matches["Trojan"].contains("TROJAN://secret@1.2.3.4:443#Node"));
        // 无匹配的协议分类与国家分类均不出现
        assert!(!matches.contains_key("Hysteria2"));
        assert!(!matches.contains_key("Germany"));
    }

    #[test]
    fn test_empty_text() {
        assert!(PatternExtractor::extract_specs("", &specs()).is_empty());
    }
}
