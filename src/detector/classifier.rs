//! 国家分类器
//! 按关键词源顺序匹配配置名称，第一个命中的分类胜出

use tracing::debug;

use crate::compiler::{CompiledCountryRule, RuleCompiler};
use crate::rule::{CategorySpec, KeywordSource};

/// 国家分类器
pub struct CountryClassifier;

impl CountryClassifier {
    /// 返回第一个命中的国家分类；无命中或名称为空时返回None
    pub fn classify<'r>(name: &str, rules: &'r [CompiledCountryRule]) -> Option<&'r str> {
        if name.is_empty() {
            return None;
        }

        let name_lower = name.to_lowercase();
        for rule in rules {
            for matcher in &rule.matchers {
                if matcher.is_match(name, &name_lower) {
                    debug!("名称 '{}' 命中国家 [{}]（关键词：{}）", name, rule.name, matcher.describe());
                    return Some(&rule.name);
                }
            }
        }

        None
    }

    /// 直接使用分类定义匹配（非国家分类被忽略）
    pub fn classify_specs(
        name: &str,
        specs: &[CategorySpec],
        exclude_decorative: bool,
    ) -> Option<String> {
        let library = RuleCompiler::compile(&KeywordSource::new(specs.to_vec()), exclude_decorative);
        Self::classify(name, &library.country_rules).map(str::to_string)
    }
}
