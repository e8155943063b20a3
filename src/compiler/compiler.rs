//! 规则编译器核心
//! 将关键词源编译为可执行的匹配器，每次运行仅编译一次

use std::time::Instant;
use regex::{Regex, RegexBuilder};
use tracing::{debug, error};

use super::pattern::{
    CompiledCountryRule, CompiledPattern, CompiledProtocolRule, CompiledRuleLibrary, KeywordMatcher,
};
use crate::rule::{CategorySpec, Keyword, KeywordSource};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库（单条规则失败只跳过该条）
    pub fn compile(source: &KeywordSource, exclude_decorative: bool) -> CompiledRuleLibrary {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译协议正则
        let protocol_rules = source
            .protocol_specs()
            .map(|spec| Self::compile_protocol_rule(spec, &mut stats))
            .collect();

        // 2. 编译国家关键词
        let country_rules = source
            .country_specs()
            .map(|spec| Self::compile_country_rule(spec, exclude_decorative, &mut stats))
            .collect();

        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：协议正则{}条（失败{}条）、缩写关键词{}条、包含关键词{}条、装饰性跳过{}条",
            stats.pattern_count,
            stats.failed_count,
            stats.abbreviation_count,
            stats.contains_count,
            stats.decorative_count
        );

        CompiledRuleLibrary {
            protocol_rules,
            country_rules,
        }
    }

    /// 编译单个协议分类
    fn compile_protocol_rule(spec: &CategorySpec, stats: &mut CompileStats) -> CompiledProtocolRule {
        let mut patterns = Vec::with_capacity(spec.entries.len());
        for raw in spec.values() {
            match Self::compile_single_pattern(raw) {
                Ok(regex) => {
                    stats.pattern_count += 1;
                    patterns.push(CompiledPattern { regex });
                }
                Err(e) => {
                    stats.failed_count += 1;
                    error!("分类 [{}] 的正则 '{}' 编译失败：{}", spec.name, raw, e);
                }
            }
        }

        CompiledProtocolRule {
            name: spec.name.clone(),
            patterns,
        }
    }

    /// 编译单个协议正则（忽略大小写 + 多行）
    pub fn compile_single_pattern(raw_pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(raw_pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
    }

    /// 编译单个国家分类
    fn compile_country_rule(
        spec: &CategorySpec,
        exclude_decorative: bool,
        stats: &mut CompileStats,
    ) -> CompiledCountryRule {
        let mut matchers = Vec::with_capacity(spec.entries.len());
        for keyword in &spec.entries {
            if exclude_decorative && keyword.is_decorative() {
                stats.decorative_count += 1;
                continue;
            }
            match Self::compile_keyword(keyword) {
                Ok(matcher) => {
                    match matcher {
                        KeywordMatcher::Abbreviation(_) => stats.abbreviation_count += 1,
                        KeywordMatcher::Contains(_) => stats.contains_count += 1,
                    }
                    matchers.push(matcher);
                }
                Err(e) => {
                    stats.failed_count += 1;
                    error!("分类 [{}] 的关键词 '{}' 编译失败：{}", spec.name, keyword.value, e);
                }
            }
        }

        CompiledCountryRule {
            name: spec.name.clone(),
            matchers,
        }
    }

    /// 缩写 => 整词正则；其余 => 小写包含匹配
    pub fn compile_keyword(keyword: &Keyword) -> Result<KeywordMatcher, regex::Error> {
        if keyword.is_abbreviation() {
            let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&keyword.value)))
                .case_insensitive(true)
                .build()?;
            Ok(KeywordMatcher::Abbreviation(regex))
        } else {
            Ok(KeywordMatcher::Contains(keyword.value.to_lowercase()))
        }
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    pattern_count: usize,
    failed_count: usize,
    abbreviation_count: usize,
    contains_count: usize,
    decorative_count: usize,
}
