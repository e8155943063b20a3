//! 编译后模式模型
//! 协议正则与国家关键词编译后的结构

use regex::Regex;

/// 国家关键词匹配器
#[derive(Debug, Clone)]
pub enum KeywordMatcher {
    Abbreviation(Regex), // 缩写整词匹配（忽略大小写）
    Contains(String),    // 包含匹配（已转小写）
}

impl KeywordMatcher {
    /// 简单匹配判断（`name_lower` 为预先转小写的名称）
    pub fn is_match(&self, name: &str, name_lower: &str) -> bool {
        match self {
            KeywordMatcher::Abbreviation(regex) => regex.is_match(name),
            KeywordMatcher::Contains(keyword) => name_lower.contains(keyword.as_str()),
        }
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        match self {
            KeywordMatcher::Abbreviation(r) => r.as_str(),
            KeywordMatcher::Contains(s) => s,
        }
    }
}

/// 编译后的协议正则
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
}

impl CompiledPattern {
    /// 查找全部匹配：无捕获组取整体匹配，有捕获组取第1组
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        if self.regex.captures_len() > 1 {
            self.regex
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect()
        } else {
            self.regex.find_iter(text).map(|m| m.as_str()).collect()
        }
    }
}

/// 协议分类编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledProtocolRule {
    pub name: String,
    pub patterns: Vec<CompiledPattern>,
}

/// 国家分类编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledCountryRule {
    pub name: String,
    pub matchers: Vec<KeywordMatcher>,
}

/// 编译后的规则库（均保持关键词源顺序）
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleLibrary {
    pub protocol_rules: Vec<CompiledProtocolRule>,
    pub country_rules: Vec<CompiledCountryRule>,
}

impl CompiledRuleLibrary {
    /// 国家分类名（按优先级）
    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.country_rules.iter().map(|r| r.name.as_str())
    }
}
