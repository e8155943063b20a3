//! 规则数据模型定义
//! 仅存储分类规则数据（协议正则 / 国家关键词），不包含匹配逻辑

use std::fmt;

/// 固定的协议分类集合（顺序即输出顺序）
pub const PROTOCOL_CATEGORIES: [&str; 8] = [
    "Vmess", "Vless", "Trojan", "ShadowSocks", "ShadowSocksR",
    "Tuic", "Hysteria2", "WireGuard",
];

/// 判断分类标识是否属于协议分类
pub fn is_protocol_category(name: &str) -> bool {
    PROTOCOL_CATEGORIES.contains(&name)
}

/// 分类类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// 协议分类：条目为正则表达式
    Protocol,
    /// 国家分类：条目为匹配关键词（含装饰性标记）
    Country,
}

/// 关键词类型（加载时一次性判定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    /// 参与名称匹配
    Matchable,
    /// 仅用于展示（旗帜emoji、短符号等）
    Decorative,
}

/// 单个关键词/正则条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub kind: KeywordKind,
    pub value: String,
}

impl Keyword {
    /// 国家关键词：1~7个字符且不全是字母数字 => 装饰性
    pub fn keyword(value: impl Into<String>) -> Self {
        let value = value.into();
        let char_count = value.chars().count();
        let is_alphanumeric = value.chars().all(char::is_alphanumeric);
        let kind = if (1..=7).contains(&char_count) && !is_alphanumeric {
            KeywordKind::Decorative
        } else {
            KeywordKind::Matchable
        };
        Self { kind, value }
    }

    /// 协议正则：不做装饰性判定
    pub fn pattern(value: impl Into<String>) -> Self {
        Self {
            kind: KeywordKind::Matchable,
            value: value.into(),
        }
    }

    pub fn is_decorative(&self) -> bool {
        self.kind == KeywordKind::Decorative
    }

    /// 2~3个ASCII大写字母视为国家缩写（需整词匹配）
    pub fn is_abbreviation(&self) -> bool {
        is_abbreviation(&self.value)
    }
}

/// 2~3个ASCII大写字母
pub fn is_abbreviation(value: &str) -> bool {
    (2..=3).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_uppercase())
}

/// 单个分类定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub kind: CategoryKind,
    pub entries: Vec<Keyword>,
}

impl CategorySpec {
    /// 按标识自动判定分类类型并标记条目
    pub fn new<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if is_protocol_category(&name) {
            Self {
                name,
                kind: CategoryKind::Protocol,
                entries: entries.into_iter().map(Keyword::pattern).collect(),
            }
        } else {
            Self {
                name,
                kind: CategoryKind::Country,
                entries: entries.into_iter().map(Keyword::keyword).collect(),
            }
        }
    }

    pub fn is_protocol(&self) -> bool {
        self.kind == CategoryKind::Protocol
    }

    /// 条目原始字符串
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|k| k.value.as_str())
    }
}

impl fmt::Display for CategorySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}条)", self.name, self.entries.len())
    }
}

/// 关键词源：有序的分类定义集合（顺序决定国家匹配优先级）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSource {
    categories: Vec<CategorySpec>,
}

impl KeywordSource {
    pub fn new(categories: Vec<CategorySpec>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    /// 协议分类（按关键词源顺序）
    pub fn protocol_specs(&self) -> impl Iterator<Item = &CategorySpec> {
        self.categories.iter().filter(|c| c.is_protocol())
    }

    /// 国家分类（按关键词源顺序）
    pub fn country_specs(&self) -> impl Iterator<Item = &CategorySpec> {
        self.categories.iter().filter(|c| !c.is_protocol())
    }

    pub fn get(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
