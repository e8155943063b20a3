//! 结果聚合器
//! 按协议/国家分类维护去重集合，产出各分类计数

use std::collections::{BTreeMap, BTreeSet};
use indexmap::IndexMap;

use crate::rule::PROTOCOL_CATEGORIES;

/// 单个分类的去重集合（有序，便于输出排序）
pub type Bucket = BTreeSet<String>;

/// 结果聚合器（单次运行内有效）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    protocol_buckets: IndexMap<String, Bucket>,
    country_buckets: IndexMap<String, Bucket>,
}

impl Aggregator {
    /// 初始化全部协议分类与给定的国家分类
    pub fn new<'a>(country_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            protocol_buckets: PROTOCOL_CATEGORIES
                .iter()
                .map(|name| (name.to_string(), Bucket::new()))
                .collect(),
            country_buckets: country_names
                .into_iter()
                .map(|name| (name.to_string(), Bucket::new()))
                .collect(),
        }
    }

    /// 加入协议分类，返回是否为新配置
    pub fn add_protocol(&mut self, category: &str, descriptor: &str) -> bool {
        Self::add(&mut self.protocol_buckets, category, descriptor)
    }

    /// 加入国家分类，返回是否为新配置
    pub fn add_country(&mut self, category: &str, descriptor: &str) -> bool {
        Self::add(&mut self.country_buckets, category, descriptor)
    }

    fn add(buckets: &mut IndexMap<String, Bucket>, category: &str, descriptor: &str) -> bool {
        match buckets.get_mut(category) {
            Some(bucket) => bucket.insert(descriptor.to_string()),
            None => buckets
                .entry(category.to_string())
                .or_default()
                .insert(descriptor.to_string()),
        }
    }

    /// 合并另一份局部结果
    pub fn merge(&mut self, other: Aggregator) {
        for (category, bucket) in other.protocol_buckets {
            self.protocol_buckets.entry(category).or_default().extend(bucket);
        }
        for (category, bucket) in other.country_buckets {
            self.country_buckets.entry(category).or_default().extend(bucket);
        }
    }

    pub fn protocol_buckets(&self) -> &IndexMap<String, Bucket> {
        &self.protocol_buckets
    }

    pub fn country_buckets(&self) -> &IndexMap<String, Bucket> {
        &self.country_buckets
    }

    pub fn protocol_bucket(&self, category: &str) -> Option<&Bucket> {
        self.protocol_buckets.get(category)
    }

    pub fn country_bucket(&self, category: &str) -> Option<&Bucket> {
        self.country_buckets.get(category)
    }

    /// 非空协议分类计数
    pub fn protocol_counts(&self) -> BTreeMap<String, usize> {
        Self::counts(&self.protocol_buckets)
    }

    /// 非空国家分类计数
    pub fn country_counts(&self) -> BTreeMap<String, usize> {
        Self::counts(&self.country_buckets)
    }

    fn counts(buckets: &IndexMap<String, Bucket>) -> BTreeMap<String, usize> {
        buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(category, bucket)| (category.clone(), bucket.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_per_bucket() {
        let mut aggregator = Aggregator::new(["Germany"]);
        assert!(aggregator.add_protocol("Vmess", "vmess://a"));
        assert!(!aggregator.add_protocol("Vmess", "vmess://a"));
        assert!(aggregator.add_country("Germany", "vmess://a"));
        assert!(!aggregator.add_country("Germany", "vmess://a"));

        assert_eq!(aggregator.protocol_bucket("Vmess").map(Bucket::len), Some(1));
        assert_eq!(aggregator.country_bucket("Germany").map(Bucket::len), Some(1));
    }

    #[test]
    fn test_counts_skip_empty_buckets() {
        let mut aggregator = Aggregator::new(["Germany", "France"]);
        aggregator.add_protocol("Trojan", "trojan://b");
        aggregator.add_protocol("Trojan", "trojan://a");
        aggregator.add_country("France", "trojan://a");

        assert_eq!(aggregator.protocol_buckets().len(), PROTOCOL_CATEGORIES.len());
        assert_eq!(aggregator.protocol_counts(), BTreeMap::from([("Trojan".to_string(), 2)]));
        assert_eq!(aggregator.country_counts(), BTreeMap::from([("France".to_string(), 1)]));
    }

    #[test]
    fn test_merge_partial_results() {
        let mut left = Aggregator::new(["Germany"]);
        left.add_protocol("Vless", "vless://1");
        let mut right = Aggregator::new(["Germany"]);
        right.add_protocol("Vless", "vless://1");
        right.add_protocol("Vless", "vless://2");
        right.add_country("Germany", "vless://2");

        left.merge(right);
        assert_eq!(left.protocol_counts()["Vless"], 2);
        assert_eq!(left.country_counts()["Germany"], 1);
    }
}
