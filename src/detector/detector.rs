//! 检测器核心：整合提取、过滤、命名、分类，输出聚合结果
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::aggregator::Aggregator;
use super::classifier::CountryClassifier;
use super::filter::ConfigFilter;
use super::name_resolver::NameResolver;
use crate::compiler::{CompiledRuleLibrary, RuleCompiler};
use crate::config::GlobalConfig;
use crate::extractor::PatternExtractor;
use crate::fetcher::PageResult;
use crate::rule::KeywordSource;

/// 配置检测器
#[derive(Debug, Clone)]
pub struct ConfigDetector {
    compiled_lib: CompiledRuleLibrary,
    filter: ConfigFilter,
}

impl ConfigDetector {
    /// 创建检测器（编译一次，处理所有页面）
    pub fn new(source: &KeywordSource, config: &GlobalConfig) -> Self {
        Self {
            compiled_lib: RuleCompiler::compile(source, config.exclude_decorative),
            filter: ConfigFilter::new(config),
        }
    }

    pub fn compiled_lib(&self) -> &CompiledRuleLibrary {
        &self.compiled_lib
    }

    /// 新建空聚合器（含全部协议与国家分类）
    pub fn new_aggregator(&self) -> Aggregator {
        Aggregator::new(self.compiled_lib.country_names())
    }

    /// 处理全部抓取结果（单线程顺序合并）
    pub fn process_pages(&self, pages: &[PageResult]) -> Aggregator {
        let mut aggregator = self.new_aggregator();
        info!("开始处理页面，关联配置名称...");

        for page in pages {
            let Some(text) = page.text() else {
                debug!("跳过无内容页面：{}", page.url);
                continue;
            };
            self.process_text(text, &mut aggregator);
        }

        aggregator
    }

    /// 处理单个页面文本
    pub fn process_text(&self, text: &str, aggregator: &mut Aggregator) {
        // 1. 提取协议候选
        let page_matches = PatternExtractor::extract(text, &self.compiled_lib.protocol_rules);

        // 2. 过滤并加入协议分类
        let mut page_configs = BTreeSet::new();
        for (protocol, configs) in &page_matches {
            for config in configs {
                if self.filter.should_reject(config) {
                    continue;
                }
                aggregator.add_protocol(protocol, config);
                page_configs.insert(config.as_str());
            }
        }

        // 3. 解析名称并匹配国家
        for config in page_configs {
            let Some(name) = NameResolver::resolve(config) else {
                continue;
            };
            if let Some(country) = CountryClassifier::classify(&name, &self.compiled_lib.country_rules) {
                aggregator.add_country(country, config);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleLoader;

    const KEYWORDS: &str = r#"{
        "Vmess": ["vmess://[A-Za-z0-9+/=_-]+"],
        "Vless": ["vless://[^\\s<>]+"],
        "Germany": ["Germany", "DE", "🇩🇪"],
        "UnitedStates": ["United States", "US", "🇺🇸"]
    }"#;

    fn detector() -> ConfigDetector {
        let source = RuleLoader::parse_keywords(KEYWORDS).unwrap();
        ConfigDetector::new(&source, &GlobalConfig::default())
    }

    #[test]
    fn test_vmess_name_from_payload() {
        let pages = vec![PageResult::new("https://a", Some("vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9".into()))];
        let aggregator = detector().process_pages(&pages);

        assert_eq!(aggregator.protocol_counts()["Vmess"], 1);
        assert_eq!(aggregator.country_counts()["Germany"], 1);
    }

    #[test]
    fn test_fragment_name_drives_country() {
        let text = "vless://id@1.2.3.4:443?security=tls#US%20Node";
        let detector = detector();
        let mut aggregator = detector.new_aggregator();
        detector.process_text(text, &mut aggregator);

        assert_eq!(aggregator.country_counts().get("UnitedStates"), Some(&1));
        assert_eq!(aggregator.country_counts().get("Germany"), None);
    }

    #[test]
    fn test_rejected_never_reaches_buckets() {
        let junk = format!("vless://id@h:1#{}", "%25".repeat(20));
        let pages = vec![
            PageResult::new("https://a", Some(junk.clone())),
            PageResult::failed("https://b"),
        ];
        let aggregator = detector().process_pages(&pages);

        assert!(aggregator.protocol_counts().is_empty());
        assert!(aggregator.country_counts().is_empty());
    }

    #[test]
    fn test_unnamed_config_stays_in_protocol_bucket() {
        let pages = vec![PageResult::new("https://a", Some("vless://id@h:1 and vless://id@h:1".into()))];
        let aggregator = detector().process_pages(&pages);

        assert_eq!(aggregator.protocol_counts()["Vless"], 1);
        assert!(aggregator.country_counts().is_empty());
    }
}
