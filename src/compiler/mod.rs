//! 编译模块：将关键词源编译为可执行的匹配器
pub mod pattern;
pub mod compiler;

pub use self::pattern::{
    CompiledCountryRule, CompiledPattern, CompiledProtocolRule, CompiledRuleLibrary, KeywordMatcher,
};
pub use self::compiler::RuleCompiler;
