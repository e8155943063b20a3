//! HTML可见文本提取器
//! 负责从HTML中按文档顺序提取内容类标签内的文本

use std::cell::RefCell;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts
};
use tendril::StrTendril;

/// 承载正文的标签
const CONTENT_TAGS: [&str; 7] = ["pre", "code", "p", "div", "li", "span", "td"];

#[derive(Debug, Default)]
struct TextState {
    /// 当前打开的内容类标签（栈顶为最内层）
    open_content: Vec<&'static str>,
    hidden_depth: usize,
    pending: String,
    targeted: Vec<String>,
    all: Vec<String>,
}

impl TextState {
    /// 结束当前文本节点
    fn flush(&mut self) {
        let text = self.pending.trim();
        if !text.is_empty() {
            if !self.open_content.is_empty() {
                self.targeted.push(text.to_string());
            }
            self.all.push(text.to_string());
        }
        self.pending.clear();
    }

    /// 关闭内容类标签：弹出到同名标签为止，栈中不存在的结束标签直接忽略
    fn close_content(&mut self, name: &str) {
        if let Some(pos) = self.open_content.iter().rposition(|tag| *tag == name) {
            self.open_content.truncate(pos);
        }
    }
}

#[derive(Debug, Default)]
pub struct HtmlTextExtractor {
    state: RefCell<TextState>,
}

impl TokenSink for HtmlTextExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::CharacterTokens(text) => {
                if state.hidden_depth == 0 {
                    state.pending.push_str(&text);
                }
            }
            Token::TagToken(Tag { kind, name, .. }) => {
                state.flush();
                let name = name.as_ref();
                match kind {
                    TagKind::StartTag => {
                        // HTML中 `<div/>` 仍然打开元素
                        if let Some(tag) = CONTENT_TAGS.iter().find(|tag| **tag == name) {
                            state.open_content.push(*tag);
                        }
                        // script/style 内容不可见，切换到原始文本状态
                        match name {
                            "script" => {
                                state.hidden_depth += 1;
                                return TokenSinkResult::RawData(RawKind::ScriptData);
                            }
                            "style" => {
                                state.hidden_depth += 1;
                                return TokenSinkResult::RawData(RawKind::Rawtext);
                            }
                            _ => {}
                        }
                    }
                    TagKind::EndTag => {
                        if CONTENT_TAGS.contains(&name) {
                            state.close_content(name);
                        }
                        if name == "script" || name == "style" {
                            state.hidden_depth = state.hidden_depth.saturating_sub(1);
                        }
                    }
                }
            }
            Token::CommentToken(_) | Token::EOFToken => state.flush(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl HtmlTextExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从HTML字符串提取可见文本
    ///
    /// 优先拼接内容类标签内的文本（换行分隔），为空时回退为整页文本（空格分隔）
    pub fn extract(html: &str) -> String {
        let tokenizer = Tokenizer::new(Self::new(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        let mut state = tokenizer.sink.state.into_inner();
        state.flush();
        if state.targeted.is_empty() {
            state.all.join(" ")
        } else {
            let mut text = state.targeted.join("\n");
            text.push('\n');
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_tags() {
        let html = r#"
            <html><head><title>channel</title>
            <script>var x = "vmess://should-not-appear";</script>
            <style>.a { color: red }</style></head>
            <body>
              <div class="msg"><p>first line</p>
                <pre>vless://uuid@host:443?type=ws#DE%20Node</pre>
              </div>
              <ul><li>item &amp; more</li></ul>
            </body></html>
        "#;

        let text = HtmlTextExtractor::extract(html);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["first line", "vless://uuid@host:443?type=ws#DE%20Node", "item & more"]
        );
        assert!(!text.contains("should-not-appear"));
        assert!(!text.contains("channel"));
    }

    #[test]
    fn test_fallback_to_whole_document() {
        let html = "<html><body><h1>Title</h1><article>trojan://pw@h:443</article>\
                    <script>hidden()</script></body></html>";
        assert_eq!(HtmlTextExtractor::extract(html), "Title trojan://pw@h:443");
    }

    #[test]
    fn test_stray_end_tag_keeps_enclosing_content() {
        let html = "<h1>Title</h1><div><span>a</span></span>vless://id@h:1#DE</div>";
        assert_eq!(HtmlTextExtractor::extract(html), "a\nvless://id@h:1#DE\n");
    }

    #[test]
    fn test_nested_close_and_self_closing_tags() {
        // `</div>` 同时关闭未闭合的 span；`<div/>` 与随后的 `</div>` 配对
        let html = "<h2>lead</h2><div><span>one</div>outside\
                    <div/>inside</div>after";
        assert_eq!(HtmlTextExtractor::extract(html), "one\ninside\n");
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(HtmlTextExtractor::extract("ss://abc@host:1"), "ss://abc@host:1");
    }
}
