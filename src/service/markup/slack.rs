//! GitHub markdown → Slack mrkdwn, on top of `pulldown-cmark`.

use std::sync::Arc;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::{GenericMarkupConverter, MarkupConverter};

// Extra methods on `MarkupConverter` applied by the slack implementation.

impl MarkupConverter {
    pub fn slack() -> Self {
        Self { inner: Arc::new(SlackMarkupConverter) }
    }
}

/// Converts markdown to Slack's mrkdwn dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackMarkupConverter;

impl GenericMarkupConverter for SlackMarkupConverter {
    fn convert(&self, markdown: &str) -> String {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
        let mut writer = MrkdwnWriter::default();

        for event in Parser::new_ext(markdown, options) {
            writer.event(event);
        }

        writer.finish()
    }
}

const CODE_INDENT: &str = "    ";

/// Escape the three characters Slack treats as control characters.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[derive(Default)]
struct MrkdwnWriter {
    out: String,
    at_line_start: bool,
    quote_depth: usize,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    first_cell: bool,
}

impl MrkdwnWriter {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => self.code_text(&text),
            Event::Text(text) => self.write(&escape(&text)),
            Event::Code(code) => self.write(&format!("`{}`", escape(&code))),
            Event::Html(html) | Event::InlineHtml(html) => self.write(&escape(&html)),
            Event::SoftBreak | Event::HardBreak => self.newline(),
            Event::Rule => {
                self.line_start();
                self.write("──────────");
                self.block_end();
            }
            Event::TaskListMarker(checked) => self.write(if checked { "☑ " } else { "☐ " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.line_start(),
            Tag::Heading { .. } => {
                self.line_start();
                self.write("*");
            }
            Tag::BlockQuote { .. } => {
                self.line_start();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.line_start();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.line_start();
                self.lists.push(start);
            }
            Tag::Item => {
                self.line_start();
                let indent = "    ".repeat(self.lists.len().saturating_sub(1));
                let bullet = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{n}. ");
                        *n += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.write(&format!("{indent}{bullet}"));
            }
            Tag::Table(_) => self.line_start(),
            Tag::TableHead | Tag::TableRow => {
                self.line_start();
                self.first_cell = true;
            }
            Tag::TableCell => {
                if !self.first_cell {
                    self.write(" | ");
                }
                self.first_cell = false;
            }
            Tag::Emphasis => self.write("_"),
            Tag::Strong => self.write("*"),
            Tag::Strikethrough => self.write("~"),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => self.write(&format!("<{dest_url}|")),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                // Tight list items have no paragraphs; loose ones should not gain blank lines either.
                if self.lists.is_empty() {
                    self.block_end();
                } else {
                    self.line_start();
                }
            }
            TagEnd::Heading { .. } => {
                self.write("*");
                self.block_end();
            }
            TagEnd::BlockQuote { .. } => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.block_end();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.block_end();
            }
            TagEnd::List { .. } => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.block_end();
                }
            }
            TagEnd::Table => self.block_end(),
            TagEnd::Emphasis => self.write("_"),
            TagEnd::Strong => self.write("*"),
            TagEnd::Strikethrough => self.write("~"),
            TagEnd::Link | TagEnd::Image => self.write(">"),
            _ => {}
        }
    }

    /// Code blocks are indented rather than fenced: the message already wraps
    /// the whole body in a preformatted block, and a nested fence would close it.
    fn code_text(&mut self, text: &str) {
        let text = escape(text);
        let mut lines = text.split('\n').peekable();

        while let Some(line) = lines.next() {
            if !line.is_empty() {
                if self.at_line_start || self.out.is_empty() {
                    self.write(CODE_INDENT);
                }
                self.write(line);
            }
            if lines.peek().is_some() {
                self.newline();
            }
        }
    }

    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.at_line_start || self.out.is_empty() {
            self.out.push_str(&"> ".repeat(self.quote_depth));
            self.at_line_start = false;
        }

        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Move to a fresh line unless already on one.
    fn line_start(&mut self) {
        if !self.out.is_empty() && !self.at_line_start {
            self.newline();
        }
    }

    /// Close a block with a blank line.
    fn block_end(&mut self) {
        if self.out.is_empty() {
            return;
        }

        self.line_start();
        if !self.out.ends_with("\n\n") {
            self.newline();
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}
