use std::collections::VecDeque;

use tracing::trace;

use crate::error::GrammarError;
use crate::token::{CommentToken, LexicalSource, Mark, ScalarStyle, Token, TokenKind};

fn is_break(c: Option<char>) -> bool {
    matches!(c, Some('\n' | '\r'))
}

fn is_blank_or_end(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\t' | '\n' | '\r'))
}

fn is_flow_indicator(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    line: usize,
    column: usize,
}

/// Lexical source over an in-memory document.
///
/// Besides structural lexemes it reports every `#` comment and every
/// whitespace-only line, each tagged with whether the physical line already
/// carried content. Blank lines that directly follow a plain scalar are
/// swallowed as that scalar's potential continuation, and block scalars
/// swallow their own trailing blank lines.
#[derive(Debug)]
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    // 0-based while scanning; marks are 1-based
    column: usize,
    flow_level: usize,
    // 1-based column of the latest block key or entry indicator, 0 at top level
    block_indent: usize,
    line_has_content: bool,
    line_touched: bool,
    queue: VecDeque<Token>,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            flow_level: 0,
            block_indent: 0,
            line_has_content: false,
            line_touched: false,
            queue: VecDeque::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn mark(&self) -> Mark {
        Mark::new(self.line, self.column + 1)
    }

    fn forward(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
            self.column += 1;
        }
    }

    fn skip_break(&mut self) {
        match self.peek() {
            Some('\r') => {
                self.pos += 1;
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            Some('\n') => self.pos += 1,
            _ => return,
        }
        self.line += 1;
        self.column = 0;
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.forward();
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    fn new_line_state(&mut self) {
        self.line_has_content = false;
        self.line_touched = false;
    }

    fn at_document_marker(&self, marker: char) -> bool {
        self.column == 0
            && (0..3).all(|i| self.peek_at(i) == Some(marker))
            && is_blank_or_end(self.peek_at(3))
    }

    fn push(&mut self, kind: TokenKind, start: Mark) {
        self.queue.push_back(Token::new(kind, start));
    }

    fn fetch(&mut self) -> Result<(), GrammarError> {
        loop {
            let mut tab_in_indent = None;
            while let Some(c @ (' ' | '\t')) = self.peek() {
                if c == '\t'
                    && !self.line_touched
                    && self.flow_level == 0
                    && tab_in_indent.is_none()
                {
                    tab_in_indent = Some(self.mark());
                }
                self.forward();
            }

            match self.peek() {
                None => return Ok(()),
                Some('\n' | '\r') => {
                    let blank = !self.line_touched;
                    let start = Mark::new(self.line, 1);
                    self.skip_break();
                    self.new_line_state();
                    if blank {
                        let comment = CommentToken {
                            text: String::new(),
                            blank: true,
                            after_content: false,
                        };
                        self.push(TokenKind::Comment(comment), start);
                        return Ok(());
                    }
                }
                Some('#') => {
                    self.scan_comment();
                    return Ok(());
                }
                Some(_) => {
                    if let Some(mark) = tab_in_indent {
                        return Err(GrammarError::new(
                            mark,
                            "tabs are not allowed in indentation; use spaces",
                        ));
                    }
                    return self.fetch_structural();
                }
            }
        }
    }

    fn scan_comment(&mut self) {
        let start = self.mark();
        self.forward();
        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if is_break(Some(c)) {
                break;
            }
            raw.push(c);
            self.forward();
        }
        let text = raw.strip_prefix(' ').unwrap_or(&raw).trim_end().to_string();
        let comment = CommentToken {
            text,
            blank: false,
            after_content: self.line_has_content,
        };
        self.line_touched = true;
        self.push(TokenKind::Comment(comment), start);
    }

    fn fetch_structural(&mut self) -> Result<(), GrammarError> {
        let start = self.mark();
        let Some(c) = self.peek() else {
            return Ok(());
        };
        self.line_has_content = true;
        self.line_touched = true;

        if self.column == 0 && self.flow_level == 0 {
            if self.at_document_marker('-') {
                (0..3).for_each(|_| self.forward());
                self.block_indent = 0;
                self.push(TokenKind::DocumentStart, start);
                return Ok(());
            }
            if self.at_document_marker('.') {
                (0..3).for_each(|_| self.forward());
                self.block_indent = 0;
                self.push(TokenKind::DocumentEnd, start);
                return Ok(());
            }
            if c == '%' {
                return self.scan_directive(start);
            }
        }

        let next = self.peek_at(1);
        let kind = match c {
            '[' => {
                self.flow_level += 1;
                TokenKind::FlowSequenceStart
            }
            '{' => {
                self.flow_level += 1;
                TokenKind::FlowMappingStart
            }
            ']' => {
                self.flow_level = self.flow_level.saturating_sub(1);
                TokenKind::FlowSequenceEnd
            }
            '}' => {
                self.flow_level = self.flow_level.saturating_sub(1);
                TokenKind::FlowMappingEnd
            }
            ',' => TokenKind::FlowEntry,
            '-' if is_blank_or_end(next) => {
                if self.flow_level > 0 {
                    return Err(GrammarError::new(
                        start,
                        "block sequence entries are not allowed in a flow collection",
                    ));
                }
                self.block_indent = start.column;
                TokenKind::BlockEntry
            }
            ':' if is_blank_or_end(next)
                || (self.flow_level > 0 && next.is_some_and(is_flow_indicator)) =>
            {
                TokenKind::Value
            }
            '|' | '>' if self.flow_level == 0 => {
                return self.scan_block_scalar(start, c == '>');
            }
            '\'' | '"' => return self.scan_quoted(start, c == '"'),
            '&' => return Err(GrammarError::new(start, "anchors are not supported")),
            '*' => return Err(GrammarError::new(start, "aliases are not supported")),
            '!' => return Err(GrammarError::new(start, "tags are not supported")),
            '?' if is_blank_or_end(next) => {
                return Err(GrammarError::new(start, "explicit mapping keys are not supported"));
            }
            '@' | '`' => {
                return Err(GrammarError::new(
                    start,
                    format!("found character '{c}' that cannot start any token"),
                ));
            }
            _ => return self.scan_plain(start),
        };
        self.forward();
        self.push(kind, start);
        Ok(())
    }

    fn scan_directive(&mut self, start: Mark) -> Result<(), GrammarError> {
        self.forward();
        let mut line = String::new();
        while let Some(c) = self.peek() {
            if is_break(Some(c)) {
                break;
            }
            line.push(c);
            self.forward();
        }
        // a directive's trailing comment never reaches the event stream
        let content = match line.find(" #").or_else(|| line.find("\t#")) {
            Some(idx) => &line[..idx],
            None => line.as_str(),
        };
        let mut parts = content.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| GrammarError::new(start, "expected a directive name"))?
            .to_string();
        let params = parts.map(str::to_string).collect();
        trace!(%name, "scanned directive");
        self.push(TokenKind::Directive { name, params }, start);
        Ok(())
    }

    /// Whether a `:` value indicator follows on the current line.
    fn followed_by_value(&self, adjacent: bool) -> bool {
        let mut idx = self.pos;
        while matches!(self.chars.get(idx), Some(' ' | '\t')) {
            idx += 1;
        }
        if self.chars.get(idx) != Some(&':') {
            return false;
        }
        let next = self.chars.get(idx + 1).copied();
        is_blank_or_end(next)
            || (self.flow_level > 0 && (adjacent || next.is_some_and(is_flow_indicator)))
    }

    fn push_scalar(&mut self, start: Mark, value: String, style: ScalarStyle, adjacent: bool) {
        let key = start.line == self.line && self.followed_by_value(adjacent);
        if key && self.flow_level == 0 {
            self.block_indent = start.column;
        }
        self.push(TokenKind::Scalar { value, style, key }, start);
    }

    fn scan_plain(&mut self, start: Mark) -> Result<(), GrammarError> {
        let indent = self.block_indent;
        let mut value = String::new();
        let mut separator = String::new();
        loop {
            let mut chunk = String::new();
            while let Some(c) = self.peek() {
                if matches!(c, ' ' | '\t' | '\n' | '\r') {
                    break;
                }
                if c == ':' {
                    let next = self.peek_at(1);
                    if is_blank_or_end(next)
                        || (self.flow_level > 0 && next.is_some_and(is_flow_indicator))
                    {
                        break;
                    }
                }
                if self.flow_level > 0 && is_flow_indicator(c) {
                    break;
                }
                chunk.push(c);
                self.forward();
            }
            if chunk.is_empty() {
                break;
            }
            value.push_str(&separator);
            value.push_str(&chunk);
            separator.clear();

            let mut spaces = String::new();
            while let Some(c @ (' ' | '\t')) = self.peek() {
                spaces.push(c);
                self.forward();
            }
            match self.peek() {
                None | Some('#') => break,
                Some('\n' | '\r') => match self.plain_continuation(indent) {
                    Some(folded) => separator = folded,
                    None => break,
                },
                Some(_) => separator = spaces,
            }
        }

        if value.is_empty() {
            return Err(GrammarError::new(start, "expected a scalar"));
        }
        self.push_scalar(start, value, ScalarStyle::Plain, false);
        Ok(())
    }

    /// Looks past a line break for a continuation line of a plain scalar.
    /// When there is none, the position is left at the start of the next
    /// non-blank line, so the blank lines in between are consumed.
    fn plain_continuation(&mut self, indent: usize) -> Option<String> {
        let mut breaks = 0;
        loop {
            self.skip_break();
            breaks += 1;
            let line_start = self.checkpoint();
            self.skip_spaces();
            match self.peek() {
                Some('\n' | '\r') => continue,
                None => {
                    self.restore(line_start);
                    self.new_line_state();
                    return None;
                }
                Some(c) => {
                    let at_marker =
                        self.at_document_marker('-') || self.at_document_marker('.');
                    let too_shallow = self.flow_level == 0 && self.column < indent;
                    if c == '#' || at_marker || too_shallow {
                        self.restore(line_start);
                        self.new_line_state();
                        return None;
                    }
                    return Some(if breaks == 1 {
                        " ".to_string()
                    } else {
                        "\n".repeat(breaks - 1)
                    });
                }
            }
        }
    }

    fn scan_quoted(&mut self, start: Mark, double: bool) -> Result<(), GrammarError> {
        let quote = if double { '"' } else { '\'' };
        let unterminated = || {
            GrammarError::new(
                start,
                "found unexpected end of stream while scanning a quoted scalar",
            )
        };
        self.forward();
        let mut value = String::new();
        loop {
            loop {
                match self.peek() {
                    None => return Err(unterminated()),
                    Some('\'') if !double && self.peek_at(1) == Some('\'') => {
                        value.push('\'');
                        self.forward();
                        self.forward();
                    }
                    Some(c) if c == quote => break,
                    Some('\\') if double => self.scan_escape(&mut value)?,
                    Some(' ' | '\t' | '\n' | '\r') => break,
                    Some(c) => {
                        value.push(c);
                        self.forward();
                    }
                }
            }

            let mut spaces = String::new();
            while let Some(c @ (' ' | '\t')) = self.peek() {
                spaces.push(c);
                self.forward();
            }
            match self.peek() {
                None => return Err(unterminated()),
                Some(c) if c == quote => {
                    value.push_str(&spaces);
                    self.forward();
                    break;
                }
                Some('\n' | '\r') => {
                    let mut breaks = 0;
                    while is_break(self.peek()) {
                        self.skip_break();
                        breaks += 1;
                        self.skip_spaces();
                    }
                    if self.at_document_marker('-') || self.at_document_marker('.') {
                        return Err(GrammarError::new(
                            self.mark(),
                            "found unexpected document separator while scanning a quoted scalar",
                        ));
                    }
                    if breaks == 1 {
                        value.push(' ');
                    } else {
                        (1..breaks).for_each(|_| value.push('\n'));
                    }
                }
                Some(_) => value.push_str(&spaces),
            }
        }

        let style = if double {
            ScalarStyle::DoubleQuoted
        } else {
            ScalarStyle::SingleQuoted
        };
        self.push_scalar(start, value, style, true);
        Ok(())
    }

    fn scan_escape(&mut self, value: &mut String) -> Result<(), GrammarError> {
        let mark = self.mark();
        self.forward();
        let Some(c) = self.peek() else {
            return Err(GrammarError::new(
                mark,
                "found unexpected end of stream while scanning a quoted scalar",
            ));
        };
        if is_break(Some(c)) {
            self.skip_break();
            self.skip_spaces();
            return Ok(());
        }
        let simple = match c {
            '0' => Some('\0'),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            't' | '\t' => Some('\t'),
            'n' => Some('\n'),
            'v' => Some('\x0B'),
            'f' => Some('\x0C'),
            'r' => Some('\r'),
            'e' => Some('\x1B'),
            ' ' => Some(' '),
            '"' => Some('"'),
            '/' => Some('/'),
            '\\' => Some('\\'),
            'N' => Some('\u{85}'),
            '_' => Some('\u{A0}'),
            'L' => Some('\u{2028}'),
            'P' => Some('\u{2029}'),
            _ => None,
        };
        if let Some(ch) = simple {
            value.push(ch);
            self.forward();
            return Ok(());
        }
        let width = match c {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => {
                return Err(GrammarError::new(
                    mark,
                    format!("found unknown escape character '{c}'"),
                ));
            }
        };
        self.forward();
        let mut code = 0u32;
        for _ in 0..width {
            let digit = self.peek().and_then(|d| d.to_digit(16)).ok_or_else(|| {
                GrammarError::new(mark, "expected hexadecimal digits in escape sequence")
            })?;
            code = code * 16 + digit;
            self.forward();
        }
        let ch = char::from_u32(code)
            .ok_or_else(|| GrammarError::new(mark, format!("invalid Unicode escape {code:#x}")))?;
        value.push(ch);
        Ok(())
    }

    fn scan_block_scalar(&mut self, start: Mark, folded: bool) -> Result<(), GrammarError> {
        self.forward();
        let mut chomping = None;
        let mut increment = None;
        for _ in 0..2 {
            match self.peek() {
                Some('+') if chomping.is_none() => chomping = Some(Chomping::Keep),
                Some('-') if chomping.is_none() => chomping = Some(Chomping::Strip),
                Some('0') => {
                    return Err(GrammarError::new(
                        self.mark(),
                        "expected indentation indicator in the range 1-9, but found 0",
                    ));
                }
                Some(c @ '1'..='9') if increment.is_none() => {
                    increment = c.to_digit(10).map(|d| d as usize);
                }
                _ => break,
            }
            self.forward();
        }
        let chomping = chomping.unwrap_or(Chomping::Clip);

        self.skip_spaces();
        match self.peek() {
            // the header comment is delivered ahead of the scalar itself
            Some('#') => self.scan_comment(),
            None | Some('\n' | '\r') => {}
            Some(c) => {
                return Err(GrammarError::new(
                    self.mark(),
                    format!("expected a comment or a line break after a block scalar header, but found '{c}'"),
                ));
            }
        }
        self.skip_break();
        self.new_line_state();

        let min_indent = self.block_indent.max(1);
        let (mut breaks, indent) = match increment {
            Some(n) => {
                let indent = min_indent + n - 1;
                (self.block_scalar_breaks(indent), indent)
            }
            None => self.block_scalar_indentation(min_indent),
        };

        let mut value = String::new();
        let mut line_break = String::new();
        while self.column == indent && self.peek().is_some() {
            value.push_str(&breaks);
            let leading_blank = matches!(self.peek(), Some(' ' | '\t'));
            while let Some(c) = self.peek() {
                if is_break(Some(c)) {
                    break;
                }
                value.push(c);
                self.forward();
            }
            line_break = if is_break(self.peek()) {
                self.skip_break();
                "\n".to_string()
            } else {
                String::new()
            };
            breaks = self.block_scalar_breaks(indent);
            if self.column != indent || self.peek().is_none() {
                break;
            }
            if folded
                && line_break == "\n"
                && !leading_blank
                && !matches!(self.peek(), Some(' ' | '\t'))
            {
                if breaks.is_empty() {
                    value.push(' ');
                }
            } else {
                value.push_str(&line_break);
            }
        }

        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => value.push_str(&line_break),
            Chomping::Keep => {
                value.push_str(&line_break);
                value.push_str(&breaks);
            }
        }

        let style = if folded {
            ScalarStyle::Folded
        } else {
            ScalarStyle::Literal
        };
        self.push(
            TokenKind::Scalar {
                value,
                style,
                key: false,
            },
            start,
        );
        Ok(())
    }

    fn block_scalar_breaks(&mut self, indent: usize) -> String {
        let mut breaks = String::new();
        while self.column < indent && self.peek() == Some(' ') {
            self.forward();
        }
        while is_break(self.peek()) {
            self.skip_break();
            breaks.push('\n');
            while self.column < indent && self.peek() == Some(' ') {
                self.forward();
            }
        }
        breaks
    }

    fn block_scalar_indentation(&mut self, min_indent: usize) -> (String, usize) {
        let mut breaks = String::new();
        let mut max_indent = 0;
        loop {
            match self.peek() {
                Some(' ') => {
                    self.forward();
                    max_indent = max_indent.max(self.column);
                }
                Some('\n' | '\r') => {
                    self.skip_break();
                    breaks.push('\n');
                }
                _ => break,
            }
        }
        (breaks, min_indent.max(max_indent))
    }
}

impl LexicalSource for Scanner {
    fn next_token(&mut self) -> Result<Option<Token>, GrammarError> {
        if self.queue.is_empty() {
            self.fetch()?;
        }
        let token = self.queue.pop_front();
        if let Some(token) = &token {
            trace!(kind = token.kind.describe(), mark = %token.start, "scanned token");
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        while let Some(token) = scanner.next_token().expect("scan should succeed") {
            out.push(token.kind);
        }
        out
    }

    fn plain(value: &str, key: bool) -> TokenKind {
        TokenKind::Scalar {
            value: value.to_string(),
            style: ScalarStyle::Plain,
            key,
        }
    }

    fn comment(text: &str, after_content: bool) -> TokenKind {
        TokenKind::Comment(CommentToken {
            text: text.to_string(),
            blank: false,
            after_content,
        })
    }

    fn blank() -> TokenKind {
        TokenKind::Comment(CommentToken {
            text: String::new(),
            blank: true,
            after_content: false,
        })
    }

    #[test]
    fn flags_comments_that_trail_content() {
        assert_eq!(
            tokens("key: # Comment\n     # lines\n  value\n"),
            vec![
                plain("key", true),
                TokenKind::Value,
                comment("Comment", true),
                comment("lines", false),
                plain("value", false),
            ]
        );
    }

    #[test]
    fn reports_blank_lines_unless_a_plain_scalar_absorbs_them() {
        assert_eq!(tokens("\n"), vec![blank()]);
        assert_eq!(
            tokens("abc: def # c\n\n\n"),
            vec![
                plain("abc", true),
                TokenKind::Value,
                plain("def", false),
                comment("c", true),
                blank(),
                blank(),
            ]
        );
        assert_eq!(
            tokens("key: value\n\n"),
            vec![plain("key", true), TokenKind::Value, plain("value", false)]
        );
    }

    #[test]
    fn drops_directive_comments() {
        assert_eq!(
            tokens("%YAML 1.1 #Comment\n"),
            vec![TokenKind::Directive {
                name: "YAML".to_string(),
                params: vec!["1.1".to_string()],
            }]
        );
    }

    #[test]
    fn block_scalar_header_comment_comes_first() {
        assert_eq!(
            tokens("abc: > # Comment\n    def\n    hij\n\n"),
            vec![
                plain("abc", true),
                TokenKind::Value,
                comment("Comment", true),
                TokenKind::Scalar {
                    value: "def hij\n".to_string(),
                    style: ScalarStyle::Folded,
                    key: false,
                },
            ]
        );
    }

    #[test]
    fn literal_block_scalar_chomping() {
        let scalar = |input: &str| match tokens(input).pop() {
            Some(TokenKind::Scalar { value, .. }) => value,
            other => panic!("expected a scalar, got {other:?}"),
        };
        assert_eq!(scalar("a: |\n  one\n  two\n"), "one\ntwo\n");
        assert_eq!(scalar("a: |-\n  one\n\n"), "one");
        assert_eq!(scalar("a: |+\n  one\n\n"), "one\n\n");
        assert_eq!(scalar("a: |2\n    one\n"), "  one\n");
    }

    #[test]
    fn multi_line_plain_scalar_folds() {
        assert_eq!(
            tokens("key: one\n  two\n\n  three\nnext: x\n"),
            vec![
                plain("key", true),
                TokenKind::Value,
                plain("one two\nthree", false),
                plain("next", true),
                TokenKind::Value,
                plain("x", false),
            ]
        );
    }

    #[test]
    fn compact_mapping_in_sequence_does_not_fold() {
        assert_eq!(
            tokens("- a: b\n  c: d\n"),
            vec![
                TokenKind::BlockEntry,
                plain("a", true),
                TokenKind::Value,
                plain("b", false),
                plain("c", true),
                TokenKind::Value,
                plain("d", false),
            ]
        );
    }

    #[test]
    fn flow_collections() {
        assert_eq!(
            tokens("[ a, b: c, {d: e} ] # x"),
            vec![
                TokenKind::FlowSequenceStart,
                plain("a", false),
                TokenKind::FlowEntry,
                plain("b", true),
                TokenKind::Value,
                plain("c", false),
                TokenKind::FlowEntry,
                TokenKind::FlowMappingStart,
                plain("d", true),
                TokenKind::Value,
                plain("e", false),
                TokenKind::FlowMappingEnd,
                TokenKind::FlowSequenceEnd,
                comment("x", true),
            ]
        );
    }

    #[test]
    fn quoted_scalars() {
        assert_eq!(
            tokens("'it''s': \"a\\tb\\x41\"\n"),
            vec![
                TokenKind::Scalar {
                    value: "it's".to_string(),
                    style: ScalarStyle::SingleQuoted,
                    key: true,
                },
                TokenKind::Value,
                TokenKind::Scalar {
                    value: "a\tbA".to_string(),
                    style: ScalarStyle::DoubleQuoted,
                    key: false,
                },
            ]
        );
    }

    #[test]
    fn hash_inside_a_word_is_content() {
        assert_eq!(tokens("a#b"), vec![plain("a#b", false)]);
    }

    #[test]
    fn rejects_tab_indentation() {
        let err = Scanner::new("\tb: c\n")
            .next_token()
            .expect_err("tab indentation must fail");
        assert_eq!(err.mark, Mark::new(1, 1));
    }

    #[test]
    fn rejects_unterminated_quotes() {
        let mut scanner = Scanner::new("key: \"open");
        let result = std::iter::from_fn(|| scanner.next_token().transpose())
            .collect::<Result<Vec<_>, _>>();
        let err = result.expect_err("unterminated scalar must fail");
        assert_eq!(err.mark, Mark::new(1, 6));
    }
}
