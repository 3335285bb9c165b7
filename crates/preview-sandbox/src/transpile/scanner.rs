//! Character scanning and token lexing shared by the transpile passes
//!
//! The passes never build a syntax tree. They walk either raw characters
//! (JSX lowering, where element text is not made of tokens) or the flat token
//! list produced by [`lex`] (type stripping and module rewriting), copying
//! through everything they do not understand.

use crate::error::{Location, TranspileError};

/// Keywords after which an expression, not an operator, is expected
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
    "default",
    "extends",
];

/// Multi-character punctuators, longest first. `>` is always lexed alone so
/// that nested generic closers (`>>`) never need splitting.
const PUNCTUATORS: &[&str] = &[
    "...", "===", "!==", "**=", "<<=", "&&=", "||=", "??=", "=>", "==", "!=", "<=", "&&", "||",
    "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "**", "<<",
];

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn is_expression_keyword(word: &str) -> bool {
    EXPRESSION_KEYWORDS.contains(&word)
}

/// 1-based line and column of a character index
pub(crate) fn location(chars: &[char], pos: usize) -> Location {
    let mut line = 1;
    let mut column = 1;
    for &c in chars.iter().take(pos) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    Location { line, column }
}

pub(crate) fn starts_with(chars: &[char], pos: usize, pattern: &str) -> bool {
    let mut index = pos;
    for p in pattern.chars() {
        if chars.get(index) != Some(&p) {
            return false;
        }
        index += 1;
    }
    true
}

pub(crate) fn collect(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

pub(crate) fn skip_ident(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    while end < chars.len() && is_ident_part(chars[end]) {
        end += 1;
    }
    end
}

pub(crate) fn skip_whitespace(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    while end < chars.len() && chars[end].is_whitespace() {
        end += 1;
    }
    end
}

/// Skip a quoted string starting at `pos`; returns the index after the closing quote
pub(crate) fn skip_string(chars: &[char], pos: usize) -> Result<usize, TranspileError> {
    let quote = chars[pos];
    let mut index = pos + 1;
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            '\n' => break,
            c if c == quote => return Ok(index + 1),
            _ => index += 1,
        }
    }
    Err(TranspileError::Unterminated {
        what: "string literal",
        at: location(chars, pos),
    })
}

pub(crate) fn skip_line_comment(chars: &[char], pos: usize) -> usize {
    let mut index = pos;
    while index < chars.len() && chars[index] != '\n' {
        index += 1;
    }
    index
}

pub(crate) fn skip_block_comment(chars: &[char], pos: usize) -> Result<usize, TranspileError> {
    let mut index = pos + 2;
    while index + 1 < chars.len() {
        if chars[index] == '*' && chars[index + 1] == '/' {
            return Ok(index + 2);
        }
        index += 1;
    }
    Err(TranspileError::Unterminated {
        what: "block comment",
        at: location(chars, pos),
    })
}

/// Skip a regular expression literal, including its flags
pub(crate) fn skip_regex(chars: &[char], pos: usize) -> Result<usize, TranspileError> {
    let mut index = pos + 1;
    let mut in_class = false;
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            '\n' => break,
            '[' => {
                in_class = true;
                index += 1;
            }
            ']' => {
                in_class = false;
                index += 1;
            }
            '/' if !in_class => return Ok(skip_ident(chars, index + 1)),
            _ => index += 1,
        }
    }
    Err(TranspileError::Unterminated {
        what: "regular expression",
        at: location(chars, pos),
    })
}

pub(crate) fn skip_number(chars: &[char], pos: usize) -> usize {
    let mut index = pos;
    while index < chars.len() {
        let c = chars[index];
        let exponent_sign = (c == '+' || c == '-')
            && index > pos
            && matches!(chars[index - 1], 'e' | 'E')
            && !(chars[pos] == '0' && matches!(chars.get(pos + 1), Some('x' | 'X')));
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
            index += 1;
        } else {
            break;
        }
    }
    index
}

// ─── TOKENS ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Whitespace,
    Comment,
    Ident,
    Number,
    String,
    Regex,
    /// Template literal without substitutions
    Template,
    /// `` `...${ ``
    TemplateHead,
    /// `}...${`
    TemplateMiddle,
    /// `` }...` ``
    TemplateTail,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}

/// Lexed source: characters plus a gap-free token list covering them
pub(crate) struct TokenStream {
    pub chars: Vec<char>,
    pub tokens: Vec<Token>,
    /// Indices into `tokens` of the non-trivia tokens
    pub significant: Vec<usize>,
}

impl TokenStream {
    pub fn text(&self, token: usize) -> String {
        let t = self.tokens[token];
        collect(&self.chars, t.start, t.end)
    }

    pub fn is(&self, token: usize, text: &str) -> bool {
        let t = self.tokens[token];
        t.end - t.start == text.chars().count() && starts_with(&self.chars, t.start, text)
    }

    /// Whether a line break separates token `a` from the later token `b`
    pub fn newline_between(&self, a: usize, b: usize) -> bool {
        let from = self.tokens[a].end;
        let to = self.tokens[b].start;
        self.chars[from..to].contains(&'\n')
    }

    pub fn location(&self, token: usize) -> Location {
        location(&self.chars, self.tokens[token].start)
    }

    // The helpers below take positions in `significant`, not token indices.

    pub fn sig_len(&self) -> usize {
        self.significant.len()
    }

    pub fn sig(&self, p: usize) -> usize {
        self.significant[p]
    }

    pub fn sig_is(&self, p: usize, text: &str) -> bool {
        p < self.significant.len() && self.is(self.significant[p], text)
    }

    pub fn sig_is_any(&self, p: usize, texts: &[&str]) -> bool {
        texts.iter().any(|t| self.sig_is(p, t))
    }

    pub fn sig_kind(&self, p: usize) -> Option<TokenKind> {
        self.significant.get(p).map(|&i| self.tokens[i].kind)
    }

    pub fn sig_text(&self, p: usize) -> String {
        self.significant
            .get(p)
            .map(|&i| self.text(i))
            .unwrap_or_default()
    }

    pub fn sig_newline_between(&self, a: usize, b: usize) -> bool {
        self.newline_between(self.significant[a], self.significant[b])
    }

    pub fn is_opener(&self, p: usize) -> bool {
        match self.sig_kind(p) {
            Some(TokenKind::Punct) => self.sig_is_any(p, &["(", "[", "{"]),
            Some(TokenKind::TemplateHead) => true,
            _ => false,
        }
    }

    pub fn is_closer(&self, p: usize) -> bool {
        match self.sig_kind(p) {
            Some(TokenKind::Punct) => self.sig_is_any(p, &[")", "]", "}"]),
            Some(TokenKind::TemplateTail) => true,
            _ => false,
        }
    }

    /// Position of the bracket closing the opener at `open`
    pub fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for p in open..self.sig_len() {
            if self.is_opener(p) {
                depth += 1;
            } else if self.is_closer(p) {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(p);
                }
            }
        }
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Open {
    Brace,
    Template,
}

/// Split JavaScript/TypeScript (without JSX) into tokens
pub(crate) fn lex(source: &str) -> Result<TokenStream, TranspileError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut significant = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        let start = pos;
        let previous = significant.last().map(|&i: &usize| tokens[i]);

        let kind = if c.is_whitespace() {
            pos = skip_whitespace(&chars, pos);
            TokenKind::Whitespace
        } else if starts_with(&chars, pos, "//") {
            pos = skip_line_comment(&chars, pos);
            TokenKind::Comment
        } else if starts_with(&chars, pos, "/*") {
            pos = skip_block_comment(&chars, pos)?;
            TokenKind::Comment
        } else if c == '"' || c == '\'' {
            pos = skip_string(&chars, pos)?;
            TokenKind::String
        } else if c == '`' {
            let (end, open) = skip_template_chunk(&chars, pos + 1, start)?;
            pos = end;
            if open {
                stack.push(Open::Template);
                TokenKind::TemplateHead
            } else {
                TokenKind::Template
            }
        } else if c == '}' && stack.last() == Some(&Open::Template) {
            stack.pop();
            let (end, open) = skip_template_chunk(&chars, pos + 1, start)?;
            pos = end;
            if open {
                stack.push(Open::Template);
                TokenKind::TemplateMiddle
            } else {
                TokenKind::TemplateTail
            }
        } else if is_ident_start(c) {
            pos = skip_ident(&chars, pos);
            TokenKind::Ident
        } else if c.is_ascii_digit() || (c == '.' && chars.get(pos + 1).is_some_and(|d| d.is_ascii_digit())) {
            pos = skip_number(&chars, pos);
            TokenKind::Number
        } else if c == '/' && regex_allowed(&chars, previous) {
            pos = skip_regex(&chars, pos)?;
            TokenKind::Regex
        } else {
            pos += punctuator_len(&chars, pos);
            match c {
                '{' => stack.push(Open::Brace),
                '}' => {
                    stack.pop();
                }
                _ => {}
            }
            TokenKind::Punct
        };

        let token = Token {
            kind,
            start,
            end: pos,
        };
        if !token.is_trivia() {
            significant.push(tokens.len());
        }
        tokens.push(token);
    }

    Ok(TokenStream {
        chars,
        tokens,
        significant,
    })
}

/// Scan template characters up to the closing backtick or a `${`.
/// Returns the end index and whether a substitution was opened.
fn skip_template_chunk(
    chars: &[char],
    mut index: usize,
    start: usize,
) -> Result<(usize, bool), TranspileError> {
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            '`' => return Ok((index + 1, false)),
            '$' if chars.get(index + 1) == Some(&'{') => return Ok((index + 2, true)),
            _ => index += 1,
        }
    }
    Err(TranspileError::Unterminated {
        what: "template literal",
        at: location(chars, start),
    })
}

fn punctuator_len(chars: &[char], pos: usize) -> usize {
    for p in PUNCTUATORS {
        if starts_with(chars, pos, p) {
            // `?.5` is a conditional followed by a number
            if *p == "?." && chars.get(pos + 2).is_some_and(|c| c.is_ascii_digit()) {
                continue;
            }
            return p.chars().count();
        }
    }
    1
}

/// Whether a `/` after `previous` starts a regular expression
fn regex_allowed(chars: &[char], previous: Option<Token>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    match previous.kind {
        TokenKind::Ident => {
            let word = collect(chars, previous.start, previous.end);
            is_expression_keyword(&word)
        }
        TokenKind::Punct => {
            let text = collect(chars, previous.start, previous.end);
            !matches!(text.as_str(), ")" | "]" | "}" | "++" | "--")
        }
        TokenKind::TemplateHead | TokenKind::TemplateMiddle => true,
        _ => false,
    }
}
