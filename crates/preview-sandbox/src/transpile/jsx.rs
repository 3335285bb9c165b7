//! JSX lowering
//!
//! Rewrites JSX elements into `React.createElement(type, props, ...children)`
//! calls, leaving every other character of the source untouched. Runs before
//! type stripping because JSX text (apostrophes, `//` in URLs) would otherwise
//! confuse the token lexer.

use super::json_string;
use super::scanner::{
    collect, is_expression_keyword, is_ident_part, is_ident_start, location, skip_block_comment,
    skip_ident, skip_line_comment, skip_number, skip_regex, skip_string, skip_whitespace,
    starts_with,
};
use crate::error::TranspileError;

/// Lower all JSX in `source`
pub(crate) fn lower_jsx(source: &str) -> Result<String, TranspileError> {
    let chars: Vec<char> = source.chars().collect();
    let mut lowering = JsxLowering {
        chars: &chars,
        pos: 0,
    };
    lowering.code(Stop::EndOfInput)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stop {
    EndOfInput,
    /// Unmatched `}` ending an expression container or template substitution
    CloseBrace,
}

/// What came before the current position, for telling `<` and `/` apart
#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Operator,
    Keyword,
    Closer,
    Value,
}

impl Prev {
    fn expects_expression(self) -> bool {
        matches!(self, Prev::Start | Prev::Operator | Prev::Keyword)
    }
}

enum Attribute {
    Spread(String),
    Pair(String, String),
}

struct JsxLowering<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> JsxLowering<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn copy_to(&mut self, end: usize, out: &mut String) {
        out.extend(&self.chars[self.pos..end]);
        self.pos = end;
    }

    fn error(&self, message: impl Into<String>) -> TranspileError {
        TranspileError::Jsx {
            message: message.into(),
            at: location(self.chars, self.pos),
        }
    }

    fn expect(&mut self, c: char, context: &str) -> Result<(), TranspileError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}' {}", c, context)))
        }
    }

    // ─── PLAIN CODE ──────────────────────────────────────────────────

    /// Copy code through, lowering any JSX found at expression position
    fn code(&mut self, stop: Stop) -> Result<String, TranspileError> {
        let mut out = String::new();
        let mut prev = Prev::Start;
        let mut depth = 0usize;
        let start = self.pos;

        loop {
            let Some(c) = self.peek() else {
                if stop == Stop::CloseBrace {
                    return Err(TranspileError::Unterminated {
                        what: "expression container",
                        at: location(self.chars, start),
                    });
                }
                return Ok(out);
            };

            match c {
                c if c.is_whitespace() => self.copy_to(self.pos + 1, &mut out),
                '/' if self.peek_at(1) == Some('/') => {
                    let end = skip_line_comment(self.chars, self.pos);
                    self.copy_to(end, &mut out);
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let end = skip_block_comment(self.chars, self.pos)?;
                    self.copy_to(end, &mut out);
                }
                '"' | '\'' => {
                    let end = skip_string(self.chars, self.pos)?;
                    self.copy_to(end, &mut out);
                    prev = Prev::Value;
                }
                '`' => {
                    self.template(&mut out)?;
                    prev = Prev::Value;
                }
                '/' if prev.expects_expression() => {
                    let end = skip_regex(self.chars, self.pos)?;
                    self.copy_to(end, &mut out);
                    prev = Prev::Value;
                }
                '<' if prev.expects_expression() && self.at_element_start() => {
                    let element = self.element()?;
                    out.push_str(&element);
                    prev = Prev::Value;
                }
                '{' => {
                    depth += 1;
                    self.copy_to(self.pos + 1, &mut out);
                    prev = Prev::Operator;
                }
                '}' => {
                    if depth == 0 && stop == Stop::CloseBrace {
                        return Ok(out);
                    }
                    depth = depth.saturating_sub(1);
                    self.copy_to(self.pos + 1, &mut out);
                    prev = Prev::Closer;
                }
                ')' | ']' => {
                    self.copy_to(self.pos + 1, &mut out);
                    prev = Prev::Closer;
                }
                c if is_ident_start(c) => {
                    let end = skip_ident(self.chars, self.pos);
                    let word = collect(self.chars, self.pos, end);
                    self.copy_to(end, &mut out);
                    prev = if is_expression_keyword(&word) {
                        Prev::Keyword
                    } else {
                        Prev::Value
                    };
                }
                c if c.is_ascii_digit() => {
                    let end = skip_number(self.chars, self.pos);
                    self.copy_to(end, &mut out);
                    prev = Prev::Value;
                }
                _ => {
                    self.copy_to(self.pos + 1, &mut out);
                    prev = Prev::Operator;
                }
            }
        }
    }

    /// Copy a template literal, lowering JSX inside `${...}`
    fn template(&mut self, out: &mut String) -> Result<(), TranspileError> {
        let start = self.pos;
        self.copy_to(self.pos + 1, out);

        loop {
            match self.peek() {
                None => {
                    return Err(TranspileError::Unterminated {
                        what: "template literal",
                        at: location(self.chars, start),
                    })
                }
                Some('\\') => {
                    let end = (self.pos + 2).min(self.chars.len());
                    self.copy_to(end, out);
                }
                Some('`') => {
                    self.copy_to(self.pos + 1, out);
                    return Ok(());
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    self.copy_to(self.pos + 2, out);
                    let inner = self.code(Stop::CloseBrace)?;
                    out.push_str(&inner);
                    self.copy_to(self.pos + 1, out);
                }
                Some(_) => self.copy_to(self.pos + 1, out),
            }
        }
    }

    fn at_element_start(&self) -> bool {
        match self.peek_at(1) {
            Some('>') => true,
            Some(c) => is_ident_start(c) && !self.at_type_parameters(),
            None => false,
        }
    }

    /// `<T,>` or `<T extends ...>` opening a generic arrow function
    fn at_type_parameters(&self) -> bool {
        let name_end = skip_ident(self.chars, self.pos + 1);
        let next = skip_whitespace(self.chars, name_end);
        if self.chars.get(next) == Some(&',') {
            return true;
        }
        if next == name_end || !starts_with(self.chars, next, "extends") {
            return false;
        }
        let after = next + "extends".len();
        match self.chars.get(after) {
            Some(&c) if !is_ident_part(c) => !matches!(
                self.chars.get(skip_whitespace(self.chars, after)),
                None | Some('=' | '>' | '/')
            ),
            _ => false,
        }
    }

    // ─── ELEMENTS ────────────────────────────────────────────────────

    /// Parse one element starting at `<` and return its lowered call
    fn element(&mut self) -> Result<String, TranspileError> {
        let open_pos = self.pos;
        self.pos += 1;

        if self.peek() == Some('>') {
            self.pos += 1;
            let children = self.children("", open_pos)?;
            return Ok(create_element("React.Fragment", "null", &children));
        }

        let name = self.tag_name();
        let mut attributes = Vec::new();
        let self_closing = loop {
            self.skip_tag_trivia()?;
            match self.peek() {
                None => {
                    return Err(TranspileError::Unterminated {
                        what: "JSX element",
                        at: location(self.chars, open_pos),
                    })
                }
                Some('/') => {
                    self.pos += 1;
                    self.expect('>', "to close self-closing tag")?;
                    break true;
                }
                Some('>') => {
                    self.pos += 1;
                    break false;
                }
                Some('{') => {
                    self.pos += 1;
                    self.skip_tag_trivia()?;
                    if !starts_with(self.chars, self.pos, "...") {
                        return Err(self.error("expected '...' in attribute spread"));
                    }
                    self.pos += 3;
                    let expression = self.code(Stop::CloseBrace)?;
                    self.expect('}', "after spread attribute")?;
                    attributes.push(Attribute::Spread(expression));
                }
                Some(c) if is_ident_start(c) => {
                    let key = self.attribute_name();
                    self.skip_tag_trivia()?;
                    let value = if self.peek() == Some('=') {
                        self.pos += 1;
                        self.skip_tag_trivia()?;
                        self.attribute_value()?
                    } else {
                        "true".to_string()
                    };
                    attributes.push(Attribute::Pair(key, value));
                }
                Some(c) => return Err(self.error(format!("unexpected '{}' in tag <{}>", c, name))),
            }
        };

        let children = if self_closing {
            Vec::new()
        } else {
            self.children(&name, open_pos)?
        };

        let tag = if is_intrinsic(&name) {
            json_string(&name)
        } else {
            name
        };
        Ok(create_element(&tag, &props_object(&attributes), &children))
    }

    fn tag_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_part(c) || c == '-' || c == '.' || c == ':' {
                self.pos += 1;
            } else {
                break;
            }
        }
        collect(self.chars, start, self.pos)
    }

    fn attribute_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_part(c) || c == '-' || c == ':' {
                self.pos += 1;
            } else {
                break;
            }
        }
        collect(self.chars, start, self.pos)
    }

    fn attribute_value(&mut self) -> Result<String, TranspileError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let start = self.pos;
                self.pos += 1;
                let value_start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(TranspileError::Unterminated {
                        what: "attribute string",
                        at: location(self.chars, start),
                    });
                }
                let raw = collect(self.chars, value_start, self.pos);
                self.pos += 1;
                Ok(json_string(&decode_entities(&raw)))
            }
            Some('{') => {
                self.pos += 1;
                let expression = self.code(Stop::CloseBrace)?;
                self.expect('}', "after attribute expression")?;
                if is_blank(&expression) {
                    return Err(self.error("JSX attributes must only be assigned a non-empty expression"));
                }
                Ok(format!("({})", expression))
            }
            Some('<') if self.at_element_start() => self.element(),
            _ => Err(self.error("expected attribute value")),
        }
    }

    /// Whitespace and JS comments between attributes
    fn skip_tag_trivia(&mut self) -> Result<(), TranspileError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.pos += 1,
                Some('/') if self.peek_at(1) == Some('/') => {
                    self.pos = skip_line_comment(self.chars, self.pos)
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.pos = skip_block_comment(self.chars, self.pos)?
                }
                _ => return Ok(()),
            }
        }
    }

    /// Parse children up to and including the closing tag for `name`
    fn children(&mut self, name: &str, open_pos: usize) -> Result<Vec<String>, TranspileError> {
        let mut children = Vec::new();
        let mut text_start = self.pos;

        loop {
            match self.peek() {
                None => {
                    return Err(TranspileError::Unterminated {
                        what: "JSX element",
                        at: location(self.chars, open_pos),
                    })
                }
                Some('<') => {
                    push_text(&collect(self.chars, text_start, self.pos), &mut children);
                    if self.peek_at(1) == Some('/') {
                        let close_pos = self.pos;
                        self.pos += 2;
                        self.skip_tag_trivia()?;
                        let closing = self.tag_name();
                        self.skip_tag_trivia()?;
                        self.expect('>', "to end closing tag")?;
                        if closing != name {
                            return Err(TranspileError::MismatchedTag {
                                expected: name.to_string(),
                                found: closing,
                                at: location(self.chars, close_pos),
                            });
                        }
                        return Ok(children);
                    }
                    if !self.at_element_start() {
                        return Err(self.error("unexpected '<' in JSX text"));
                    }
                    children.push(self.element()?);
                    text_start = self.pos;
                }
                Some('{') => {
                    push_text(&collect(self.chars, text_start, self.pos), &mut children);
                    self.pos += 1;
                    let expression = self.code(Stop::CloseBrace)?;
                    self.expect('}', "after child expression")?;
                    if !is_blank(&expression) {
                        children.push(format!("({})", expression));
                    }
                    text_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }
}

fn create_element(tag: &str, props: &str, children: &[String]) -> String {
    let mut call = format!("React.createElement({}, {}", tag, props);
    for child in children {
        call.push_str(", ");
        call.push_str(child);
    }
    call.push(')');
    call
}

fn props_object(attributes: &[Attribute]) -> String {
    if attributes.is_empty() {
        return "null".to_string();
    }
    let entries: Vec<String> = attributes
        .iter()
        .map(|attribute| match attribute {
            Attribute::Spread(expression) => format!("...({})", expression),
            Attribute::Pair(key, value) => format!("{}: {}", json_string(key), value),
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Lowercase names and namespaced names are host elements; member
/// expressions and capitalized names are components
fn is_intrinsic(name: &str) -> bool {
    if name.contains('.') {
        return false;
    }
    name.contains(':') || name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// Expression container holding nothing but whitespace and comments
fn is_blank(expression: &str) -> bool {
    let chars: Vec<char> = expression.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        if chars[index].is_whitespace() {
            index += 1;
        } else if starts_with(&chars, index, "//") {
            index = skip_line_comment(&chars, index);
        } else if starts_with(&chars, index, "/*") {
            match skip_block_comment(&chars, index) {
                Ok(end) => index = end,
                Err(_) => return false,
            }
        } else {
            return false;
        }
    }
    true
}

fn push_text(raw: &str, children: &mut Vec<String>) {
    let cleaned = clean_text(&decode_entities(raw));
    if !cleaned.is_empty() {
        children.push(json_string(&cleaned));
    }
}

/// JSX whitespace rules: lines are trimmed, lines holding only whitespace
/// vanish, and the remaining lines are joined with single spaces
fn clean_text(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    let last_non_empty = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);

    let mut text = String::new();
    for (index, line) in lines.iter().enumerate() {
        let mut trimmed = line.replace('\t', " ");
        if index != 0 {
            trimmed = trimmed.trim_start_matches(' ').to_string();
        }
        if index != lines.len() - 1 {
            trimmed = trimmed.trim_end_matches(' ').to_string();
        }
        if !trimmed.is_empty() {
            if index != last_non_empty {
                trimmed.push(' ');
            }
            text.push_str(&trimmed);
        }
    }
    text
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&after[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = name.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "middot" => '\u{b7}',
        "bull" => '\u{2022}',
        "times" => '\u{d7}',
        "rarr" => '\u{2192}',
        "larr" => '\u{2190}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "deg" => '\u{b0}',
        "euro" => '\u{20ac}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_element_with_text() {
        let out = lower_jsx(r#"const a = <div className="box">Hello</div>;"#).unwrap();
        assert_eq!(
            out,
            r#"const a = React.createElement("div", {"className": "box"}, "Hello");"#
        );
    }

    #[test]
    fn test_component_and_expressions() {
        let out = lower_jsx("return <Card title={t} open {...rest}>{items.length}</Card>").unwrap();
        assert_eq!(
            out,
            r#"return React.createElement(Card, {"title": (t), "open": true, ...(rest)}, (items.length))"#
        );
    }

    #[test]
    fn test_nested_jsx_inside_expression() {
        let out = lower_jsx("<ul>{items.map(i => <li key={i}>{i}</li>)}</ul>").unwrap();
        assert_eq!(
            out,
            r#"React.createElement("ul", null, (items.map(i => React.createElement("li", {"key": (i)}, (i)))))"#
        );
    }

    #[test]
    fn test_fragment_and_self_closing() {
        let out = lower_jsx("(<><br /><Icon.Star size={4}/></>)").unwrap();
        assert_eq!(
            out,
            r#"(React.createElement(React.Fragment, null, React.createElement("br", null), React.createElement(Icon.Star, {"size": (4)})))"#
        );
    }

    #[test]
    fn test_whitespace_and_entities() {
        let out = lower_jsx("<p>\n  Don&apos;t   stop\n  now &amp; later\n</p>").unwrap();
        assert_eq!(
            out,
            r#"React.createElement("p", null, "Don't   stop now & later")"#
        );
    }

    #[test]
    fn test_comment_children_are_dropped() {
        let out = lower_jsx("<div>{/* note */}<span>x</span> </div>").unwrap();
        assert_eq!(
            out,
            r#"React.createElement("div", null, React.createElement("span", null, "x"), " ")"#
        );
    }

    #[test]
    fn test_comparisons_are_not_jsx() {
        let source = "if (a < b && c<d) { x = y / 2; }";
        assert_eq!(lower_jsx(source).unwrap(), source);
    }

    #[test]
    fn test_generics_are_not_jsx() {
        let source = "const [v, setV] = useState<string>('');";
        assert_eq!(lower_jsx(source).unwrap(), source);
    }

    #[test]
    fn test_generic_arrow_parameters_are_not_jsx() {
        let source = "const identity = <T,>(x: T): T => x;";
        assert_eq!(lower_jsx(source).unwrap(), source);

        let source = "const keys = <T extends object>(o: T) => Object.keys(o);";
        assert_eq!(lower_jsx(source).unwrap(), source);

        let out = lower_jsx("const wrap = <T,>(x: T) => <b>{x}</b>;").unwrap();
        assert_eq!(
            out,
            r#"const wrap = <T,>(x: T) => React.createElement("b", null, (x));"#
        );
    }

    #[test]
    fn test_extends_attribute_is_still_jsx() {
        let out = lower_jsx("<Rule extends=\"base\" />").unwrap();
        assert_eq!(out, r#"React.createElement(Rule, {"extends": "base"})"#);
    }

    #[test]
    fn test_text_with_apostrophes_and_urls() {
        let out = lower_jsx("<a href=\"https://x.dev\">it's https://x.dev</a>").unwrap();
        assert_eq!(
            out,
            r#"React.createElement("a", {"href": "https://x.dev"}, "it's https://x.dev")"#
        );
    }

    #[test]
    fn test_template_with_jsx() {
        let out = lower_jsx("const s = `${ok ? <b/> : ''}`;").unwrap();
        assert_eq!(out, "const s = `${ok ? React.createElement(\"b\", null) : ''}`;");
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = lower_jsx("<div><span></div></span>").unwrap_err();
        assert!(matches!(err, TranspileError::MismatchedTag { .. }));
    }

    #[test]
    fn test_unterminated_element() {
        let err = lower_jsx("return <div>").unwrap_err();
        assert!(matches!(err, TranspileError::Unterminated { .. }));
    }
}
