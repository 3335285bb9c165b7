//! TypeScript type stripping
//!
//! Removes the type-level syntax that generated components commonly use:
//! interfaces and type aliases, annotations on variables, parameters, return
//! types and class fields, generic parameters and arguments, `as`/`satisfies`
//! assertions, non-null `!`, type-only imports and access modifiers.
//! Removal works on the token list: tokens are marked and left out of the
//! output, so the surviving code keeps its original spacing. `enum` and
//! `namespace` are not supported and reach the engine unchanged.

use super::scanner::{is_expression_keyword, lex, TokenKind, TokenStream};
use crate::error::TranspileError;

/// Keywords whose parenthesized part is never a parameter list
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "with", "return", "typeof", "await"];

/// Keywords that cannot end an operand (so `as` and `!` after them are not TS)
const STATEMENT_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "class", "import", "export", "if", "for", "while", "switch",
    "try", "catch", "finally", "break", "continue",
];

const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "abstract",
    "override",
    "declare",
];

const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

const TYPE_PREFIXES: &[&str] = &["keyof", "typeof", "readonly", "unique", "infer", "asserts"];

/// Punctuators allowed inside `<...>` for it to count as a type argument list
const TYPE_ARGUMENT_PUNCTUATORS: &[&str] = &[",", ".", "|", "&", "?", ":", "=>", "=", "...", "-"];

/// Strip TypeScript-only syntax, returning plain JavaScript
pub(crate) fn strip_types(source: &str) -> Result<String, TranspileError> {
    let stream = lex(source)?;
    let mut stripper = TypeStripper::new(&stream);
    stripper.run();
    Ok(stripper.output())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Block,
    ClassBody,
    Paren,
    Bracket,
    Template,
}

struct TypeStripper<'a> {
    stream: &'a TokenStream,
    /// Per token (not per significant position)
    removed: Vec<bool>,
    scopes: Vec<Scope>,
    /// Position of the `{` that opens the class body being approached
    pending_class_body: Option<usize>,
}

impl<'a> TypeStripper<'a> {
    fn new(stream: &'a TokenStream) -> Self {
        Self {
            stream,
            removed: vec![false; stream.tokens.len()],
            scopes: Vec::new(),
            pending_class_body: None,
        }
    }

    fn output(&self) -> String {
        let mut out = String::with_capacity(self.stream.chars.len());
        for (index, token) in self.stream.tokens.iter().enumerate() {
            let text = &self.stream.chars[token.start..token.end];
            if !self.removed[index] {
                out.extend(text);
            } else {
                // Removed types keep their line breaks so positions still line up
                out.extend(text.iter().filter(|&&c| c == '\n'));
            }
        }
        out
    }

    // ─── POSITION HELPERS ────────────────────────────────────────────

    fn len(&self) -> usize {
        self.stream.sig_len()
    }

    fn is(&self, p: usize, text: &str) -> bool {
        self.stream.sig_is(p, text)
    }

    fn is_any(&self, p: usize, texts: &[&str]) -> bool {
        self.stream.sig_is_any(p, texts)
    }

    fn kind(&self, p: usize) -> Option<TokenKind> {
        self.stream.sig_kind(p)
    }

    fn text(&self, p: usize) -> String {
        self.stream.sig_text(p)
    }

    fn is_removed(&self, p: usize) -> bool {
        self.removed[self.stream.sig(p)]
    }

    /// Mark significant positions `from..=to` and the trivia between them
    fn remove(&mut self, from: usize, to: usize) {
        if from > to || to >= self.len() {
            return;
        }
        for token in self.stream.sig(from)..=self.stream.sig(to) {
            self.removed[token] = true;
        }
    }

    fn prev_live(&self, p: usize) -> Option<usize> {
        (0..p).rev().find(|&q| !self.is_removed(q))
    }

    fn scope(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    fn at_statement_start(&self, p: usize) -> bool {
        match self.prev_live(p) {
            None => true,
            Some(q) => self.is_any(q, &[";", "{", "}"]) || self.stream.sig_newline_between(q, p),
        }
    }

    /// Whether the token at `q` can end an operand
    fn ends_operand(&self, q: usize) -> bool {
        match self.kind(q) {
            Some(TokenKind::Ident) => {
                let word = self.text(q);
                !is_expression_keyword(&word) && !STATEMENT_KEYWORDS.contains(&word.as_str())
            }
            Some(
                TokenKind::Number
                | TokenKind::String
                | TokenKind::Template
                | TokenKind::TemplateTail
                | TokenKind::Regex,
            ) => true,
            Some(TokenKind::Punct) => self.is_any(q, &[")", "]", "}"]),
            _ => false,
        }
    }

    fn starts_type(&self, q: usize) -> bool {
        match self.kind(q) {
            Some(
                TokenKind::Ident
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Template
                | TokenKind::TemplateHead,
            ) => true,
            Some(TokenKind::Punct) => self.is_any(q, &["(", "[", "{", "<", "-"]),
            _ => false,
        }
    }

    // ─── MAIN LOOP ───────────────────────────────────────────────────

    fn run(&mut self) {
        let mut p = 0;
        while p < self.len() {
            if self.is_removed(p) {
                p += 1;
                continue;
            }
            p = match self.rule(p) {
                Some(next) => next,
                None => {
                    self.track_scope(p);
                    p + 1
                }
            };
        }
    }

    /// Apply the first matching rule at `p`. `Some(next)` means the rule
    /// consumed a balanced range and scanning resumes at `next`.
    fn rule(&mut self, p: usize) -> Option<usize> {
        match self.kind(p)? {
            TokenKind::Ident => self.ident_rule(p),
            TokenKind::Punct => {
                if self.is(p, "(") {
                    self.parameter_list(p);
                } else if self.is(p, "<") {
                    if let Some(close) = self
                        .type_arguments(p)
                        .or_else(|| self.arrow_type_parameters(p))
                    {
                        self.remove(p, close);
                        return Some(close + 1);
                    }
                } else if self.is(p, "!") && self.is_non_null_assertion(p) {
                    self.remove(p, p);
                    return Some(p + 1);
                }
                None
            }
            _ => None,
        }
    }

    fn ident_rule(&mut self, p: usize) -> Option<usize> {
        if self.at_statement_start(p) {
            if let Some(end) = self.declaration_end(p) {
                self.remove(p, end);
                return Some(end + 1);
            }
            if self.is(p, "import") && !self.is_any(p + 1, &["(", "."]) {
                return Some(self.import_statement(p));
            }
            if self.is(p, "export") && self.is_any(p + 1, &["{", "*"]) {
                return Some(self.import_statement(p));
            }
            if self.is(p, "abstract") && self.is(p + 1, "class") {
                self.remove(p, p);
                return Some(p + 1);
            }
        }

        if self.is_any(p, &["const", "let", "var"]) {
            self.variable_annotation(p);
        } else if self.is(p, "class") {
            self.class_header(p);
        } else if self.is_any(p, &["as", "satisfies"]) {
            if let Some(end) = self.assertion_end(p) {
                self.remove(p, end - 1);
                return Some(end);
            }
        }

        if self.scope() == Some(Scope::ClassBody) && self.at_statement_start(p) {
            self.class_member(p);
        }
        None
    }

    fn track_scope(&mut self, p: usize) {
        match self.kind(p) {
            Some(TokenKind::TemplateHead) => self.scopes.push(Scope::Template),
            Some(TokenKind::TemplateTail) => {
                self.scopes.pop();
            }
            Some(TokenKind::Punct) => {
                if self.is(p, "{") {
                    let scope = if self.pending_class_body == Some(p) {
                        self.pending_class_body = None;
                        Scope::ClassBody
                    } else {
                        Scope::Block
                    };
                    self.scopes.push(scope);
                } else if self.is(p, "(") {
                    self.scopes.push(Scope::Paren);
                } else if self.is(p, "[") {
                    self.scopes.push(Scope::Bracket);
                } else if self.is_any(p, &["}", ")", "]"]) {
                    self.scopes.pop();
                }
            }
            _ => {}
        }
    }

    // ─── DECLARATIONS ────────────────────────────────────────────────

    /// Last position of a type-only statement starting at `p`, if it is one
    fn declaration_end(&self, p: usize) -> Option<usize> {
        let q = if self.is(p, "export") { p + 1 } else { p };
        let named = self.kind(q + 1) == Some(TokenKind::Ident);

        if self.is(q, "declare") && named {
            return Some(self.statement_end(q));
        }
        if self.is(q, "interface") && named && self.is_any(q + 2, &["{", "extends", "<"]) {
            let open = (q + 2..self.len()).find(|&r| self.is(r, "{"))?;
            return self.stream.matching(open);
        }
        if self.is(q, "type") && named {
            let mut r = q + 2;
            if self.is(r, "<") {
                r = self.angle_close(r, false)? + 1;
            }
            if !self.is(r, "=") {
                return None;
            }
            let end = self.scan_type(r + 1);
            if end == r + 1 {
                return Some(self.statement_end(r));
            }
            return Some(if self.is(end, ";") { end } else { end - 1 });
        }
        if self.is(p, "import") && self.is(p + 1, "type") && !self.is(p + 2, "from") {
            if self.is_any(p + 2, &["{", "*"]) || self.kind(p + 2) == Some(TokenKind::Ident) {
                return Some(self.import_end(p));
            }
        }
        if q == p + 1 && self.is(q, "type") && self.is_any(q + 1, &["{", "*"]) {
            return Some(self.import_end(p));
        }
        None
    }

    /// End of a loosely delimited statement: `;`, a closing brace, or a line
    /// break that the next token does not continue
    fn statement_end(&self, p: usize) -> usize {
        let last = self.len().saturating_sub(1);
        let mut r = p;
        while r < self.len() {
            if self.is(r, ";") {
                return r;
            }
            if self.is(r, "{") {
                let Some(close) = self.stream.matching(r) else {
                    return last;
                };
                return if self.is(close + 1, ";") { close + 1 } else { close };
            }
            if self.stream.is_opener(r) {
                r = self.stream.matching(r).unwrap_or(last);
            }
            if r + 1 < self.len()
                && self.stream.sig_newline_between(r, r + 1)
                && !self.is_any(r, &["|", "&", "=", ",", ":", ".", "=>", "<"])
                && !self.is_any(r + 1, &["|", "&", ".", "=>", "?", ":", "extends", "["])
            {
                return r;
            }
            r += 1;
        }
        last
    }

    /// Last position of an import or export-list statement
    fn import_end(&self, p: usize) -> usize {
        let last = self.len().saturating_sub(1);
        let mut r = p + 1;
        while r < self.len() {
            if self.kind(r) == Some(TokenKind::String) {
                return if self.is(r + 1, ";") { r + 1 } else { r };
            }
            if self.is(r, "{") {
                let Some(close) = self.stream.matching(r) else {
                    return last;
                };
                if !self.is(close + 1, "from") {
                    return if self.is(close + 1, ";") { close + 1 } else { close };
                }
                r = close;
            }
            if self.is(r, ";") {
                return r;
            }
            r += 1;
        }
        last
    }

    /// Drop `type X` specifiers from an import/export list and skip the statement
    fn import_statement(&mut self, p: usize) -> usize {
        let end = self.import_end(p);
        if let Some(open) = (p + 1..=end).find(|&r| self.is(r, "{")) {
            if let Some(close) = self.stream.matching(open) {
                self.strip_type_specifiers(open, close);
            }
        }
        end + 1
    }

    fn strip_type_specifiers(&mut self, open: usize, close: usize) {
        let mut start = open + 1;
        while start < close {
            let end = (start..close).find(|&r| self.is(r, ",")).unwrap_or(close);
            // `type X` or `type X as Y`, but not a binding literally named `type`
            if self.is(start, "type") && start + 1 < end {
                if end < close {
                    self.remove(start, end);
                } else {
                    self.remove(start, end - 1);
                    if let Some(comma) = self.prev_live(start).filter(|&c| self.is(c, ",")) {
                        self.remove(comma, comma);
                    }
                }
            }
            start = end + 1;
        }
    }

    // ─── ANNOTATIONS ─────────────────────────────────────────────────

    fn variable_annotation(&mut self, p: usize) {
        let q = p + 1;
        let pattern_end = if self.kind(q) == Some(TokenKind::Ident) {
            q
        } else if self.is_any(q, &["{", "["]) {
            match self.stream.matching(q) {
                Some(close) => close,
                None => return,
            }
        } else {
            return;
        };

        let mut r = pattern_end + 1;
        if self.is(r, "!") && self.is(r + 1, ":") {
            self.remove(r, r);
            r += 1;
        }
        if self.is(r, ":") {
            let end = self.scan_type(r + 1);
            if end > r + 1 {
                self.remove(r, end - 1);
            }
        }
    }

    fn assertion_end(&self, p: usize) -> Option<usize> {
        let prev = self.prev_live(p)?;
        if !self.ends_operand(prev) || !self.starts_type(p + 1) {
            return None;
        }
        if self.is(p + 1, "const") {
            return Some(p + 2);
        }
        let end = self.scan_type(p + 1);
        (end > p + 1).then_some(end)
    }

    fn is_non_null_assertion(&self, p: usize) -> bool {
        let Some(q) = p.checked_sub(1) else {
            return false;
        };
        if self.is_removed(q) {
            return false;
        }
        let adjacent = self.stream.tokens[self.stream.sig(q)].end
            == self.stream.tokens[self.stream.sig(p)].start;
        let operand = match self.kind(q) {
            Some(TokenKind::Ident) => self.ends_operand(q),
            Some(TokenKind::Punct) => self.is_any(q, &[")", "]"]),
            _ => false,
        };
        adjacent && operand
    }

    /// `<...>` after an identifier that is followed by a call, a class body
    /// or a heritage clause. Returns the position of the closing `>`.
    fn type_arguments(&self, p: usize) -> Option<usize> {
        let prev = p.checked_sub(1)?;
        if self.kind(prev) != Some(TokenKind::Ident) || !self.ends_operand(prev) {
            return None;
        }
        let close = self.angle_close(p, true)?;
        self.is_any(close + 1, &["(", "{", "implements", "extends"])
            .then_some(close)
    }

    /// `<T,>` or `<T extends X>` in front of an arrow function's parameters.
    /// Returns the position of the closing `>`.
    fn arrow_type_parameters(&self, p: usize) -> Option<usize> {
        if self.prev_live(p).is_some_and(|q| self.ends_operand(q)) {
            return None;
        }
        let close = self.angle_close(p, true)?;
        if !self.is(close + 1, "(") {
            return None;
        }
        let after = self.stream.matching(close + 1)? + 1;
        let arrow = if self.is(after, ":") {
            self.scan_type(after + 1)
        } else {
            after
        };
        self.is(arrow, "=>").then_some(close)
    }

    // ─── FUNCTIONS ───────────────────────────────────────────────────

    /// Strip parameter and return annotations if the `(` at `p` opens a
    /// parameter list
    fn parameter_list(&mut self, p: usize) {
        let Some(close) = self.stream.matching(p) else {
            return;
        };
        let after = close + 1;
        let function_like = p
            .checked_sub(1)
            .is_some_and(|q| self.names_function(q));

        let return_type_end = if self.is(after, ":") {
            let end = self.scan_type(after + 1);
            (end > after + 1).then_some(end)
        } else {
            None
        };

        let is_parameter_list = match return_type_end {
            Some(end) => self.is(end, "=>") || (function_like && self.is(end, "{")),
            None => self.is(after, "=>") || (function_like && self.is(after, "{")),
        };
        if !is_parameter_list {
            return;
        }

        self.strip_parameters(p, close);
        if let Some(end) = return_type_end {
            self.remove(after, end - 1);
        }
    }

    /// Whether the token before a `(` names a function or method
    fn names_function(&self, q: usize) -> bool {
        if self.is(q, "function") || self.is(q, "]") {
            return true;
        }
        if self.is(q, ">") {
            return self.is_removed(q);
        }
        self.kind(q) == Some(TokenKind::Ident) && !self.is_any(q, CONTROL_KEYWORDS)
    }

    fn strip_parameters(&mut self, open: usize, close: usize) {
        let mut a = open + 1;
        while a < close {
            while self.is_any(a, PARAMETER_MODIFIERS) && a + 1 < close && self.starts_binding(a + 1) {
                self.remove(a, a);
                a += 1;
            }
            if self.is(a, "...") {
                a += 1;
            }

            let pattern_end = if self.is_any(a, &["{", "["]) {
                match self.stream.matching(a) {
                    Some(end) => end,
                    None => return,
                }
            } else {
                a
            };

            let mut r = pattern_end + 1;
            if r < close && self.is(r, "?") {
                self.remove(r, r);
                r += 1;
            }
            if r < close && self.is(r, ":") {
                let end = self.scan_type(r + 1);
                if end > r + 1 && end <= close {
                    self.remove(r, end - 1);
                    r = end;
                }
            }

            // Default value runs to the next top-level comma
            while r < close && !self.is(r, ",") {
                if self.stream.is_opener(r) {
                    match self.stream.matching(r) {
                        Some(end) => r = end,
                        None => return,
                    }
                }
                r += 1;
            }
            a = r + 1;
        }
    }

    fn starts_binding(&self, q: usize) -> bool {
        self.kind(q) == Some(TokenKind::Ident) || self.is_any(q, &["{", "[", "..."])
    }

    // ─── CLASSES ─────────────────────────────────────────────────────

    /// Drop `implements` clauses and remember where the body opens
    fn class_header(&mut self, p: usize) {
        let mut angle = 0usize;
        let mut r = p + 1;
        while r < self.len() {
            if self.is(r, "<") {
                angle += 1;
            } else if self.is(r, ">") {
                angle = angle.saturating_sub(1);
            } else if angle == 0 && self.is(r, "implements") {
                let Some(open) = (r + 1..self.len()).find(|&s| self.is(s, "{")) else {
                    return;
                };
                self.remove(r, open - 1);
                self.pending_class_body = Some(open);
                return;
            } else if angle == 0 && self.is(r, "{") {
                self.pending_class_body = Some(r);
                return;
            } else if self.is_any(r, &["(", "["]) || (angle > 0 && self.is(r, "{")) {
                // Object types in `extends Base<{}, State>` are skipped whole
                match self.stream.matching(r) {
                    Some(end) => r = end,
                    None => return,
                }
            } else if self.is_any(r, &[";", "}", ")"]) {
                return;
            }
            r += 1;
        }
    }

    /// Strip modifiers and the field annotation of a class member at `p`
    fn class_member(&mut self, p: usize) {
        let mut q = p;
        while self.is_any(q, MEMBER_MODIFIERS) && self.member_name_follows(q + 1) {
            self.remove(q, q);
            q += 1;
        }
        while self.is_any(q, &["static", "async", "get", "set"]) && self.member_name_follows(q + 1) {
            q += 1;
        }
        if self.is_any(q, &["*", "#"]) {
            q += 1;
        }

        let name_end = if self.is(q, "[") {
            match self.stream.matching(q) {
                Some(end) => end,
                None => return,
            }
        } else if matches!(
            self.kind(q),
            Some(TokenKind::Ident | TokenKind::String | TokenKind::Number)
        ) {
            q
        } else {
            return;
        };

        let mut r = name_end + 1;
        if self.is_any(r, &["?", "!"]) && self.is_any(r + 1, &[":", ";", "=", "("]) {
            self.remove(r, r);
            r += 1;
        }
        if self.is(r, ":") {
            let end = self.scan_type(r + 1);
            if end > r + 1 {
                self.remove(r, end - 1);
            }
        }
    }

    fn member_name_follows(&self, q: usize) -> bool {
        matches!(
            self.kind(q),
            Some(TokenKind::Ident | TokenKind::String | TokenKind::Number)
        ) || self.is_any(q, &["[", "#", "*"])
    }

    // ─── TYPES ───────────────────────────────────────────────────────

    /// Position just after the type starting at `p`, or `p` if none starts there
    fn scan_type(&self, p: usize) -> usize {
        let mut q = p;
        if self.is_any(q, &["|", "&"]) {
            q += 1;
        }
        loop {
            let Some(next) = self.scan_primary(q) else {
                return p;
            };
            q = next;
            if self.is_any(q, &["|", "&"]) {
                q += 1;
                continue;
            }
            if self.is(q, "extends") {
                // Conditional type: `A extends B ? C : D`
                let check = self.scan_type(q + 1);
                if check > q + 1 && self.is(check, "?") {
                    let yes = self.scan_type(check + 1);
                    if yes > check + 1 && self.is(yes, ":") {
                        let no = self.scan_type(yes + 1);
                        if no > yes + 1 {
                            q = no;
                        }
                    }
                }
            }
            return q;
        }
    }

    fn scan_primary(&self, start: usize) -> Option<usize> {
        let mut q = start;
        while self.is_any(q, TYPE_PREFIXES) && self.starts_type(q + 1) {
            q += 1;
        }
        if self.is(q, "new") && self.is(q + 1, "(") {
            q += 1;
        }

        let mut end = match self.kind(q)? {
            TokenKind::Ident => {
                let mut r = q + 1;
                while self.is(r, ".") && self.kind(r + 1) == Some(TokenKind::Ident) {
                    r += 2;
                }
                if self.is(r, "<") {
                    r = self.angle_close(r, false)? + 1;
                }
                if self.is(r, "is") && self.starts_type(r + 1) {
                    r = self.scan_primary(r + 1)?;
                }
                r
            }
            TokenKind::String | TokenKind::Number | TokenKind::Template => q + 1,
            TokenKind::TemplateHead => self.stream.matching(q)? + 1,
            TokenKind::Punct => {
                if self.is(q, "-") && self.kind(q + 1) == Some(TokenKind::Number) {
                    q + 2
                } else if self.is(q, "(") {
                    let r = self.stream.matching(q)? + 1;
                    if self.is(r, "=>") {
                        let t = self.scan_type(r + 1);
                        if t == r + 1 {
                            return None;
                        }
                        t
                    } else {
                        r
                    }
                } else if self.is(q, "<") {
                    // Generic function type: `<T>(x: T) => T`
                    let r = self.angle_close(q, false)? + 1;
                    if !self.is(r, "(") {
                        return None;
                    }
                    let arrow = self.stream.matching(r)? + 1;
                    if !self.is(arrow, "=>") {
                        return None;
                    }
                    let t = self.scan_type(arrow + 1);
                    if t == arrow + 1 {
                        return None;
                    }
                    t
                } else if self.is_any(q, &["[", "{"]) {
                    self.stream.matching(q)? + 1
                } else {
                    return None;
                }
            }
            _ => return None,
        };

        // Array and indexed access types on the same line
        while self.is(end, "[") && !self.stream.sig_newline_between(end - 1, end) {
            end = self.stream.matching(end)? + 1;
        }
        Some(end)
    }

    /// Position of the `>` closing the `<` at `open`. In strict mode only
    /// type-like tokens may appear in between.
    fn angle_close(&self, open: usize, strict: bool) -> Option<usize> {
        let mut depth = 0usize;
        let mut q = open;
        while q < self.len() {
            if self.is(q, "<") {
                depth += 1;
            } else if self.is(q, ">") {
                depth -= 1;
                if depth == 0 {
                    return Some(q);
                }
            } else if self.stream.is_opener(q) {
                q = self.stream.matching(q)?;
            } else if self.stream.is_closer(q) {
                return None;
            } else if strict && !self.is_type_argument_token(q) {
                return None;
            }
            q += 1;
        }
        None
    }

    fn is_type_argument_token(&self, q: usize) -> bool {
        match self.kind(q) {
            Some(TokenKind::Ident | TokenKind::String | TokenKind::Number | TokenKind::Template) => true,
            Some(TokenKind::Punct) => self.is_any(q, TYPE_ARGUMENT_PUNCTUATORS),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(source: &str) -> String {
        strip_types(source).unwrap()
    }

    /// Collapse whitespace runs so assertions ignore leftover spacing
    fn squash(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_variable_annotation() {
        assert_eq!(strip("const a: number = 5;"), "const a = 5;");
        assert_eq!(
            squash(&strip("let m: Map<string, Array<number>> = new Map();")),
            "let m = new Map();"
        );
    }

    #[test]
    fn test_interface_and_type_alias_removed() {
        let source = "interface Props {\n  a: string;\n}\ntype Size = 'sm'\n  | 'md'\n  | 'lg';\nconst x = 1;";
        assert_eq!(squash(&strip(source)), "const x = 1;");
    }

    #[test]
    fn test_exported_declarations_removed() {
        let source = "export interface A { x: number }\nexport type B<T> = T[];\nexport const c = 1;";
        assert_eq!(squash(&strip(source)), "export const c = 1;");
    }

    #[test]
    fn test_function_parameters_and_return_type() {
        assert_eq!(
            strip("function f(a: string, b?: number): void {}"),
            "function f(a, b) {}"
        );
        assert_eq!(
            squash(&strip("function Card({ title, onClose }: CardProps): JSX.Element { return null; }")),
            "function Card({ title, onClose }) { return null; }"
        );
    }

    #[test]
    fn test_arrow_functions() {
        assert_eq!(
            squash(&strip("const f = async (x: number, { a }: Opts = {}): Promise<void> => {}")),
            "const f = async (x, { a } = {}) => {}"
        );
        assert_eq!(
            squash(&strip("items.map((item: Item, i: number) => item.id + i)")),
            "items.map((item, i) => item.id + i)"
        );
    }

    #[test]
    fn test_generic_calls_and_declarations() {
        assert_eq!(
            strip("const [v, setV] = useState<string | null>(null);"),
            "const [v, setV] = useState(null);"
        );
        assert_eq!(
            squash(&strip("function identity<T>(value: T): T { return value; }")),
            "function identity(value) { return value; }"
        );
    }

    #[test]
    fn test_assertions() {
        assert_eq!(squash(&strip("const el = ref.current!;")), "const el = ref.current;");
        assert_eq!(
            squash(&strip("setV((e.target as HTMLInputElement).value)")),
            "setV((e.target ).value)"
        );
        assert_eq!(squash(&strip("const t = ['a', 'b'] as const;")), "const t = ['a', 'b'] ;");
        assert_eq!(squash(&strip("const n = x as unknown as number;")), "const n = x ;");
    }

    #[test]
    fn test_class_members() {
        let source = r#"
class Counter extends React.Component<Props, State> implements Foo {
  private timer: number | null = null;
  state: State = { count: 0 };
  constructor(public props: Props) { super(props); }
  render(): JSX.Element { return null; }
}
"#;
        assert_eq!(
            squash(&strip(source)),
            "class Counter extends React.Component { timer = null; state = { count: 0 }; constructor(props) { super(props); } render() { return null; } }"
        );
    }

    #[test]
    fn test_class_with_object_type_arguments() {
        let source = r#"
class Counter extends Component<{}, State> {
  state: State = { n: 1 };
  private inc = (): void => this.setState({ n: this.state.n + 1 });
  protected readonly label?: string;
  render() { return null; }
}
"#;
        assert_eq!(
            squash(&strip(source)),
            "class Counter extends Component { state = { n: 1 }; inc = () => this.setState({ n: this.state.n + 1 }); label; render() { return null; } }"
        );
    }

    #[test]
    fn test_class_with_function_type_argument() {
        let source = "class Box extends Base<{ onPick: (id: string) => void }> {\n  public value: number = 0;\n}";
        assert_eq!(squash(&strip(source)), "class Box extends Base { value = 0; }");
    }

    #[test]
    fn test_generic_arrow_functions() {
        assert_eq!(
            squash(&strip("const identity = <T,>(x: T): T => x;")),
            "const identity = (x) => x;"
        );
        assert_eq!(
            squash(&strip("const keys = <T extends object>(o: T) => Object.keys(o);")),
            "const keys = (o) => Object.keys(o);"
        );
        assert_eq!(
            squash(&strip("const pick = async <K extends keyof Item>(k: K): Promise<Item[K]> => load(k);")),
            "const pick = async (k) => load(k);"
        );
    }

    #[test]
    fn test_type_imports() {
        let source = "import type { A } from './a';\nimport { type B, C } from './b';";
        assert_eq!(squash(&strip(source)), "import { C } from './b';");
    }

    #[test]
    fn test_plain_javascript_is_untouched() {
        let source = "const o = { a: 1, b: x ? (y) : z };\nif (a < b && c > d) { run(!flag); }\nconst r = /a+/g;";
        assert_eq!(strip(source), source);
    }

    #[test]
    fn test_catch_clause_annotation() {
        assert_eq!(
            squash(&strip("try { run(); } catch (err: unknown) { log(err); }")),
            "try { run(); } catch (err) { log(err); }"
        );
    }
}
