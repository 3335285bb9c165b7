//! ES module rewriting
//!
//! The engine evaluates a single script, so `import` and `export` are
//! rewritten into plain bindings against the two objects the preview
//! runtime passes in: `React` (which also serves `react-dom` and package
//! placeholders) and `exports`.

use super::json_string;
use super::scanner::{lex, TokenKind, TokenStream};
use crate::error::TranspileError;

/// Local name given to an anonymous default-exported function
const ANONYMOUS_FUNCTION: &str = "__default_export";

/// Local name given to an anonymous default-exported class
const ANONYMOUS_CLASS: &str = "__DefaultExport";

pub(crate) struct ModuleOutput {
    pub code: String,
    /// Package specifiers replaced by placeholders, in import order
    pub external_modules: Vec<String>,
}

/// Rewrite imports and exports of already type-stripped JavaScript
pub(crate) fn rewrite_modules(source: &str) -> Result<ModuleOutput, TranspileError> {
    let stream = lex(source)?;
    let mut rewriter = ModuleRewriter {
        stream: &stream,
        edits: Vec::new(),
        default_export: None,
        named_exports: Vec::new(),
        external_modules: Vec::new(),
    };
    rewriter.run()?;
    Ok(rewriter.finish())
}

/// Replace tokens `start..=end` (token indices, trivia included) with `text`
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

#[derive(Default)]
struct ImportClause {
    default: Option<String>,
    namespace: Option<String>,
    /// `(imported, local)`
    named: Vec<(String, String)>,
}

impl ImportClause {
    fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }
}

struct ModuleRewriter<'a> {
    stream: &'a TokenStream,
    edits: Vec<Edit>,
    default_export: Option<String>,
    /// `(exported, local)`
    named_exports: Vec<(String, String)>,
    external_modules: Vec<String>,
}

impl<'a> ModuleRewriter<'a> {
    fn is(&self, p: usize, text: &str) -> bool {
        self.stream.sig_is(p, text)
    }

    fn kind(&self, p: usize) -> Option<TokenKind> {
        self.stream.sig_kind(p)
    }

    fn text(&self, p: usize) -> String {
        self.stream.sig_text(p)
    }

    fn ident(&self, p: usize) -> Option<String> {
        (self.kind(p) == Some(TokenKind::Ident)).then(|| self.text(p))
    }

    fn syntax_error(&self, p: usize, message: &str) -> TranspileError {
        let at = self.location(p);
        TranspileError::Syntax {
            message: message.to_string(),
            at,
        }
    }

    fn unsupported_export(&self, p: usize, message: &str) -> TranspileError {
        TranspileError::UnsupportedExport {
            message: message.to_string(),
            at: self.location(p),
        }
    }

    fn location(&self, p: usize) -> crate::error::Location {
        let p = p.min(self.stream.sig_len().saturating_sub(1));
        if self.stream.sig_len() == 0 {
            return crate::error::Location { line: 1, column: 1 };
        }
        self.stream.location(self.stream.sig(p))
    }

    /// Include a trailing `;` in a statement ending at `p`
    fn with_semicolon(&self, p: usize) -> usize {
        if self.is(p + 1, ";") {
            p + 1
        } else {
            p
        }
    }

    /// Replace significant positions `from..=to`
    fn replace(&mut self, from: usize, to: usize, text: impl Into<String>) {
        self.edits.push(Edit {
            start: self.stream.sig(from),
            end: self.stream.sig(to),
            text: text.into(),
        });
    }

    /// Remove the keywords at `from..=to` together with the trivia after them
    fn remove_prefix(&mut self, from: usize, to: usize) {
        let end = if to + 1 < self.stream.sig_len() {
            self.stream.sig(to + 1) - 1
        } else {
            self.stream.tokens.len() - 1
        };
        self.edits.push(Edit {
            start: self.stream.sig(from),
            end,
            text: String::new(),
        });
    }

    fn run(&mut self) -> Result<(), TranspileError> {
        let mut p = 0;
        while p < self.stream.sig_len() {
            let after_dot = p > 0 && (self.is(p - 1, ".") || self.is(p - 1, "?."));
            if !after_dot && self.is(p, "import") && !self.is(p + 1, "(") && !self.is(p + 1, ".") {
                p = self.import(p)? + 1;
            } else if !after_dot && self.is(p, "export") {
                p = self.export(p)? + 1;
            } else {
                p += 1;
            }
        }
        Ok(())
    }

    // ─── IMPORTS ─────────────────────────────────────────────────────

    /// Rewrite the import at `p`, returning its last position
    fn import(&mut self, p: usize) -> Result<usize, TranspileError> {
        let mut q = p + 1;

        // Side-effect import: `import "./styles.css";`
        if self.kind(q) == Some(TokenKind::String) {
            let end = self.with_semicolon(q);
            self.replace(p, end, "");
            return Ok(end);
        }

        let mut clause = ImportClause::default();
        if let Some(name) = self.ident(q).filter(|_| !self.is(q, "from") || self.is(q + 1, "from")) {
            clause.default = Some(name);
            q += 1;
            if self.is(q, ",") {
                q += 1;
            }
        }
        if self.is(q, "*") {
            if !self.is(q + 1, "as") {
                return Err(self.syntax_error(q, "Expected 'as' after '*' in import"));
            }
            let name = self
                .ident(q + 2)
                .ok_or_else(|| self.syntax_error(q + 2, "Expected namespace name in import"))?;
            clause.namespace = Some(name);
            q += 3;
        } else if self.is(q, "{") {
            let close = self
                .stream
                .matching(q)
                .ok_or_else(|| self.syntax_error(q, "Unclosed import list"))?;
            clause.named = self.specifiers(q, close)?;
            q = close + 1;
        }

        if !self.is(q, "from") || self.kind(q + 1) != Some(TokenKind::String) {
            return Err(self.syntax_error(q, "Malformed import statement"));
        }
        let module = string_value(&self.text(q + 1));
        let end = self.with_semicolon(q + 1);

        let text = self.import_bindings(&module, &clause)?;
        self.replace(p, end, text);
        Ok(end)
    }

    /// Parse `{ a, b as c }` into `(imported, local)` pairs
    fn specifiers(&self, open: usize, close: usize) -> Result<Vec<(String, String)>, TranspileError> {
        let mut pairs = Vec::new();
        let mut q = open + 1;
        while q < close {
            let imported = match self.kind(q) {
                Some(TokenKind::Ident) => self.text(q),
                Some(TokenKind::String) => string_value(&self.text(q)),
                _ => return Err(self.syntax_error(q, "Expected a name in import or export list")),
            };
            q += 1;
            let local = if self.is(q, "as") {
                let local = match self.kind(q + 1) {
                    Some(TokenKind::Ident) => self.text(q + 1),
                    Some(TokenKind::String) => string_value(&self.text(q + 1)),
                    _ => return Err(self.syntax_error(q + 1, "Expected a name after 'as'")),
                };
                q += 2;
                local
            } else {
                imported.clone()
            };
            pairs.push((imported, local));

            if self.is(q, ",") {
                q += 1;
            } else if q != close {
                return Err(self.syntax_error(q, "Expected ',' in import or export list"));
            }
        }
        Ok(pairs)
    }

    fn import_bindings(&mut self, module: &str, clause: &ImportClause) -> Result<String, TranspileError> {
        let source = match module {
            "react" => "React".to_string(),
            "react-dom" | "react-dom/client" => "React.__dom".to_string(),
            m if m.starts_with('.') || m.starts_with('/') => {
                if clause.is_empty() {
                    return Ok(String::new());
                }
                return Err(TranspileError::UnsupportedImport {
                    module: module.to_string(),
                });
            }
            m => {
                if !self.external_modules.iter().any(|e| e == m) {
                    self.external_modules.push(m.to_string());
                }
                format!("React.__module({})", json_string(m))
            }
        };

        let mut bindings = Vec::new();
        if let Some(name) = &clause.default {
            if name != "React" {
                let value = if source == "React" {
                    source.clone()
                } else {
                    format!("{}.default", source)
                };
                bindings.push(format!("const {} = {};", name, value));
            }
        }
        if let Some(name) = &clause.namespace {
            if name != "React" {
                bindings.push(format!("const {} = {};", name, source));
            }
        }
        if !clause.named.is_empty() {
            let fields: Vec<String> = clause
                .named
                .iter()
                .map(|(imported, local)| {
                    if imported == local {
                        local.clone()
                    } else {
                        format!("{}: {}", json_string(imported), local)
                    }
                })
                .collect();
            bindings.push(format!("const {{ {} }} = {};", fields.join(", "), source));
        }
        Ok(bindings.join(" "))
    }

    // ─── EXPORTS ─────────────────────────────────────────────────────

    /// Rewrite the export at `p`, returning the last position consumed
    fn export(&mut self, p: usize) -> Result<usize, TranspileError> {
        let q = p + 1;

        if self.is(q, "default") {
            return self.export_default(p);
        }
        if self.is(q, "*") {
            return Err(self.unsupported_export(q, "re-exporting with 'export *' is not supported"));
        }
        if self.is(q, "{") {
            let close = self
                .stream
                .matching(q)
                .ok_or_else(|| self.syntax_error(q, "Unclosed export list"))?;
            if self.is(close + 1, "from") {
                return Err(self.unsupported_export(close + 1, "re-exporting from another module is not supported"));
            }
            for (local, exported) in self.specifiers(q, close)? {
                self.named_exports.push((exported, local));
            }
            let end = self.with_semicolon(close);
            self.replace(p, end, "");
            return Ok(end);
        }

        let mut r = q;
        if self.is(r, "async") && self.is(r + 1, "function") {
            r += 1;
        }
        if self.is(r, "function") || self.is(r, "class") {
            let name_at = if self.is(r + 1, "*") { r + 2 } else { r + 1 };
            let name = self
                .ident(name_at)
                .ok_or_else(|| self.syntax_error(name_at, "Exported declaration needs a name"))?;
            self.named_exports.push((name.clone(), name));
            self.remove_prefix(p, p);
            return Ok(p);
        }
        if self.is(r, "const") || self.is(r, "let") || self.is(r, "var") {
            let name = self
                .ident(r + 1)
                .ok_or_else(|| self.unsupported_export(r + 1, "destructured exports are not supported"))?;
            self.named_exports.push((name.clone(), name));
            self.remove_prefix(p, p);
            return Ok(p);
        }

        Err(self.syntax_error(q, "Unexpected token after 'export'"))
    }

    fn export_default(&mut self, p: usize) -> Result<usize, TranspileError> {
        let mut r = p + 2;
        if self.is(r, "async") && self.is(r + 1, "function") {
            r += 1;
        }

        if self.is(r, "function") {
            let name_at = if self.is(r + 1, "*") { r + 2 } else { r + 1 };
            let name = match self.ident(name_at) {
                Some(name) => name,
                None => {
                    // Name the anonymous function so it is still hoisted
                    let at = name_at - 1;
                    let text = format!("{} {}", self.text(at), ANONYMOUS_FUNCTION);
                    self.replace(at, at, text);
                    ANONYMOUS_FUNCTION.to_string()
                }
            };
            self.default_export = Some(name);
            self.remove_prefix(p, p + 1);
            return Ok(name_at - 1);
        }

        if self.is(r, "class") {
            let name = match self.ident(r + 1).filter(|n| n != "extends") {
                Some(name) => name,
                None => {
                    self.replace(r, r, format!("class {}", ANONYMOUS_CLASS));
                    ANONYMOUS_CLASS.to_string()
                }
            };
            self.default_export = Some(name);
            self.remove_prefix(p, p + 1);
            return Ok(r);
        }

        self.replace(p, p + 1, "exports.default =");
        Ok(p + 1)
    }

    // ─── OUTPUT ──────────────────────────────────────────────────────

    fn finish(mut self) -> ModuleOutput {
        self.edits.sort_by_key(|e| e.start);
        let stream = self.stream;
        let mut out = String::with_capacity(stream.chars.len() + 64);
        let mut edits = self.edits.iter().peekable();
        let mut token = 0;

        while token < stream.tokens.len() {
            if let Some(edit) = edits.next_if(|e| e.start == token) {
                let first = stream.tokens[edit.start].start;
                let last = stream.tokens[edit.end].end;
                out.push_str(&edit.text);
                // Keep line numbers stable for error locations
                let newlines = stream.chars[first..last].iter().filter(|&&c| c == '\n').count();
                out.extend(std::iter::repeat('\n').take(newlines));
                token = edit.end + 1;
                continue;
            }
            out.push_str(&stream.text(token));
            token += 1;
        }

        let mut trailer = Vec::new();
        if let Some(name) = &self.default_export {
            trailer.push(format!("exports.default = {};", name));
        }
        for (exported, local) in &self.named_exports {
            trailer.push(format!("exports[{}] = {};", json_string(exported), local));
        }
        if !trailer.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&trailer.join("\n"));
            out.push('\n');
        }

        ModuleOutput {
            code: out,
            external_modules: self.external_modules,
        }
    }
}

/// Contents of a quoted string token
fn string_value(token: &str) -> String {
    let inner = token
        .get(1..token.len().saturating_sub(1))
        .unwrap_or_default();
    inner.replace("\\'", "'").replace("\\\"", "\"")
}
