//! Driver for the JavaScript preview runtime
//!
//! Owns one boa [`Context`] with the runtime prelude loaded and talks to it
//! through the `__preview` global, whose methods reply with JSON.

use boa_engine::{Context, Script, Source};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::mount::{ConsoleEntry, ExportSlot};

const PRELUDE: &str = include_str!("preview_runtime.js");

#[derive(Debug, Deserialize)]
pub(crate) struct LoadReply {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveReply {
    pub ok: bool,
    #[serde(default)]
    pub slot: Option<ExportSlot>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MountReply {
    pub ok: bool,
    #[serde(default)]
    pub markup: String,
    #[serde(default)]
    pub passes: u32,
    #[serde(default)]
    pub logs: Vec<ConsoleEntry>,
    #[serde(default)]
    pub placeholders: Vec<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) struct Runtime {
    context: Context,
}

impl Runtime {
    /// Fresh context with limits applied and the prelude evaluated
    pub fn new(config: &SandboxConfig) -> Result<Self, SandboxError> {
        let mut context = Context::default();

        let mut limits = context.runtime_limits();
        limits.set_loop_iteration_limit(config.loop_iteration_limit);
        limits.set_recursion_limit(config.recursion_limit);
        context.set_runtime_limits(limits);

        context
            .eval(Source::from_bytes(PRELUDE))
            .map_err(|e| SandboxError::Engine(format!("Failed to load preview runtime: {}", e)))?;

        let mut runtime = Self { context };
        runtime.call_raw(&format!(
            "__preview.configure({{ maxRenderPasses: {} }})",
            config.max_render_passes
        ))?;
        Ok(runtime)
    }

    /// Parse the module wrapper around transpiled code and register it.
    /// A parse error is returned as its message.
    pub fn define(&mut self, code: &str) -> Result<Result<(), String>, SandboxError> {
        let wrapped = format!(
            "__preview.define(function (React, exports) {{\n\"use strict\";\n{}\n}});",
            code
        );
        let script = match Script::parse(Source::from_bytes(&wrapped), None, &mut self.context) {
            Ok(script) => script,
            Err(e) => return Ok(Err(e.to_string())),
        };
        script
            .evaluate(&mut self.context)
            .map_err(|e| SandboxError::Engine(e.to_string()))?;
        Ok(Ok(()))
    }

    pub fn load(&mut self) -> Result<LoadReply, SandboxError> {
        self.call("__preview.load()")
    }

    pub fn resolve(&mut self) -> Result<ResolveReply, SandboxError> {
        self.call("__preview.resolve()")
    }

    pub fn mount(&mut self, props_literal: &str) -> Result<MountReply, SandboxError> {
        self.call(&format!("__preview.mount({})", props_literal))
    }

    fn call<T: DeserializeOwned>(&mut self, expression: &str) -> Result<T, SandboxError> {
        let reply = self.call_raw(expression)?;
        Ok(serde_json::from_str(&reply)?)
    }

    fn call_raw(&mut self, expression: &str) -> Result<String, SandboxError> {
        let value = self
            .context
            .eval(Source::from_bytes(expression))
            .map_err(|e| SandboxError::Engine(e.to_string()))?;
        value
            .to_string(&mut self.context)
            .map(|s| s.to_std_string_escaped())
            .map_err(|e| SandboxError::Engine(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> Runtime {
        Runtime::new(&SandboxConfig::default()).unwrap()
    }

    fn define(runtime: &mut Runtime, code: &str) {
        runtime.define(code).unwrap().unwrap();
        assert!(runtime.load().unwrap().ok);
    }

    #[test]
    fn test_prelude_loads() {
        let mut runtime = runtime();
        assert_eq!(runtime.call_raw("typeof __preview.mount").unwrap(), "function");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut runtime = runtime();
        let result = runtime.define("const = ;").unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_render_host_markup() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Card(props) {
                return React.createElement("div", { className: "card", style: { marginTop: 4, opacity: 0.5 }, onClick: function () {} },
                    React.createElement("h2", null, props.title),
                    React.createElement("br", null),
                    React.createElement("input", { disabled: true, value: "a<b" }));
            };"#,
        );
        let resolved = runtime.resolve().unwrap();
        assert_eq!(resolved.slot, Some(ExportSlot::Default));
        assert_eq!(resolved.name.as_deref(), Some("Card"));

        let reply = runtime.mount(r#"{"title": "Hi & bye"}"#).unwrap();
        assert!(reply.ok);
        assert_eq!(
            reply.markup,
            r#"<div class="card" style="margin-top:4px;opacity:0.5"><h2>Hi &amp; bye</h2><br/><input disabled="" value="a&lt;b"/></div>"#
        );
        assert_eq!(reply.passes, 1);
    }

    #[test]
    fn test_select_value_marks_option() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Picker() {
                return React.createElement("div", null,
                    React.createElement("select", { value: "b", onChange: function () {} },
                        React.createElement("option", { value: "a" }, "A"),
                        React.createElement("option", { value: "b" }, "B")),
                    React.createElement("select", { defaultValue: "Two" },
                        React.createElement("option", null, "One"),
                        React.createElement("option", null, "Two")));
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(reply.ok);
        assert_eq!(
            reply.markup,
            concat!(
                r#"<div><select><option value="a">A</option><option value="b" selected="">B</option></select>"#,
                r#"<select><option>One</option><option selected="">Two</option></select></div>"#
            )
        );
    }

    #[test]
    fn test_effects_trigger_another_pass() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Counter() {
                const [n, setN] = React.useState(0);
                React.useEffect(function () { setN(5); console.log("mounted"); }, []);
                return React.createElement("span", null, n);
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(reply.ok);
        assert_eq!(reply.markup, "<span>5</span>");
        assert_eq!(reply.passes, 2);
        assert_eq!(reply.logs[0].message, "mounted");
    }

    #[test]
    fn test_update_loop_is_bounded() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Loop() {
                const [n, setN] = React.useState(0);
                React.useEffect(function () { setN(n + 1); });
                return React.createElement("span", null, n);
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.phase.as_deref(), Some("lifecycle"));
        assert!(reply.message.unwrap().starts_with("Too many re-renders"));
    }

    #[test]
    fn test_sole_named_export() {
        let mut runtime = runtime();
        define(&mut runtime, r#"exports["Badge"] = function Badge() { return "ok"; };"#);
        let resolved = runtime.resolve().unwrap();
        assert_eq!(resolved.slot, Some(ExportSlot::Sole));
        assert_eq!(resolved.name.as_deref(), Some("Badge"));
    }

    #[test]
    fn test_missing_export() {
        let mut runtime = runtime();
        define(&mut runtime, "exports.value = 42; exports.other = 1;");
        let resolved = runtime.resolve().unwrap();
        assert!(!resolved.ok);
        assert_eq!(resolved.names, vec!["value", "other"]);
    }

    #[test]
    fn test_context_and_class_components() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"
            const Theme = React.createContext("light");
            class Label extends React.Component {
                constructor(props) { super(props); this.state = { text: "loading" }; }
                componentDidMount() { this.setState({ text: "ready" }); }
                render() {
                    return React.createElement(Theme.Consumer, null, (theme) =>
                        React.createElement("em", null, theme + ":" + this.state.text));
                }
            }
            exports.default = function App() {
                return React.createElement(Theme.Provider, { value: "dark" }, React.createElement(Label, null));
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(reply.ok);
        assert_eq!(reply.markup, "<em>dark:ready</em>");
    }

    #[test]
    fn test_placeholder_modules() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"
            const { Star } = React.__module("lucide-react");
            const clsx = React.__module("clsx").default;
            exports.default = function Rating() {
                return React.createElement("div", { className: clsx("a", { b: true, c: false }) },
                    React.createElement(Star, { size: 16 }));
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(reply.ok);
        assert_eq!(
            reply.markup,
            r#"<div class="a b"><span data-placeholder="Star"></span></div>"#
        );
        assert_eq!(reply.placeholders, vec!["Star"]);
    }

    #[test]
    fn test_callback_props_log_calls() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Button(props) {
                React.useEffect(function () { props.onClick(); }, []);
                return React.createElement("button", { onClick: props.onClick }, "Go");
            };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime
            .mount(r#"{"onClick": __preview.callback("onClick")}"#)
            .unwrap();
        assert!(reply.ok);
        assert_eq!(reply.markup, "<button>Go</button>");
        assert_eq!(reply.logs[0].message, "onClick called");
    }

    #[test]
    fn test_render_error_phase() {
        let mut runtime = runtime();
        define(
            &mut runtime,
            r#"exports.default = function Broken() { throw new TypeError("bad prop"); };"#,
        );
        runtime.resolve().unwrap();
        let reply = runtime.mount("{}").unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.phase.as_deref(), Some("render"));
        assert_eq!(reply.message.as_deref(), Some("TypeError: bad prop"));
    }
}
