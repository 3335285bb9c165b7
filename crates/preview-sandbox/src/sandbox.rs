//! One preview run, start to finish
//!
//! Transpiles and executes the source on a dedicated thread in a fresh
//! engine context. The calling thread waits up to the configured timeout.
//! Engine threads cannot be interrupted: a thread that outlives the timeout
//! is detached and runs on until it finishes or hits the loop iteration or
//! recursion limit. Its result is then dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use component_analysis::MockPropertySet;

use crate::boundary::FaultBoundary;
use crate::config::SandboxConfig;
use crate::error::{FailureKind, PreviewFailure, SandboxError};
use crate::mount::{ConsoleEntry, ExportSlot};
use crate::props::to_js_literal;
use crate::runtime::Runtime;
use crate::transpile::transpile;

/// Stack for the engine thread; deep component trees recurse through the
/// interpreter
const ENGINE_STACK_SIZE: usize = 16 * 1024 * 1024;

/// How often the waiting thread checks for completion
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxOutput {
    pub markup: String,
    pub export_name: String,
    pub export_slot: ExportSlot,
    pub render_passes: u32,
    pub console: Vec<ConsoleEntry>,
    pub placeholders: Vec<String>,
    pub external_modules: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    config: SandboxConfig,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// Render `source` with `props`.
    ///
    /// # Arguments
    /// * `source` - TSX component source
    /// * `props` - Mock props passed to the resolved component
    ///
    /// # Returns
    /// * `Ok(SandboxOutput)` - The component rendered
    /// * `Err(PreviewFailure)` - Any failure, classified by where it happened
    pub fn run(&self, source: &str, props: &MockPropertySet) -> Result<SandboxOutput, PreviewFailure> {
        let source = source.to_string();
        let props_literal = to_js_literal(props);
        let config = self.config;

        // Run in a separate thread with timeout
        let completed = Arc::new(AtomicBool::new(false));
        let completed_clone = Arc::clone(&completed);

        let handle = thread::Builder::new()
            .name("preview-sandbox".to_string())
            .stack_size(ENGINE_STACK_SIZE)
            .spawn(move || {
                let result = FaultBoundary::contain(|| {
                    let transpiled = transpile(&source)?;
                    execute(
                        &config,
                        &transpiled.code,
                        &props_literal,
                        transpiled.external_modules,
                    )
                });
                completed_clone.store(true, Ordering::SeqCst);
                result
            })
            .map_err(|e| PreviewFailure::internal(format!("Failed to start preview thread: {}", e)))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let start = Instant::now();

        loop {
            if completed.load(Ordering::SeqCst) || handle.is_finished() {
                break;
            }
            if start.elapsed() >= timeout {
                log::warn!("Preview exceeded {} ms, abandoning engine thread", config.timeout_ms);
                return Err(PreviewFailure::new(
                    FailureKind::Timeout,
                    format!("Rendering did not finish within {} ms", config.timeout_ms),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }

        match handle.join() {
            Ok(result) => result,
            Err(_) => Err(PreviewFailure::internal("Preview thread panicked")),
        }
    }
}

fn execute(
    config: &SandboxConfig,
    code: &str,
    props_literal: &str,
    external_modules: Vec<String>,
) -> Result<SandboxOutput, PreviewFailure> {
    let mut runtime = Runtime::new(config).map_err(internal)?;

    runtime
        .define(code)
        .map_err(internal)?
        .map_err(PreviewFailure::compile)?;

    let loaded = runtime
        .load()
        .map_err(|e| PreviewFailure::new(FailureKind::Execution, e.to_string()))?;
    if !loaded.ok {
        return Err(PreviewFailure::new(
            FailureKind::Execution,
            loaded.message.unwrap_or_default(),
        ));
    }

    let resolved = runtime.resolve().map_err(internal)?;
    let (export_slot, export_name) = match (resolved.ok, resolved.slot, resolved.name) {
        (true, Some(slot), Some(name)) => (slot, name),
        _ => {
            let message = if resolved.names.is_empty() {
                "No component was exported from the code".to_string()
            } else {
                format!(
                    "No component was exported from the code (found: {})",
                    resolved.names.join(", ")
                )
            };
            return Err(PreviewFailure::new(FailureKind::MissingExport, message));
        }
    };

    // Limit errors escape the runtime's own exception handling
    let mounted = runtime
        .mount(props_literal)
        .map_err(|e| PreviewFailure::new(FailureKind::Render, e.to_string()))?;
    if !mounted.ok {
        return Err(FaultBoundary::from_phase(
            mounted.phase.as_deref().unwrap_or_default(),
            mounted.message.unwrap_or_default(),
        ));
    }

    Ok(SandboxOutput {
        markup: mounted.markup,
        export_name,
        export_slot,
        render_passes: mounted.passes,
        console: mounted.logs,
        placeholders: mounted.placeholders,
        external_modules,
    })
}

fn internal(e: SandboxError) -> PreviewFailure {
    PreviewFailure::internal(e.to_string())
}
