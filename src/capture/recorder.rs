//! Session lifecycle: hook installation, timing, and finalization.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use crate::capture::adapter::{EventAdapter, EventKind, RawEvent, Site, SESSION_EXIT};
use crate::config::{Config, SerializeMode};
use crate::error::{PlaybackError, Result};
use crate::frame::Frame;
use crate::scope::ScopeFilter;
use crate::serialize::Artifact;
use crate::snapshot::Value;

/// Binding name under which a return event carries the returned value.
pub const RETURN_BINDING: &str = "return";

struct CaptureState {
    adapter: EventAdapter,
    frames: Vec<Frame>,
    last_event: Option<Instant>,
    installed: bool,
}

impl CaptureState {
    /// Advance the clock and run `event` through the adapter.
    fn dispatch(&mut self, event: &RawEvent<'_>, now: Instant) {
        let elapsed = self
            .last_event
            .map(|last| now.duration_since(last).as_secs_f64());
        self.last_event = Some(now);

        if let Some(frame) = self.adapter.handle(event, elapsed) {
            self.frames.push(frame);
        }
    }
}

/// Owns one recording. Independent recorders never share state.
pub struct Recorder {
    config: Config,
    state: RefCell<CaptureState>,
}

impl Recorder {
    pub fn new(config: Config) -> Self {
        let adapter = EventAdapter::new(
            ScopeFilter::new(config.project_root.clone()),
            config.walk_locals,
        );
        Self {
            config,
            state: RefCell::new(CaptureState {
                adapter,
                frames: Vec::new(),
                last_event: None,
                installed: false,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `workload` with the hook installed.
    ///
    /// The hook is removed when this returns or unwinds. Calling `record`
    /// again appends to the same timeline.
    pub fn record<R>(&mut self, workload: impl FnOnce(&Hook<'_>) -> R) -> R {
        let _installed = Installation::install(&self.state);
        let hook = Hook { state: &self.state };
        workload(&hook)
    }

    pub fn is_installed(&self) -> bool {
        self.state.borrow().installed
    }

    pub fn frames(&self) -> Ref<'_, [Frame]> {
        Ref::map(self.state.borrow(), |state| state.frames.as_slice())
    }

    /// Write one listing line per frame recorded so far.
    pub fn write_listing(&self, out: &mut impl Write) -> io::Result<()> {
        for frame in self.frames().iter() {
            writeln!(out, "{frame}")?;
        }
        Ok(())
    }

    /// Freeze the timeline and read the source of every touched project file.
    pub fn finish(self) -> Result<Session> {
        let state = self.state.into_inner();
        let scope = state.adapter.scope();

        let mut files = BTreeMap::new();
        for path in state.adapter.touched_files() {
            if !scope.in_scope(path) {
                continue;
            }
            let text = fs::read_to_string(path).map_err(|e| PlaybackError::io(path, e))?;
            files.insert(path.clone(), text);
        }

        tracing::debug!(
            frames = state.frames.len(),
            files = files.len(),
            "Recording finalized"
        );

        Ok(Session {
            frames: state.frames,
            files,
        })
    }
}

/// Scoped hook installation; removal runs on every exit path.
struct Installation<'r> {
    state: &'r RefCell<CaptureState>,
}

impl<'r> Installation<'r> {
    fn install(state: &'r RefCell<CaptureState>) -> Self {
        state.borrow_mut().installed = true;
        tracing::debug!("Trace hook installed");
        Self { state }
    }
}

impl Drop for Installation<'_> {
    fn drop(&mut self) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => {
                // Teardown is itself an event: it consumes time but is never recorded.
                let exit = RawEvent {
                    kind: EventKind::Call,
                    site: Site::new(file!(), line!(), SESSION_EXIT),
                    bindings: &[],
                };
                state.dispatch(&exit, Instant::now());
                state.installed = false;
            }
            Err(_) => tracing::warn!("Trace state busy during teardown"),
        }
        tracing::debug!("Trace hook removed");
    }
}

/// Instrumentation entry point handed to the traced workload.
///
/// Events delivered while a previous event is still being processed (for
/// example from an instrumented `Inspect` implementation reached by the
/// walker) are dropped.
pub struct Hook<'r> {
    state: &'r RefCell<CaptureState>,
}

impl Hook<'_> {
    pub fn emit(&self, event: RawEvent<'_>) {
        let now = Instant::now();
        let Ok(mut state) = self.state.try_borrow_mut() else {
            tracing::trace!(
                function = event.site.function,
                "Dropping re-entrant trace event"
            );
            return;
        };
        if !state.installed {
            return;
        }
        state.dispatch(&event, now);
    }

    /// Deliver an event identified by its textual tag.
    ///
    /// # Panics
    ///
    /// Panics on a tag other than `call`, `line`, `return` or `exception`.
    pub fn emit_tagged(&self, tag: &str, site: Site<'_>, bindings: &[(&str, Value)]) {
        let kind = EventKind::from_tag(tag)
            .unwrap_or_else(|| panic!("unrecognized trace event kind: {tag:?}"));
        self.emit(RawEvent {
            kind,
            site,
            bindings,
        });
    }

    pub fn call(&self, site: Site<'_>, bindings: &[(&str, Value)]) {
        self.emit(RawEvent {
            kind: EventKind::Call,
            site,
            bindings,
        });
    }

    pub fn line(&self, site: Site<'_>, bindings: &[(&str, Value)]) {
        self.emit(RawEvent {
            kind: EventKind::Line,
            site,
            bindings,
        });
    }

    /// Report a return of `value` and hand it back to the caller.
    pub fn ret<T>(&self, site: Site<'_>, bindings: &[(&str, Value)], value: T) -> T
    where
        T: Clone + Into<Value>,
    {
        let mut all = bindings.to_vec();
        all.push((RETURN_BINDING, value.clone().into()));
        self.emit(RawEvent {
            kind: EventKind::Return,
            site,
            bindings: &all,
        });
        value
    }

    pub fn exception(&self, site: Site<'_>, bindings: &[(&str, Value)]) {
        self.emit(RawEvent {
            kind: EventKind::Exception,
            site,
            bindings,
        });
    }
}

/// A finished recording: frames in capture order plus project sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    frames: Vec<Frame>,
    files: BTreeMap<String, String>,
}

impl Session {
    pub fn from_parts(frames: Vec<Frame>, files: BTreeMap<String, String>) -> Self {
        Self { frames, files }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// One listing line per frame.
    pub fn listing(&self) -> String {
        self.frames.iter().map(|f| format!("{f}\n")).collect()
    }

    pub fn artifact(&self, mode: SerializeMode) -> Result<Artifact> {
        Artifact::build(self, mode)
    }

    pub fn save(&self, mode: SerializeMode, path: &Path) -> Result<()> {
        self.artifact(mode)?.write_to_path(path)
    }
}
