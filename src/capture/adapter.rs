//! Turns raw execution events into recorded frames.

use std::collections::BTreeSet;

use crate::frame::{Frame, FrameType, Locals};
use crate::scope::ScopeFilter;
use crate::snapshot::{shallow, walk, Value};

/// Function name of the recorder's own teardown. Events from it are never
/// recorded.
pub const SESSION_EXIT: &str = "playback::session_exit";

/// Raw event kinds delivered by instrumentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Call,
    Line,
    Return,
    Exception,
}

impl EventKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "call" => Some(EventKind::Call),
            "line" => Some(EventKind::Line),
            "return" => Some(EventKind::Return),
            "exception" => Some(EventKind::Exception),
            _ => None,
        }
    }
}

/// Source location of an instrumentation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

impl<'a> Site<'a> {
    pub fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

/// One notification from instrumented code.
#[derive(Debug, Clone, Copy)]
pub struct RawEvent<'a> {
    pub kind: EventKind,
    pub site: Site<'a>,
    pub bindings: &'a [(&'a str, Value)],
}

/// Whether out-of-project code is currently being skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Suppression {
    #[default]
    Active,
    /// Entered out-of-project code through this function.
    SuppressedBy(String),
}

impl Suppression {
    pub fn is_active(&self) -> bool {
        matches!(self, Suppression::Active)
    }
}

/// Event filtering state machine.
#[derive(Debug)]
pub struct EventAdapter {
    scope: ScopeFilter,
    walk_locals: bool,
    suppression: Suppression,
    touched_files: BTreeSet<String>,
}

impl EventAdapter {
    pub fn new(scope: ScopeFilter, walk_locals: bool) -> Self {
        Self {
            scope,
            walk_locals,
            suppression: Suppression::Active,
            touched_files: BTreeSet::new(),
        }
    }

    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    pub fn suppression(&self) -> &Suppression {
        &self.suppression
    }

    pub fn touched_files(&self) -> &BTreeSet<String> {
        &self.touched_files
    }

    /// Decide what, if anything, to record for `event`.
    ///
    /// `elapsed` is the time since the previous raw event; it is only kept on
    /// line frames.
    pub fn handle(&mut self, event: &RawEvent<'_>, elapsed: Option<f64>) -> Option<Frame> {
        let site = event.site;
        if site.function == SESSION_EXIT {
            return None;
        }
        self.touched_files.insert(site.file.to_string());

        let in_scope = self.scope.in_scope(site.file);

        match event.kind {
            EventKind::Exception => None,
            EventKind::Line => {
                if !in_scope {
                    return None;
                }
                let locals = self.capture(event.bindings);
                Some(frame(FrameType::Line, site, Some(locals), elapsed))
            }
            EventKind::Call => {
                let active = self.suppression.is_active();
                let emitted = (in_scope || active).then(|| {
                    let locals = (!in_scope).then(|| self.capture(event.bindings));
                    frame(FrameType::Call, site, locals, None)
                });
                if !in_scope && active {
                    self.suppression = Suppression::SuppressedBy(site.function.to_string());
                }
                emitted
            }
            EventKind::Return => {
                // Suppression is never lifted once set.
                if !self.suppression.is_active() {
                    return None;
                }
                let locals = self.capture(event.bindings);
                Some(frame(FrameType::Return, site, Some(locals), None))
            }
        }
    }

    fn capture(&self, bindings: &[(&str, Value)]) -> Locals {
        let snapshot = if self.walk_locals { walk } else { shallow };
        bindings
            .iter()
            .map(|(name, value)| (name.to_string(), snapshot(value)))
            .collect()
    }
}

fn frame(frame_type: FrameType, site: Site<'_>, locals: Option<Locals>, time: Option<f64>) -> Frame {
    Frame {
        frame_type,
        line_no: site.line,
        file_name: site.file.to_string(),
        fn_name: site.function.to_string(),
        locals,
        time_taken: time,
    }
}
