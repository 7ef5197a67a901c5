//! Recorded frames and their human-readable listing.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::snapshot::{Captured, Walkable};

/// Variable name to snapshot, in binding order.
pub type Locals = IndexMap<String, Captured>;

/// Kind of a recorded frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    Call,
    Line,
    Return,
}

impl FrameType {
    /// Single-digit code used by the compact encoding.
    pub fn code(self) -> char {
        match self {
            FrameType::Call => '0',
            FrameType::Line => '1',
            FrameType::Return => '2',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(FrameType::Call),
            "1" => Some(FrameType::Line),
            "2" => Some(FrameType::Return),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FrameType::Call => "CALL",
            FrameType::Line => "LINE",
            FrameType::Return => "RTRN",
        }
    }
}

/// One captured event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub frame_type: FrameType,
    pub line_no: u32,
    pub file_name: String,
    pub fn_name: String,
    /// `None` means no bindings were captured, which differs from an empty map.
    pub locals: Option<Locals>,
    /// Seconds since the previous raw event; only ever set on line frames.
    pub time_taken: Option<f64>,
}

impl Frame {
    pub fn file_basename(&self) -> &str {
        self.file_name.rsplit('/').next().unwrap_or(&self.file_name)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| [{}] @ {} ({})",
            self.frame_type.label(),
            self.line_no,
            self.fn_name
        )?;

        let show_locals = match self.frame_type {
            FrameType::Line => true,
            FrameType::Call => self.locals.as_ref().is_some_and(|l| !l.is_empty()),
            FrameType::Return => false,
        };
        if show_locals {
            write!(f, " <-- ")?;
            match &self.locals {
                Some(locals) => write_map(f, locals)?,
                None => write!(f, "None")?,
            }
        }

        write!(f, " ({})", self.file_basename())?;

        if let Some(t) = self.time_taken.filter(|t| *t != 0.0) {
            write!(f, " ({t:.8}s)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Captured::Null => write!(f, "None"),
            Captured::Bool(b) => write!(f, "{b}"),
            Captured::Int(i) => write!(f, "{i}"),
            Captured::Float(x) => write!(f, "{x}"),
            Captured::Str(s) => write!(f, "{s:?}"),
            Captured::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Captured::Walkable(walkable) => write!(f, "{walkable}"),
            Captured::Opaque(type_name) => write!(f, "<opaque {type_name}>"),
        }
    }
}

impl fmt::Display for Walkable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        write_map(f, &self.fields)
    }
}

fn write_map(f: &mut fmt::Formatter<'_>, map: &IndexMap<String, Captured>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{k}: {v}")?;
    }
    write!(f, "}}")
}
