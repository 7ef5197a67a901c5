//! Execution-trace recorder.
//!
//! Instrumented code reports calls, executed lines and returns through a
//! [`Hook`]; the [`Recorder`] filters them into [`Frame`]s with deep snapshots
//! of the visible variables, and the finished [`Session`] is written out as an
//! [`Artifact`] together with the source of every project file it touched.

#[macro_use]
mod macros;

pub mod capture;
pub mod config;
pub mod error;
pub mod frame;
pub mod scope;
pub mod serialize;
pub mod snapshot;
pub mod wrap;

pub use capture::{Hook, RawEvent, Recorder, Session, Site};
pub use config::{Config, SerializeMode};
pub use error::{CompactError, PlaybackError};
pub use frame::{Frame, FrameType, Locals};
pub use scope::ScopeFilter;
pub use serialize::{Artifact, Projection};
pub use snapshot::{Captured, Inspect, Instance, Opaque, Value, Walkable};
pub use wrap::{run_traced, run_traced_to};
