//! Event capture: the filtering state machine and the recorder that drives it.

pub mod adapter;
pub mod recorder;

pub use adapter::{EventAdapter, EventKind, RawEvent, Site, Suppression, SESSION_EXIT};
pub use recorder::{Hook, Recorder, Session, RETURN_BINDING};
