//! Variable snapshots: the live value model and the object graph walker.

pub mod value;
pub mod walk;

pub use value::{Inspect, Instance, ObjectRef, Opaque, Value};
pub use walk::{shallow, walk, Captured, Walkable, MAX_DEPTH, MAX_DEPTH_NAME, SELF_MARKER};
