//! Column-oriented projection of a frame timeline.

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};
use crate::frame::{Frame, FrameType, Locals};

/// One list per frame field; entry `i` of every list belongs to frame `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    pub frame_type: Vec<FrameType>,
    pub line_no: Vec<u32>,
    pub file_name: Vec<String>,
    pub fn_name: Vec<String>,
    pub locals: Vec<Option<Locals>>,
    pub time_taken: Vec<Option<f64>>,
}

impl Columns {
    pub fn from_frames(frames: &[Frame]) -> Self {
        let mut columns = Self::with_capacity(frames.len());
        for frame in frames {
            columns.frame_type.push(frame.frame_type);
            columns.line_no.push(frame.line_no);
            columns.file_name.push(frame.file_name.clone());
            columns.fn_name.push(frame.fn_name.clone());
            columns.locals.push(frame.locals.clone());
            columns.time_taken.push(frame.time_taken);
        }
        columns
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            frame_type: Vec::with_capacity(n),
            line_no: Vec::with_capacity(n),
            file_name: Vec::with_capacity(n),
            fn_name: Vec::with_capacity(n),
            locals: Vec::with_capacity(n),
            time_taken: Vec::with_capacity(n),
        }
    }

    /// Number of frames, taken from the `frame_type` column.
    pub fn len(&self) -> usize {
        self.frame_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_type.is_empty()
    }

    /// Rebuild the row sequence by index.
    pub fn into_frames(self) -> Result<Vec<Frame>> {
        let expected = self.len();
        let lengths = [
            ("line_no", self.line_no.len()),
            ("file_name", self.file_name.len()),
            ("fn_name", self.fn_name.len()),
            ("locals", self.locals.len()),
            ("time_taken", self.time_taken.len()),
        ];
        if let Some(&(column, actual)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(PlaybackError::ColumnLength {
                column,
                expected,
                actual,
            });
        }

        let frames = self
            .frame_type
            .into_iter()
            .zip(self.line_no)
            .zip(self.file_name)
            .zip(self.fn_name)
            .zip(self.locals)
            .zip(self.time_taken)
            .map(
                |(((((frame_type, line_no), file_name), fn_name), locals), time_taken)| Frame {
                    frame_type,
                    line_no,
                    file_name,
                    fn_name,
                    locals,
                    time_taken,
                },
            )
            .collect();
        Ok(frames)
    }
}
