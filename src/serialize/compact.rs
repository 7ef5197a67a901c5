//! Compact delimited-text projection.
//!
//! Each frame becomes `code,line_no,file_name,fn_name,locals,time#`. Nothing
//! is escaped: a `,` in a file or function name, or a `#` anywhere in a
//! record, makes the stream ambiguous.

use crate::error::CompactError;
use crate::frame::{Frame, FrameType, Locals};

pub const FIELD_SEPARATOR: char = ',';
pub const RECORD_SEPARATOR: char = '#';

const NULL: &str = "null";

/// Encode one frame as a record, including its trailing separator.
pub fn encode_frame(frame: &Frame) -> serde_json::Result<String> {
    let locals = serde_json::to_string(&frame.locals)?;
    let time = match frame.time_taken {
        Some(t) => t.to_string(),
        None => NULL.to_string(),
    };
    Ok(format!(
        "{code}{sep}{line}{sep}{file}{sep}{function}{sep}{locals}{sep}{time}{end}",
        code = frame.frame_type.code(),
        line = frame.line_no,
        file = frame.file_name,
        function = frame.fn_name,
        sep = FIELD_SEPARATOR,
        end = RECORD_SEPARATOR,
    ))
}

pub fn encode(frames: &[Frame]) -> serde_json::Result<String> {
    frames.iter().map(encode_frame).collect()
}

/// Decode one record; the trailing record separator is optional.
///
/// The four location fields are split from the left and the time from the
/// right, so commas inside the locals JSON are fine.
pub fn decode_record(record: &str) -> Result<Frame, CompactError> {
    let record = record.strip_suffix(RECORD_SEPARATOR).unwrap_or(record);
    let mut parts = record.splitn(5, FIELD_SEPARATOR);

    let code = parts.next().ok_or(CompactError::MissingField("frame_type"))?;
    let line = parts.next().ok_or(CompactError::MissingField("line_no"))?;
    let file_name = parts.next().ok_or(CompactError::MissingField("file_name"))?;
    let fn_name = parts.next().ok_or(CompactError::MissingField("fn_name"))?;
    let rest = parts.next().ok_or(CompactError::MissingField("locals"))?;
    let (locals, time) = rest
        .rsplit_once(FIELD_SEPARATOR)
        .ok_or(CompactError::MissingField("time_taken"))?;

    let frame_type =
        FrameType::from_code(code).ok_or_else(|| CompactError::UnknownCode(code.to_string()))?;
    let line_no = line
        .parse()
        .map_err(|_| CompactError::InvalidLine(line.to_string()))?;
    let locals: Option<Locals> =
        serde_json::from_str(locals).map_err(|e| CompactError::InvalidLocals(e.to_string()))?;
    let time_taken = match time {
        NULL => None,
        t => Some(
            t.parse::<f64>()
                .map_err(|_| CompactError::InvalidTime(t.to_string()))?,
        ),
    };

    Ok(Frame {
        frame_type,
        line_no,
        file_name: file_name.to_string(),
        fn_name: fn_name.to_string(),
        locals,
        time_taken,
    })
}

/// Decode a whole stream. Only valid when no record contains `#`.
pub fn decode(stream: &str) -> Result<Vec<Frame>, CompactError> {
    stream
        .split_terminator(RECORD_SEPARATOR)
        .map(decode_record)
        .collect()
}
