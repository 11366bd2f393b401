//! Binary session codec.
//!
//! Frames one [`ClassSession`] for wire transfer between the coordinator
//! and workers. Strings are `[i32 length, little-endian][raw UTF-8 bytes]`,
//! integers are little-endian `i32`, the session type is a single byte.
//! Field order is fixed:
//!
//! ```text
//! subject_name, type, group_id, sub_group, teacher_name,
//! building_name, room_name, day, start_time, end_time, week_mask
//! ```
//!
//! There is no outer length prefix; the transport delivers each record as
//! one message and supplies the total byte count, so decoding must consume
//! the buffer exactly.

use thiserror::Error;

use crate::models::{ClassSession, SessionType, WeekMask};

/// Error decoding a wire record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The buffer ended before the record did.
    #[error("unexpected end of buffer")]
    UnexpectedEof,
    /// A string length prefix was negative.
    #[error("invalid string length {0}")]
    InvalidLength(i32),
    /// A string field was not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
    /// The session type byte was out of range.
    #[error("unknown session type tag {0}")]
    UnknownTypeTag(u8),
    /// Bytes remained after the record was fully read.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

/// Encodes an `i32` as its 4-byte wire form.
pub fn encode_i32(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Decodes a 4-byte wire integer. The buffer must be exactly four bytes.
pub fn decode_i32(bytes: &[u8]) -> Result<i32, CodecError> {
    let array: [u8; 4] = bytes
        .try_into()
        .map_err(|_| CodecError::UnexpectedEof)?;
    Ok(i32::from_le_bytes(array))
}

/// Encodes a session into its wire form.
pub fn encode_session(session: &ClassSession) -> Vec<u8> {
    let mut out = Vec::new();
    push_str(&mut out, &session.subject_name);
    out.push(session.session_type.code());
    push_str(&mut out, &session.group_id);
    push_str(&mut out, &session.sub_group);
    push_str(&mut out, &session.teacher_name);
    push_str(&mut out, &session.building_name);
    push_str(&mut out, &session.room_name);
    push_str(&mut out, &session.day);
    push_str(&mut out, &session.start_time);
    push_str(&mut out, &session.end_time);
    out.extend_from_slice(&encode_i32(i32::from(session.week_mask.0)));
    out
}

/// Decodes a session from its wire form, consuming the whole buffer.
pub fn decode_session(bytes: &[u8]) -> Result<ClassSession, CodecError> {
    let mut reader = Reader { buf: bytes, pos: 0 };

    let subject_name = reader.read_string()?;
    let type_tag = reader.read_u8()?;
    let session_type =
        SessionType::from_code(type_tag).ok_or(CodecError::UnknownTypeTag(type_tag))?;
    let group_id = reader.read_string()?;
    let sub_group = reader.read_string()?;
    let teacher_name = reader.read_string()?;
    let building_name = reader.read_string()?;
    let room_name = reader.read_string()?;
    let day = reader.read_string()?;
    let start_time = reader.read_string()?;
    let end_time = reader.read_string()?;
    let week_mask = WeekMask(reader.read_i32()? as u8);

    let remaining = reader.buf.len() - reader.pos;
    if remaining != 0 {
        return Err(CodecError::TrailingBytes(remaining));
    }

    Ok(ClassSession {
        subject_name,
        session_type,
        group_id,
        sub_group,
        teacher_name,
        building_name,
        room_name,
        day,
        start_time,
        end_time,
        week_mask,
    })
}

fn push_str(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(&encode_i32(value.len() as i32));
    out.extend_from_slice(value.as_bytes());
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn read_u8(&mut self) -> Result<u8, CodecError> {
        let byte = *self.buf.get(self.pos).ok_or(CodecError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_i32(&mut self) -> Result<i32, CodecError> {
        let end = self.pos + 4;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or(CodecError::UnexpectedEof)?;
        self.pos = end;
        decode_i32(slice)
    }

    fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(CodecError::InvalidLength(len));
        }
        let end = self.pos + len as usize;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or(CodecError::UnexpectedEof)?;
        self.pos = end;
        String::from_utf8(slice.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}
