//! LEB128 variable-length integers.
//!
//! Unsigned values are written seven bits at a time, least significant group
//! first, with the high bit of each byte marking continuation. Signed values
//! are zig-zag mapped onto the unsigned encoding first so that small negative
//! numbers stay short. The two forms are distinct on the wire and are never
//! interchangeable.

use crate::error::{ProtocolError, Result};
use bytes::BufMut;

/// Longest valid encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Map a signed value onto the unsigned range: 0, -1, 1, -2, 2, ...
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Append the unsigned encoding of `value` to `buf`.
pub fn put_unsigned<B: BufMut>(buf: &mut B, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Append the zig-zag encoding of `value` to `buf`.
#[inline]
pub fn put_signed<B: BufMut>(buf: &mut B, value: i64) {
    put_unsigned(buf, zigzag_encode(value));
}

/// Decode an unsigned varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Running out of input
/// before the terminating byte is reported as [`ProtocolError::TruncatedInput`];
/// an encoding longer than ten bytes, or one whose tenth byte carries more
/// than the final bit, is [`ProtocolError::VarIntTooLong`].
pub fn decode_unsigned(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;

    for index in 0..MAX_VARINT_LEN {
        let byte = *bytes.get(index).ok_or(ProtocolError::TruncatedInput {
            needed: index + 1,
            remaining: bytes.len(),
        })?;

        if index == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(ProtocolError::VarIntTooLong);
        }

        value |= u64::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }

    Err(ProtocolError::VarIntTooLong)
}
