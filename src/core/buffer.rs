//! # Packet Buffers
//!
//! Byte-level writer and reader shared by every codec in the crate.
//!
//! [`PacketWriter`] appends to a growable [`BytesMut`]; [`PacketReader`] is a
//! forward-only cursor over a borrowed slice. Every read checks the remaining
//! length first and fails with [`ProtocolError::TruncatedInput`] instead of
//! panicking, and every peer-supplied length or count is checked against the
//! configured limits before anything is allocated.
//!
//! ## Wire Primitives
//! ```text
//! unsigned varint   LEB128, 1..=10 bytes
//! signed varint     zig-zag, then LEB128
//! string            unsigned varint byte length + UTF-8 bytes
//! uuid              u64 LE (most significant half) + u64 LE (least significant half)
//! ```

use crate::config::CodecConfig;
use crate::core::varint;
use crate::error::{ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Growable output buffer for protocol data.
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and hand out an immutable, cheaply clonable view.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_inner(self) -> BytesMut {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_i16_le(&mut self, value: i16) {
        self.buf.put_i16_le(value);
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    pub fn write_unsigned_varint(&mut self, value: u64) {
        varint::put_unsigned(&mut self.buf, value);
    }

    pub fn write_signed_varint(&mut self, value: i64) {
        varint::put_signed(&mut self.buf, value);
    }

    /// Write the bit pattern of a 32-bit value as an unsigned varint.
    ///
    /// Negative inputs are reinterpreted, not sign extended, so they occupy
    /// five bytes and read back unchanged through [`PacketReader::read_var_u32`].
    pub fn write_var_u32(&mut self, value: u32) {
        self.write_unsigned_varint(u64::from(value));
    }

    pub fn write_var_i32(&mut self, value: i32) {
        self.write_signed_varint(i64::from(value));
    }

    /// Write a collection length prefix.
    pub fn write_count(&mut self, count: usize) {
        self.write_unsigned_varint(count as u64);
    }

    /// Write raw bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a length-prefixed byte array.
    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_count(bytes.len());
        self.write_raw(bytes);
    }

    pub fn write_string(&mut self, text: &str) {
        self.write_byte_array(text.as_bytes());
    }

    pub fn write_uuid(&mut self, id: &Uuid) {
        let (high, low) = id.as_u64_pair();
        self.write_u64_le(high);
        self.write_u64_le(low);
    }
}

/// Forward-only cursor over a received buffer.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    data: &'a [u8],
    pos: usize,
    max_string_len: usize,
}

impl<'a> PacketReader<'a> {
    /// Reader with the default string length limit.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, &CodecConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: &CodecConfig) -> Self {
        Self {
            data,
            pos: 0,
            max_string_len: config.max_string_len,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(ProtocolError::TruncatedInput {
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_unsigned_varint(&mut self) -> Result<u64> {
        let (value, used) = varint::decode_unsigned(&self.data[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    pub fn read_signed_varint(&mut self) -> Result<i64> {
        Ok(varint::zigzag_decode(self.read_unsigned_varint()?))
    }

    /// Read an unsigned varint that must fit in 32 bits.
    pub fn read_var_u32(&mut self) -> Result<u32> {
        let value = self.read_unsigned_varint()?;
        u32::try_from(value).map_err(|_| ProtocolError::VarIntOverflow(value))
    }

    /// Read a signed varint that must fit in 32 bits.
    pub fn read_var_i32(&mut self) -> Result<i32> {
        let value = self.read_signed_varint()?;
        i32::try_from(value).map_err(|_| ProtocolError::VarIntOverflow(varint::zigzag_encode(value)))
    }

    /// Read a collection length prefix and check it against `max` before the
    /// caller allocates anything.
    pub fn read_count(&mut self, max: usize) -> Result<usize> {
        let count = self.read_unsigned_varint()?;
        if count > max as u64 {
            return Err(ProtocolError::ExcessiveCount { count, max });
        }
        Ok(count as usize)
    }

    /// Read a length-prefixed byte array bounded by the string length limit.
    pub fn read_byte_array(&mut self) -> Result<&'a [u8]> {
        let len = self.read_unsigned_varint()?;
        if len > self.max_string_len as u64 {
            return Err(ProtocolError::StringTooLong {
                len,
                max: self.max_string_len,
            });
        }
        self.take(len as usize)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_byte_array()?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| ProtocolError::InvalidUtf8)
    }

    pub fn read_uuid(&mut self) -> Result<Uuid> {
        let high = self.read_u64_le()?;
        let low = self.read_u64_le()?;
        Ok(Uuid::from_u64_pair(high, low))
    }
}
