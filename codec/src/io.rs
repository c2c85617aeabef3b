//! Big-endian primitive streams with bounded reads.
//!
//! Layout conventions shared by every record:
//!
//! - integers are fixed-width big-endian, booleans are one byte (`0` or `1`);
//! - byte arrays and strings are an `i32` length followed by the bytes;
//! - a nested record is its class id (`i64`), its version (`i32`), then its body;
//! - a nullable record is a presence flag followed by the nested form;
//! - a record list is an `i32` count (`-1` when absent), then, if non-empty,
//!   one class id and version header followed by each element body.

use tracing::warn;

use crate::versioned::check_version;
use crate::{CodecError, DecodeLimits, SelfDeserializable, SelfSerializable, Versioned};

/// Length written for an absent list.
pub const ABSENT_LENGTH: i32 = -1;

/// Append-only output buffer.
#[derive(Clone, Debug, Default)]
pub struct DataWriter {
    buf: Vec<u8>,
}

impl DataWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_length(&mut self, len: usize) {
        debug_assert!(len <= i32::MAX as usize, "length {len} not representable");
        self.write_i32(len as i32);
    }

    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_length(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_byte_array(value.as_bytes());
    }

    pub fn write_nullable_string(&mut self, value: Option<&str>) {
        self.write_bool(value.is_some());
        if let Some(value) = value {
            self.write_string(value);
        }
    }

    pub fn write_i64_array(&mut self, values: &[i64]) {
        self.write_length(values.len());
        for value in values {
            self.write_i64(*value);
        }
    }

    fn write_header<T: SelfSerializable>(&mut self) {
        self.write_u64(T::CLASS_ID);
        self.write_i32(T::CURRENT_VERSION as i32);
    }

    /// Write a nested record with its class id and current version.
    pub fn write_serializable<T: SelfSerializable>(&mut self, value: &T) {
        self.write_header::<T>();
        value.serialize(self);
    }

    pub fn write_nullable_serializable<T: SelfSerializable>(&mut self, value: Option<&T>) {
        self.write_bool(value.is_some());
        if let Some(value) = value {
            self.write_serializable(value);
        }
    }

    /// Write a homogeneous record list; `None` is distinct from an empty list.
    pub fn write_serializable_list<T: SelfSerializable>(&mut self, values: Option<&[T]>) {
        let Some(values) = values else {
            self.write_i32(ABSENT_LENGTH);
            return;
        };
        self.write_serializable_seq(values.iter());
    }

    /// Write a present record list from any sequence of known length.
    pub fn write_serializable_seq<'v, T, I>(&mut self, values: I)
    where
        T: SelfSerializable + 'v,
        I: ExactSizeIterator<Item = &'v T>,
    {
        let len = values.len();
        self.write_length(len);
        if len == 0 {
            return;
        }
        self.write_header::<T>();
        for value in values {
            value.serialize(self);
        }
    }
}

/// Cursor over untrusted input, carrying the bounds every read is checked against.
#[derive(Clone, Debug)]
pub struct DataReader<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: &'a DecodeLimits,
}

impl<'a> DataReader<'a> {
    pub fn new(buf: &'a [u8], limits: &'a DecodeLimits) -> Self {
        Self { buf, pos: 0, limits }
    }

    pub fn limits(&self) -> &'a DecodeLimits {
        self.limits
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fail unless every input byte has been consumed.
    pub fn expect_end(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidDiscriminant {
                what: "boolean",
                value: i64::from(other),
            }),
        }
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    /// Read an `i32` length and check it against `max` before anything is allocated.
    pub fn read_length(&mut self, what: &'static str, max: usize) -> Result<usize, CodecError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(CodecError::NegativeLength { what, len });
        }
        let len = len as usize;
        if len > max {
            warn!(what, len, max, "declared length exceeds decode bound");
            return Err(CodecError::LengthExceeded { what, len, max });
        }
        Ok(len)
    }

    /// Like [`read_length`](Self::read_length) but maps `-1` to `None`.
    pub fn read_optional_length(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> Result<Option<usize>, CodecError> {
        let len = self.read_i32()?;
        if len == ABSENT_LENGTH {
            return Ok(None);
        }
        if len < 0 {
            return Err(CodecError::NegativeLength { what, len });
        }
        let len = len as usize;
        if len > max {
            warn!(what, len, max, "declared length exceeds decode bound");
            return Err(CodecError::LengthExceeded { what, len, max });
        }
        Ok(Some(len))
    }

    pub fn read_byte_array(&mut self, what: &'static str, max: usize) -> Result<Vec<u8>, CodecError> {
        let len = self.read_length(what, max)?;
        Ok(self.take(len)?.to_vec())
    }

    /// Read exactly `N` raw bytes without a length prefix.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.take_array()
    }

    pub fn read_string(&mut self, what: &'static str, max: usize) -> Result<String, CodecError> {
        let len = self.read_length(what, max)?;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8 { what })
    }

    pub fn read_nullable_string(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> Result<Option<String>, CodecError> {
        if self.read_bool()? {
            self.read_string(what, max).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn read_i64_array(&mut self, what: &'static str, max: usize) -> Result<Vec<i64>, CodecError> {
        let len = self.read_length(what, max)?;
        let needed = len * 8;
        if needed > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                needed,
                remaining: self.remaining(),
            });
        }
        (0..len).map(|_| self.read_i64()).collect()
    }

    /// Read a class id and version header and check both against `T`.
    pub fn read_header<T: Versioned>(&mut self) -> Result<u32, CodecError> {
        let class_id = self.read_u64()?;
        if class_id != T::CLASS_ID {
            return Err(CodecError::ClassIdMismatch {
                expected: T::CLASS_ID,
                found: class_id,
            });
        }
        check_version::<T>(self.read_i32()?)
    }

    pub fn read_serializable<T: SelfDeserializable>(&mut self) -> Result<T, CodecError> {
        let version = self.read_header::<T>()?;
        T::deserialize(self, version)
    }

    pub fn read_nullable_serializable<T: SelfDeserializable>(&mut self) -> Result<Option<T>, CodecError> {
        if self.read_bool()? {
            self.read_serializable().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read a homogeneous record list written by
    /// [`DataWriter::write_serializable_list`].
    pub fn read_serializable_list<T: SelfDeserializable>(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> Result<Option<Vec<T>>, CodecError> {
        let Some(count) = self.read_optional_length(what, max)? else {
            return Ok(None);
        };
        if count == 0 {
            return Ok(Some(Vec::new()));
        }
        let version = self.read_header::<T>()?;
        // Every element occupies at least one byte.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(T::deserialize(self, version)?);
        }
        Ok(Some(items))
    }

    /// Read a list that must be present.
    pub fn read_required_list<T: SelfDeserializable>(
        &mut self,
        what: &'static str,
        max: usize,
    ) -> Result<Vec<T>, CodecError> {
        self.read_serializable_list(what, max)?
            .ok_or_else(|| CodecError::rejected(format!("{what}: required list is absent")))
    }
}
