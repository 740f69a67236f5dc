//! Canonical binary codec used to move values across a process boundary.
//!
//! Every value is written field by field in a fixed order. Integers are
//! little-endian, strings are a `u32` byte length followed by UTF-8 bytes,
//! booleans travel as an `i32` (1 = true, 0 = false).

use std::io::{self, Read, Write};

use crate::error::{PhoneAccountError, Result};

/// Trait for objects that have a canonical binary representation.
/// careful: This must be deterministic across platforms/versions.
pub trait CanonicalSerialize {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Panics if a string or list is longer than `u32::MAX`; use
    /// [`CanonicalSerialize::try_to_bytes`] for untrusted sizes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.canonical_serialize(&mut buf).expect("memory write failed");
        buf
    }

    fn try_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.canonical_serialize(&mut buf)?;
        Ok(buf)
    }
}

/// Inverse of [`CanonicalSerialize`]. Reads exactly one value and leaves the
/// rest of the stream untouched.
pub trait CanonicalDeserialize: Sized {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self>;

    /// Decode a complete buffer. Bytes left over after the value are an error.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        let value = Self::canonical_deserialize(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(PhoneAccountError::MalformedEncoding(format!(
                "{} trailing bytes after value",
                cursor.len()
            )));
        }
        Ok(value)
    }
}

fn read_array<R: Read, const N: usize>(reader: &mut R, what: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(buf)
}

fn truncated(err: io::Error, what: &str) -> PhoneAccountError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        PhoneAccountError::MalformedEncoding(format!("unexpected end of input reading {}", what))
    } else {
        PhoneAccountError::Io(err)
    }
}

// --- Primitives ---

impl CanonicalSerialize for u32 {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl CanonicalDeserialize for u32 {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(u32::from_le_bytes(read_array(reader, "u32")?))
    }
}

impl CanonicalSerialize for i32 {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl CanonicalDeserialize for i32 {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(i32::from_le_bytes(read_array(reader, "i32")?))
    }
}

impl CanonicalSerialize for String {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_str().canonical_serialize(writer)
    }
}

impl CanonicalSerialize for str {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let bytes = self.as_bytes();
        let len = u32::try_from(bytes.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string longer than u32::MAX"))?;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(bytes)
    }
}

impl CanonicalDeserialize for String {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        let len = u32::canonical_deserialize(reader)? as u64;
        // take() keeps a bogus length prefix from allocating up front
        let mut bytes = Vec::new();
        reader.take(len).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < len {
            return Err(PhoneAccountError::MalformedEncoding(format!(
                "string declares {} bytes but only {} remain",
                len,
                bytes.len()
            )));
        }
        String::from_utf8(bytes)
            .map_err(|e| PhoneAccountError::MalformedEncoding(format!("invalid UTF-8 in string: {}", e)))
    }
}

impl CanonicalSerialize for bool {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let flag: i32 = if *self { 1 } else { 0 };
        flag.canonical_serialize(writer)
    }
}

impl CanonicalDeserialize for bool {
    /// Only an exact 1 reads back as `true`; 2 or -1 are `false`.
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(i32::canonical_deserialize(reader)? == 1)
    }
}

impl<T: CanonicalSerialize> CanonicalSerialize for [T] {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let len = u32::try_from(self.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "list longer than u32::MAX"))?;
        writer.write_all(&len.to_le_bytes())?;
        for item in self {
            item.canonical_serialize(writer)?;
        }
        Ok(())
    }
}

impl<T: CanonicalSerialize> CanonicalSerialize for Vec<T> {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_slice().canonical_serialize(writer)
    }
}

impl<T: CanonicalDeserialize> CanonicalDeserialize for Vec<T> {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self> {
        let len = u32::canonical_deserialize(reader)?;
        let mut items = Vec::with_capacity(len.min(64) as usize);
        for _ in 0..len {
            items.push(T::canonical_deserialize(reader)?);
        }
        Ok(items)
    }
}
