//! Persisted form of handles and spans.
//!
//! A handle is written as its raw encoding, four bytes little-endian. A span
//! is its begin handle followed by its end handle. Nothing else about the
//! stream is assumed.

use std::io::{Read, Write};

use super::error::LocationError;
use super::handle::SourceHandle;
use super::span::SourceSpan;

/// Lossless write/read through an opaque byte stream.
pub trait Persist: Sized {
    fn write<W: Write>(&self, out: &mut W) -> Result<(), LocationError>;

    fn read<R: Read>(input: &mut R) -> Result<Self, LocationError>;
}

impl Persist for SourceHandle {
    fn write<W: Write>(&self, out: &mut W) -> Result<(), LocationError> {
        out.write_all(&self.raw_encoding().to_le_bytes())?;
        Ok(())
    }

    fn read<R: Read>(input: &mut R) -> Result<Self, LocationError> {
        let mut bytes = [0u8; 4];
        input.read_exact(&mut bytes)?;
        Ok(SourceHandle::from_raw_encoding(u32::from_le_bytes(bytes)))
    }
}

impl Persist for SourceSpan {
    fn write<W: Write>(&self, out: &mut W) -> Result<(), LocationError> {
        self.begin().write(out)?;
        self.end().write(out)
    }

    fn read<R: Read>(input: &mut R) -> Result<Self, LocationError> {
        let begin = SourceHandle::read(input)?;
        let end = SourceHandle::read(input)?;
        Ok(SourceSpan::new(begin, end))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{SourceHandle, SourceSpan};

    impl Serialize for SourceHandle {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u32(self.raw_encoding())
        }
    }

    impl<'de> Deserialize<'de> for SourceHandle {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            u32::deserialize(deserializer).map(SourceHandle::from_raw_encoding)
        }
    }

    #[derive(Serialize, Deserialize)]
    struct SpanRepr {
        begin: SourceHandle,
        end: SourceHandle,
    }

    impl Serialize for SourceSpan {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            SpanRepr {
                begin: self.begin(),
                end: self.end(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for SourceSpan {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = SpanRepr::deserialize(deserializer)?;
            Ok(SourceSpan::new(repr.begin, repr.end))
        }
    }
}
