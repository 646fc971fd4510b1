//! The 8-byte immediate operand carried by `StoreImmediate` and `Push`.

use core::fmt;

use marrow_types::{RawValue, WORD_SIZE};

/// An encoded 8-byte immediate value.
///
/// The byte layout is whatever `marrow_types::bytes` produced for the
/// accompanying [`ImmediateType`](marrow_types::ImmediateType) tag; the
/// wrapper itself is opaque bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Immediate(RawValue);

impl Immediate {
    /// Length of an encoded immediate, in bytes.
    pub const LEN: usize = WORD_SIZE;

    /// Wrap raw encoded bytes.
    pub const fn new(bytes: RawValue) -> Self {
        Self(bytes)
    }

    /// The zero immediate.
    pub const fn zeroed() -> Self {
        Self([0; WORD_SIZE])
    }

    /// The raw encoded bytes.
    pub const fn to_bytes(self) -> RawValue {
        self.0
    }
}

impl From<RawValue> for Immediate {
    fn from(bytes: RawValue) -> Self {
        Self(bytes)
    }
}

impl From<Immediate> for RawValue {
    fn from(immediate: Immediate) -> Self {
        immediate.0
    }
}

impl AsRef<[u8]> for Immediate {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Immediate(0x{})", hex::encode(self.0))
    }
}

impl fmt::LowerHex for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renders_hex() {
        let immediate = Immediate::new([0, 0, 0, 0, 0, 0, 1, 0xff]);
        assert_eq!(format!("{immediate:?}"), "Immediate(0x00000000000001ff)");
        assert_eq!(format!("{immediate:#x}"), "0x00000000000001ff");
    }

    #[test]
    fn round_trips_raw_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(Immediate::from(bytes).to_bytes(), bytes);
    }
}
