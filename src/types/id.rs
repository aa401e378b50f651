//! Identity types.

use crate::config::{SHORT_ID_LENGTH, SHORT_ID_MASK};
use crate::error::CodecError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Content-addressed identifier of a full proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ProofId(pub [u8; 32]);

impl ProofId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// 48-bit keyed fingerprint of a [`ProofId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64")]
#[repr(transparent)]
pub struct ShortId(u64);

impl ShortId {
    pub const MAX: ShortId = ShortId(SHORT_ID_MASK);

    /// Truncates `value` to its low 48 bits.
    pub fn new(value: u64) -> Self {
        ShortId(value & SHORT_ID_MASK)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn to_le_bytes(self) -> [u8; SHORT_ID_LENGTH] {
        let mut out = [0u8; SHORT_ID_LENGTH];
        out.copy_from_slice(&self.0.to_le_bytes()[..SHORT_ID_LENGTH]);
        out
    }
}

/// Rejects values above [`ShortId::MAX`] instead of truncating them.
impl TryFrom<u64> for ShortId {
    type Error = CodecError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > SHORT_ID_MASK {
            return Err(CodecError::ShortIdOutOfRange(value));
        }
        Ok(ShortId(value))
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_deserialize_rejects_wide_values() {
        let sid: ShortId = serde_json::from_str("281474976710655").unwrap();
        assert_eq!(sid, ShortId::MAX);
        assert!(serde_json::from_str::<ShortId>("281474976710656").is_err());
        assert!(serde_json::from_str::<ShortId>("18446744073709551615").is_err());
    }

    #[test]
    fn test_short_id_try_from() {
        assert_eq!(ShortId::try_from(42).unwrap(), ShortId::new(42));
        assert!(matches!(
            ShortId::try_from(u64::MAX),
            Err(CodecError::ShortIdOutOfRange(u64::MAX))
        ));
        assert_eq!(ShortId::new(u64::MAX), ShortId::MAX);
    }

    #[test]
    fn test_short_id_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ShortId::new(7)).unwrap(), "7");
    }
}
