// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Difference encoding of strictly ascending indexes.
//!
//! The first value is written as-is, every later value as the difference from
//! its predecessor: `[5, 8, 20]` <-> `[5, 3, 12]`. A zero difference after the
//! first value would repeat an index and is rejected both ways.

use crate::error::{CodecError, Result};

/// Streaming encoder, fed one ascending value at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeltaEncoder {
    previous: Option<u64>,
    position: usize,
}

impl DeltaEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<T: Into<u64>>(&mut self, value: T) -> Result<u64> {
        let value = value.into();
        let delta = match self.previous {
            None => value,
            Some(prev) if value > prev => value - prev,
            Some(_) => return Err(CodecError::UnsortedIndex { position: self.position }),
        };
        self.previous = Some(value);
        self.position += 1;
        Ok(delta)
    }
}

/// Streaming decoder producing absolute values of width `T`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeltaDecoder {
    current: Option<u64>,
    position: usize,
}

impl DeltaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<T: TryFrom<u64>>(&mut self, delta: u64) -> Result<T> {
        let value = match self.current {
            None => delta,
            Some(_) if delta == 0 => {
                return Err(CodecError::UnsortedIndex { position: self.position })
            }
            Some(current) => current
                .checked_add(delta)
                .ok_or(CodecError::DifferentialOverflow)?,
        };
        let out = T::try_from(value).map_err(|_| CodecError::DifferentialOverflow)?;
        self.current = Some(value);
        self.position += 1;
        Ok(out)
    }
}

pub fn encode_deltas<T: Copy + Into<u64>>(sorted: &[T]) -> Result<Vec<u64>> {
    let mut encoder = DeltaEncoder::new();
    sorted.iter().map(|&value| encoder.next(value)).collect()
}

pub fn decode_deltas<T: TryFrom<u64>>(deltas: &[u64]) -> Result<Vec<T>> {
    let mut decoder = DeltaDecoder::new();
    deltas.iter().map(|&delta| decoder.next(delta)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_to_deltas() {
        assert_eq!(encode_deltas(&[5u32, 8, 20]).unwrap(), vec![5, 3, 12]);
        assert_eq!(decode_deltas::<u32>(&[5, 3, 12]).unwrap(), vec![5, 8, 20]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(encode_deltas::<u32>(&[]).unwrap().is_empty());
        assert!(decode_deltas::<u32>(&[]).unwrap().is_empty());
        assert_eq!(encode_deltas(&[0u32]).unwrap(), vec![0]);
        assert_eq!(decode_deltas::<u32>(&[0]).unwrap(), vec![0]);
    }

    #[test]
    fn test_unsorted_input_rejected() {
        let err = encode_deltas(&[1u32, 4, 4]).unwrap_err();
        assert!(matches!(err, CodecError::UnsortedIndex { position: 2 }));

        let err = encode_deltas(&[9u32, 3]).unwrap_err();
        assert!(matches!(err, CodecError::UnsortedIndex { position: 1 }));
    }

    #[test]
    fn test_zero_delta_rejected() {
        let err = decode_deltas::<u32>(&[0, 1, 0]).unwrap_err();
        assert!(matches!(err, CodecError::UnsortedIndex { position: 2 }));
    }

    #[test]
    fn test_width_overflow() {
        // Fits u64, not u32.
        let err = decode_deltas::<u32>(&[u64::from(u32::MAX), 1]).unwrap_err();
        assert!(matches!(err, CodecError::DifferentialOverflow));
        assert_eq!(
            decode_deltas::<u64>(&[u64::from(u32::MAX), 1]).unwrap(),
            vec![u64::from(u32::MAX), 1 << 32]
        );

        let err = decode_deltas::<u64>(&[u64::MAX, 1]).unwrap_err();
        assert!(matches!(err, CodecError::DifferentialOverflow));
    }

    #[test]
    fn test_width_parameterised_u16() {
        assert_eq!(encode_deltas(&[1u16, 2, 65535]).unwrap(), vec![1, 1, 65533]);
        let err = decode_deltas::<u16>(&[65535, 1]).unwrap_err();
        assert!(matches!(err, CodecError::DifferentialOverflow));
    }
}
