//! On-disk layout of a store file.
//!
//! ```text
//! [magic: u32 = 0x56444230][dimensions: u64][count: u64][metric: u32]
//! count x [data: dimensions x f32][id_len: u32][id: id_len bytes]
//! ```
//!
//! Everything is little-endian. `id_len == 0` means the entry has no id.

use crate::distance::DistanceMetric;
use crate::error::{Result, VdbError};

/// "VDB0" read as a u32.
pub const MAGIC: u32 = 0x5644_4230;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 4 + 8 + 8 + 4;

/// Fixed-size header at the start of every store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub dimensions: u64,
    pub count: u64,
    pub metric: DistanceMetric,
}

impl Header {
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buf[4..12].copy_from_slice(&self.dimensions.to_le_bytes());
        buf[12..20].copy_from_slice(&self.count.to_le_bytes());
        buf[20..24].copy_from_slice(&self.metric.ordinal().to_le_bytes());
        buf
    }

    pub fn decode(buf: &[u8; HEADER_SIZE]) -> Result<Self> {
        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if magic != MAGIC {
            return Err(VdbError::corrupt(format!("bad magic 0x{:08x}", magic)));
        }

        let mut word = [0u8; 8];
        word.copy_from_slice(&buf[4..12]);
        let dimensions = u64::from_le_bytes(word);
        word.copy_from_slice(&buf[12..20]);
        let count = u64::from_le_bytes(word);

        let ordinal = u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);
        let metric = DistanceMetric::from_ordinal(ordinal)
            .ok_or_else(|| VdbError::corrupt(format!("unknown metric ordinal {}", ordinal)))?;

        Ok(Self {
            dimensions,
            count,
            metric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = Header {
            dimensions: 3,
            count: 2,
            metric: DistanceMetric::Euclidean,
        };
        let bytes = header.encode();
        assert_eq!(&bytes[0..4], &[0x30, 0x42, 0x44, 0x56]);
        assert_eq!(&bytes[4..12], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[12..20], &[2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[20..24], &[1, 0, 0, 0]);
        assert_eq!(Header::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = Header {
            dimensions: 1,
            count: 0,
            metric: DistanceMetric::Cosine,
        }
        .encode();
        bytes[0] = b'X';
        assert!(matches!(
            Header::decode(&bytes),
            Err(VdbError::CorruptFile { .. })
        ));
    }

    #[test]
    fn test_unknown_metric() {
        let mut bytes = Header {
            dimensions: 1,
            count: 0,
            metric: DistanceMetric::Cosine,
        }
        .encode();
        bytes[20] = 9;
        assert!(matches!(
            Header::decode(&bytes),
            Err(VdbError::CorruptFile { .. })
        ));
    }
}
