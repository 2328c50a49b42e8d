//! Stored vector entries and vector literal parsing

use crate::error::{Result, VdbError};

/// One entry of a [`VectorStore`](crate::VectorStore).
///
/// `M` is a caller-chosen handle (an `Arc`, a key into the caller's own
/// table, ...). The store never looks behind it: it only clones the handle
/// when handing entries out and drops its copy when the entry goes away.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredVector<M = ()> {
    pub data: Vec<f32>,
    pub id: Option<String>,
    pub metadata: Option<M>,
}

impl<M> StoredVector<M> {
    /// Dimension of the vector data
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Parse a vector from a comma-separated string such as `"1.0, 2.0, 3.0"`.
pub fn parse_components(s: &str) -> Result<Vec<f32>> {
    if s.trim().is_empty() {
        return Err(VdbError::InvalidVector {
            reason: "Empty vector literal".to_string(),
        });
    }
    s.split(',')
        .map(|x| {
            x.trim()
                .parse::<f32>()
                .map_err(|_| VdbError::InvalidVector {
                    reason: format!("Invalid float: {}", x.trim()),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_vector_accessors() {
        let v: StoredVector = StoredVector {
            data: vec![1.0, 2.0, 3.0],
            id: Some("v1".to_string()),
            metadata: None,
        };
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.id(), Some("v1"));
    }

    #[test]
    fn test_parse_components() {
        let v = parse_components("1.0, 2.0,3").unwrap();
        assert_eq!(v, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_components_invalid() {
        assert!(matches!(
            parse_components("1.0, abc"),
            Err(VdbError::InvalidVector { .. })
        ));
        assert!(matches!(
            parse_components("   "),
            Err(VdbError::InvalidVector { .. })
        ));
    }
}
