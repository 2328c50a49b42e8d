//! Stream encoder/decoder for the store file format.

use crate::config::StoreConfig;
use crate::distance::DistanceMetric;
use crate::error::{Result, VdbError};
use crate::persistence::format::{Header, HEADER_SIZE};
use crate::storage::VectorStore;
use crate::vector::StoredVector;
use std::io::{ErrorKind, Read, Write};

/// Floats decoded per read while filling a row.
const ROW_CHUNK: usize = 1024;

/// Write `store` to `writer`.
///
/// A shared hold on the store is kept until the last entry is written.
pub fn write_store<M, W: Write>(store: &VectorStore<M>, writer: &mut W) -> Result<()> {
    let entries = store.read_entries()?;
    write_entries(&entries, store.dimensions(), store.metric(), writer)
}

pub(crate) fn write_entries<M, W: Write>(
    entries: &[StoredVector<M>],
    dimensions: usize,
    metric: DistanceMetric,
    writer: &mut W,
) -> Result<()> {
    let header = Header {
        dimensions: dimensions as u64,
        count: entries.len() as u64,
        metric,
    };
    writer.write_all(&header.encode())?;

    let mut row = Vec::with_capacity(dimensions * 4);
    for entry in entries {
        row.clear();
        for value in &entry.data {
            row.extend_from_slice(&value.to_le_bytes());
        }
        writer.write_all(&row)?;

        let id = entry.id.as_deref().unwrap_or("");
        let id_len = u32::try_from(id.len()).map_err(|_| VdbError::InvalidVector {
            reason: format!("id of {} bytes does not fit the file format", id.len()),
        })?;
        writer.write_all(&id_len.to_le_bytes())?;
        writer.write_all(id.as_bytes())?;
    }

    Ok(())
}

/// Rebuild a store from `reader`.
///
/// Entries go through the normal [`VectorStore::add`] path. Any failure drops
/// the partially built store. Metadata is not part of the format, so every
/// loaded entry has `metadata == None`.
///
/// Buffers grow with the bytes actually read, so a header or id length that
/// overstates the file size fails as `CorruptFile` without allocating the
/// claimed amount first.
pub fn read_store<M, R: Read>(reader: &mut R) -> Result<VectorStore<M>> {
    let mut header_buf = [0u8; HEADER_SIZE];
    read_exact_or_corrupt(reader, &mut header_buf, "header")?;
    let header = Header::decode(&header_buf)?;

    let dimensions = usize::try_from(header.dimensions)
        .map_err(|_| VdbError::corrupt(format!("dimensions {} too large", header.dimensions)))?;
    let store = VectorStore::with_config(StoreConfig::new(dimensions, header.metric))?;

    let mut chunk = [0u8; ROW_CHUNK * 4];
    let mut data = Vec::new();
    let mut id_bytes = Vec::new();

    for i in 0..header.count {
        read_row(reader, dimensions, &mut chunk, &mut data)?;

        let mut len_buf = [0u8; 4];
        read_exact_or_corrupt(reader, &mut len_buf, "id length")?;
        let id_len = u32::from_le_bytes(len_buf) as u64;

        let id = if id_len > 0 {
            id_bytes.clear();
            let read = reader.by_ref().take(id_len).read_to_end(&mut id_bytes)?;
            if (read as u64) < id_len {
                return Err(VdbError::corrupt("truncated id"));
            }
            let id = std::str::from_utf8(&id_bytes)
                .map_err(|_| VdbError::corrupt(format!("id of vector {} is not UTF-8", i)))?;
            Some(id)
        } else {
            None
        };

        store.add(&data, id, None)?;
    }

    Ok(store)
}

/// Decode one row of `dimensions` floats into `data`, a chunk at a time.
fn read_row<R: Read>(
    reader: &mut R,
    dimensions: usize,
    chunk: &mut [u8; ROW_CHUNK * 4],
    data: &mut Vec<f32>,
) -> Result<()> {
    data.clear();
    let mut remaining = dimensions;
    while remaining > 0 {
        let floats = remaining.min(ROW_CHUNK);
        let bytes = &mut chunk[..floats * 4];
        read_exact_or_corrupt(reader, bytes, "vector data")?;
        data.extend(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])),
        );
        remaining -= floats;
    }
    Ok(())
}

fn read_exact_or_corrupt<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            Err(VdbError::corrupt(format!("truncated {}", what)))
        }
        Err(e) => Err(VdbError::IoError(e)),
    }
}
