//! Persistence layer: the binary store file format.

pub mod codec;
pub mod format;

pub use codec::{read_store, write_store};
pub use format::{Header, HEADER_SIZE, MAGIC};

use crate::error::Result;
use crate::storage::VectorStore;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Save `store` to `path`, replacing any existing file.
///
/// The shared hold is taken before the file is opened, so a store whose lock
/// cannot be acquired leaves an existing file untouched. There is no
/// partial-write recovery: if writing fails midway the file is left truncated
/// and should be treated as invalid.
pub fn save<M>(store: &VectorStore<M>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let entries = store.read_entries()?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    codec::write_entries(&entries, store.dimensions(), store.metric(), &mut writer)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        dimensions = store.dimensions(),
        count = entries.len(),
        "saved vector store"
    );
    Ok(())
}

/// Load a store from `path`.
pub fn load<M>(path: impl AsRef<Path>) -> Result<VectorStore<M>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    match read_store(&mut reader) {
        Ok(store) => {
            debug!(
                path = %path.display(),
                dimensions = store.dimensions(),
                count = store.count(),
                metric = %store.metric(),
                "loaded vector store"
            );
            Ok(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rejected store file");
            Err(e)
        }
    }
}
