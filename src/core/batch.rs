//! Batched parameter lookups.
//!
//! SSM accepts at most [`MAX_BATCH_SIZE`] names per `GetParameters` call, so
//! a resolution pass splits its paths into consecutive chunks and issues one
//! call per chunk.

use tracing::trace;

use crate::core::constants::MAX_BATCH_SIZE;
use crate::core::store::{GetParameters, ParameterStore};
use crate::core::types::ParameterPath;
use crate::error::StoreError;

/// Outcome of resolving a list of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// `(path, value)` pairs, in chunk order.
    pub resolved: Vec<(ParameterPath, String)>,
    /// Paths the store reported as missing, in chunk order.
    pub unresolved: Vec<ParameterPath>,
}

/// Look up every path, [`MAX_BATCH_SIZE`] at a time, with decryption.
///
/// # Errors
///
/// Returns the first `StoreError` raised by any chunk. Results from chunks
/// that already succeeded are discarded.
pub fn resolve(
    store: &dyn ParameterStore,
    paths: &[ParameterPath],
) -> Result<Resolution, StoreError> {
    let mut resolution = Resolution::default();

    for (index, chunk) in paths.chunks(MAX_BATCH_SIZE).enumerate() {
        trace!(chunk = index, size = chunk.len(), store = store.name(), "resolving chunk");

        let out = store.get_parameters(&GetParameters {
            names: chunk.to_vec(),
            with_decryption: true,
        })?;

        resolution
            .resolved
            .extend(out.found.into_iter().map(|p| (p.name, p.value)));
        resolution.unresolved.extend(out.invalid);
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    fn paths(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/p/{}", i)).collect()
    }

    #[test]
    fn test_chunks_of_ten() {
        let store = MemoryStore::new();
        let resolution = resolve(&store, &paths(23)).unwrap();

        let sizes: Vec<usize> = store.requests().iter().map(|r| r.names.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(resolution.unresolved, paths(23));
    }

    #[test]
    fn test_always_decrypts() {
        let store = MemoryStore::new();
        resolve(&store, &paths(1)).unwrap();
        assert!(store.requests().iter().all(|r| r.with_decryption));
    }

    #[test]
    fn test_empty_input_makes_no_calls() {
        let store = MemoryStore::new();
        assert_eq!(resolve(&store, &[]).unwrap(), Resolution::default());
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_partitions_results() {
        let store = MemoryStore::new().with("/p/0", "zero").with("/p/11", "eleven");
        let resolution = resolve(&store, &paths(12)).unwrap();

        assert_eq!(
            resolution.resolved,
            vec![
                ("/p/0".to_string(), "zero".to_string()),
                ("/p/11".to_string(), "eleven".to_string()),
            ]
        );
        assert_eq!(resolution.unresolved.len(), 10);
        assert!(!resolution.unresolved.contains(&"/p/11".to_string()));
    }

    #[test]
    fn test_chunk_failure_aborts() {
        let store = MemoryStore::failing(StoreError::Request("throttled".into()));
        let err = resolve(&store, &paths(15)).unwrap_err();
        assert_eq!(err, StoreError::Request("throttled".into()));
        assert_eq!(store.calls(), 1);
    }

    #[test]
    fn test_later_chunk_failure_discards_results() {
        let store = MemoryStore::new()
            .with("/p/0", "zero")
            .with("/p/12", "twelve")
            .failing_after(1, StoreError::Request("boom".into()));

        let err = resolve(&store, &paths(15)).unwrap_err();
        assert_eq!(err, StoreError::Request("boom".into()));
        assert_eq!(store.calls(), 2);
    }
}
