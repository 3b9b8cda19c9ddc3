use std::path::Path;

use tracing::info;

use faceauth_matcher::{find_best_match, Matcher, DEFAULT_THRESHOLD};
use faceauth_store::{self as store, FileStore, MemoryStore, RecordStore};

use crate::error::RegistryError;

/// Controls registry behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum Euclidean distance for a verification to be accepted.
    /// A best match at or above this distance is rejected.
    /// Default: 0.5.
    pub threshold: f32,
}

impl Config {
    fn with_defaults(mut self) -> Self {
        if self.threshold == 0.0 {
            self.threshold = DEFAULT_THRESHOLD;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Result of a register operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new record was appended.
    Created,
    /// An existing record's descriptor was replaced.
    Updated,
}

/// Result of a verify operation. No-match is a normal outcome here, not
/// an error.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// The nearest record lies strictly within the threshold.
    Match { name: String, distance: f32 },
    /// No record was close enough. `best_distance` is infinite when the
    /// roster is empty or holds only mismatched-length descriptors.
    NoMatch { best_distance: f32 },
}

/// Stores, lists, deletes, and verifies named face descriptors.
///
/// Every operation runs a full load from the store; mutations write the
/// full roster back. There is no write lock spanning load and save: two
/// concurrent mutations can race and the last save wins. At the target
/// scale (a small local roster) this is an accepted limitation; wrap the
/// registry in a single-writer queue if stronger guarantees are needed.
pub struct Registry {
    matcher: Matcher,
    store: Box<dyn RecordStore>,
}

impl Registry {
    pub fn new(cfg: Config, store: Box<dyn RecordStore>) -> Self {
        let cfg = cfg.with_defaults();
        Self {
            matcher: Matcher::new(cfg.threshold),
            store,
        }
    }

    /// Creates a registry backed by a single JSON file.
    pub fn with_file_store(cfg: Config, path: impl AsRef<Path>) -> Self {
        Self::new(cfg, Box::new(FileStore::new(path.as_ref())))
    }

    /// Creates a registry with a default in-memory store.
    pub fn with_memory_store(cfg: Config) -> Self {
        Self::new(cfg, Box::new(MemoryStore::new()))
    }

    pub fn threshold(&self) -> f32 {
        self.matcher.threshold()
    }

    /// Registers a descriptor under a name, replacing the previous
    /// descriptor if the name is already registered.
    ///
    /// The descriptor is stored as-is: its length is not checked against
    /// the rest of the roster. A record with an odd length simply never
    /// wins a verification against compatible candidates.
    pub fn register(
        &self,
        name: &str,
        descriptor: &[f32],
    ) -> Result<RegisterOutcome, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidInput("name is empty".into()));
        }

        let mut records = self.store.load()?;
        let updated = store::upsert(&mut records, name, descriptor.to_vec());
        self.store.save(&records)?;

        if updated {
            info!("updated descriptor for {name}");
            Ok(RegisterOutcome::Updated)
        } else {
            info!("registered {name}");
            Ok(RegisterOutcome::Created)
        }
    }

    /// Finds the nearest registered record and accepts it only when its
    /// distance is strictly below the threshold. Read-only.
    pub fn verify(&self, descriptor: &[f32]) -> Result<VerifyOutcome, RegistryError> {
        let records = self.store.load()?;
        let (best, distance) = find_best_match(&records, descriptor);

        match best {
            Some(record) if self.matcher.accepts(distance) => {
                info!("verified {} (distance: {:.4})", record.name, distance);
                Ok(VerifyOutcome::Match {
                    name: record.name.clone(),
                    distance,
                })
            }
            _ => {
                info!("verification failed (best distance: {distance:.4})");
                Ok(VerifyOutcome::NoMatch {
                    best_distance: distance,
                })
            }
        }
    }

    /// Returns the registered names in store order. Descriptors are never
    /// exposed through listings.
    pub fn list(&self) -> Result<Vec<String>, RegistryError> {
        let records = self.store.load()?;
        Ok(store::list_names(&records))
    }

    /// Deletes the record with the given name. Returns
    /// [`RegistryError::NotFound`] without mutating when no record
    /// matches.
    pub fn delete(&self, name: &str) -> Result<(), RegistryError> {
        let mut records = self.store.load()?;

        if !store::remove(&mut records, name) {
            return Err(RegistryError::NotFound(name.to_string()));
        }

        self.store.save(&records)?;
        info!("deleted {name}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::with_memory_store(Config::default())
    }

    #[test]
    fn config_zero_threshold_defaults() {
        let reg = Registry::with_memory_store(Config { threshold: 0.0 });
        assert_eq!(reg.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn register_rejects_empty_name() {
        let reg = registry();
        let err = reg.register("", &[1.0]);
        assert!(matches!(err, Err(RegistryError::InvalidInput(_))));
        assert!(reg.list().unwrap().is_empty(), "store must stay untouched");
    }

    #[test]
    fn register_then_verify_identical() {
        let reg = registry();
        assert_eq!(
            reg.register("alice", &[0.1, 0.2, 0.3]).unwrap(),
            RegisterOutcome::Created
        );

        let outcome = reg.verify(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(
            outcome,
            VerifyOutcome::Match {
                name: "alice".into(),
                distance: 0.0
            }
        );
    }

    #[test]
    fn register_same_name_twice_upserts() {
        let reg = registry();
        reg.register("alice", &[1.0, 0.0]).unwrap();
        assert_eq!(
            reg.register("alice", &[0.0, 1.0]).unwrap(),
            RegisterOutcome::Updated
        );

        assert_eq!(reg.list().unwrap(), vec!["alice"]);

        // The latest descriptor is the one matched against.
        let outcome = reg.verify(&[0.0, 1.0]).unwrap();
        assert!(matches!(outcome, VerifyOutcome::Match { distance, .. } if distance == 0.0));
    }

    #[test]
    fn near_but_over_threshold_is_rejected() {
        let reg = registry();
        reg.register("alice", &[0.0, 0.0, 0.0]).unwrap();
        reg.register("bob", &[10.0, 10.0, 10.0]).unwrap();

        // Best match is alice at distance 1.0, which fails threshold 0.5.
        match reg.verify(&[0.0, 0.0, 1.0]).unwrap() {
            VerifyOutcome::NoMatch { best_distance } => {
                assert!((best_distance - 1.0).abs() < 1e-6);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }

        // The identical descriptor verifies as alice.
        match reg.verify(&[0.0, 0.0, 0.0]).unwrap() {
            VerifyOutcome::Match { name, distance } => {
                assert_eq!(name, "alice");
                assert_eq!(distance, 0.0);
            }
            other => panic!("expected Match, got {other:?}"),
        }
    }

    #[test]
    fn verify_empty_store() {
        let reg = registry();
        match reg.verify(&[1.0, 2.0]).unwrap() {
            VerifyOutcome::NoMatch { best_distance } => {
                assert_eq!(best_distance, f32::INFINITY);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn delete_unknown_name_is_not_found() {
        let reg = registry();
        reg.register("alice", &[1.0]).unwrap();

        let err = reg.delete("bob");
        assert!(matches!(err, Err(RegistryError::NotFound(_))));
        assert_eq!(reg.list().unwrap(), vec!["alice"]);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let reg = registry();
        reg.register("alice", &[1.0]).unwrap();
        reg.register("bob", &[2.0]).unwrap();
        reg.register("carol", &[3.0]).unwrap();

        reg.delete("bob").unwrap();
        assert_eq!(reg.list().unwrap(), vec!["alice", "carol"]);
    }

    #[test]
    fn mixed_dimensionality_is_stored_permissively() {
        let reg = registry();
        reg.register("alice", &[0.0, 0.0, 0.0]).unwrap();
        reg.register("legacy", &[0.0]).unwrap();

        assert_eq!(reg.list().unwrap(), vec!["alice", "legacy"]);

        // The mismatched record is infinitely distant, so alice wins.
        match reg.verify(&[0.0, 0.0, 0.2]).unwrap() {
            VerifyOutcome::Match { name, .. } => assert_eq!(name, "alice"),
            other => panic!("expected Match, got {other:?}"),
        }
    }

    #[test]
    fn file_backed_registry_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.json");

        {
            let reg = Registry::with_file_store(Config::default(), &path);
            reg.register("alice", &[0.1, 0.2]).unwrap();
        }

        let reg = Registry::with_file_store(Config::default(), &path);
        assert_eq!(reg.list().unwrap(), vec!["alice"]);
        assert!(matches!(
            reg.verify(&[0.1, 0.2]).unwrap(),
            VerifyOutcome::Match { .. }
        ));
    }
}
