//! Device identity persistence.
//!
//! Quota is tracked per identity, so the token must survive restarts:
//! it is generated once (UUID v4) and stored in a plain text file. If
//! the file cannot be read or written, a fresh unpersisted token is used
//! for the session rather than failing the whole client.

use std::path::{Path, PathBuf};

use roomlift_core::types::Identity;

/// Loads and persists the device identity token.
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the persisted identity, creating and storing a new one on
    /// first use.
    ///
    /// IO failures degrade to a fresh token for this session only; the
    /// identity then resets on restart, which costs the user at worst a
    /// re-granted free tier, never a lost one.
    pub fn load_or_create(&self) -> Identity {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if !token.is_empty() {
                    return token.to_string();
                }
                self.create_and_persist()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.create_and_persist(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read identity file, using session-only identity"
                );
                new_token()
            }
        }
    }

    fn create_and_persist(&self) -> Identity {
        let token = new_token();
        if let Err(e) = write_token(&self.path, &token) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist identity, it will reset on restart"
            );
        }
        token
    }
}

fn new_token() -> Identity {
    uuid::Uuid::new_v4().to_string()
}

fn write_token(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, token)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_creates_and_persists_a_uuid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity");
        let store = IdentityStore::new(&path);

        let token = store.load_or_create();
        assert!(uuid::Uuid::parse_str(&token).is_ok());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), token);
    }

    #[test]
    fn subsequent_loads_return_the_same_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity");
        let store = IdentityStore::new(&path);

        let first = store.load_or_create();
        let second = store.load_or_create();
        assert_eq!(first, second);
    }

    #[test]
    fn existing_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity");
        std::fs::write(&path, "abc-123\n").unwrap();

        let token = IdentityStore::new(&path).load_or_create();
        assert_eq!(token, "abc-123");
    }

    #[test]
    fn empty_file_is_replaced_with_a_fresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity");
        std::fs::write(&path, "").unwrap();

        let token = IdentityStore::new(&path).load_or_create();
        assert!(!token.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), token);
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/identity");
        let store = IdentityStore::new(&path);

        let token = store.load_or_create();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), token);
    }
}
