use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::store::repo::KeyValueStore;

/// Flat JSON object on disk, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        Ok(Self { path })
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let s = fs::read_to_string(&self.path)?;
        if s.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&s)?)
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let s = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, s)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("webmail_client_test_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("survive.json");
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path).unwrap();
        store.set("userEmail", "a@x.com").unwrap();
        store.set("isLoggedIn", "true").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("userEmail").unwrap().as_deref(), Some("a@x.com"));

        reopened.remove("userEmail").unwrap();
        assert_eq!(store.get("userEmail").unwrap(), None);
        assert_eq!(store.get("isLoggedIn").unwrap().as_deref(), Some("true"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileStore::open(temp_path("never_written.json")).unwrap();
        assert_eq!(store.get("userEmail").unwrap(), None);
        store.remove("userEmail").unwrap();
    }
}
