//! UID-to-username cache.
//!
//! Built once from `/etc/passwd` before collection starts and queried only
//! during projection. Unknown UIDs render as their numeric form.

use std::collections::HashMap;
use std::fs;

/// Cached mapping from numeric UID to login name.
#[derive(Debug, Default)]
pub struct UserCache {
    users: HashMap<u32, String>,
}

impl UserCache {
    /// Load the system user table. An unreadable passwd file yields an
    /// empty cache; every lookup then falls back to the numeric UID.
    pub fn load() -> UserCache {
        match fs::read_to_string("/etc/passwd") {
            Ok(content) => UserCache::from_content(&content),
            Err(_) => UserCache::default(),
        }
    }

    /// Build a cache from passwd-format content (for testing).
    pub fn from_content(content: &str) -> UserCache {
        let mut users = HashMap::new();
        for line in content.lines() {
            let mut fields = line.split(':');
            let name = fields.next();
            let _password = fields.next();
            let uid = fields.next().and_then(|f| f.parse::<u32>().ok());
            if let (Some(name), Some(uid)) = (name, uid) {
                users.entry(uid).or_insert_with(|| name.to_string());
            }
        }
        UserCache { users }
    }

    /// Display name for a UID, or its numeric form when unknown.
    pub fn lookup(&self, uid: u32) -> String {
        match self.users.get(&uid) {
            Some(name) => name.clone(),
            None => uid.to_string(),
        }
    }
}
