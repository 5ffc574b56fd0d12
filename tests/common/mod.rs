#![allow(dead_code)]

use addrbook::Database;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

/// SQLite file under the system temp dir, removed on drop.
pub struct TempDb {
    pub db: Database,
    pub database_url: String,
    path: PathBuf,
}

impl TempDb {
    pub async fn new(tag: &str) -> Self {
        let (database_url, path) = fresh_database_url(tag);
        let db = Database::connect(&database_url)
            .await
            .expect("failed to open temp database");
        Self {
            db,
            database_url,
            path,
        }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        remove_database_files(&self.path);
    }
}

/// URL of a not-yet-existing SQLite file, plus its path.
pub fn fresh_database_url(tag: &str) -> (String, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "addrbook-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    (format!("sqlite:{}", path.display()), path)
}

pub fn remove_database_files(path: &Path) {
    let _ = fs::remove_file(path);
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut side = path.to_path_buf().into_os_string();
        side.push(suffix);
        let _ = fs::remove_file(side);
    }
}
