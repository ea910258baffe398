// Copyright 2026 Newsdesk Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search_url: String,
    pub get_doc_url: String,
    pub get_similar_docs_url: String,
    pub page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: "http://127.0.0.1:5000/search".to_string(),
            get_doc_url: "http://127.0.0.1:5000/get_doc".to_string(),
            get_similar_docs_url: "http://127.0.0.1:5000/get_similar_docs".to_string(),
            page_size: 10,
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(PathBuf::from(appdata));
        }
        if let Ok(profile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(profile).join("AppData").join("Roaming"));
        }
        return None;
    }

    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").ok()?;
        return Some(
            PathBuf::from(home)
                .join("Library")
                .join("Application Support"),
        );
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config"))
}

pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("newsdesk").join("newsdesk.toml"))
}

pub fn load_global_config() -> Result<Config> {
    let Some(path) = global_config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    read_config(&path)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut config: Config = toml::from_str(&text).context("parse newsdesk.toml")?;
    if config.page_size == 0 {
        config.page_size = Config::default().page_size;
    }
    Ok(config)
}

pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("serialize newsdesk.toml")?;
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use tempfile::tempdir;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn config_path(config_root: &Path) -> PathBuf {
        let base = if cfg!(target_os = "macos") {
            config_root.join("Library").join("Application Support")
        } else {
            config_root.to_path_buf()
        };
        base.join("newsdesk").join("newsdesk.toml")
    }

    fn with_env<T>(config_root: &Path, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let old_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        let old_home = std::env::var("HOME").ok();
        let old_appdata = std::env::var("APPDATA").ok();
        set_env_var("XDG_CONFIG_HOME", config_root);
        set_env_var("HOME", config_root);
        set_env_var("APPDATA", config_root);
        let result = f();
        match old_xdg {
            Some(val) => set_env_var("XDG_CONFIG_HOME", val),
            None => remove_env_var("XDG_CONFIG_HOME"),
        }
        match old_home {
            Some(val) => set_env_var("HOME", val),
            None => remove_env_var("HOME"),
        }
        match old_appdata {
            Some(val) => set_env_var("APPDATA", val),
            None => remove_env_var("APPDATA"),
        }
        result
    }

    fn set_env_var(key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn remove_env_var(key: &str) {
        unsafe {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn defaults_when_no_config_file() {
        let dir = tempdir().expect("tempdir");
        with_env(dir.path(), || {
            let config = load_global_config().expect("load");
            assert_eq!(config.search_url, "http://127.0.0.1:5000/search");
            assert_eq!(config.page_size, 10);
        });
    }

    #[test]
    fn reads_global_config() {
        let dir = tempdir().expect("tempdir");
        with_env(dir.path(), || {
            let path = config_path(dir.path());
            let config = Config {
                search_url: "http://10.0.0.8:8000/search".to_string(),
                ..Config::default()
            };
            write_config(&path, &config).expect("write");

            let loaded = load_global_config().expect("load");
            assert_eq!(loaded.search_url, "http://10.0.0.8:8000/search");
            assert_eq!(loaded.get_doc_url, "http://127.0.0.1:5000/get_doc");
        });
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("newsdesk.toml");
        std::fs::write(&path, "page_size = 0").expect("write");
        let config = read_config(&path).expect("read");
        assert_eq!(config.page_size, 10);
    }
}
