//! Persisted last-used preferences.
//!
//! Two JSON records under `~/.mernfinity` remember the previous repository,
//! branch, environment variables and service name so later runs can offer
//! them as defaults. Loading never fails: a missing file is created with
//! all-null fields and a corrupt file falls back to the same default.
//! Saving merges field-wise: fields present in the update win, omitted
//! fields keep their stored value.

use std::cell::RefCell;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::envfile::EnvSet;
use crate::error::{DeployError, DeployResult};

const HISTORY_DIR: &str = ".mernfinity";
const REPO_FILE: &str = "repo-history.json";
const RENDER_FILE: &str = "render-history.json";

/// Last-used values for the GitHub push flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoHistory {
    pub last_used_repo: Option<String>,
    pub last_used_branch: Option<String>,
}

impl RepoHistory {
    fn merge_from(&mut self, update: RepoHistory) {
        if update.last_used_repo.is_some() {
            self.last_used_repo = update.last_used_repo;
        }
        if update.last_used_branch.is_some() {
            self.last_used_branch = update.last_used_branch;
        }
    }
}

/// Last-used values for the Render blueprint flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderHistory {
    pub last_used_repo: Option<String>,
    pub last_used_envs: Option<EnvSet>,
    pub last_service_name: Option<String>,
}

impl RenderHistory {
    fn merge_from(&mut self, update: RenderHistory) {
        if update.last_used_repo.is_some() {
            self.last_used_repo = update.last_used_repo;
        }
        if update.last_used_envs.is_some() {
            self.last_used_envs = update.last_used_envs;
        }
        if update.last_service_name.is_some() {
            self.last_service_name = update.last_service_name;
        }
    }
}

/// Preference-store seam injected into each flow.
///
/// `load_*` never fails; `save_*` returns an error only so callers can
/// print a non-fatal warning and continue.
pub trait HistoryStore {
    fn load_repo(&self) -> RepoHistory;
    fn save_repo(&self, update: RepoHistory) -> DeployResult<()>;
    fn load_render(&self) -> RenderHistory;
    fn save_render(&self, update: RenderHistory) -> DeployResult<()>;
}

/// History store backed by JSON files under `~/.mernfinity`.
pub struct FsHistoryStore {
    dir: PathBuf,
}

impl FsHistoryStore {
    pub fn new() -> DeployResult<Self> {
        let home = dirs::home_dir().ok_or(DeployError::HomeDirUnavailable)?;
        Ok(Self {
            dir: home.join(HISTORY_DIR),
        })
    }

    /// Store rooted at an explicit directory instead of the user home.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn load_record<T>(&self, file: &str) -> T
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let path = self.dir.join(file);
        if !path.exists() {
            // First use: seed the file with the all-null default. Failures
            // here are ignored; the default is returned either way.
            let _ = std::fs::create_dir_all(&self.dir);
            if let Ok(json) = serde_json::to_string_pretty(&T::default()) {
                let _ = std::fs::write(&path, json);
            }
            return T::default();
        }
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    fn write_record<T: Serialize>(&self, file: &str, record: &T) -> DeployResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(self.dir.join(file), json)?;
        Ok(())
    }
}

impl HistoryStore for FsHistoryStore {
    fn load_repo(&self) -> RepoHistory {
        self.load_record(REPO_FILE)
    }

    fn save_repo(&self, update: RepoHistory) -> DeployResult<()> {
        let mut current = self.load_repo();
        current.merge_from(update);
        self.write_record(REPO_FILE, &current)
    }

    fn load_render(&self) -> RenderHistory {
        self.load_record(RENDER_FILE)
    }

    fn save_render(&self, update: RenderHistory) -> DeployResult<()> {
        let mut current = self.load_render();
        current.merge_from(update);
        self.write_record(RENDER_FILE, &current)
    }
}

/// In-memory history store for tests.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    repo: RefCell<RepoHistory>,
    render: RefCell<RenderHistory>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load_repo(&self) -> RepoHistory {
        self.repo.borrow().clone()
    }

    fn save_repo(&self, update: RepoHistory) -> DeployResult<()> {
        self.repo.borrow_mut().merge_from(update);
        Ok(())
    }

    fn load_render(&self) -> RenderHistory {
        self.render.borrow().clone()
    }

    fn save_render(&self, update: RenderHistory) -> DeployResult<()> {
        self.render.borrow_mut().merge_from(update);
        Ok(())
    }
}
