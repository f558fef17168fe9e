//! Render blueprint generation.
//!
//! Emits a `render.yaml` describing a single free-plan Node web service.
//! The file is written wholesale on every run; there is no incremental
//! update.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::envfile::EnvSet;
use crate::error::DeployResult;

pub const BLUEPRINT_FILE: &str = "render.yaml";
pub const DASHBOARD_URL: &str = "https://dashboard.render.com";
pub const BLUEPRINT_NEW_URL: &str = "https://dashboard.render.com/blueprint/new";

/// Top-level blueprint document: a `services` list.
#[derive(Debug, Clone, Serialize)]
pub struct Blueprint {
    services: Vec<ServiceDescriptor>,
}

/// One deployable web service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    #[serde(rename = "type")]
    service_type: String,
    name: String,
    env: String,
    plan: String,
    build_command: String,
    start_command: String,
    auto_deploy: bool,
    repo: String,
    branch: String,
    env_vars: Vec<EnvVarEntry>,
    health_check_path: String,
    num_instances: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarEntry {
    key: String,
    value: String,
    generate_value: bool,
}

impl ServiceDescriptor {
    /// Node web service on the free plan, started from `server_file`.
    /// Env entries mirror `envs` exactly, in insertion order.
    pub fn web(name: &str, repo: &str, server_file: &str, envs: &EnvSet) -> Self {
        Self {
            service_type: "web".to_string(),
            name: name.to_string(),
            env: "node".to_string(),
            plan: "free".to_string(),
            build_command: "npm install".to_string(),
            start_command: format!("node {server_file}"),
            auto_deploy: true,
            repo: repo.to_string(),
            branch: "main".to_string(),
            env_vars: envs
                .iter()
                .map(|(key, value)| EnvVarEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                    generate_value: false,
                })
                .collect(),
            health_check_path: "/".to_string(),
            num_instances: 1,
        }
    }
}

impl Blueprint {
    pub fn single(service: ServiceDescriptor) -> Self {
        Self {
            services: vec![service],
        }
    }

    pub fn to_yaml(&self) -> DeployResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Write `render.yaml` into `dir`, replacing any previous file.
    pub fn write(&self, dir: &Path) -> DeployResult<PathBuf> {
        let path = dir.join(BLUEPRINT_FILE);
        std::fs::write(&path, self.to_yaml()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_envs() -> EnvSet {
        let mut envs = EnvSet::new();
        envs.insert("MONGO_URI", "mongodb://localhost/app");
        envs.insert("PORT", "3000");
        envs
    }

    #[test]
    fn test_yaml_has_fixed_service_fields() {
        let blueprint = Blueprint::single(ServiceDescriptor::web(
            "my-app",
            "https://github.com/me/app.git",
            "server.js",
            &sample_envs(),
        ));
        let yaml = blueprint.to_yaml().unwrap();

        assert!(yaml.starts_with("services:"));
        assert!(yaml.contains("type: web"));
        assert!(yaml.contains("name: my-app"));
        assert!(yaml.contains("env: node"));
        assert!(yaml.contains("plan: free"));
        assert!(yaml.contains("buildCommand: npm install"));
        assert!(yaml.contains("startCommand: node server.js"));
        assert!(yaml.contains("autoDeploy: true"));
        assert!(yaml.contains("repo: https://github.com/me/app.git"));
        assert!(yaml.contains("branch: main"));
        assert!(yaml.contains("healthCheckPath: /"));
        assert!(yaml.contains("numInstances: 1"));
        assert!(yaml.contains("generateValue: false"));
    }

    #[test]
    fn test_env_entries_keep_insertion_order() {
        let blueprint = Blueprint::single(ServiceDescriptor::web(
            "my-app",
            "R",
            "server.js",
            &sample_envs(),
        ));
        let yaml = blueprint.to_yaml().unwrap();

        let mongo = yaml.find("key: MONGO_URI").unwrap();
        let port = yaml.find("key: PORT").unwrap();
        assert!(mongo < port);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let make = || {
            Blueprint::single(ServiceDescriptor::web(
                "my-app",
                "https://github.com/me/app.git",
                "index.js",
                &sample_envs(),
            ))
            .to_yaml()
            .unwrap()
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_write_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BLUEPRINT_FILE), "stale").unwrap();

        let blueprint =
            Blueprint::single(ServiceDescriptor::web("my-app", "R", "server.js", &EnvSet::new()));
        let path = blueprint.write(dir.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("services:"));
        assert!(!content.contains("stale"));
    }
}
