use std::env;
use anyhow::{bail, Context, Result};

/// Which `TodoStore` implementation the service runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Spanner,
    Memory,
}

/// Spanner database coordinates, parsed from the connection string
/// `projects/{project}/instances/{instance}/databases/{database}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannerDatabase {
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerDatabase {
    pub fn parse(url: &str) -> Result<Self> {
        let parts: Vec<&str> = url.trim().trim_matches('/').split('/').collect();
        match parts.as_slice() {
            ["projects", project, "instances", instance, "databases", database]
                if !project.is_empty() && !instance.is_empty() && !database.is_empty() =>
            {
                Ok(Self {
                    project: project.to_string(),
                    instance: instance.to_string(),
                    database: database.to_string(),
                })
            }
            _ => bail!(
                "SPANNER_DATABASE_URL must look like 'projects/P/instances/I/databases/D', got '{}'",
                url
            ),
        }
    }

    pub fn project_path(&self) -> String {
        format!("projects/{}", self.project)
    }

    pub fn instance_path(&self) -> String {
        format!("{}/instances/{}", self.project_path(), self.instance)
    }

    pub fn database_path(&self) -> String {
        format!("{}/databases/{}", self.instance_path(), self.database)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub spanner_emulator_host: Option<String>,
    /// Present whenever `storage_backend` is `Spanner`
    pub spanner: Option<SpannerDatabase>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "spanner".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "spanner" => StorageBackend::Spanner,
            "memory" => StorageBackend::Memory,
            other => bail!(
                "STORAGE_BACKEND must be one of: spanner, memory, got '{}'",
                other
            ),
        };

        let spanner_emulator_host = lookup("SPANNER_EMULATOR_HOST");

        let spanner = match storage_backend {
            StorageBackend::Spanner => Some(spanner_database(&lookup)?),
            StorageBackend::Memory => None,
        };

        let service_port = lookup("SERVICE_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            storage_backend,
            spanner_emulator_host,
            spanner,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Storage backend: {:?}", self.storage_backend);
        if let Some(spanner) = &self.spanner {
            tracing::info!("  Spanner emulator: {}",
                self.spanner_emulator_host.as_deref().unwrap_or("disabled (using production)"));
            tracing::info!("  Spanner database: {}", spanner.database_path());
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn spanner_database<F>(lookup: &F) -> Result<SpannerDatabase>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("SPANNER_DATABASE_URL") {
        return SpannerDatabase::parse(&url);
    }

    let project = lookup("SPANNER_PROJECT")
        .context("SPANNER_PROJECT environment variable is required")?;
    let instance = lookup("SPANNER_INSTANCE")
        .context("SPANNER_INSTANCE environment variable is required")?;
    let database = lookup("SPANNER_DATABASE")
        .context("SPANNER_DATABASE environment variable is required")?;

    Ok(SpannerDatabase {
        project,
        instance,
        database,
    })
}
