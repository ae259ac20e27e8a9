use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig, Error as SpannerError};
use gcloud_spanner::mutation::insert;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SpannerDatabase;
use crate::models::{Todo, TodoFields};
use crate::store::TodoStore;

const TODOS_TABLE_DDL: &str = r#"
CREATE TABLE todos (
    id STRING(36) NOT NULL,
    title STRING(MAX) NOT NULL,
    description STRING(MAX),
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#;

/// Shareable Spanner client for use across async handlers
#[derive(Clone)]
pub struct SpannerClient {
    inner: Arc<Client>,
}

impl SpannerClient {
    /// Provision anything missing, then open the session pool.
    /// SPANNER_EMULATOR_HOST is honoured by gcloud-spanner itself.
    pub async fn connect(database: &SpannerDatabase, emulator_host: Option<&str>) -> Result<Self> {
        let admin = AdminClient::new(AdminClientConfig::default())
            .await
            .context("Failed to create Spanner admin client")?;
        Provisioner {
            admin,
            database,
            emulator: emulator_host.is_some(),
        }
        .run()
        .await?;

        let database_path = database.database_path();

        match emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Run a single DML statement in a read-write transaction, returning the
    /// affected row count
    async fn execute_dml(&self, build: impl Fn() -> Statement + Send + Sync) -> Result<i64> {
        let (_, row_count) = self
            .inner
            .read_write_transaction(|tx| {
                let statement = build();
                Box::pin(async move {
                    let count = tx.update(statement).await?;
                    Ok::<i64, SpannerError>(count)
                })
            })
            .await?;
        Ok(row_count)
    }
}

#[async_trait]
impl TodoStore for SpannerClient {
    async fn create(&self, fields: TodoFields) -> Result<Todo> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let mutation = insert(
            "todos",
            &["id", "title", "description", "created_at"],
            &[&id_str, &fields.title, &fields.description, &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert todo into Spanner")?;

        tracing::debug!("Inserted todo with id: {}", id);
        Ok(fields.into_todo(id))
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let statement = Statement::new(
            "SELECT id, title, description FROM todos ORDER BY created_at, id"
        );

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query todos from Spanner")?;

        let mut todos = Vec::new();
        while let Some(row) = result_set.next().await? {
            let id_str: String = row.column_by_name("id")?;
            let id = Uuid::parse_str(&id_str)
                .with_context(|| format!("Stored todo has a malformed id: {}", id_str))?;

            todos.push(Todo {
                id,
                title: row.column_by_name("title")?,
                description: row.column_by_name("description")?,
            });
        }

        tracing::debug!("Listed {} todos", todos.len());
        Ok(todos)
    }

    async fn update(&self, id: Uuid, fields: TodoFields) -> Result<Option<Todo>> {
        let id_str = id.to_string();

        let row_count = self
            .execute_dml(|| {
                let mut statement = Statement::new(
                    "UPDATE todos SET title = @title, description = @description WHERE id = @id"
                );
                statement.add_param("id", &id_str);
                statement.add_param("title", &fields.title);
                statement.add_param("description", &fields.description);
                statement
            })
            .await
            .context("Failed to update todo in Spanner")?;

        if row_count == 0 {
            tracing::debug!("No todo to update with id: {}", id);
            return Ok(None);
        }

        tracing::debug!("Updated todo with id: {}", id);
        Ok(Some(fields.into_todo(id)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let id_str = id.to_string();

        let row_count = self
            .execute_dml(|| {
                let mut statement = Statement::new("DELETE FROM todos WHERE id = @id");
                statement.add_param("id", &id_str);
                statement
            })
            .await
            .context("Failed to delete todo from Spanner")?;

        tracing::debug!("Deleted {} todo row(s) with id: {}", row_count, id);
        Ok(row_count > 0)
    }

    /// Lightweight `SELECT 1` to verify the connection is alive
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Creates whatever part of instance / database / `todos` table is missing
struct Provisioner<'a> {
    admin: AdminClient,
    database: &'a SpannerDatabase,
    emulator: bool,
}

/// Turn a `get_*` admin lookup into "must create" / "already there"
fn must_create(kind: &str, path: &str, lookup: Result<(), Status>) -> Result<bool> {
    match lookup {
        Ok(()) => {
            tracing::info!("Spanner {} present: {}", kind, path);
            Ok(false)
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Spanner {} missing, creating: {}", kind, path);
            Ok(true)
        }
        Err(status) => bail!("Failed to look up Spanner {} {}: {}", kind, path, status.message()),
    }
}

/// Instance config for a newly created instance
fn instance_config(project_path: &str, emulator: bool) -> String {
    let name = if emulator { "emulator-config" } else { "regional-us-central1" };
    format!("{}/instanceConfigs/{}", project_path, name)
}

fn has_todos_table(statements: &[String]) -> bool {
    statements
        .iter()
        .any(|stmt| stmt.contains("CREATE TABLE todos") || stmt.contains("CREATE TABLE `todos`"))
}

impl Provisioner<'_> {
    async fn run(&self) -> Result<()> {
        self.ensure_instance().await?;
        self.ensure_database().await?;
        self.ensure_table().await
    }

    async fn ensure_instance(&self) -> Result<()> {
        let db = self.database;
        let path = db.instance_path();

        let lookup = self
            .admin
            .instance()
            .get_instance(GetInstanceRequest { name: path.clone(), field_mask: None }, None)
            .await
            .map(|_| ());
        if !must_create("instance", &path, lookup)? {
            return Ok(());
        }

        let request = CreateInstanceRequest {
            parent: db.project_path(),
            instance_id: db.instance.clone(),
            instance: Some(Instance {
                name: path.clone(),
                config: instance_config(&db.project_path(), self.emulator),
                display_name: format!("{} todos", db.instance),
                node_count: 1,
                ..Default::default()
            }),
        };
        self.admin
            .instance()
            .create_instance(request, None)
            .await
            .with_context(|| format!("Failed to request instance {}", path))?
            .wait(None)
            .await
            .with_context(|| format!("Instance creation failed: {}", path))?;
        Ok(())
    }

    async fn ensure_database(&self) -> Result<()> {
        let db = self.database;
        let path = db.database_path();

        let lookup = self
            .admin
            .database()
            .get_database(GetDatabaseRequest { name: path.clone() }, None)
            .await
            .map(|_| ());
        if !must_create("database", &path, lookup)? {
            return Ok(());
        }

        let request = CreateDatabaseRequest {
            parent: db.instance_path(),
            create_statement: format!("CREATE DATABASE `{}`", db.database),
            extra_statements: vec![],
            encryption_config: None,
            database_dialect: 1, // GoogleSQL
            proto_descriptors: vec![],
        };
        self.admin
            .database()
            .create_database(request, None)
            .await
            .with_context(|| format!("Failed to request database {}", path))?
            .wait(None)
            .await
            .with_context(|| format!("Database creation failed: {}", path))?;
        Ok(())
    }

    async fn ensure_table(&self) -> Result<()> {
        let path = self.database.database_path();

        let ddl = self
            .admin
            .database()
            .get_database_ddl(GetDatabaseDdlRequest { database: path.clone() }, None)
            .await
            .context("Failed to read database schema")?
            .into_inner()
            .statements;
        if has_todos_table(&ddl) {
            return Ok(());
        }

        tracing::info!("Creating table 'todos' in {}", path);
        let request = UpdateDatabaseDdlRequest {
            database: path,
            statements: vec![TODOS_TABLE_DDL.trim().to_string()],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };
        self.admin
            .database()
            .update_database_ddl(request, None)
            .await
            .context("Failed to request table creation")?
            .wait(None)
            .await
            .context("Table creation failed")?;
        Ok(())
    }
}
