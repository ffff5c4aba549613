//! Creates the legal-services collections and attributes in an Appwrite database.
//!
//! Prints one `NEXT_PUBLIC_<NAME>_ID=<id>` line per provisioned schema on stdout, so
//! the output can be appended to an env file.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lexstore::{
    appwrite::AppwriteBackendBuilder,
    config::{API_KEY_VAR, DATABASE_ID_VAR, DEFAULT_ENDPOINT, ENDPOINT_VAR, PROJECT_ID_VAR},
    legal,
    prelude::*,
};

#[derive(Parser, Debug)]
#[command(name = "lexstore-provision", about = "Provision lexstore collections in Appwrite")]
struct Args {
    /// Appwrite API endpoint
    #[arg(long, env = ENDPOINT_VAR, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, env = PROJECT_ID_VAR)]
    project_id: String,

    /// API key with databases.write scope
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    api_key: String,

    #[arg(long, env = DATABASE_ID_VAR)]
    database_id: String,

    /// Only provision the named schemas (repeatable)
    #[arg(long = "schema", value_name = "NAME")]
    schemas: Vec<String>,
}

impl Args {
    fn config(&self) -> BackendConfig {
        BackendConfig {
            endpoint: self.endpoint.clone(),
            project_id: self.project_id.clone(),
            api_key: self.api_key.clone(),
            database_id: self.database_id.clone(),
        }
    }

    fn selected_schemas(&self) -> Result<Vec<&'static Schema>, String> {
        if self.schemas.is_empty() {
            return Ok(legal::ALL_SCHEMAS.to_vec());
        }

        self.schemas
            .iter()
            .map(|name| {
                legal::ALL_SCHEMAS
                    .iter()
                    .copied()
                    .find(|s| s.name == name.as_str())
                    .ok_or_else(|| format!("unknown schema {name}"))
            })
            .collect()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let schemas = match args.selected_schemas() {
        Ok(schemas) => schemas,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let config = args.config();
    tracing::info!(config = ?config, schemas = schemas.len(), "provisioning");

    let backend = match AppwriteBackendBuilder::from_config(&config).build().await {
        Ok(backend) => backend,
        Err(err) => {
            tracing::error!(error = %err, "invalid backend configuration");
            return ExitCode::FAILURE;
        }
    };

    let report = Provisioner::new(&backend).provision(&schemas).await;

    for schema in &report.schemas {
        if let Some(id) = &schema.collection_id {
            let name = legal::ALL_SCHEMAS
                .iter()
                .find(|s| s.name == schema.schema)
                .map(|s| legal::collection_id_var(s));

            if let Some(var) = name {
                println!("{var}={id}");
            }
        }
    }

    match report.into_result() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "provisioning incomplete");
            ExitCode::FAILURE
        }
    }
}
