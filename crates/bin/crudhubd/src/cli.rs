//! Command line — argument parsing and read-only commands.
//!
//! Every command reads through the [`ReadService`] and renders JSON.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crudhub_app::services::ReadService;
use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{DEFAULT_PAGE_SIZE, PageRequest, Sort};

use crate::catalog::{Customer, EntityKind, Order, Product};
use crate::hub::Hub;

/// Generic CRUD services over an in-memory store.
#[derive(Debug, Parser)]
#[command(name = "crudhubd", version)]
pub struct Cli {
    /// Path to the configuration file (defaults to `crudhub.toml`).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON fixture saved before running the command.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the entities of a type, optionally sorted or paged.
    List {
        #[arg(value_enum, ignore_case = true)]
        kind: EntityKind,

        /// Sort criteria such as `name` or `total_cents:desc,created_at`.
        #[arg(long)]
        sort: Option<Sort>,

        /// Zero-based page to return; everything is listed when absent.
        #[arg(long)]
        page: Option<u32>,

        /// Number of entities per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Show one entity.
    Get {
        #[arg(value_enum, ignore_case = true)]
        kind: EntityKind,

        /// Identifier of the entity.
        id: String,
    },
    /// List the entity types with a registered service.
    Types,
}

/// Command failures.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The service layer refused or failed.
    #[error(transparent)]
    Crud(#[from] CrudError),

    /// The identifier cannot be parsed for the entity type.
    #[error("invalid {entity} identifier {value:?}")]
    InvalidId {
        entity: &'static str,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The result cannot be rendered.
    #[error("failed to render result")]
    Json(#[from] serde_json::Error),
}

/// Run `command` against `hub` and return its JSON output.
///
/// # Errors
///
/// Returns [`CliError`] when the identifier is malformed, the entity does not
/// exist, or a service fails.
pub fn execute(hub: &Hub, command: &Command) -> Result<Value, CliError> {
    let reader = hub.reader();
    match command {
        Command::List {
            kind,
            sort,
            page,
            size,
        } => {
            let sort = sort.clone().unwrap_or_default();
            let request =
                page.map(|number| PageRequest::of(number, *size).with_sort(sort.clone()));
            match kind {
                EntityKind::Order => list::<Order>(reader, &sort, request.as_ref()),
                EntityKind::Customer => list::<Customer>(reader, &sort, request.as_ref()),
                EntityKind::Product => list::<Product>(reader, &sort, request.as_ref()),
            }
        }
        Command::Get { kind, id } => match kind {
            EntityKind::Order => get::<Order>(reader, id),
            EntityKind::Customer => get::<Customer>(reader, id),
            EntityKind::Product => get::<Product>(reader, id),
        },
        Command::Types => {
            let mut names: Vec<&str> = hub
                .registry()
                .entity_types()
                .iter()
                .map(EntityType::name)
                .collect();
            names.sort_unstable();
            Ok(serde_json::to_value(names)?)
        }
    }
}

fn list<T: Entity>(
    reader: &ReadService,
    sort: &Sort,
    request: Option<&PageRequest>,
) -> Result<Value, CliError> {
    let value = match request {
        Some(request) => serde_json::to_value(reader.find_page::<T>(request)?)?,
        None => serde_json::to_value(reader.find_all_sorted::<T>(sort)?)?,
    };
    Ok(value)
}

fn get<T>(reader: &ReadService, raw: &str) -> Result<Value, CliError>
where
    T: Entity,
    T::Id: FromStr,
    <T::Id as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let id = raw.parse::<T::Id>().map_err(|err| CliError::InvalidId {
        entity: T::NAME,
        value: raw.to_string(),
        source: Box::new(err),
    })?;
    Ok(serde_json::to_value(reader.get_one::<T>(&id)?)?)
}
