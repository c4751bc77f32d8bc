//! Command handlers for the CLI

use super::{CategoryCommands, Commands, OutputFormatter};
use crate::config::Config;
use crate::core::{CategoryId, Identity, Role, UserId};
use crate::error::{HelpdeskError, Result};
use crate::handlers::{CategoryRequest, HandlerContext, categories};
use crate::storage::FileStorage;
use serde_json::json;

/// Identity used for operations issued from the command line
///
/// The CLI runs with local filesystem access to the store, so it acts as a
/// superuser with the nil user id.
#[must_use]
pub fn operator_identity() -> Identity {
    Identity::superuser(UserId::from_uuid(uuid::Uuid::nil()), Role::Admin)
}

/// Dispatch a parsed command
pub fn dispatch(command: Commands, config: Config, formatter: &OutputFormatter) -> Result<()> {
    match command {
        Commands::Init => handle_init(&config, formatter),
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => handle_serve(config, host, port),
        Commands::Category { command } => handle_category_command(command, &config, formatter),
        Commands::CheckConfig => handle_check_config(&config, formatter),
    }
}

pub fn handle_init(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let storage = FileStorage::new(&config.storage.path);
    let existed = storage.is_initialized();
    storage.init()?;

    if formatter.is_json() {
        return formatter.print_json(&json!({
            "storage": storage.root().display().to_string(),
            "created": !existed,
        }));
    }

    if existed {
        formatter.info(&format!(
            "Storage already initialized at {}",
            storage.root().display()
        ));
    } else {
        formatter.success(&format!(
            "Initialized storage at {}",
            storage.root().display()
        ));
    }
    Ok(())
}

#[cfg(feature = "api")]
pub fn handle_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::api::serve(&config))
}

pub fn handle_category_command(
    command: CategoryCommands,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::open(&config.storage.path)?;
    let operator = operator_identity();

    match command {
        CategoryCommands::Add { name, inactive } => {
            let category = categories::create_category(
                &ctx,
                &operator,
                CategoryRequest {
                    name,
                    is_active: Some(!inactive),
                },
            )?;
            if formatter.is_json() {
                formatter.print_json(&category)
            } else {
                formatter.success(&format!(
                    "Created category '{}' ({})",
                    category.name, category.id
                ));
                Ok(())
            }
        },
        CategoryCommands::List => {
            let all = categories::list_categories(&ctx, &operator)?;
            formatter.print_categories(&all)
        },
        CategoryCommands::Remove { id } => {
            let id = CategoryId::parse_str(&id)
                .map_err(|_| HelpdeskError::not_found("Category", &id))?;
            categories::delete_category(&ctx, &operator, &id)?;
            if formatter.is_json() {
                formatter.print_json(&json!({ "deleted": id }))
            } else {
                formatter.success(&format!("Removed category {id}"));
                Ok(())
            }
        },
    }
}

pub fn handle_check_config(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    config.validate()?;
    let initialized = FileStorage::new(&config.storage.path).is_initialized();

    if formatter.is_json() {
        return formatter.print_json(&json!({
            "bind": config.bind_address(),
            "storage": config.storage.path.display().to_string(),
            "storage_initialized": initialized,
            "log_level": config.log.level,
            "tokens": config.tokens.len(),
        }));
    }

    formatter.success("Configuration is valid");
    formatter.info(&format!("  bind:     {}", config.bind_address()));
    formatter.info(&format!("  storage:  {}", config.storage.path.display()));
    formatter.info(&format!("  log:      {}", config.log.level));
    formatter.info(&format!("  tokens:   {}", config.tokens.len()));
    if !initialized {
        formatter.warning("storage is not initialized; run 'helpdesk init'");
    }
    Ok(())
}
