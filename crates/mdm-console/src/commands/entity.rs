//! Entity management command implementation.

use std::io::Write;

use mdm_client::{EntityQuery, Id, MdmApi};

use super::{ensure_loaded, key_id, write_deleted, write_saved};
use crate::cli::{EntityCommands, EntityCreateArgs, EntityListArgs, EntityUpdateArgs};
use crate::confirm::Confirm;
use crate::error::CliError;
use crate::output::{EntityList, OutputFormat};
use crate::views::EntitiesView;

/// Entity command executor.
pub struct EntityCommand<'a, A> {
    api: &'a A,
}

impl<'a, A: MdmApi> EntityCommand<'a, A> {
    /// Create a new entity command.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Execute an entity subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &EntityCommands,
        confirm: &mut dyn Confirm,
    ) -> Result<(), CliError> {
        match command {
            EntityCommands::List(args) => {
                let mut view = EntitiesView::with_filter(list_query(args));
                view.refresh(self.api).await;
                ensure_loaded(view.list_state(), "entities")?;
                let list = EntityList {
                    items: view.items().to_vec(),
                };
                format.write(writer, &list)?;
            }
            EntityCommands::Get { key, code } => {
                let entity = if *code {
                    self.api.get_entity_by_code(&key.to_uppercase()).await?
                } else {
                    self.api.get_entity(&key_id(key)?).await?
                };
                format.write(writer, &entity)?;
            }
            EntityCommands::Create(args) => self.create(writer, format, args).await?,
            EntityCommands::Update { id, fields } => {
                self.update(writer, format, &key_id(id)?, fields).await?;
            }
            EntityCommands::Delete { id } => {
                let id = key_id(id)?;
                let mut view = EntitiesView::new();
                let deleted = view.delete(self.api, &id, confirm).await?;
                write_deleted(writer, format, deleted, &format!("Entity {id}"))?;
            }
        }
        Ok(())
    }

    async fn create<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &EntityCreateArgs,
    ) -> Result<(), CliError> {
        let mut view = EntitiesView::new();
        view.open_create();
        view.set_field("entity_code", &args.code)?;
        view.set_field("entity_name", &args.name)?;
        if let Some(description) = &args.description {
            view.set_field("description", description)?;
        }
        if let Some(table_name) = &args.table_name {
            view.set_field("table_name", table_name)?;
        }

        let saved = view.submit(self.api).await?;
        let message = format!("Entity {} created (id {})", saved.entity_code, saved.id);
        write_saved(writer, format, &saved, message)
    }

    async fn update<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &Id,
        fields: &EntityUpdateArgs,
    ) -> Result<(), CliError> {
        let mut view = EntitiesView::new();
        view.open_edit_by_id(self.api, id).await?;
        if let Some(name) = &fields.name {
            view.set_field("entity_name", name)?;
        }
        if let Some(description) = &fields.description {
            view.set_field("description", description)?;
        }
        if let Some(table_name) = &fields.table_name {
            view.set_field("table_name", table_name)?;
        }

        let saved = view.submit(self.api).await?;
        let message = format!("Entity {} updated", saved.entity_code);
        write_saved(writer, format, &saved, message)
    }
}

fn list_query(args: &EntityListArgs) -> EntityQuery {
    EntityQuery {
        page: args.page,
        page_size: args.page_size,
        search: args.search.clone(),
        is_active: args.inactive.then_some(false),
    }
}
