//! Attribute management command implementation.

use std::io::Write;

use mdm_client::{Id, MdmApi};

use super::{ensure_loaded, key_id, write_deleted, write_saved};
use crate::cli::{AttributeCommands, AttributeCreateArgs, AttributeUpdateArgs};
use crate::confirm::Confirm;
use crate::error::CliError;
use crate::output::{AttributeList, OutputFormat};
use crate::views::AttributesView;

/// Attribute command executor.
pub struct AttributeCommand<'a, A> {
    api: &'a A,
}

impl<'a, A: MdmApi> AttributeCommand<'a, A> {
    /// Create a new attribute command.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Execute an attribute subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &AttributeCommands,
        confirm: &mut dyn Confirm,
    ) -> Result<(), CliError> {
        match command {
            AttributeCommands::List { entity } => {
                let entity_id = entity.as_deref().map(key_id).transpose()?;
                let mut view = AttributesView::with_entity_filter(entity_id);
                view.load(self.api).await;
                ensure_loaded(view.view().list_state(), "attributes")?;
                format.write(writer, &AttributeList::from_view(&view))?;
            }
            AttributeCommands::Get { id } => {
                let attribute = self.api.get_attribute(&key_id(id)?).await?;
                format.write(writer, &attribute)?;
            }
            AttributeCommands::Create(args) => self.create(writer, format, args).await?,
            AttributeCommands::Update { id, fields } => {
                self.update(writer, format, &key_id(id)?, fields).await?;
            }
            AttributeCommands::Delete { id } => {
                let id = key_id(id)?;
                let mut view = AttributesView::new();
                let deleted = view.delete(self.api, &id, confirm).await?;
                write_deleted(writer, format, deleted, &format!("Attribute {id}"))?;
            }
        }
        Ok(())
    }

    async fn create<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &AttributeCreateArgs,
    ) -> Result<(), CliError> {
        let mut view = AttributesView::new();
        view.load(self.api).await;
        view.open_create()?;

        view.set_field("entity_id", &args.entity)?;
        view.set_field("attribute_code", &args.code)?;
        view.set_field("attribute_name", &args.name)?;
        view.set_field("data_type", &args.data_type)?;
        view.set_field("is_required", &args.required.to_string())?;
        view.set_field("is_unique", &args.unique.to_string())?;
        if let Some(default) = &args.default {
            view.set_field("default_value", default)?;
        }

        let saved = view.submit(self.api).await?;
        let message = format!(
            "Attribute {} created on {} (id {})",
            saved.attribute_code,
            view.entity_name(&saved.entity_id),
            saved.id
        );
        write_saved(writer, format, &saved, message)
    }

    async fn update<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &Id,
        fields: &AttributeUpdateArgs,
    ) -> Result<(), CliError> {
        let mut view = AttributesView::new();
        view.open_edit_by_id(self.api, id).await?;
        if let Some(name) = &fields.name {
            view.set_field("attribute_name", name)?;
        }
        if let Some(required) = fields.required {
            view.set_field("is_required", &required.to_string())?;
        }
        if let Some(unique) = fields.unique {
            view.set_field("is_unique", &unique.to_string())?;
        }
        if let Some(default) = &fields.default {
            view.set_field("default_value", default)?;
        }

        let saved = view.submit(self.api).await?;
        let message = format!("Attribute {} updated", saved.attribute_code);
        write_saved(writer, format, &saved, message)
    }
}
