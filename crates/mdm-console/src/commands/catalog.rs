//! Catalog management command implementation.

use std::io::Write;

use mdm_client::{Id, MdmApi};

use super::{ensure_loaded, key_id, write_deleted, write_saved};
use crate::cli::{CatalogCommands, CatalogCreateArgs, CatalogUpdateArgs};
use crate::confirm::Confirm;
use crate::error::{CliError, ViewError};
use crate::output::{CatalogDetail, CatalogList, OutputFormat};
use crate::views::CatalogsView;

/// Catalog command executor.
pub struct CatalogCommand<'a, A> {
    api: &'a A,
}

impl<'a, A: MdmApi> CatalogCommand<'a, A> {
    /// Create a new catalog command.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Execute a catalog subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &CatalogCommands,
        confirm: &mut dyn Confirm,
    ) -> Result<(), CliError> {
        match command {
            CatalogCommands::List => {
                let mut view = CatalogsView::new();
                view.load(self.api).await;
                ensure_loaded(view.view().list_state(), "catalogs")?;
                let list = CatalogList {
                    items: view.items().to_vec(),
                };
                format.write(writer, &list)?;
            }
            CatalogCommands::Show { key, code } => {
                let detail = self.show(key, *code).await?;
                format.write(writer, &detail)?;
            }
            CatalogCommands::Create(args) => self.create(writer, format, args).await?,
            CatalogCommands::Update { id, fields } => {
                self.update(writer, format, &key_id(id)?, fields).await?;
            }
            CatalogCommands::Delete { id } => {
                let id = key_id(id)?;
                let mut view = CatalogsView::new();
                let deleted = view.delete(self.api, &id, confirm).await?;
                write_deleted(writer, format, deleted, &format!("Catalog {id}"))?;
            }
        }
        Ok(())
    }

    /// Select a catalog in a freshly loaded view and collect its values.
    async fn show(&self, key: &str, by_code: bool) -> Result<CatalogDetail, CliError> {
        let id = if by_code {
            self.api.get_catalog_by_code(&key.to_uppercase()).await?.id
        } else {
            key_id(key)?
        };

        let mut view = CatalogsView::new();
        view.load(self.api).await;
        ensure_loaded(view.view().list_state(), "catalogs")?;
        view.select(self.api, &id).await?;

        CatalogDetail::from_view(&view).ok_or_else(|| {
            ViewError::NotFound {
                noun: "catalog",
                id,
            }
            .into()
        })
    }

    async fn create<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &CatalogCreateArgs,
    ) -> Result<(), CliError> {
        let mut view = CatalogsView::new();
        let form = view.view_mut();
        form.open_create();
        form.set_field("catalog_code", &args.code)?;
        form.set_field("catalog_name", &args.name)?;
        form.set_field("catalog_type", &args.catalog_type)?;
        form.set_field("allow_user_values", &args.allow_user_values.to_string())?;
        form.set_field("cache_enabled", &(!args.no_cache).to_string())?;

        let saved = view.submit(self.api).await?;
        let message = format!("Catalog {} created (id {})", saved.catalog_code, saved.id);
        write_saved(writer, format, &saved, message)
    }

    async fn update<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &Id,
        fields: &CatalogUpdateArgs,
    ) -> Result<(), CliError> {
        let mut view = CatalogsView::new();
        let form = view.view_mut();
        form.open_edit_by_id(self.api, id).await?;
        if let Some(code) = &fields.code {
            form.set_field("catalog_code", code)?;
        }
        if let Some(name) = &fields.name {
            form.set_field("catalog_name", name)?;
        }
        if let Some(catalog_type) = &fields.catalog_type {
            form.set_field("catalog_type", catalog_type)?;
        }
        if let Some(allow) = fields.allow_user_values {
            form.set_field("allow_user_values", &allow.to_string())?;
        }
        if let Some(cache) = fields.cache {
            form.set_field("cache_enabled", &cache.to_string())?;
        }

        let saved = view.submit(self.api).await?;
        let message = format!("Catalog {} updated", saved.catalog_code);
        write_saved(writer, format, &saved, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::confirm::AssumeYes;
    use crate::testing::FakeApi;

    async fn run(
        api: &FakeApi,
        command: CatalogCommands,
        format: Format,
    ) -> Result<String, CliError> {
        let mut out = Vec::new();
        CatalogCommand::new(api)
            .execute(&mut out, &OutputFormat::new(format), &command, &mut AssumeYes)
            .await?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn seeded() -> FakeApi {
        let api = FakeApi::new();
        let countries = api.add_catalog("1", "COUNTRIES");
        api.add_value(&countries, "10", "US", "United States", 1);
        api
    }

    #[tokio::test]
    async fn show_renders_values() {
        let api = seeded();
        let output = run(
            &api,
            CatalogCommands::Show {
                key: "1".into(),
                code: false,
            },
            Format::Json,
        )
        .await
        .unwrap();

        let detail: serde_json::Value = serde_json::from_str(&output).unwrap();
        let values = detail["values"].as_array().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["value_code"], "US");
        assert_eq!(values[0]["value_name"], "United States");
        assert_eq!(values[0]["sort_order"], 1);
    }

    #[tokio::test]
    async fn show_by_code() {
        let api = seeded();
        let output = run(
            &api,
            CatalogCommands::Show {
                key: "countries".into(),
                code: true,
            },
            Format::Table,
        )
        .await
        .unwrap();
        assert!(output.contains("Catalog: COUNTRIES"));
        assert!(output.contains("United States"));
    }

    #[tokio::test]
    async fn show_unknown_catalog_fails() {
        let api = seeded();
        let err = run(
            &api,
            CatalogCommands::Show {
                key: "99".into(),
                code: false,
            },
            Format::Table,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "catalog not found: 99");
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let api = FakeApi::new();
        let command = CatalogCommands::Create(CatalogCreateArgs {
            code: "currencies".into(),
            name: "Currencies".into(),
            catalog_type: "SIMPLE".into(),
            allow_user_values: false,
            no_cache: false,
        });
        let output = run(&api, command, Format::Table).await.unwrap();
        assert!(output.contains("✓ Catalog CURRENCIES created"));

        let payload = api.last_payload().unwrap();
        assert_eq!(payload["catalog_type"], "SIMPLE");
        assert_eq!(payload["cache_enabled"], true);
    }

    #[tokio::test]
    async fn create_rejects_unknown_type() {
        let api = FakeApi::new();
        let command = CatalogCommands::Create(CatalogCreateArgs {
            code: "regions".into(),
            name: "Regions".into(),
            catalog_type: "TREE".into(),
            allow_user_values: false,
            no_cache: false,
        });
        let err = run(&api, command, Format::Table).await.unwrap_err();
        assert!(err.to_string().starts_with("invalid value for catalog_type"));
    }

    #[tokio::test]
    async fn update_may_change_code() {
        let api = seeded();
        let command = CatalogCommands::Update {
            id: "1".into(),
            fields: CatalogUpdateArgs {
                code: Some("nations".into()),
                ..CatalogUpdateArgs::default()
            },
        };
        let output = run(&api, command, Format::Table).await.unwrap();
        assert!(output.contains("Catalog NATIONS updated"));
    }
}
