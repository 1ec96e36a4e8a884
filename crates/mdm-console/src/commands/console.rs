//! Interactive console.
//!
//! A line-oriented session over the [`Shell`]: one page is active at a
//! time, forms are filled field by field and submitted explicitly.
//!
//! ```text
//! entities> new
//! entities [new]> set code customer
//! entities [new]> set name Customer
//! entities [new]> save
//! ```

use std::fmt;
use std::io::{BufRead, Write};

use mdm_client::{Form, Id, MdmApi};
use tracing::debug;

use super::key_id;
use crate::confirm::{AssumeYes, Confirm, PromptConfirm};
use crate::error::{CliError, ViewError};
use crate::output::{AttributeList, CatalogDetail, CatalogList, EntityList, Message, OutputFormat};
use crate::shell::{ActiveView, Page, Shell};
use crate::views::{ListState, Modal};

const HELP: &str = "\
Commands:
  go <page>            Switch page: dashboard, entities, attributes, catalogs
  list                 Reload and show the current page
  new                  Open a blank form
  edit <id>            Open the form for an existing record
  set <field> [value]  Set a form field (empty value clears it)
  form                 Show the open form
  save                 Submit the open form
  cancel               Discard the open form
  delete <id>          Delete a record (asks for confirmation)
  filter <id|all>      Attributes: scope the list to one entity
  select <id>          Catalogs: show a catalog's values
  help                 Show this help
  quit                 Leave the console";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Switch page.
    Go(Page),
    /// Reload and show the current page.
    List,
    /// Open a blank form.
    New,
    /// Open the edit form for a record.
    Edit(Id),
    /// Set a form field.
    Set {
        /// Field name or alias.
        field: String,
        /// Raw value; may be empty.
        value: String,
    },
    /// Show the open form.
    Form,
    /// Submit the open form.
    Save,
    /// Discard the open form.
    Cancel,
    /// Delete a record.
    Delete(Id),
    /// Scope attributes to an entity, or clear the scope.
    Filter(Option<Id>),
    /// Drill into a catalog.
    Select(Id),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Error for a console line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type 'help' for commands)", self.0)
    }
}

impl std::error::Error for ParseError {}

fn required_id(verb: &str, rest: &str) -> Result<Id, ParseError> {
    key_id(rest).map_err(|_| ParseError(format!("usage: {verb} <id>")))
}

impl ConsoleCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the problem.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_ascii_lowercase().as_str() {
            "go" | "cd" => rest
                .parse()
                .map(Self::Go)
                .map_err(|e| ParseError(e.to_string())),
            "list" | "ls" | "refresh" => Ok(Self::List),
            "new" | "create" => Ok(Self::New),
            "edit" => required_id("edit", rest).map(Self::Edit),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                if field.is_empty() {
                    return Err(ParseError("usage: set <field> [value]".into()));
                }
                Ok(Self::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "form" | "show" => Ok(Self::Form),
            "save" | "submit" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" | "rm" => required_id("delete", rest).map(Self::Delete),
            "filter" => match rest {
                "" => Err(ParseError("usage: filter <entity-id|all>".into())),
                "all" | "none" => Ok(Self::Filter(None)),
                id => Ok(Self::Filter(Some(Id::new(id)))),
            },
            "select" => required_id("select", rest).map(Self::Select),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError(format!("unknown command '{other}'"))),
        }
    }
}

/// Interactive session over the shell.
pub struct Console<A, R, W> {
    shell: Shell<A>,
    input: R,
    output: W,
    format: OutputFormat,
    assume_yes: bool,
}

impl<A: MdmApi, R: BufRead, W: Write> Console<A, R, W> {
    /// Create a console over an opened shell.
    pub const fn new(shell: Shell<A>, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            shell,
            input,
            output,
            format,
            assume_yes: false,
        }
    }

    /// Skip delete confirmations.
    #[must_use]
    pub const fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// End the session and hand back the shell.
    pub fn into_shell(self) -> Shell<A> {
        self.shell
    }

    /// Read and execute lines until `quit` or end of input.
    ///
    /// Command failures are printed and the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub async fn run(&mut self) -> Result<(), CliError> {
        writeln!(self.output, "MDM Admin console. Type 'help' for commands.")?;
        self.render()?;

        loop {
            write!(self.output, "{}> ", self.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match ConsoleCommand::parse(&line) {
                Ok(ConsoleCommand::Quit) => break,
                Ok(command) => {
                    debug!(?command, "console command");
                    if let Err(e) = self.execute(command).await {
                        writeln!(self.output, "Error: {e}")?;
                    }
                }
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let page = self.shell.page().label().to_ascii_lowercase();
        let mode = match self.shell.active() {
            ActiveView::Dashboard(_) => None,
            ActiveView::Entities(view) => modal_label(view.modal()),
            ActiveView::Attributes(view) => modal_label(view.view().modal()),
            ActiveView::Catalogs(view) => modal_label(view.view().modal()),
        };
        match mode {
            Some(mode) => format!("{page} [{mode}]"),
            None => page,
        }
    }

    /// Execute one parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's failure; the session state is left as the
    /// failing operation left it.
    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<(), CliError> {
        match command {
            ConsoleCommand::Go(page) => {
                self.shell.navigate(page).await;
                self.render()
            }
            ConsoleCommand::List => {
                let (api, active) = self.shell.parts();
                active.reload(api).await;
                self.render()
            }
            ConsoleCommand::New => {
                match self.shell.parts().1 {
                    ActiveView::Dashboard(_) => return Err(not_here("new")),
                    ActiveView::Entities(view) => view.open_create(),
                    ActiveView::Attributes(view) => view.open_create()?,
                    ActiveView::Catalogs(view) => view.view_mut().open_create(),
                }
                self.render_form()
            }
            ConsoleCommand::Edit(id) => {
                let (api, active) = self.shell.parts();
                match active {
                    ActiveView::Dashboard(_) => return Err(not_here("edit")),
                    ActiveView::Entities(view) => view.open_edit_by_id(api, &id).await?,
                    ActiveView::Attributes(view) => view.open_edit_by_id(api, &id).await?,
                    ActiveView::Catalogs(view) => {
                        view.view_mut().open_edit_by_id(api, &id).await?;
                    }
                }
                self.render_form()
            }
            ConsoleCommand::Set { field, value } => {
                match self.shell.parts().1 {
                    ActiveView::Dashboard(_) => return Err(not_here("set")),
                    ActiveView::Entities(view) => view.set_field(&field, &value)?,
                    ActiveView::Attributes(view) => view.set_field(&field, &value)?,
                    ActiveView::Catalogs(view) => view.view_mut().set_field(&field, &value)?,
                }
                Ok(())
            }
            ConsoleCommand::Form => self.render_form(),
            ConsoleCommand::Save => self.save().await,
            ConsoleCommand::Cancel => {
                match self.shell.parts().1 {
                    ActiveView::Dashboard(_) => return Err(not_here("cancel")),
                    ActiveView::Entities(view) => view.cancel(),
                    ActiveView::Attributes(view) => view.cancel(),
                    ActiveView::Catalogs(view) => view.view_mut().cancel(),
                }
                self.format
                    .write(&mut self.output, &Message::info("Form discarded"))
            }
            ConsoleCommand::Delete(id) => self.delete(&id).await,
            ConsoleCommand::Filter(entity_id) => {
                let (api, active) = self.shell.parts();
                let ActiveView::Attributes(view) = active else {
                    return Err(only_on("filter", Page::Attributes));
                };
                view.set_entity_filter(api, entity_id).await;
                self.render()
            }
            ConsoleCommand::Select(id) => {
                let (api, active) = self.shell.parts();
                let ActiveView::Catalogs(view) = active else {
                    return Err(only_on("select", Page::Catalogs));
                };
                view.select(api, &id).await?;
                self.render()
            }
            ConsoleCommand::Help => {
                writeln!(self.output, "{HELP}")?;
                Ok(())
            }
            ConsoleCommand::Quit => Ok(()),
        }
    }

    async fn save(&mut self) -> Result<(), CliError> {
        let (api, active) = self.shell.parts();
        let message = match active {
            ActiveView::Dashboard(_) => return Err(not_here("save")),
            ActiveView::Entities(view) => {
                let saved = view.submit(api).await?;
                format!("Entity {} saved", saved.entity_code)
            }
            ActiveView::Attributes(view) => {
                let saved = view.submit(api).await?;
                format!("Attribute {} saved", saved.attribute_code)
            }
            ActiveView::Catalogs(view) => {
                let saved = view.submit(api).await?;
                format!("Catalog {} saved", saved.catalog_code)
            }
        };
        self.format
            .write(&mut self.output, &Message::success(message))?;
        self.render()
    }

    async fn delete(&mut self, id: &Id) -> Result<(), CliError> {
        let mut yes = AssumeYes;
        let mut prompt = PromptConfirm::new(&mut self.input, &mut self.output);
        let confirm: &mut dyn Confirm = if self.assume_yes {
            &mut yes
        } else {
            &mut prompt
        };

        let (api, active) = self.shell.parts();
        let deleted = match active {
            ActiveView::Dashboard(_) => return Err(not_here("delete")),
            ActiveView::Entities(view) => view.delete(api, id, confirm).await?,
            ActiveView::Attributes(view) => view.delete(api, id, confirm).await?,
            ActiveView::Catalogs(view) => view.delete(api, id, confirm).await?,
        };

        let message = if deleted {
            Message::success(format!("Deleted {id}"))
        } else {
            Message::info("Delete cancelled")
        };
        self.format.write(&mut self.output, &message)?;
        if deleted {
            self.render()?;
        }
        Ok(())
    }

    /// Print the active page.
    fn render(&mut self) -> Result<(), CliError> {
        let out = &mut self.output;
        let format = &self.format;
        match self.shell.active() {
            ActiveView::Dashboard(stats) => format.write(out, stats)?,
            ActiveView::Entities(view) => {
                write_stale_notice(out, view.list_state())?;
                let list = EntityList {
                    items: view.items().to_vec(),
                };
                format.write(out, &list)?;
            }
            ActiveView::Attributes(view) => {
                write_stale_notice(out, view.view().list_state())?;
                if let Some(entity_id) = view.entity_filter() {
                    writeln!(out, "Filter: {}", view.entity_name(entity_id))?;
                }
                if !view.can_create() {
                    writeln!(out, "Create an entity first before adding attributes.")?;
                }
                format.write(out, &AttributeList::from_view(view))?;
            }
            ActiveView::Catalogs(view) => {
                write_stale_notice(out, view.view().list_state())?;
                let list = CatalogList {
                    items: view.items().to_vec(),
                };
                format.write(out, &list)?;
                if let Some(detail) = CatalogDetail::from_view(view) {
                    writeln!(out)?;
                    format.write(out, &detail)?;
                }
            }
        }
        Ok(())
    }

    /// Print the open form's fields.
    fn render_form(&mut self) -> Result<(), CliError> {
        let out = &mut self.output;
        match self.shell.active() {
            ActiveView::Dashboard(_) => Err(not_here("form")),
            ActiveView::Entities(view) => write_form(out, view.modal()),
            ActiveView::Attributes(view) => write_form(out, view.view().modal()),
            ActiveView::Catalogs(view) => write_form(out, view.view().modal()),
        }
    }
}

fn modal_label<F>(modal: &Modal<F>) -> Option<String> {
    match modal {
        Modal::Closed => None,
        Modal::Creating(_) => Some("new".into()),
        Modal::Editing { id, .. } => Some(format!("edit {id}")),
    }
}

fn not_here(verb: &str) -> CliError {
    CliError::InvalidArgument(format!("'{verb}' is not available on the dashboard"))
}

fn only_on(verb: &str, page: Page) -> CliError {
    CliError::InvalidArgument(format!("'{verb}' is only available on the {page} page"))
}

fn write_stale_notice<W: Write, T>(out: &mut W, state: &ListState<T>) -> Result<(), CliError> {
    if let Some(message) = state.error() {
        writeln!(out, "Could not refresh ({message}); showing the last loaded rows.")?;
    }
    Ok(())
}

fn write_form<W: Write, F: Form>(out: &mut W, modal: &Modal<F>) -> Result<(), CliError> {
    let Some(form) = modal.form() else {
        return Err(ViewError::NoOpenForm.into());
    };
    let values = serde_json::to_value(form.to_payload())
        .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;

    match modal {
        Modal::Editing { id, .. } => writeln!(out, "Editing {id}")?,
        _ => writeln!(out, "New record")?,
    }
    for field in F::FIELDS {
        let value = match values.get(*field) {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        writeln!(out, "  {field:<20} {value}")?;
    }
    Ok(())
}
