//! Line-oriented command shell.
//!
//! [`parse_command`] turns one input line into catalog actions and
//! [`render`] turns a snapshot into text. Both are pure; `main` does the I/O.

use crate::model::catalog_action::CatalogAction;
use crate::model::filter::{FilterEdit, SortBy, SortOrder, StockFilter};
use crate::model::plant::PlantDraft;
use crate::state::catalog_state::CatalogSnapshot;
use crate::state::pagination::PageSize;
use std::fmt::Write as _;
use thiserror::Error;

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  search <text>               type into the search box (debounced)
  go                          submit the search now
  category <name|->           filter by category, '-' for all
  min <n|->  /  max <n|->     price bounds, '-' to clear
  stock <in|out|any>          availability filter
  sort <name|price|stock|createdAt> [asc|desc]
  page <n>                    jump to page n
  size <12|24|48|96>          items per page
  clear                       reset every filter
  retry                       re-issue the last failed request
  add name=..;price=..;categories=a,b;image=..[;stock=..;description=..;careLevel=..;size=..]
  show                        print the current view
  quit                        exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Actions to dispatch, in order.
    Dispatch(Vec<CatalogAction>),
    /// Print the latest snapshot.
    Show,
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
}

impl ShellCommand {
    fn one(action: CatalogAction) -> Self {
        ShellCommand::Dispatch(vec![action])
    }

    fn edit(edit: FilterEdit) -> Self {
        Self::one(CatalogAction::EditFilter(edit))
    }
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// First word is not a known command.
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// Command given without its required argument.
    #[error("'{command}' needs an argument: {usage}")]
    MissingArgument {
        /// Command word.
        command: &'static str,
        /// Usage line shown to the user.
        usage: &'static str,
    },

    /// Argument present but not parseable.
    #[error("{0}")]
    InvalidArgument(String),
}

// ===== Parsing =====

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        // Search text is kept verbatim so clearing it is `search` with no text.
        "search" => ShellCommand::edit(FilterEdit::Search(rest.to_string())),
        "go" => ShellCommand::one(CatalogAction::SubmitSearch),
        "category" => ShellCommand::edit(FilterEdit::Category(
            optional_arg(rest, "category", "category <name|->")?,
        )),
        "min" => ShellCommand::edit(FilterEdit::MinPrice(optional_arg(rest, "min", "min <n|->")?)),
        "max" => ShellCommand::edit(FilterEdit::MaxPrice(optional_arg(rest, "max", "max <n|->")?)),
        "stock" => {
            let arg = required_arg(rest, "stock", "stock <in|out|any>")?;
            let filter: StockFilter = arg.parse().map_err(CommandError::InvalidArgument)?;
            ShellCommand::edit(FilterEdit::InStock(filter))
        }
        "sort" => parse_sort(rest)?,
        "page" => {
            let arg = required_arg(rest, "page", "page <n>")?;
            let page: u32 = arg
                .parse()
                .map_err(|_| CommandError::InvalidArgument(format!("Not a page number: {arg}")))?;
            ShellCommand::one(CatalogAction::GoToPage(page))
        }
        "size" => {
            let arg = required_arg(rest, "size", "size <12|24|48|96>")?;
            let size: PageSize = arg.parse().map_err(CommandError::InvalidArgument)?;
            ShellCommand::one(CatalogAction::SetPageSize(size))
        }
        "clear" => ShellCommand::one(CatalogAction::ClearFilters),
        "retry" => ShellCommand::one(CatalogAction::Retry),
        "add" => ShellCommand::one(CatalogAction::SubmitPlant(parse_draft(rest)?)),
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required_arg<'a>(
    rest: &'a str,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, usage })
    } else {
        Ok(rest)
    }
}

/// `-` clears the field.
fn optional_arg(rest: &str, command: &'static str, usage: &'static str) -> Result<String, CommandError> {
    match required_arg(rest, command, usage)? {
        "-" => Ok(String::new()),
        value => Ok(value.to_string()),
    }
}

fn parse_sort(rest: &str) -> Result<ShellCommand, CommandError> {
    let mut parts = rest.split_whitespace();
    let field = parts.next().ok_or(CommandError::MissingArgument {
        command: "sort",
        usage: "sort <name|price|stock|createdAt> [asc|desc]",
    })?;
    let sort_by: SortBy = field.parse().map_err(CommandError::InvalidArgument)?;

    let mut actions = vec![CatalogAction::EditFilter(FilterEdit::SortBy(sort_by))];
    if let Some(order) = parts.next() {
        let sort_order: SortOrder = order.parse().map_err(CommandError::InvalidArgument)?;
        actions.push(CatalogAction::EditFilter(FilterEdit::SortOrder(sort_order)));
    }
    if let Some(extra) = parts.next() {
        return Err(CommandError::InvalidArgument(format!(
            "Unexpected argument: {extra}"
        )));
    }
    Ok(ShellCommand::Dispatch(actions))
}

/// Parse `key=value;key=value` pairs into a draft. Validation is left to
/// `PlantDraft::validate` so every field error is reported together.
fn parse_draft(rest: &str) -> Result<PlantDraft, CommandError> {
    let mut draft = PlantDraft::default();

    for pair in rest.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CommandError::InvalidArgument(format!("Expected key=value, got '{pair}'"))
        })?;
        let value = value.trim();
        match key.trim() {
            "name" => draft.name = value.to_string(),
            "price" => draft.price = value.to_string(),
            "categories" | "category" => {
                draft.categories = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "stock" => draft.stock = value.to_string(),
            "image" => draft.image = value.to_string(),
            "description" => draft.description = value.to_string(),
            "careLevel" | "care" => {
                draft.care_level = value.parse().map_err(CommandError::InvalidArgument)?;
            }
            "size" => draft.size = value.parse().map_err(CommandError::InvalidArgument)?,
            other => {
                return Err(CommandError::InvalidArgument(format!(
                    "Unknown plant field: {other}"
                )))
            }
        }
    }

    Ok(draft)
}

// ===== Rendering =====

/// Text view of a snapshot.
pub fn render(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::new();
    let filters = &snapshot.filters;
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    let _ = writeln!(
        out,
        "Filters: search=\"{}\" category={} min={} max={} stock={} sort={} {}{}",
        filters.search,
        if filters.category.is_empty() {
            "All"
        } else {
            filters.category.as_str()
        },
        or_dash(filters.min_price.map(|p| p.to_string())),
        or_dash(filters.max_price.map(|p| p.to_string())),
        match filters.in_stock {
            StockFilter::Any => "any",
            StockFilter::InStock => "in",
            StockFilter::OutOfStock => "out",
        },
        filters.sort_by.as_str(),
        filters.sort_order.as_str(),
        if snapshot.has_active_filters {
            "  [clear to reset]"
        } else {
            ""
        },
    );

    if let Some(pending) = &snapshot.pending_search {
        let _ = writeln!(out, "Searching for \"{pending}\" shortly...");
    }
    for err in &snapshot.filter_errors {
        let _ = writeln!(out, "  ! {err}");
    }

    if snapshot.loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "Error: {error} (type 'retry')");
    }

    if snapshot.count == 0 && !snapshot.loading {
        let _ = writeln!(out, "No plants found.");
    } else {
        let (first, last) = snapshot.display_range;
        let _ = writeln!(
            out,
            "Showing {first}-{last} of {} (page {}/{}, {} per page)",
            snapshot.count,
            snapshot.page.current_page(),
            snapshot.page.total_pages(),
            snapshot.page.page_size(),
        );
        for (offset, plant) in snapshot.items.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}. {plant}", first + offset as u64);
        }
    }

    if !snapshot.categories.is_empty() {
        let _ = writeln!(out, "Categories: {}", snapshot.categories.join(", "));
    }

    if snapshot.creating {
        let _ = writeln!(out, "Adding plant...");
    }
    for err in &snapshot.form_errors {
        let _ = writeln!(out, "  ! {err}");
    }
    if let Some(error) = &snapshot.create_error {
        let _ = writeln!(out, "Add failed: {error}");
    }

    out
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
