//! Parsing of console input lines.
//!
//! Product fields are given as `key=value` pairs; values containing spaces are
//! wrapped in double quotes. Only the product fields the API accepts are
//! recognised, anything else is rejected.

use super::dashboard::Tab;
use crate::{
    entities::{Category, NewProduct, ProductPatch},
    errors::{Error, Result},
};

/// One parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Unlock with a passphrase
    Login(String),
    /// Lock the console again
    Logout,
    /// Switch the active tab
    Tab(Tab),
    /// Create a product
    Add(NewProduct),
    /// Update some fields of a product
    Edit {
        /// Product to update
        id: String,
        /// Fields to change
        patch: ProductPatch,
    },
    /// Deletes the record with this id from the active tab
    Delete(String),
    /// Empty the audit log
    ClearLogs,
    /// Re-fetch the active tab
    Refresh,
    /// Show the counters
    Stats,
    /// Print [`HELP`]
    Help,
    /// Leave the console
    Quit,
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  login <passphrase>                  unlock the dashboard
  tab products|orders|logs            switch tab
  add name=.. category=.. price=.. stock=.. [description=..] [image=..]
  edit <id> field=value ...           update a product
  delete <id>                         delete a product or order (active tab)
  clear-logs                          remove every log entry
  refresh                             re-fetch the active tab
  stats                               show totals
  logout | help | quit";

/// Parses one input line.
///
/// # Errors
/// Returns `Error::Validation` describing what is wrong with the line.
pub fn parse_command(line: &str) -> Result<Command> {
    let tokens = tokenize(line)?;
    let Some((head, rest)) = tokens.split_first() else {
        return Err(Error::validation("Empty command"));
    };

    match head.to_lowercase().as_str() {
        "login" => match rest {
            [passphrase] => Ok(Command::Login(passphrase.clone())),
            _ => Err(Error::validation("Usage: login <passphrase>")),
        },
        "logout" => Ok(Command::Logout),
        "tab" => match rest {
            [tab] => tab.parse().map(Command::Tab).map_err(Error::validation),
            _ => Err(Error::validation("Usage: tab products|orders|logs")),
        },
        "add" => parse_new_product(rest).map(Command::Add),
        "edit" => match rest {
            [id, fields @ ..] if !fields.is_empty() => Ok(Command::Edit {
                id: id.clone(),
                patch: parse_patch(fields)?,
            }),
            _ => Err(Error::validation("Usage: edit <id> field=value ...")),
        },
        "delete" => match rest {
            [id] => Ok(Command::Delete(id.clone())),
            _ => Err(Error::validation("Usage: delete <id>")),
        },
        "clear-logs" => Ok(Command::ClearLogs),
        "refresh" => Ok(Command::Refresh),
        "stats" => Ok(Command::Stats),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(Error::validation(format!(
            "Unknown command '{other}', type 'help'"
        ))),
    }
}

/// Splits on whitespace, keeping double-quoted sections together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err(Error::validation("Unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_new_product(fields: &[String]) -> Result<NewProduct> {
    let patch = parse_patch(fields)?;
    Ok(NewProduct {
        name: patch.name,
        category: patch.category,
        price: patch.price,
        stock: patch.stock,
        description: patch.description,
        image: patch.image,
    })
}

fn parse_patch(fields: &[String]) -> Result<ProductPatch> {
    let mut patch = ProductPatch::default();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| Error::validation(format!("Expected key=value, got '{field}'")))?;
        match key {
            "name" => patch.name = Some(value.to_string()),
            "category" => {
                patch.category = Some(value.parse::<Category>().map_err(Error::validation)?);
            }
            "price" => {
                patch.price = Some(value.parse().map_err(|_| {
                    Error::validation(format!("Invalid price '{value}'"))
                })?);
            }
            "stock" => {
                patch.stock = Some(value.parse().map_err(|_| {
                    Error::validation(format!("Invalid stock '{value}'"))
                })?);
            }
            "description" => patch.description = Some(value.to_string()),
            "image" => patch.image = Some(value.to_string()),
            other => return Err(Error::validation(format!("Unknown field '{other}'"))),
        }
    }
    Ok(patch)
}
