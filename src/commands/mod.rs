mod catalog;
mod config_cmd;
mod lists;
mod plan;

pub use catalog::CatalogCommand;
pub use config_cmd::ConfigCommand;
pub use lists::ListsCommand;
pub use plan::PlanCommand;

use clap::ValueEnum;
use grocery_core::Item;
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolves a catalog item by id or case-insensitive name.
///
/// Numeric references are accepted as-is when the catalog could not be loaded.
pub fn resolve_item(catalog: &[Item], reference: &str) -> Result<i64, String> {
    let reference = reference.trim();
    if let Ok(id) = reference.parse::<i64>() {
        if catalog.is_empty() || catalog.iter().any(|item| item.id == id) {
            return Ok(id);
        }
    } else if let Some(item) = catalog
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(reference))
    {
        return Ok(item.id);
    }
    Err(format!("Item not found: {}", reference))
}

/// Asks a yes/no question on stdin. Anything but "y" means no.
pub fn ask(message: &str) -> io::Result<bool> {
    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
