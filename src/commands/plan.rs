//! Create a grocery list from the command line.

use chrono::{Local, NaiveDate};
use clap::Args;
use grocery_core::{FormFactory, FormTree, GroceryGateway, Outcome, PlannerView};

use super::resolve_item;
use crate::config::Config;

#[derive(Args)]
pub struct PlanCommand {
    /// Family id (defaults to the configured family)
    #[arg(long)]
    family: Option<i64>,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,

    /// Item as ITEM[:QTY[:purchased]] where ITEM is a catalog id or name (can be repeated)
    #[arg(long = "item", short = 'i', value_name = "ITEM", required = true)]
    items: Vec<String>,
}

/// One parsed `--item` argument. Quantity stays raw so the form validates it.
#[derive(Debug, PartialEq)]
struct ItemSpec<'a> {
    reference: &'a str,
    quantity: Option<&'a str>,
    purchased: bool,
}

fn parse_item_spec(raw: &str) -> Result<ItemSpec<'_>, String> {
    let mut parts = raw.splitn(3, ':');
    let reference = parts.next().unwrap_or_default().trim();
    let quantity = parts.next().map(str::trim);
    let purchased = match parts.next().map(str::trim) {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("purchased") => true,
        Some(_) => {
            return Err(format!(
                "Invalid item '{}'. Use ITEM[:QTY[:purchased]].",
                raw
            ))
        }
    };
    if reference.is_empty() {
        return Err(format!("Invalid item '{}'. Use ITEM[:QTY[:purchased]].", raw));
    }
    Ok(ItemSpec {
        reference,
        quantity,
        purchased,
    })
}

impl PlanCommand {
    pub async fn run<G: GroceryGateway>(
        &self,
        gateway: G,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = match &self.date {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d))?,
            None => Local::now().date_naive(),
        };
        let specs = self
            .items
            .iter()
            .map(String::as_str)
            .map(parse_item_spec)
            .collect::<Result<Vec<_>, _>>()?;

        let family_id = self.family.unwrap_or(config.family_id.value);
        let view = PlannerView::new(gateway, FormFactory::with_family_id(family_id));
        if view.mount().await == Outcome::Failed {
            eprintln!("Warning: item catalog unavailable; only numeric item ids can be used.");
        }

        let item_ids = {
            let state = view.state();
            specs
                .iter()
                .map(|spec| resolve_item(&state.catalog, spec.reference))
                .collect::<Result<Vec<_>, _>>()?
        };

        for _ in 1..specs.len() {
            view.add_item();
        }
        {
            let mut form = view.form_mut();
            form.grocery_date.set_value(date.format("%Y-%m-%d").to_string());
            for ((group, spec), item_id) in form.grocery_items.iter_mut().zip(&specs).zip(item_ids) {
                group.item_id.set_value(item_id.to_string());
                if let Some(quantity) = spec.quantity {
                    group.quantity.set_value(quantity);
                }
                group.purchased.set_value(spec.purchased.to_string());
            }
        }

        match view.submit_form().await {
            Outcome::Applied => {
                println!(
                    "Saved grocery list for family {} on {} ({} item(s)).",
                    family_id,
                    date,
                    specs.len()
                );
                Ok(())
            }
            Outcome::Invalid => {
                let state = view.state();
                for error in state.form.errors() {
                    eprintln!("  {}", error);
                }
                Err("Grocery list is invalid".into())
            }
            Outcome::Failed => {
                let notice = view.state().notice.clone();
                Err(notice.unwrap_or_else(|| "Failed to save grocery".to_string()).into())
            }
            Outcome::Skipped | Outcome::Declined => Ok(()),
        }
    }
}
