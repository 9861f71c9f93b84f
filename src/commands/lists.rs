//! Saved grocery lists.

use clap::{Args, Subcommand};
use grocery_core::{Confirm, FormTree, GroceryGateway, ListView, Outcome};

use super::{ask, resolve_item, OutputFormat};

#[derive(Args)]
pub struct ListsCommand {
    #[command(subcommand)]
    pub command: ListsSubcommand,
}

#[derive(Subcommand)]
pub enum ListsSubcommand {
    /// Show all grocery lists
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a catalog item to a grocery list
    AddItem {
        /// Grocery list id
        grocery_id: i64,

        /// Catalog item id or name
        item: String,

        /// Quantity
        #[arg(long, short, default_value = "1")]
        qty: String,
    },

    /// Flip the purchased flag of an item
    Toggle {
        /// Grocery list id
        grocery_id: i64,

        /// Grocery item id
        grocery_item_id: i64,
    },

    /// Change an item's quantity by DELTA (may be negative)
    Qty {
        /// Grocery list id
        grocery_id: i64,

        /// Grocery item id
        grocery_item_id: i64,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Remove an item from a grocery list
    RemoveItem {
        /// Grocery list id
        grocery_id: i64,

        /// Grocery item id
        grocery_item_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Delete a grocery list and all of its items
    Delete {
        /// Grocery list id
        grocery_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl ListsSubcommand {
    fn force(&self) -> bool {
        matches!(
            self,
            ListsSubcommand::RemoveItem { force: true, .. } | ListsSubcommand::Delete { force: true, .. }
        )
    }
}

impl ListsCommand {
    pub async fn run<G: GroceryGateway>(&self, gateway: G) -> Result<(), Box<dyn std::error::Error>> {
        let confirm: Box<dyn Confirm> = if self.command.force() {
            Box::new(|_: &str| true)
        } else {
            Box::new(|message: &str| ask(message).unwrap_or(false))
        };
        let view = ListView::new(gateway, confirm);

        if view.mount().await == Outcome::Failed {
            return Err(error_message(&view).into());
        }

        match &self.command {
            ListsSubcommand::Show { format } => {
                let state = view.state();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&state.groceries)?);
                    }
                    OutputFormat::Text => {
                        if state.groceries.is_empty() {
                            println!("No grocery lists found.");
                        }
                        for grocery in &state.groceries {
                            println!("{}", grocery);
                        }
                    }
                }
                Ok(())
            }

            ListsSubcommand::AddItem {
                grocery_id,
                item,
                qty,
            } => {
                require_grocery(&view, *grocery_id)?;
                let item_id = resolve_item(&view.available_items_for(*grocery_id), item)
                    .map_err(|_| format!("Item '{}' is not available for grocery list #{}", item, grocery_id))?;

                view.open_add_item(*grocery_id);
                {
                    let mut form = view.new_item_form_mut();
                    form.item_id.set_value(item_id.to_string());
                    form.quantity.set_value(qty.as_str());
                }

                match view.submit_new_item(*grocery_id).await {
                    Outcome::Invalid => {
                        let state = view.state();
                        for error in state.new_item_form.errors() {
                            eprintln!("  {}", error);
                        }
                        Err("Item is invalid".into())
                    }
                    outcome => {
                        let added = view
                            .state()
                            .find_grocery(*grocery_id)
                            .and_then(|g| g.grocery_items.last())
                            .map(ToString::to_string);
                        report(&view, outcome, added.unwrap_or_default())
                    }
                }
            }

            ListsSubcommand::Toggle {
                grocery_id,
                grocery_item_id,
            } => {
                require_item(&view, *grocery_id, *grocery_item_id)?;
                let outcome = view.toggle_purchased(*grocery_id, *grocery_item_id).await;
                report(&view, outcome, item_line(&view, *grocery_id, *grocery_item_id))
            }

            ListsSubcommand::Qty {
                grocery_id,
                grocery_item_id,
                delta,
            } => {
                require_item(&view, *grocery_id, *grocery_item_id)?;
                match view
                    .change_quantity(*grocery_id, *grocery_item_id, *delta)
                    .await
                {
                    Outcome::Skipped => {
                        let quantity = view
                            .state()
                            .find_grocery(*grocery_id)
                            .and_then(|g| g.find_item(*grocery_item_id))
                            .map(|gi| gi.quantity);
                        Err(quantity_skipped_reason(
                            view.is_item_busy(*grocery_item_id),
                            quantity,
                            *delta,
                        )
                        .into())
                    }
                    outcome => report(&view, outcome, item_line(&view, *grocery_id, *grocery_item_id)),
                }
            }

            ListsSubcommand::RemoveItem {
                grocery_id,
                grocery_item_id,
                ..
            } => {
                require_item(&view, *grocery_id, *grocery_item_id)?;
                let outcome = view.delete_item(*grocery_id, *grocery_item_id).await;
                report(
                    &view,
                    outcome,
                    format!("Removed item #{} from grocery list #{}", grocery_item_id, grocery_id),
                )
            }

            ListsSubcommand::Delete { grocery_id, .. } => {
                require_grocery(&view, *grocery_id)?;
                let outcome = view.delete_grocery(*grocery_id).await;
                report(&view, outcome, format!("Deleted grocery list #{}", grocery_id))
            }
        }
    }
}

fn require_grocery<G: GroceryGateway>(view: &ListView<G>, grocery_id: i64) -> Result<(), String> {
    match view.state().find_grocery(grocery_id) {
        Some(_) => Ok(()),
        None => Err(format!("Grocery list not found: {}", grocery_id)),
    }
}

fn require_item<G: GroceryGateway>(
    view: &ListView<G>,
    grocery_id: i64,
    grocery_item_id: i64,
) -> Result<(), String> {
    require_grocery(view, grocery_id)?;
    let state = view.state();
    match state
        .find_grocery(grocery_id)
        .and_then(|g| g.find_item(grocery_item_id))
    {
        Some(_) => Ok(()),
        None => Err(format!(
            "Item #{} not found on grocery list #{}",
            grocery_item_id, grocery_id
        )),
    }
}

fn item_line<G: GroceryGateway>(view: &ListView<G>, grocery_id: i64, grocery_item_id: i64) -> String {
    view.state()
        .find_grocery(grocery_id)
        .and_then(|g| g.find_item(grocery_item_id))
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Why a quantity change was skipped.
fn quantity_skipped_reason(busy: bool, quantity: Option<i64>, delta: i64) -> String {
    if busy {
        return "Item is busy, try again".to_string();
    }
    match quantity.map(|q| q.checked_add(delta)) {
        Some(None) => "Quantity change is out of range".to_string(),
        _ => "Quantity cannot go below 1".to_string(),
    }
}

fn error_message<G: GroceryGateway>(view: &ListView<G>) -> String {
    view.state()
        .error_message
        .clone()
        .unwrap_or_else(|| "Request failed".to_string())
}

fn report<G: GroceryGateway>(
    view: &ListView<G>,
    outcome: Outcome,
    done: String,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        Outcome::Applied => {
            println!("{}", done);
            Ok(())
        }
        Outcome::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        Outcome::Failed => Err(error_message(view).into()),
        Outcome::Invalid | Outcome::Skipped => Err("Nothing changed".into()),
    }
}
