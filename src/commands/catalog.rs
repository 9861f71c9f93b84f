use clap::Args;
use grocery_core::GroceryGateway;

use super::OutputFormat;

#[derive(Args)]
pub struct CatalogCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl CatalogCommand {
    pub async fn run<G: GroceryGateway>(&self, gateway: G) -> Result<(), Box<dyn std::error::Error>> {
        let items = gateway.list_items().await?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Text => {
                if items.is_empty() {
                    println!("No items found.");
                    return Ok(());
                }
                println!("{:>5}  NAME", "ID");
                for item in &items {
                    println!("{:>5}  {}", item.id, item);
                }
            }
        }

        Ok(())
    }
}
