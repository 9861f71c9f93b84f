//! Typed grocery forms.

use super::{FormField, FormTree, Node, NodeMut, ValidationError, Validator};
use crate::models::{CreateGroceryPayload, GroceryItemPayload};

/// Initial values for a new item group. Unset fields use the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemDefaults {
    pub item_id: Option<i64>,
    pub quantity: Option<i64>,
    pub purchased: Option<bool>,
}

/// One line item of the create-grocery form.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItemGroup {
    pub item_id: FormField,
    pub quantity: FormField,
    pub purchased: FormField,
}

impl GroceryItemGroup {
    fn to_payload(&self) -> Result<GroceryItemPayload, ValidationError> {
        Ok(GroceryItemPayload {
            item_id: self.item_id.as_int()?,
            quantity: self.quantity.as_int()?,
            purchased: Some(self.purchased.as_bool()),
        })
    }
}

impl FormTree for GroceryItemGroup {
    fn node(&self) -> Node<'_> {
        Node::Group(vec![
            ("item_id", Node::Field(&self.item_id)),
            ("quantity", Node::Field(&self.quantity)),
            ("purchased", Node::Field(&self.purchased)),
        ])
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Group(vec![
            NodeMut::Field(&mut self.item_id),
            NodeMut::Field(&mut self.quantity),
            NodeMut::Field(&mut self.purchased),
        ])
    }
}

/// The create-grocery form: list-level fields plus a sequence of item groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryForm {
    pub family_id: FormField,
    pub grocery_date: FormField,
    pub grocery_items: Vec<GroceryItemGroup>,
}

impl GroceryForm {
    pub fn add_item(&mut self, factory: &FormFactory, initial: Option<ItemDefaults>) {
        self.grocery_items.push(factory.create_item(initial));
    }

    /// Removes the group at `index`. Refused when it is the last group.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.grocery_items.len() <= 1 || index >= self.grocery_items.len() {
            return false;
        }
        self.grocery_items.remove(index);
        true
    }

    /// Builds the wire payload, coercing numeric fields and the purchased flag.
    pub fn to_payload(&self) -> Result<CreateGroceryPayload, ValidationError> {
        let grocery_items = self
            .grocery_items
            .iter()
            .map(GroceryItemGroup::to_payload)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateGroceryPayload {
            family_id: self.family_id.as_int()?,
            grocery_date: self.grocery_date.value().trim().to_string(),
            grocery_items,
        })
    }
}

impl FormTree for GroceryForm {
    fn node(&self) -> Node<'_> {
        Node::Group(vec![
            ("family_id", Node::Field(&self.family_id)),
            ("grocery_date", Node::Field(&self.grocery_date)),
            (
                "grocery_items",
                Node::Sequence(self.grocery_items.iter().map(|g| g.node()).collect()),
            ),
        ])
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Group(vec![
            NodeMut::Field(&mut self.family_id),
            NodeMut::Field(&mut self.grocery_date),
            NodeMut::Sequence(self.grocery_items.iter_mut().map(|g| g.node_mut()).collect()),
        ])
    }
}

/// The single-item form used to add a line to an existing grocery.
#[derive(Debug, Clone, PartialEq)]
pub struct AddItemForm {
    pub item_id: FormField,
    pub quantity: FormField,
}

impl AddItemForm {
    pub fn reset(&mut self) {
        self.item_id.reset();
        self.quantity.reset();
    }

    /// New lines always start unpurchased.
    pub fn to_payload(&self) -> Result<GroceryItemPayload, ValidationError> {
        Ok(GroceryItemPayload {
            item_id: self.item_id.as_int()?,
            quantity: self.quantity.as_int()?,
            purchased: Some(false),
        })
    }
}

impl FormTree for AddItemForm {
    fn node(&self) -> Node<'_> {
        Node::Group(vec![
            ("item_id", Node::Field(&self.item_id)),
            ("quantity", Node::Field(&self.quantity)),
        ])
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Group(vec![
            NodeMut::Field(&mut self.item_id),
            NodeMut::Field(&mut self.quantity),
        ])
    }
}

/// Builds grocery forms with their defaults and validators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormFactory {
    family_id: i64,
}

impl Default for FormFactory {
    fn default() -> Self {
        Self { family_id: 1 }
    }
}

impl FormFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose grocery forms default to the given family.
    pub fn with_family_id(family_id: i64) -> Self {
        Self { family_id }
    }

    /// A create-grocery form with exactly one item group.
    pub fn create_list(&self) -> GroceryForm {
        GroceryForm {
            family_id: FormField::new(
                self.family_id.to_string(),
                vec![Validator::Required, Validator::Integer],
            ),
            grocery_date: FormField::new("", vec![Validator::Required]),
            grocery_items: vec![self.create_item(None)],
        }
    }

    /// An item group. `item_id` 0 means nothing is selected yet.
    pub fn create_item(&self, initial: Option<ItemDefaults>) -> GroceryItemGroup {
        let initial = initial.unwrap_or_default();
        GroceryItemGroup {
            item_id: FormField::new(
                initial.item_id.unwrap_or(0).to_string(),
                vec![Validator::Required, Validator::Min(1)],
            ),
            quantity: FormField::new(
                initial.quantity.unwrap_or(1).to_string(),
                vec![Validator::Required, Validator::Min(1)],
            ),
            purchased: FormField::new(initial.purchased.unwrap_or(false).to_string(), vec![]),
        }
    }

    pub fn create_add_item(&self) -> AddItemForm {
        AddItemForm {
            item_id: FormField::new("0", vec![Validator::Required, Validator::Min(1)]),
            quantity: FormField::new("1", vec![Validator::Required, Validator::Min(1)]),
        }
    }
}
