//! Form state with field-level validation.
//!
//! A form is a tree of three kinds of node: a leaf [`FormField`], a named
//! group of nodes, and an ordered sequence of nodes. Typed forms such as
//! [`GroceryForm`] expose their tree through [`FormTree`], and every
//! structural operation (validity, error collection, touch/dirty marking) is a
//! recursive walk over [`Node`] or [`NodeMut`].

mod field;
mod grocery;

pub use field::{FormField, ValidationError, Validator};
pub use grocery::{AddItemForm, FormFactory, GroceryForm, GroceryItemGroup, ItemDefaults};

/// Read-only view of a form tree.
pub enum Node<'a> {
    Field(&'a FormField),
    Group(Vec<(&'static str, Node<'a>)>),
    Sequence(Vec<Node<'a>>),
}

/// Mutable view of a form tree.
pub enum NodeMut<'a> {
    Field(&'a mut FormField),
    Group(Vec<NodeMut<'a>>),
    Sequence(Vec<NodeMut<'a>>),
}

/// A validation failure located by its dotted path, e.g. `grocery_items.0.quantity`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: String,
    pub error: ValidationError,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

impl Node<'_> {
    pub fn is_valid(&self) -> bool {
        match self {
            Node::Field(field) => field.is_valid(),
            Node::Group(children) => children.iter().all(|(_, child)| child.is_valid()),
            Node::Sequence(children) => children.iter().all(Node::is_valid),
        }
    }

    fn collect_errors(&self, path: &str, out: &mut Vec<FieldError>) {
        match self {
            Node::Field(field) => {
                out.extend(field.errors().into_iter().map(|error| FieldError {
                    path: path.to_string(),
                    error,
                }));
            }
            Node::Group(children) => {
                for (name, child) in children {
                    child.collect_errors(&join_path(path, name), out);
                }
            }
            Node::Sequence(children) => {
                for (index, child) in children.iter().enumerate() {
                    child.collect_errors(&join_path(path, &index.to_string()), out);
                }
            }
        }
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&FormField)) {
        match self {
            Node::Field(field) => f(field),
            Node::Group(children) => {
                for (_, child) in children {
                    child.for_each_field(f);
                }
            }
            Node::Sequence(children) => {
                for child in children {
                    child.for_each_field(f);
                }
            }
        }
    }
}

impl NodeMut<'_> {
    fn for_each_field(self, f: &mut dyn FnMut(&mut FormField)) {
        match self {
            NodeMut::Field(field) => f(field),
            NodeMut::Group(children) | NodeMut::Sequence(children) => {
                for child in children {
                    child.for_each_field(f);
                }
            }
        }
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// A typed form that can be walked as a tree.
pub trait FormTree {
    fn node(&self) -> Node<'_>;

    fn node_mut(&mut self) -> NodeMut<'_>;

    fn is_valid(&self) -> bool {
        self.node().is_valid()
    }

    /// All failing validators, with the path of the field they belong to.
    fn errors(&self) -> Vec<FieldError> {
        let mut out = Vec::new();
        self.node().collect_errors("", &mut out);
        out
    }

    /// True when any field has been touched.
    fn is_touched(&self) -> bool {
        let mut touched = false;
        self.node().for_each_field(&mut |field: &FormField| touched |= field.touched());
        touched
    }

    /// True when any field has been edited.
    fn is_dirty(&self) -> bool {
        let mut dirty = false;
        self.node().for_each_field(&mut |field: &FormField| dirty |= field.dirty());
        dirty
    }

    /// Marks every field touched and dirty so validation messages render.
    fn mark_all_touched(&mut self) {
        self.node_mut().for_each_field(&mut |field: &mut FormField| {
            field.mark_touched();
            field.mark_dirty();
        });
    }

    /// Marks every field pristine and untouched.
    fn mark_pristine(&mut self) {
        self.node_mut()
            .for_each_field(&mut |field: &mut FormField| field.mark_pristine());
    }
}
