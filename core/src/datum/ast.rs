//! Nodes of the abstract syntax tree built by the evaluator from the content of lists.

use std::cell::RefCell;

use crate::datum::Datum;

#[derive(Debug)]
pub struct AstNodeBody {
    name: Datum,
    children: RefCell<Vec<Datum>>,
}

impl AstNodeBody {
    pub fn new(name: Datum) -> Self {
        AstNodeBody {
            name,
            children: RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &Datum {
        &self.name
    }

    pub fn add_child(&self, child: Datum) {
        self.children.borrow_mut().push(child);
    }

    pub fn count_of_children(&self) -> usize {
        self.children.borrow().len()
    }

    /// The 0-based `index`-th child.
    pub fn child_at_index(&self, index: usize) -> Option<Datum> {
        self.children.borrow().get(index).cloned()
    }

    pub fn children(&self) -> Vec<Datum> {
        self.children.borrow().clone()
    }
}
