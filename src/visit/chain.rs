//! Applying several visitors to one tree in sequence.

use crate::node::Node;

use super::error::VisitError;
use super::{Output, Visitor, Walker};

/// Object-safe execution surface so a [`Chain`] can hold visitors of
/// different concrete types. Blanket-implemented for every [`Visitor`].
pub trait RunVisitor {
    fn run(&mut self, walker: &Walker<'_>, root: Node) -> Result<Output, VisitError>;
}

impl<V: Visitor> RunVisitor for V {
    fn run(&mut self, walker: &Walker<'_>, root: Node) -> Result<Output, VisitError> {
        walker.run(self, root)
    }
}

/// An ordered sequence of visitors over one working tree. Each stage's
/// `Output::Node` becomes the next stage's input; the first non-node
/// output terminates the chain and is the final result.
#[derive(Default)]
pub struct Chain<'v> {
    stages: Vec<&'v mut dyn RunVisitor>,
}

impl<'v> Chain<'v> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, visitor: &'v mut dyn RunVisitor) {
        self.stages.push(visitor);
    }

    /// Builder-style [`push`](Chain::push).
    pub fn then(mut self, visitor: &'v mut dyn RunVisitor) -> Self {
        self.push(visitor);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&mut self, walker: &Walker<'_>, root: Node) -> Result<Output, VisitError> {
        let mut output = Output::Node(root);
        for stage in &mut self.stages {
            match output {
                Output::Node(node) => output = stage.run(walker, node)?,
                other => return Ok(other),
            }
        }
        Ok(output)
    }
}
