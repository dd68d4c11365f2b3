use crate::node::Node;

/// An in-order traversal of the subtree rooted at the node given to
/// [`InOrder::new()`], yielding nodes in ascending phone-number order.
#[derive(Debug)]
pub(crate) struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        this.push_subtree(root);

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node,
        // if any.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some(v)
    }
}

/// A pre-order traversal (node, left subtree, right subtree) - the order
/// records are emitted into a snapshot.
#[derive(Debug)]
pub(crate) struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // The right child is pushed first so the left subtree is fully
        // visited before it.
        self.stack.extend(v.right().into_iter().chain(v.left()));

        Some(v)
    }
}
