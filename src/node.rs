use std::cmp::Ordering;

use crate::record::CustomerRecord;

#[derive(Debug)]
pub(super) enum RemoveResult {
    /// The record was removed from the tree.
    Removed(CustomerRecord),

    /// The direct descendent node contains the record, but contains no
    /// children and must be unlinked by the parent.
    ParentUnlink,
}

/// A single tree node, owning one [`CustomerRecord`] and its two subtrees.
///
/// Nodes are ordered by [`CustomerRecord::phone_number()`], compared
/// lexicographically.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Child node pointers.
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1; an absent subtree has a height of 0 by
    /// convention. A u8 comfortably covers any balanced tree that fits in
    /// memory.
    height: u8,

    record: CustomerRecord,
}

impl Node {
    pub(crate) fn new(record: CustomerRecord) -> Self {
        Self {
            record,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Insert `record` into the subtree rooted at `self`, rebalancing every
    /// node on the insertion path.
    ///
    /// A record whose phone number already exists in the subtree is handed
    /// back through `Err` and the subtree is left untouched.
    pub(crate) fn insert(
        self: &mut Box<Self>,
        record: CustomerRecord,
    ) -> Result<(), CustomerRecord> {
        let child = match record.phone_number().cmp(self.record.phone_number()) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => {
                // Duplicate key - reject, returning the record to the caller.
                return Err(record);
            }
            Ordering::Greater => &mut self.right,
        };

        match child {
            // An Err propagates without rebalancing - the subtree was not
            // modified.
            Some(v) => v.insert(record)?,
            None => {
                // Insert the record as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(record)));

                // Inserting this new child node cannot skew the tree in the
                // direction of the new addition such that it requires the
                // tree be rebalanced as, at most, it creates an absolute
                // difference of 1 in this direction.
                //
                // Update this node's height and skip the rebalancing checks.
                update_height(self);
                return Ok(());
            }
        }

        rebalance(self);
        Ok(())
    }

    /// Find the record keyed by `phone_number` in the subtree rooted at
    /// `self`, if any.
    pub(crate) fn get(&self, phone_number: &str) -> Option<&CustomerRecord> {
        match phone_number.cmp(self.record.phone_number()) {
            Ordering::Less => self.left.as_ref()?.get(phone_number),
            Ordering::Equal => Some(&self.record),
            Ordering::Greater => self.right.as_ref()?.get(phone_number),
        }
    }

    pub(crate) fn get_mut(&mut self, phone_number: &str) -> Option<&mut CustomerRecord> {
        match phone_number.cmp(self.record.phone_number()) {
            Ordering::Less => self.left.as_mut()?.get_mut(phone_number),
            Ordering::Equal => Some(&mut self.record),
            Ordering::Greater => self.right.as_mut()?.get_mut(phone_number),
        }
    }

    /// Remove the record keyed by `phone_number` from the subtree rooted at
    /// `self`, if it exists.
    pub(super) fn remove(self: &mut Box<Self>, phone_number: &str) -> Option<RemoveResult> {
        // Recurse down the subtree rooted at `self`.
        //
        // If the key is not found, or successfully removed, the result is
        // returned. If the direct descendent node holds the key and no
        // children, it returns [`RemoveResult::ParentUnlink`] and the node
        // is unlinked in the parent before the result reaches the caller.
        match phone_number.cmp(self.record.phone_number()) {
            Ordering::Less => return remove_recurse(&mut self.left, phone_number),
            Ordering::Greater => return remove_recurse(&mut self.right, phone_number),
            Ordering::Equal => {
                // This node holds the record to be removed from the tree.
            }
        };

        // This node may have 0, 1 or 2 child node(s).
        //
        // With two children, the in-order successor (the leftmost node of
        // the right subtree) is physically extracted from its old position
        // and its record overwrites this node's payload. Ownership stays
        // strictly tree-shaped: the payload moves, the matched node's
        // allocation and links stay put.
        //
        // With one child, that child splices directly into this node's slot.
        // The AVL balance invariant guarantees a one-child node's child is a
        // leaf.
        let record = if self.left.is_some() && self.right.is_some() {
            let succ = match extract_subtree_min(self.right.as_mut().unwrap()) {
                Some(min) => min,
                None => {
                    // The right child has no left subtree, so it is the
                    // successor itself. Unlink it, re-linking its right
                    // subtree (if any) in its place.
                    let mut right = self.right.take().unwrap();
                    debug_assert!(right.left.is_none());

                    self.right = right.right.take();
                    right
                }
            };

            // The extracted successor carries no children.
            debug_assert!(succ.left.is_none());
            debug_assert!(succ.right.is_none());

            std::mem::replace(&mut self.record, succ.into_record())
        } else if let Some(child) = self.left.take().or_else(|| self.right.take()) {
            debug_assert!(self.left.is_none() && self.right.is_none());
            debug_assert_eq!(child.height, 1);

            std::mem::replace(self, child).into_record()
        } else {
            debug_assert_eq!(self.height, 1);

            // Parent will unlink this "self" node.
            return Some(RemoveResult::ParentUnlink);
        };

        // Invariant: the extracted payload is the one that was asked for,
        // and the record now in place is not.
        debug_assert_eq!(record.phone_number(), phone_number);
        debug_assert_ne!(self.record.phone_number(), phone_number);

        Some(RemoveResult::Removed(record))
    }

    pub(crate) fn record(&self) -> &CustomerRecord {
        &self.record
    }

    pub(crate) fn into_record(self: Box<Self>) -> CustomerRecord {
        self.record
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Returns the stored height of `n`, or 0 for an absent subtree.
fn height(n: Option<&Node>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

fn update_height(n: &mut Node) {
    n.height = 1 + height(n.left()).max(height(n.right()));
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number
/// when left heavy, and a negative number when right heavy.
fn balance(n: &Node) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Recompute the height of `n` and correct its skew if the absolute
/// difference in height between its branches exceeds 1.
///
/// Exactly one of four rotation cases applies, dispatched on the sign of the
/// node's balance factor and that of the taller child. A child balance
/// factor of 0 takes the single-rotation path.
fn rebalance(n: &mut Box<Node>) {
    update_height(n);

    match balance(n) {
        // Left-heavy
        (2..) if n.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(n);
        }
        (2..) => {
            rotate_left(n.left.as_mut().unwrap());
            rotate_right(n);
        }
        // Right-heavy
        (..=-2) if n.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(n);
        }
        (..=-2) => {
            rotate_right(n.right.as_mut().unwrap());
            rotate_left(n);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* The tree is well balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(n).abs() <= 1);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated) - reaching this
/// state indicates a corrupted tree, not bad input.
fn rotate_left(x: &mut Box<Node>) {
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    // The demoted node's height is recomputed first - the new subtree root's
    // height depends on it.
    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated) - reaching this
/// state indicates a corrupted tree, not bad input.
fn rotate_right(y: &mut Box<Node>) {
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);
}

/// Extracts the node holding the minimum key in a descendent of `root`, if
/// any, linking the right subtree of the extracted node in its place and
/// rebalancing the descent path.
///
/// Returns [`None`] when `root` has no left child - `root` itself then holds
/// the subtree minimum, and unlinking it is the caller's job.
fn extract_subtree_min(root: &mut Box<Node>) -> Option<Box<Node>> {
    // Descend left to the leaf.
    let v = match extract_subtree_min(root.left.as_mut()?) {
        Some(v) => Some(v),
        None => {
            // The left child is the end of the left edge.
            //
            // Unlink the right node of the left child, which will become the
            // new left node of "root" (if any).
            let left_right = root.left.as_mut().and_then(|v| v.right.take());

            std::mem::replace(&mut root.left, left_right)
        }
    };

    rebalance(root);
    debug_assert!(balance(root).abs() <= 1);
    v
}

/// Recurse into `node`, calling [`Node::remove()`] to remove the record
/// keyed by `phone_number` from the subtree rooted at `node`, if it exists.
///
/// Returns [`None`] if the key is not found.
///
/// Clears the `node` pointer if the [`Node::remove()`] call returns
/// [`RemoveResult::ParentUnlink`], returning the extracted record within a
/// [`RemoveResult::Removed`] variant.
pub(super) fn remove_recurse(
    node: &mut Option<Box<Node>>,
    phone_number: &str,
) -> Option<RemoveResult> {
    // Remove the record (if any) and rebalance the subtree.
    let remove_ret = node.as_mut().and_then(|v| {
        let ret = v.remove(phone_number)?;
        rebalance(v);
        Some(ret)
    })?;

    let record = match remove_ret {
        RemoveResult::Removed(v) => v,
        RemoveResult::ParentUnlink => {
            let node = node.take().unwrap();
            debug_assert_eq!(node.record().phone_number(), phone_number);

            node.into_record()
        }
    };

    Some(RemoveResult::Removed(record))
}
