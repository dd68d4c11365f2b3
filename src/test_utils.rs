use std::fmt::Write;

use proptest::prelude::*;

use crate::{node::Node, record::CustomerRecord, tree::CustomerIndex};

/// Upper bound of the generated phone-number key domain.
///
/// Small enough to encourage operations to collide on the same keys.
const PHONE_DOMAIN: u32 = 1000;

/// Generate arbitrary phone-number keys of mixed widths, exercising the
/// lexicographic (not numeric) key ordering.
pub(crate) fn arbitrary_phone() -> impl Strategy<Value = String> {
    (0..PHONE_DOMAIN).prop_map(|v| v.to_string())
}

/// Generate whole records over the [`arbitrary_phone()`] key domain.
pub(crate) fn arbitrary_record() -> impl Strategy<Value = CustomerRecord> {
    (arbitrary_phone(), 0.0..120.0_f64, 0.0..500.0_f64).prop_map(|(phone, call, data)| {
        CustomerRecord::new(
            format!("Customer {phone}"),
            format!("{phone} Example Street"),
            phone,
            call,
            data,
        )
        .unwrap()
    })
}

/// A deterministic record keyed by `phone`.
pub(crate) fn record_with_phone(phone: &str) -> CustomerRecord {
    CustomerRecord::new(
        format!("Customer {phone}"),
        format!("{phone} Example Street"),
        phone,
        10.0,
        25.0,
    )
    .unwrap()
}

/// Assert the BST and AVL properties of tree nodes, ensuring the tree is
/// well-formed.
pub(crate) fn validate_tree_structure(t: &CustomerIndex) {
    let root = match t.root() {
        Some(v) => v,
        None => return,
    };

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: the left child always contains a key strictly less
        // than this node.
        assert!(n
            .left()
            .map(|v| v.record().phone_number() < n.record().phone_number())
            .unwrap_or(true));

        // Invariant 2: the right child always contains a key strictly
        // greater than this node.
        assert!(n
            .right()
            .map(|v| v.record().phone_number() > n.record().phone_number())
            .unwrap_or(true));

        // Invariant 3: the stored height of this node is always +1 of the
        // maximum child height (an absent child has height 0).
        let left_height = n.left().map(|v| v.height()).unwrap_or_default();
        let right_height = n.right().map(|v| v.height()).unwrap_or_default();
        let want_height = 1 + left_height.max(right_height);

        assert_eq!(
            n.height(),
            want_height,
            "expect node with phone {:?} to have height {}, has {}",
            n.record().phone_number(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot exceed 1.
        let balance = (left_height as i64 - right_height as i64).abs();
        assert!(balance <= 1, "balance={balance}, node={n:?}");
    }
}

/// Render the tree as a Graphviz digraph, for eyeballing failing cases.
#[allow(unused)]
pub(crate) fn print_dot(n: &Node) -> String {
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

#[allow(unused)]
fn recurse<W>(n: &Node, buf: &mut W)
where
    W: std::fmt::Write,
{
    let phone = n.record().phone_number();

    writeln!(
        buf,
        r#""{}" [label="{} | {} | {{ bill={} | h={} }}"];"#,
        phone,
        phone,
        n.record().name(),
        n.record().total_bill(),
        n.height(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\";",
                    phone,
                    v.record().phone_number()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{phone}\" [shape=point,style=invis];").unwrap();
                writeln!(buf, "\"{phone}\" -> \"null_{phone}\" [style=invis];").unwrap();
            }
        };
    }
}
