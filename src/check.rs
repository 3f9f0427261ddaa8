use std::fmt::Debug;
use std::rc::Rc;

use anyhow::{bail, ensure, Result};

use crate::node::{parent_of, Color, NodeRef};
use crate::RBTree;

impl<T: Ord + Debug> RBTree<T> {
    /// Verifies the red-black properties, search order, parent links and the stored count.
    ///
    /// Every insert leaves the tree passing this check. [`RBTree::remove`] does not rebalance,
    /// so the coloring rules may fail here after a removal; search order and structure
    /// still hold.
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root.as_ref() else {
            ensure!(self.len == 0, "empty tree reports {} values", self.len);
            return Ok(());
        };

        ensure!(
            root.borrow().parent.is_none(),
            "root {:?} has a parent",
            root.borrow().value
        );
        ensure!(
            root.borrow().color == Color::Black,
            "root {:?} is red",
            root.borrow().value
        );

        let mut count = 0;
        check_subtree(root, None, None, &mut count)?;
        ensure!(
            count == self.len,
            "tree holds {count} nodes but reports {}",
            self.len
        );
        Ok(())
    }
}

/// Checks the subtree under `node`, whose values must lie strictly between `lower` and
/// `upper`. Returns its black-height.
fn check_subtree<T: Ord + Debug>(
    node: &NodeRef<T>,
    lower: Option<&NodeRef<T>>,
    upper: Option<&NodeRef<T>>,
    count: &mut usize,
) -> Result<usize> {
    *count += 1;
    let n = node.borrow();

    if let Some(lower) = lower {
        ensure!(
            lower.borrow().value < n.value,
            "{:?} is out of order below {:?}",
            n.value,
            lower.borrow().value
        );
    }
    if let Some(upper) = upper {
        ensure!(
            n.value < upper.borrow().value,
            "{:?} is out of order below {:?}",
            n.value,
            upper.borrow().value
        );
    }

    let mut heights = [0; 2];
    for (i, child) in [&n.left, &n.right].into_iter().enumerate() {
        let Some(child) = child else { continue };

        match parent_of(child) {
            Some(parent) if Rc::ptr_eq(&parent, node) => {}
            _ => bail!("{:?} has a stale parent link", child.borrow().value),
        }
        if n.color == Color::Red && child.borrow().color == Color::Red {
            bail!(
                "red {:?} has red child {:?}",
                n.value,
                child.borrow().value
            );
        }

        heights[i] = if i == 0 {
            check_subtree(child, lower, Some(node), count)?
        } else {
            check_subtree(child, Some(node), upper, count)?
        };
    }

    if heights[0] != heights[1] {
        bail!(
            "black-height differs under {:?}: {} on the left, {} on the right",
            n.value,
            heights[0],
            heights[1]
        );
    }

    Ok(heights[0] + usize::from(n.color == Color::Black))
}
