//! A red-black tree of distinct, totally ordered values.
//!
//! Insertion rebalances with the classic recolor-and-rotate fix-up, so the red-black
//! properties hold after every [`RBTree::insert`]. Removal is a plain binary-search-tree
//! removal: it keeps the values in order but does **not** restore the coloring rules, so a
//! tree that has had values removed may no longer be balanced.
//!
//! ```
//! use rbtree::RBTree;
//!
//! let mut tree: RBTree<i32> = RBTree::new();
//! for v in [55, 31, 40] {
//!     tree.insert(v).unwrap();
//! }
//! assert_eq!(tree.level_order_string(), "[ 40, 31, 55 ]");
//! assert_eq!(tree.in_order_string(), "[ 31, 40, 55 ]");
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use log::{debug, trace};

mod check;
mod error;
mod iter;
mod node;
#[cfg(feature = "serde")]
mod serde;

pub use error::{Error, Result};
pub use iter::{InOrder, LevelOrder};
pub use node::Color;

use iter::{InOrderNodes, LevelOrderNodes};
use node::{
    color_of, is_left_child_of, is_right_child, is_right_child_of, parent_of, set_color, Node,
    NodeRef,
};

// Properties of the tree:
// 1. Every node is either red or black
// 2. The root is black
// 3. A red node never has a red child
// 4. Every path from a node down to an empty position passes through the same number of
//    black nodes (black-height)
// 5. Values in a left subtree are smaller than the node, values in a right subtree larger
//
// Insertion keeps all five. Removal only keeps 5.
pub struct RBTree<T> {
    root: Option<NodeRef<T>>,
    len: usize,
}

impl<T> RBTree<T> {
    pub fn new() -> Self {
        RBTree { root: None, len: 0 }
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn in_order_nodes(&self) -> InOrderNodes<'_, T> {
        InOrderNodes::new(self)
    }

    pub(crate) fn level_order_nodes(&self) -> LevelOrderNodes<'_, T> {
        LevelOrderNodes::new(self)
    }
}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<T: Ord> RBTree<T> {
    /// Adds `value` to the tree and rebalances.
    ///
    /// Fails with [`Error::NullValue`] when given `None` and with [`Error::DuplicateValue`]
    /// when an equal value is already stored, leaving the tree untouched in both cases.
    pub fn insert(&mut self, value: impl Into<Option<T>>) -> Result<()> {
        let value = value.into().ok_or(Error::NullValue)?;

        let Some(mut current) = self.root.clone() else {
            let node = Node::new(value);
            self.root = Some(node.clone());
            self.len += 1;
            debug!("inserted first value");
            return self.enforce_after_insert(node);
        };

        loop {
            let cmp = value.cmp(&current.borrow().value);

            let next = match cmp {
                Ordering::Equal => return Err(Error::DuplicateValue),
                Ordering::Less => current.borrow().left.clone(),
                Ordering::Greater => current.borrow().right.clone(),
            };

            match next {
                Some(next) => current = next,
                None => {
                    let node = Node::new(value);
                    node.borrow_mut().parent = Some(Rc::downgrade(&current));
                    if cmp == Ordering::Less {
                        current.borrow_mut().left = Some(node.clone());
                    } else {
                        current.borrow_mut().right = Some(node.clone());
                    }
                    self.len += 1;
                    debug!("inserted value, tree now holds {}", self.len);
                    return self.enforce_after_insert(node);
                }
            }
        }
    }

    /// Whether an equal value is stored. Fails with [`Error::NullValue`] when given `None`.
    pub fn contains<'a>(&self, value: impl Into<Option<&'a T>>) -> Result<bool>
    where
        T: 'a,
    {
        let value = value.into().ok_or(Error::NullValue)?;
        Ok(self.find_node(value).is_some())
    }

    /// Color of the node holding `value`, if there is one.
    pub fn color_of(&self, value: &T) -> Option<Color> {
        self.find_node(value).map(|node| color_of(Some(&node)))
    }

    /// Removes the node holding `value` without rebalancing.
    ///
    /// A node with two children takes over the value of its in-order successor, and the
    /// successor node is spliced out instead. Colors are left as they are, so the red-black
    /// properties may not hold afterwards; search order always does.
    pub fn remove<'a>(&mut self, value: impl Into<Option<&'a T>>) -> Result<()>
    where
        T: 'a,
    {
        let value = value.into().ok_or(Error::NullValue)?;
        let target = self.find_node(value).ok_or(Error::NotFound)?;

        let (left, right) = {
            let node = target.borrow();
            (node.left.clone(), node.right.clone())
        };

        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = Self::leftmost(right);
                // the removed value ends up in the successor node, which is then dropped
                std::mem::swap(
                    &mut target.borrow_mut().value,
                    &mut successor.borrow_mut().value,
                );
                let replacement = successor.borrow().right.clone();
                self.replace_node(&successor, replacement);
            }
            (Some(child), None) | (None, Some(child)) => self.replace_node(&target, Some(child)),
            (None, None) => self.replace_node(&target, None),
        }

        self.len -= 1;
        debug!("removed value, tree now holds {}", self.len);
        Ok(())
    }

    fn find_node(&self, value: &T) -> Option<NodeRef<T>> {
        let mut current = self.root.clone()?;

        loop {
            let next = {
                let node = current.borrow();
                match value.cmp(&node.value) {
                    Ordering::Equal => break,
                    Ordering::Less => node.left.clone(),
                    Ordering::Greater => node.right.clone(),
                }
            };
            current = next?;
        }

        Some(current)
    }

    /// Puts `replacement` (or an empty position) where `target` was and detaches `target`.
    fn replace_node(&mut self, target: &NodeRef<T>, replacement: Option<NodeRef<T>>) {
        let parent = parent_of(target);

        if let Some(ref node) = replacement {
            node.borrow_mut().parent = parent.as_ref().map(Rc::downgrade);
        }

        match parent {
            None => self.root = replacement,
            Some(parent) => {
                if is_right_child(target) {
                    parent.borrow_mut().right = replacement;
                } else {
                    parent.borrow_mut().left = replacement;
                }
            }
        }

        let mut detached = target.borrow_mut();
        detached.parent = None;
        detached.left = None;
        detached.right = None;
    }

    /// Left-most node of the subtree rooted at `node`.
    fn leftmost(node: NodeRef<T>) -> NodeRef<T> {
        let mut current = node;

        loop {
            let left = current.borrow().left.clone();
            match left {
                Some(left) => current = left,
                None => return current,
            }
        }
    }

    /// Rotates `child` up into `parent`'s position.
    ///
    /// A left child gives a right rotation, a right child a left rotation. Colors are not
    /// touched. Fails with [`Error::InvalidRelation`] if `child` is not a child of `parent`.
    fn rotate(&mut self, child: &NodeRef<T>, parent: &NodeRef<T>) -> Result<()> {
        let child_is_left = if is_left_child_of(child, parent) {
            true
        } else if is_right_child_of(child, parent) {
            false
        } else {
            return Err(Error::InvalidRelation);
        };
        trace!(
            "rotating {}",
            if child_is_left { "right" } else { "left" }
        );

        // the child's subtree on the parent's side moves across to the parent
        let inner = if child_is_left {
            child.borrow_mut().right.take()
        } else {
            child.borrow_mut().left.take()
        };
        if let Some(ref inner) = inner {
            inner.borrow_mut().parent = Some(Rc::downgrade(parent));
        }

        let grandparent = parent_of(parent);
        match grandparent {
            None => self.root = Some(child.clone()),
            Some(ref grandparent) => {
                let parent_was_left = is_left_child_of(parent, grandparent);
                let mut gp = grandparent.borrow_mut();
                if parent_was_left {
                    gp.left = Some(child.clone());
                } else {
                    gp.right = Some(child.clone());
                }
            }
        }
        child.borrow_mut().parent = grandparent.as_ref().map(Rc::downgrade);

        {
            let mut p = parent.borrow_mut();
            if child_is_left {
                p.left = inner;
            } else {
                p.right = inner;
            }
            p.parent = Some(Rc::downgrade(child));
        }

        let mut c = child.borrow_mut();
        if child_is_left {
            c.right = Some(parent.clone());
        } else {
            c.left = Some(parent.clone());
        }

        Ok(())
    }

    /// Restores the coloring rules after `node` was attached as a red leaf.
    fn enforce_after_insert(&mut self, node: NodeRef<T>) -> Result<()> {
        let mut child = node;

        while let Some(parent) = parent_of(&child) {
            // case 1: black parent, nothing to fix
            if parent.borrow().color == Color::Black {
                trace!("parent is black");
                break;
            }

            // a red parent is never the root unless a removal left it red; the root is
            // repainted below
            let Some(grandparent) = parent_of(&parent) else {
                break;
            };

            let parent_is_left = is_left_child_of(&parent, &grandparent);
            let aunt = {
                let gp = grandparent.borrow();
                if parent_is_left {
                    gp.right.clone()
                } else {
                    gp.left.clone()
                }
            };

            if color_of(aunt.as_ref()) == Color::Red {
                // case 2b: red aunt, push the blackness down from the grandparent
                trace!("parent and aunt are red, recoloring");
                set_color(&grandparent, Color::Red);
                set_color(&parent, Color::Black);
                if let Some(ref aunt) = aunt {
                    set_color(aunt, Color::Black);
                }

                match parent_of(&grandparent) {
                    None => {
                        set_color(&grandparent, Color::Black);
                        break;
                    }
                    Some(ref above) if above.borrow().color == Color::Red => {
                        child = grandparent;
                    }
                    Some(_) => break,
                }
            } else {
                // case 2a: black or missing aunt, rotate at the grandparent
                let mut parent = parent;
                if is_left_child_of(&child, &parent) != parent_is_left {
                    trace!("straightening bent path");
                    self.rotate(&child, &parent)?;
                    parent = child;
                }

                trace!("parent is red and aunt is black, rotating at grandparent");
                self.rotate(&parent, &grandparent)?;
                set_color(&parent, Color::Black);
                set_color(&grandparent, Color::Red);
                break;
            }
        }

        if let Some(ref root) = self.root {
            set_color(root, Color::Black);
        }
        Ok(())
    }
}

impl<T: Clone> RBTree<T> {
    /// Values in ascending order. Each call starts a fresh traversal.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Values breadth-first, starting at the root.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self)
    }

    pub fn root_value(&self) -> Option<T> {
        self.root.as_ref().map(|root| root.borrow().value.clone())
    }
}

fn bracketed<T: Display>(nodes: impl Iterator<Item = NodeRef<T>>) -> String {
    let values: Vec<String> = nodes
        .map(|node| {
            let node = node.borrow();
            node.value.to_string()
        })
        .collect();
    format!("[ {} ]", values.join(", "))
}

impl<T: Display> RBTree<T> {
    /// Renders the values in ascending order, e.g. `"[ 31, 40, 55 ]"`. An empty tree renders
    /// as `"[  ]"`.
    pub fn in_order_string(&self) -> String {
        bracketed(self.in_order_nodes())
    }

    /// Renders the values breadth-first, e.g. `"[ 40, 31, 55 ]"`.
    pub fn level_order_string(&self) -> String {
        bracketed(self.level_order_nodes())
    }
}

impl<T: Display> Display for RBTree<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "level order: {}\nin order: {}",
            self.level_order_string(),
            self.in_order_string()
        )
    }
}

impl<T: Debug> Debug for RBTree<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut set = f.debug_set();
        for node in self.in_order_nodes() {
            set.entry(&node.borrow().value);
        }
        set.finish()
    }
}
