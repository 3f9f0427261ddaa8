//! Read-only traversals over an [`RBTree`].
//!
//! Both iterators borrow the tree for their whole lifetime, so the tree cannot be mutated
//! while a traversal is in progress.

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::node::NodeRef;
use crate::RBTree;

/// Left-root-right walk over the nodes, driven by an explicit stack.
pub(crate) struct InOrderNodes<'a, T> {
    stack: Vec<NodeRef<T>>,
    current: Option<NodeRef<T>>,
    remaining: usize,
    _tree: PhantomData<&'a RBTree<T>>,
}

impl<'a, T> InOrderNodes<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>) -> Self {
        InOrderNodes {
            stack: Vec::new(),
            current: tree.root.clone(),
            remaining: tree.len,
            _tree: PhantomData,
        }
    }
}

impl<'a, T> Iterator for InOrderNodes<'a, T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<NodeRef<T>> {
        // descend as far left as possible, remembering the path
        while let Some(node) = self.current.take() {
            self.current = node.borrow().left.clone();
            self.stack.push(node);
        }

        let popped = self.stack.pop()?;
        self.current = popped.borrow().right.clone();
        self.remaining = self.remaining.saturating_sub(1);
        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Breadth-first walk over the nodes, driven by a FIFO queue.
pub(crate) struct LevelOrderNodes<'a, T> {
    queue: VecDeque<NodeRef<T>>,
    remaining: usize,
    _tree: PhantomData<&'a RBTree<T>>,
}

impl<'a, T> LevelOrderNodes<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>) -> Self {
        LevelOrderNodes {
            queue: tree.root.iter().cloned().collect(),
            remaining: tree.len,
            _tree: PhantomData,
        }
    }
}

impl<'a, T> Iterator for LevelOrderNodes<'a, T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<NodeRef<T>> {
        let next = self.queue.pop_front()?;
        {
            let node = next.borrow();
            self.queue.extend(node.left.iter().cloned());
            self.queue.extend(node.right.iter().cloned());
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over the values of an [`RBTree`] in ascending order.
///
/// Created by [`RBTree::in_order`].
pub struct InOrder<'a, T> {
    nodes: InOrderNodes<'a, T>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>) -> Self {
        InOrder {
            nodes: InOrderNodes::new(tree),
        }
    }
}

impl<'a, T: Clone> Iterator for InOrder<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.nodes.next().map(|node| {
            let node = node.borrow();
            node.value.clone()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, T: Clone> ExactSizeIterator for InOrder<'a, T> {}

/// Iterator over the values of an [`RBTree`] level by level, starting at the root.
///
/// Created by [`RBTree::level_order`].
pub struct LevelOrder<'a, T> {
    nodes: LevelOrderNodes<'a, T>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(tree: &'a RBTree<T>) -> Self {
        LevelOrder {
            nodes: LevelOrderNodes::new(tree),
        }
    }
}

impl<'a, T: Clone> Iterator for LevelOrder<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.nodes.next().map(|node| {
            let node = node.borrow();
            node.value.clone()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, T: Clone> ExactSizeIterator for LevelOrder<'a, T> {}
