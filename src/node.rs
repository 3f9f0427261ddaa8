use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

pub(crate) type NodeRef<T> = Rc<RefCell<Node<T>>>;
pub(crate) type ParentRef<T> = Weak<RefCell<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeRef<T>>,
    pub(crate) right: Option<NodeRef<T>>,
    pub(crate) parent: Option<ParentRef<T>>,
}

impl<T> Node<T> {
    /// New nodes start out red and detached.
    pub(crate) fn new(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }))
    }
}

pub(crate) fn parent_of<T>(node: &NodeRef<T>) -> Option<NodeRef<T>> {
    node.borrow().parent.as_ref()?.upgrade()
}

/// Whether `slot` holds exactly `node`.
pub(crate) fn is_node<T>(slot: Option<&NodeRef<T>>, node: &NodeRef<T>) -> bool {
    slot.map(|n| Rc::ptr_eq(n, node)).unwrap_or(false)
}

pub(crate) fn is_left_child_of<T>(node: &NodeRef<T>, parent: &NodeRef<T>) -> bool {
    is_node(parent.borrow().left.as_ref(), node)
}

pub(crate) fn is_right_child_of<T>(node: &NodeRef<T>, parent: &NodeRef<T>) -> bool {
    is_node(parent.borrow().right.as_ref(), node)
}

/// True when `node` has a parent and sits in that parent's right slot.
pub(crate) fn is_right_child<T>(node: &NodeRef<T>) -> bool {
    parent_of(node)
        .map(|parent| is_right_child_of(node, &parent))
        .unwrap_or(false)
}

/// Empty positions count as black.
pub(crate) fn color_of<T>(node: Option<&NodeRef<T>>) -> Color {
    node.map(|n| n.borrow().color).unwrap_or(Color::Black)
}

pub(crate) fn set_color<T>(node: &NodeRef<T>, color: Color) {
    node.borrow_mut().color = color;
}
