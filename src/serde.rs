//! `serde` support for [`RBTree`]s
//!
//! A tree serializes as the sequence of its values in ascending order.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use std::fmt;
use std::marker::PhantomData;

use crate::RBTree;

impl<T: Serialize> Serialize for RBTree<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes = self.in_order_nodes();
        serializer.collect_seq(nodes.map(SerializeNode))
    }
}

struct SerializeNode<T>(crate::node::NodeRef<T>);

impl<T: Serialize> Serialize for SerializeNode<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().value.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + Ord> Deserialize<'de> for RBTree<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RBTreeVisitor {
            marker: PhantomData,
        })
    }
}

struct RBTreeVisitor<T> {
    marker: PhantomData<RBTree<T>>,
}

impl<'de, T: Deserialize<'de> + Ord> Visitor<'de> for RBTreeVisitor<T> {
    type Value = RBTree<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of distinct values")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut tree = RBTree::new();
        while let Some(value) = seq.next_element::<T>()? {
            tree.insert(value).map_err(de::Error::custom)?;
        }

        Ok(tree)
    }
}
