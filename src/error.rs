use thiserror::Error;

/// Errors returned by [`RBTree`](crate::RBTree) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("this tree cannot store absent values")]
    NullValue,
    #[error("the tree already contains this value")]
    DuplicateValue,
    #[error("the value is not in the tree and cannot be removed")]
    NotFound,
    /// Rotation was asked to rotate two nodes that are not parent and child. Never produced
    /// through the public operations unless the tree structure is corrupt.
    #[error("provided nodes are not related")]
    InvalidRelation,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
