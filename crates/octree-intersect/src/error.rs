//! Error types for octree construction.

/// Errors that can occur while building an [`Octree`](crate::Octree).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OctreeError {
    /// There were no shapes to index, or the height resolved to zero.
    #[error("constructing an octree of height 0 is forbidden (got {shapes} shapes)")]
    EmptyInput {
        /// Number of shapes that were passed to the build.
        shapes: usize,
    },
}
