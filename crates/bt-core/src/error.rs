use thiserror::Error;

use crate::NodeId;

/// Malformed tree detected while building. Construction is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("composite '{name}' ({id}) has no children")]
    EmptyComposite { name: String, id: NodeId },

    #[error("decorator '{name}' ({id}) has an iteration cap of zero")]
    ZeroIterationCap { name: String, id: NodeId },
}

pub type Result<T> = std::result::Result<T, BuildError>;
