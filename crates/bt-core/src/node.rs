use core::fmt;
use std::borrow::Cow;

use crate::{Blackboard, BtStatus, BuildError, TickContext};

/// Pre-order position of a node inside its tree. Assigned by the tree builder; the root is 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Composite,
    Decorator,
    Condition,
    Task,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Composite => "composite",
            NodeKind::Decorator => "decorator",
            NodeKind::Condition => "condition",
            NodeKind::Task => "task",
        };
        f.write_str(s)
    }
}

/// Identity every node carries: a display name, its kind, and the id given to it at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMeta {
    id: NodeId,
    name: Cow<'static, str>,
    kind: NodeKind,
}

impl NodeMeta {
    pub fn new(kind: NodeKind, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: NodeId::default(),
            name: name.into(),
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn to_ref(&self) -> NodeRef {
        NodeRef {
            id: self.id,
            name: self.name.to_string(),
        }
    }
}

/// Snapshot of a node's identity, kept on the blackboard for diagnostics.
///
/// This is not a handle into the tree: it cannot be used to reach or run the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub id: NodeId,
    pub name: String,
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The single node capability: run once against the shared blackboard and report a status.
///
/// Composites and decorators expose their children through the `for_each_child*` visitors so
/// the tree builder can number and validate the whole structure without knowing concrete types.
pub trait BtNode: 'static {
    fn meta(&self) -> &NodeMeta;

    fn meta_mut(&mut self) -> &mut NodeMeta;

    fn run(&mut self, ctx: &mut TickContext<'_>, blackboard: &mut Blackboard) -> BtStatus;

    fn name(&self) -> &str {
        self.meta().name()
    }

    /// One-line description used by tree outlines. Defaults to the name.
    fn label(&self) -> String {
        self.name().to_string()
    }

    fn for_each_child(&self, _visit: &mut dyn FnMut(&dyn BtNode)) {}

    fn for_each_child_mut(&mut self, _visit: &mut dyn FnMut(&mut dyn BtNode)) {}

    /// Node-local parameter checks, run once by the tree builder.
    fn validate(&self) -> Result<(), BuildError> {
        Ok(())
    }
}
