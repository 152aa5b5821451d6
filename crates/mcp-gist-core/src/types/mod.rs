//! Core types shared by the resolver, validator and tree view

mod server;
mod tree;

pub use server::{
    NetworkDefinition, NetworkTransport, ProcessDefinition, ServerDefinition, ServerRecord,
    UNKNOWN_SERVER_LABEL,
};
pub use tree::{TreeIcon, TreeItem, TreeNode};
