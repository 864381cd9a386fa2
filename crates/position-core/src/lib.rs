//! Position Core
//!
//! Layered architecture:
//! - domain: Position records and drafts
//! - tree: flat list -> ordered forest
//! - remote: REST collaborator abstraction and implementations
//! - store: canonical flat list with confirmed-only reconciliation

pub mod config;
pub mod domain;
pub mod error;
pub mod remote;
pub mod store;
pub mod tree;

pub use config::{ConfigError, RemoteConfig};
pub use domain::{Position, PositionDraft};
pub use error::{RemoteError, RemoteResult};
pub use remote::{HttpPositionRemote, InMemoryPositionRemote, PositionRemote};
pub use store::{MutationKind, PositionState, PositionStore};
pub use tree::{build_tree, TreeNode};
