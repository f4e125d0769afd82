//! # Prospect Graph
//!
//! Company relationship analysis over saved prospects.
//!
//! ## Features
//!
//! - **Relationship inference** - connect companies through a contact's linked
//!   companies or through contacts they share
//! - **Identity dedup** - one node per company key (record id, tax id, name)
//! - **Ego networks** - focus on one company or one person
//! - **Layout** - deterministic circular placement for rendering
//!
//! ## Architecture
//!
//! ```text
//! Entity[]
//!     │
//!     ├──> RelationshipGraphBuilder
//!     │      ├─ Tracked nodes for every saved entity
//!     │      ├─ Resolve linked companies (tax id, then name)
//!     │      ├─ External nodes for unresolved references
//!     │      └─ Shared-contact edges between saved entities
//!     │
//!     ├──> RelationshipGraph (petgraph, undirected)
//!     │      ├─ Nodes: Tracked | External
//!     │      └─ Edges: one per pair, labelled by the first justifying contact
//!     │
//!     └──> GroupAnalysis
//!            ├─ Memoized master graph (input fingerprint)
//!            ├─ Focus: entity | contact
//!            └─ Display state: ego network + layout, or an empty state
//! ```

mod builder;
mod config;
mod ego;
mod error;
mod layout;
mod memo;
mod session;
mod types;

pub use builder::{build_master_graph, RelationshipGraphBuilder};
pub use config::{GraphConfig, LayoutConfig};
pub use ego::{build_ego_network, edge_highlighted, Focus};
pub use error::{GraphError, Result};
pub use layout::{circular_layout, NodePosition, Point};
pub use memo::{fingerprint, GraphMemo};
pub use session::{DisplayState, GroupAnalysis};
pub use types::{
    Contact, Edge, Entity, GraphNode, GraphSnapshot, LinkedCompanyReference, NodeKey,
    RelationshipGraph, RelationshipKind,
};
