use crate::types::{Contact, Edge, GraphNode, GraphSnapshot, NodeKey, RelationshipGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Center of the displayed subgraph. The two modes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Focus {
    /// Everything directly connected to one company
    Entity(NodeKey),

    /// Every connection justified by one person
    Contact(String),
}

impl Focus {
    pub fn focal_key(&self) -> Option<&NodeKey> {
        match self {
            Focus::Entity(key) => Some(key),
            Focus::Contact(_) => None,
        }
    }

    pub fn is_contact(&self) -> bool {
        matches!(self, Focus::Contact(_))
    }
}

impl RelationshipGraph {
    /// Project the ego network around `focus`.
    ///
    /// Nodes and edges keep master-graph order. An empty result is the valid
    /// "no connections" state: unknown focal entities and contacts that justify
    /// no edge both land there.
    pub fn ego_network(&self, focus: &Focus) -> GraphSnapshot {
        let edges: Vec<Edge> = match focus {
            Focus::Contact(name) => self
                .edges()
                .filter(|edge| &edge.contact == name)
                .cloned()
                .collect(),
            Focus::Entity(key) => {
                if !self.contains(key) {
                    return GraphSnapshot::default();
                }
                self.edges().filter(|edge| edge.touches(key)).cloned().collect()
            }
        };

        let nodes = {
            let mut members: HashSet<&NodeKey> = edges
                .iter()
                .flat_map(|edge| [&edge.from, &edge.to])
                .collect();
            if let Focus::Entity(key) = focus {
                members.insert(key);
            }

            self.nodes()
                .filter(|node| members.contains(node.key()))
                .cloned()
                .collect()
        };

        GraphSnapshot { nodes, edges }
    }

    /// Whether `key` stays lit while `hovered` contact is highlighted
    pub fn node_highlighted(&self, key: &NodeKey, hovered: Option<&str>) -> bool {
        match hovered {
            None => true,
            Some(name) => self
                .edges()
                .any(|edge| edge.touches(key) && edge.contact == name),
        }
    }

    /// Contacts of a tracked node; external nodes have none on record
    pub fn contacts_of(&self, key: &NodeKey) -> &[Contact] {
        self.get_node(key)
            .and_then(GraphNode::entity)
            .map(|entity| entity.contacts.as_slice())
            .unwrap_or_default()
    }
}

/// Ego network around `focus`
pub fn build_ego_network(master: &RelationshipGraph, focus: &Focus) -> GraphSnapshot {
    master.ego_network(focus)
}

/// Whether `edge` stays lit while `hovered` contact is highlighted
pub fn edge_highlighted(edge: &Edge, hovered: Option<&str>) -> bool {
    hovered.map_or(true, |name| edge.contact == name)
}
