use crate::config::LayoutConfig;
use crate::ego::{edge_highlighted, Focus};
use crate::error::{GraphError, Result};
use crate::layout::{circular_layout, NodePosition};
use crate::memo::GraphMemo;
use crate::types::{Contact, Entity, GraphNode, GraphSnapshot, NodeKey, RelationshipGraph};
use serde::Serialize;
use std::sync::Arc;

/// What the group-analysis view should render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    /// No saved entities at all
    NoData,

    /// Entities exist but nothing is focused
    NoSelection,

    /// The focus has nothing connected to it
    NoConnections { focus: Focus },

    Graph {
        focus: Focus,
        graph: GraphSnapshot,
        positions: Vec<NodePosition>,
        /// Nodes faded out by the hovered contact
        dimmed_nodes: Vec<NodeKey>,
        /// Indices into `graph.edges` faded out by the hovered contact
        dimmed_edges: Vec<usize>,
    },
}

impl DisplayState {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DisplayState::NoData => Some("Save a prospect to start the analysis."),
            DisplayState::NoSelection => Some("Select a company to see its connections."),
            DisplayState::NoConnections { focus } if focus.is_contact() => {
                Some("No connections found for this contact.")
            }
            DisplayState::NoConnections { .. } => {
                Some("No connections found for this company.")
            }
            DisplayState::Graph { .. } => None,
        }
    }
}

/// Focus state of the group-analysis view over a changing entity collection
#[derive(Debug, Default)]
pub struct GroupAnalysis {
    memo: GraphMemo,
    layout: LayoutConfig,
    first_entity: Option<NodeKey>,
    focal_entity: Option<NodeKey>,
    focal_contact: Option<String>,
    selected: Option<NodeKey>,
    hovered_contact: Option<String>,
}

impl GroupAnalysis {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Refresh the graph for a new entity snapshot and repair focus state
    pub fn sync(&mut self, entities: &[Entity]) -> Result<()> {
        let graph = self.memo.get_or_build(entities)?;
        self.first_entity = entities.first().map(Entity::key);

        let Some(first) = self.first_entity.clone() else {
            log::debug!("No saved entities, clearing focus");
            self.focal_entity = None;
            self.focal_contact = None;
            self.selected = None;
            self.hovered_contact = None;
            return Ok(());
        };

        let focal_alive = self
            .focal_entity
            .as_ref()
            .is_some_and(|key| is_tracked(&graph, key));
        if !focal_alive {
            if let Some(previous) = &self.focal_entity {
                log::debug!("Focal entity {previous} disappeared, falling back to {first}");
            }
            self.focal_entity = Some(first.clone());
            self.focal_contact = None;
            self.selected = Some(first);
        } else if !self.selected.as_ref().is_some_and(|key| graph.contains(key)) {
            self.selected = self.focal_entity.clone();
        }

        Ok(())
    }

    /// Center the view on a saved entity; drops any contact focus
    pub fn focus_entity(&mut self, key: &NodeKey) -> Result<()> {
        let graph = self.graph()?;
        if !is_tracked(&graph, key) {
            return Err(GraphError::NodeNotFound(key.to_string()));
        }

        self.focal_entity = Some(key.clone());
        self.focal_contact = None;
        self.selected = Some(key.clone());
        Ok(())
    }

    /// Focus a contact, or return to entity focus when it is already focused
    pub fn toggle_contact(&mut self, name: &str) {
        if self.focal_contact.as_deref() == Some(name) {
            self.focal_contact = None;
        } else {
            self.focal_contact = Some(name.to_string());
        }
    }

    pub fn back(&mut self) {
        self.focal_contact = None;
    }

    pub fn select_node(&mut self, key: &NodeKey) -> Result<()> {
        let graph = self.graph()?;
        if !graph.contains(key) {
            return Err(GraphError::NodeNotFound(key.to_string()));
        }
        self.selected = Some(key.clone());
        Ok(())
    }

    pub fn hover_contact(&mut self, name: Option<&str>) {
        self.hovered_contact = name.map(str::to_string);
    }

    pub fn focal_entity(&self) -> Option<&NodeKey> {
        self.focal_entity.as_ref()
    }

    pub fn focal_contact(&self) -> Option<&str> {
        self.focal_contact.as_deref()
    }

    /// Active focus; a focal contact overrides the focal entity
    pub fn focus(&self) -> Option<Focus> {
        match (&self.focal_contact, &self.focal_entity) {
            (Some(name), Some(_)) => Some(Focus::Contact(name.clone())),
            (None, Some(key)) => Some(Focus::Entity(key.clone())),
            (_, None) => None,
        }
    }

    pub fn selected_node(&self) -> Option<GraphNode> {
        let graph = self.memo.current()?;
        let key = self.selected.as_ref()?;
        graph.get_node(key).cloned()
    }

    /// Contacts listed for the selected node (empty for external companies)
    pub fn contacts_of_selected(&self) -> Vec<Contact> {
        match (self.memo.current(), &self.selected) {
            (Some(graph), Some(key)) => graph.contacts_of(key).to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn display(&self) -> DisplayState {
        let Some(graph) = self.memo.current().filter(|g| !g.is_empty()) else {
            return DisplayState::NoData;
        };
        let Some(focus) = self.focus() else {
            return DisplayState::NoSelection;
        };

        let ego = graph.ego_network(&focus);
        let isolated = !focus.is_contact() && ego.nodes.len() == 1;
        if ego.nodes.is_empty() || isolated {
            return DisplayState::NoConnections { focus };
        }

        let hovered = self.hovered_contact.as_deref();
        let dimmed_nodes = ego
            .nodes
            .iter()
            .map(GraphNode::key)
            .filter(|key| !graph.node_highlighted(key, hovered))
            .cloned()
            .collect();
        let dimmed_edges = ego
            .edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| !edge_highlighted(edge, hovered))
            .map(|(i, _)| i)
            .collect();
        let positions = circular_layout(&ego, &focus, &self.layout);

        DisplayState::Graph {
            focus,
            graph: ego,
            positions,
            dimmed_nodes,
            dimmed_edges,
        }
    }

    fn graph(&self) -> Result<Arc<RelationshipGraph>> {
        self.memo
            .current()
            .ok_or_else(|| GraphError::NodeNotFound("no entities loaded".to_string()))
    }
}

fn is_tracked(graph: &RelationshipGraph, key: &NodeKey) -> bool {
    graph.get_node(key).is_some_and(GraphNode::is_saved)
}
