use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of a graph node.
///
/// Tracked entities are keyed by record id, then tax id, then name.
/// External references are keyed by tax id, then name. Comparison is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Saved company (a tracked prospect)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Record id assigned when the prospect was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Legal name
    pub name: String,

    /// Tax id (CNPJ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_employees: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products_or_services: Vec<String>,

    /// Known people (partners, executives)
    #[serde(default, alias = "partners")]
    pub contacts: Vec<Contact>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_cnpj(mut self, cnpj: impl Into<String>) -> Self {
        self.cnpj = Some(cnpj.into());
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.push(contact);
        self
    }

    /// Node identity of this entity
    pub fn key(&self) -> NodeKey {
        let key = non_empty(&self.id)
            .or_else(|| self.tax_id())
            .unwrap_or(&self.name);
        NodeKey::new(key)
    }

    /// Tax id, if one is actually filled in
    pub fn tax_id(&self) -> Option<&str> {
        non_empty(&self.cnpj)
    }

    /// Name shown on the diagram (trade name wins over legal name)
    pub fn display_name(&self) -> &str {
        self.trade_name.as_deref().unwrap_or(&self.name)
    }
}

/// Person associated with an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,

    /// Role or title
    #[serde(default)]
    pub qualification: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,

    /// Other companies this person is associated with
    #[serde(default)]
    pub linked_companies: Vec<LinkedCompanyReference>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = qualification.into();
        self
    }

    pub fn linked_to(mut self, reference: LinkedCompanyReference) -> Self {
        self.linked_companies.push(reference);
        self
    }
}

/// Weak pointer to another company, known only by name and maybe tax id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedCompanyReference {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,

    /// The contact's role in that company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl LinkedCompanyReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_cnpj(mut self, cnpj: impl Into<String>) -> Self {
        self.cnpj = Some(cnpj.into());
        self
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.tax_id().unwrap_or(&self.name))
    }

    pub fn tax_id(&self) -> Option<&str> {
        non_empty(&self.cnpj)
    }
}

/// Blank identifiers count as missing
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Vertex of the relationship graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphNode {
    /// Saved entity with full data
    Tracked { key: NodeKey, entity: Entity },

    /// Company only known through a contact's reference
    External {
        key: NodeKey,
        reference: LinkedCompanyReference,
    },
}

impl GraphNode {
    pub fn key(&self) -> &NodeKey {
        match self {
            GraphNode::Tracked { key, .. } | GraphNode::External { key, .. } => key,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, GraphNode::Tracked { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            GraphNode::Tracked { entity, .. } => &entity.name,
            GraphNode::External { reference, .. } => &reference.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GraphNode::Tracked { entity, .. } => entity.display_name(),
            GraphNode::External { reference, .. } => &reference.name,
        }
    }

    pub fn cnpj(&self) -> Option<&str> {
        match self {
            GraphNode::Tracked { entity, .. } => entity.tax_id(),
            GraphNode::External { reference, .. } => reference.tax_id(),
        }
    }

    pub fn entity(&self) -> Option<&Entity> {
        match self {
            GraphNode::Tracked { entity, .. } => Some(entity),
            GraphNode::External { .. } => None,
        }
    }
}

/// How a relationship was inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// A contact of `from` lists `to` among their linked companies
    LinkedCompany,

    /// `from` and `to` share a contact with the same name
    SharedContact,
}

/// Undirected relationship between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeKey,
    pub to: NodeKey,

    /// Name of the contact that justifies the connection
    pub contact: String,

    pub kind: RelationshipKind,
}

impl Edge {
    pub fn touches(&self, key: &NodeKey) -> bool {
        &self.from == key || &self.to == key
    }

    /// Same endpoints regardless of direction
    pub fn joins(&self, a: &NodeKey, b: &NodeKey) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// Flat node and edge lists handed to the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.iter().any(|node| node.key() == key)
    }
}

/// Company relationship graph
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    /// Undirected graph, one edge per connected pair
    pub graph: UnGraph<GraphNode, Edge>,

    /// Node key -> NodeIndex mapping for fast lookup
    pub key_index: HashMap<NodeKey, NodeIndex>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add node unless one with the same key exists; returns the node's index
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.key_index.get(node.key()) {
            return idx;
        }

        let key = node.key().clone();
        let idx = self.graph.add_node(node);
        self.key_index.insert(key, idx);
        idx
    }

    /// Add edge unless the pair is already connected. Returns true when added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (Some(&from), Some(&to)) =
            (self.key_index.get(&edge.from), self.key_index.get(&edge.to))
        else {
            return false;
        };

        if self.graph.find_edge(from, to).is_some() {
            return false;
        }

        self.graph.add_edge(from, to, edge);
        true
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.key_index.contains_key(key)
    }

    pub fn find_node(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.key_index.get(key).copied()
    }

    pub fn get_node(&self, key: &NodeKey) -> Option<&GraphNode> {
        self.find_node(key).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn connected(&self, a: &NodeKey, b: &NodeKey) -> bool {
        match (self.find_node(a), self.find_node(b)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_references().map(|edge| edge.weight())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_key_prefers_id_then_cnpj_then_name() {
        let entity = Entity::new("Acme");
        assert_eq!(entity.key(), NodeKey::from("Acme"));

        let entity = entity.with_cnpj("11.222.333/0001-44");
        assert_eq!(entity.key(), NodeKey::from("11.222.333/0001-44"));

        let entity = entity.with_id("p-1");
        assert_eq!(entity.key(), NodeKey::from("p-1"));
    }

    #[test]
    fn reference_key_prefers_cnpj() {
        let reference = LinkedCompanyReference::new("Initech");
        assert_eq!(reference.key(), NodeKey::from("Initech"));
        assert_eq!(reference.with_cnpj("99").key(), NodeKey::from("99"));
    }

    #[test]
    fn blank_identifiers_fall_back_to_name() {
        let mut entity = Entity::new("Acme").with_cnpj("");
        assert_eq!(entity.key(), NodeKey::from("Acme"));
        assert_eq!(entity.tax_id(), None);

        entity.id = Some(String::new());
        assert_eq!(entity.key(), NodeKey::from("Acme"));

        let reference = LinkedCompanyReference::new("Initech").with_cnpj("");
        assert_eq!(reference.key(), NodeKey::from("Initech"));
    }

    #[test]
    fn add_node_is_noop_for_existing_key() {
        let mut graph = RelationshipGraph::new();
        let first = graph.add_node(GraphNode::Tracked {
            key: "A".into(),
            entity: Entity::new("Acme").with_id("A"),
        });
        let second = graph.add_node(GraphNode::External {
            key: "A".into(),
            reference: LinkedCompanyReference::new("A"),
        });

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.get_node(&"A".into()).is_some_and(GraphNode::is_saved));
    }

    #[test]
    fn add_edge_rejects_parallel_and_dangling_edges() {
        let mut graph = RelationshipGraph::new();
        for key in ["A", "B"] {
            graph.add_node(GraphNode::Tracked {
                key: key.into(),
                entity: Entity::new(key).with_id(key),
            });
        }

        let edge = |from: &str, to: &str, contact: &str| Edge {
            from: from.into(),
            to: to.into(),
            contact: contact.to_string(),
            kind: RelationshipKind::SharedContact,
        };

        assert!(graph.add_edge(edge("A", "B", "Jane")));
        assert!(!graph.add_edge(edge("B", "A", "John")));
        assert!(!graph.add_edge(edge("A", "Z", "Jane")));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().next().map(|e| e.contact.as_str()), Some("Jane"));
    }

    #[test]
    fn entity_deserializes_partners_alias() {
        let entity: Entity = serde_json::from_str(
            r#"{"id":"1","name":"Acme","partners":[{"name":"Jane","qualification":"CEO"}]}"#,
        )
        .unwrap();
        assert_eq!(entity.contacts.len(), 1);
        assert_eq!(entity.contacts[0].qualification, "CEO");
    }
}
