use crate::error::{GraphError, Result};
use crate::types::*;
use std::collections::HashMap;

/// Resolves linked-company references to tracked entities
struct EntityResolver {
    by_cnpj: HashMap<String, NodeKey>,
    by_name: HashMap<String, NodeKey>,
}

impl EntityResolver {
    fn new(entities: &[Entity]) -> Self {
        let mut by_cnpj = HashMap::new();
        let mut by_name = HashMap::new();

        // First entity in input order wins both lookups
        for entity in entities {
            if let Some(cnpj) = entity.tax_id() {
                by_cnpj
                    .entry(cnpj.to_string())
                    .or_insert_with(|| entity.key());
            }
            by_name
                .entry(entity.name.clone())
                .or_insert_with(|| entity.key());
        }

        Self { by_cnpj, by_name }
    }

    /// Tax id match first, then exact name match
    fn resolve(&self, reference: &LinkedCompanyReference) -> Option<&NodeKey> {
        reference
            .tax_id()
            .and_then(|cnpj| self.by_cnpj.get(cnpj))
            .or_else(|| self.by_name.get(&reference.name))
    }
}

/// Build the company relationship graph from saved entities
#[derive(Debug, Default, Clone, Copy)]
pub struct RelationshipGraphBuilder;

impl RelationshipGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the full graph. Recomputed from scratch on every call.
    pub fn build(&self, entities: &[Entity]) -> Result<RelationshipGraph> {
        validate(entities)?;

        let mut graph = RelationshipGraph::new();

        // Phase 1: every saved entity is a tracked node
        for entity in entities {
            graph.add_node(GraphNode::Tracked {
                key: entity.key(),
                entity: entity.clone(),
            });
        }

        // Phase 2: edges from linked-company references
        let resolver = EntityResolver::new(entities);
        for entity in entities {
            let owner = entity.key();

            for contact in &entity.contacts {
                for reference in &contact.linked_companies {
                    let target = match resolver.resolve(reference) {
                        Some(key) => key.clone(),
                        None => {
                            let key = reference.key();
                            graph.add_node(GraphNode::External {
                                key: key.clone(),
                                reference: reference.clone(),
                            });
                            key
                        }
                    };

                    if target == owner {
                        log::debug!(
                            "Skipping self reference from {} via {}",
                            owner,
                            contact.name
                        );
                        continue;
                    }

                    graph.add_edge(Edge {
                        from: owner.clone(),
                        to: target,
                        contact: contact.name.clone(),
                        kind: RelationshipKind::LinkedCompany,
                    });
                }
            }
        }

        // Phase 3: edges from contacts shared by two saved entities
        for (i, a) in entities.iter().enumerate() {
            let a_key = a.key();
            for b in &entities[i + 1..] {
                let b_key = b.key();
                if a_key == b_key || graph.connected(&a_key, &b_key) {
                    continue;
                }

                if let Some(shared) = first_shared_contact(a, b) {
                    graph.add_edge(Edge {
                        from: a_key.clone(),
                        to: b_key,
                        contact: shared.to_string(),
                        kind: RelationshipKind::SharedContact,
                    });
                }
            }
        }

        log::info!(
            "Built relationship graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}

/// Build the master graph with the default builder
pub fn build_master_graph(entities: &[Entity]) -> Result<RelationshipGraph> {
    RelationshipGraphBuilder::new().build(entities)
}

/// First contact of `a` (in `a`'s order) whose name also appears on `b`
fn first_shared_contact<'a>(a: &'a Entity, b: &Entity) -> Option<&'a str> {
    a.contacts
        .iter()
        .find(|ca| b.contacts.iter().any(|cb| cb.name == ca.name))
        .map(|c| c.name.as_str())
}

fn validate(entities: &[Entity]) -> Result<()> {
    for (pos, entity) in entities.iter().enumerate() {
        if entity.name.is_empty() {
            return Err(GraphError::InvalidEntity(format!(
                "entity #{pos} has no name"
            )));
        }
        for contact in &entity.contacts {
            if contact.name.is_empty() {
                return Err(GraphError::InvalidEntity(format!(
                    "{} has a contact without a name",
                    entity.name
                )));
            }
            if contact.linked_companies.iter().any(|r| r.name.is_empty()) {
                return Err(GraphError::InvalidEntity(format!(
                    "contact {} of {} links a company without a name",
                    contact.name, entity.name
                )));
            }
        }
    }
    Ok(())
}
