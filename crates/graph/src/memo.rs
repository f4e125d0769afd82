use crate::builder::RelationshipGraphBuilder;
use crate::error::Result;
use crate::types::{Entity, RelationshipGraph};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Structural fingerprint of an entity collection
pub fn fingerprint(entities: &[Entity]) -> Result<[u8; 32]> {
    let bytes = serde_json::to_vec(entities)?;
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(&bytes));
    Ok(digest)
}

/// Keeps the last master graph and rebuilds only when the input changes
#[derive(Debug, Default)]
pub struct GraphMemo {
    builder: RelationshipGraphBuilder,
    cached: Option<([u8; 32], Arc<RelationshipGraph>)>,
    builds: usize,
}

impl GraphMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, entities: &[Entity]) -> Result<Arc<RelationshipGraph>> {
        let digest = fingerprint(entities)?;

        if let Some((cached_digest, graph)) = &self.cached {
            if *cached_digest == digest {
                log::debug!("Relationship graph unchanged, reusing cached build");
                return Ok(Arc::clone(graph));
            }
        }

        let graph = Arc::new(self.builder.build(entities)?);
        self.cached = Some((digest, Arc::clone(&graph)));
        self.builds += 1;
        Ok(graph)
    }

    /// Last built graph, if any
    pub fn current(&self) -> Option<Arc<RelationshipGraph>> {
        self.cached.as_ref().map(|(_, graph)| Arc::clone(graph))
    }

    /// Number of full rebuilds performed so far
    pub fn builds(&self) -> usize {
        self.builds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Contact;

    #[test]
    fn rebuilds_only_on_change() {
        let mut memo = GraphMemo::new();
        let mut entities = vec![
            Entity::new("Acme").with_contact(Contact::new("Jane")),
            Entity::new("Globex"),
        ];

        let first = memo.get_or_build(&entities).unwrap();
        let second = memo.get_or_build(&entities.clone()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.builds(), 1);

        entities[1].contacts.push(Contact::new("Jane"));
        let third = memo.get_or_build(&entities).unwrap();
        assert_eq!(memo.builds(), 2);
        assert_eq!(third.edge_count(), 1);
        assert_eq!(first.edge_count(), 0);
    }

    #[test]
    fn fingerprint_tracks_order() {
        let a = vec![Entity::new("Acme"), Entity::new("Globex")];
        let b = vec![Entity::new("Globex"), Entity::new("Acme")];
        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }
}
