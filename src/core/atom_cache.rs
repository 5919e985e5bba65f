//! # AtomCache — Espelho Local dos Átomos Criados
//!
//! O [`AtomCache`] guarda tudo o que a ponte já criou, com dois papéis:
//!
//! - **Deduplicação de nós**: chave sintética `<WireKind>_<name>` →
//!   [`NodeHandle`]. Um mesmo `(kind, name)` é sempre o mesmo objeto.
//! - **Registro de links**: arena `Vec<LinkHandle>` em ordem de criação,
//!   sem deduplicação, com um índice reverso chave-do-nó → posições na arena
//!   e um índice id → posição.
//!
//! ## Sem Despejo
//!
//! Nada é removido durante a vida do cache. O crescimento ilimitado é uma
//! propriedade aceita desta camada.
//!
//! ## Armazenamento
//!
//! ```text
//! nodes:      "ConceptNode_Cat" → Arc<GraphNode>
//! links:      [0] InheritanceLink(Cat, Animal), [1] ...
//! node_links: "ConceptNode_Cat" → [0]
//! link_index: 6f1c…    → 0
//! ```

use std::collections::HashMap;

use super::link::{LinkHandle, LinkId};
use super::node::{cache_key, NodeHandle, NodeKind};

/// Cache de nós deduplicados e links retidos.
#[derive(Default)]
pub struct AtomCache {
    nodes: HashMap<String, NodeHandle>,
    links: Vec<LinkHandle>,
    /// Índice reverso: chave do nó → posições em `links`.
    node_links: HashMap<String, Vec<usize>>,
    /// id do link → posição em `links`.
    link_index: HashMap<LinkId, usize>,
}

impl AtomCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Busca um nó por `(kind, name)`.
    pub fn get_node(&self, kind: &NodeKind, name: &str) -> Option<&NodeHandle> {
        self.nodes.get(&cache_key(kind, name))
    }

    /// Insere um nó se a chave ainda não existe e devolve o handle que ficou
    /// no cache — o já existente, se houver.
    pub fn insert_node(&mut self, node: NodeHandle) -> NodeHandle {
        let key = node.cache_key();
        self.nodes
            .entry(key)
            .or_insert_with(|| {
                tracing::debug!(kind = %node.kind, name = %node.name, "Cache: nó armazenado");
                node
            })
            .clone()
    }

    /// Registra um link na arena e atualiza os índices.
    ///
    /// Um id já registrado é ignorado e devolve `false`.
    pub fn insert_link(&mut self, link: LinkHandle) -> bool {
        if self.link_index.contains_key(&link.id) {
            return false;
        }
        let index = self.links.len();
        tracing::debug!(id = %link.id, kind = %link.kind, "Cache: link armazenado");
        for child in &link.children {
            let positions = self.node_links.entry(child.cache_key()).or_default();
            // um nó repetido no mesmo link conta uma vez
            if positions.last() != Some(&index) {
                positions.push(index);
            }
        }
        self.link_index.insert(link.id, index);
        self.links.push(link);
        true
    }

    /// Todos os nós com o nome informado, de qualquer tipo, ordenados pela
    /// chave de cache.
    pub fn find_nodes_by_name(&self, name: &str) -> Vec<NodeHandle> {
        let mut found: Vec<(&String, &NodeHandle)> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.name == name)
            .collect();
        found.sort_by(|a, b| a.0.cmp(b.0));
        found.into_iter().map(|(_, node)| node.clone()).collect()
    }

    /// Links que referenciam o nó, em ordem de criação.
    pub fn incoming_links(&self, node_key: &str) -> Vec<LinkHandle> {
        self.node_links
            .get(node_key)
            .map(|positions| positions.iter().map(|&i| self.links[i].clone()).collect())
            .unwrap_or_default()
    }

    /// Busca um link pelo id.
    pub fn get_link(&self, id: LinkId) -> Option<&LinkHandle> {
        self.link_index.get(&id).map(|&i| &self.links[i])
    }

    /// Iterador sobre os nós (ordem arbitrária).
    pub fn nodes(&self) -> impl Iterator<Item = &NodeHandle> {
        self.nodes.values()
    }

    /// Links em ordem de criação.
    pub fn links(&self) -> &[LinkHandle] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::{GraphLink, GraphNode, LinkKind};

    fn concept(name: &str) -> NodeHandle {
        Arc::new(GraphNode::new(NodeKind::Concept, name))
    }

    #[test]
    fn insert_node_keeps_first_handle() {
        let mut cache = AtomCache::new();
        let first = cache.insert_node(concept("Cat"));
        let second = cache.insert_node(concept("Cat"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.node_count(), 1);
    }

    #[test]
    fn same_name_different_kind_are_distinct() {
        let mut cache = AtomCache::new();
        cache.insert_node(concept("x"));
        cache.insert_node(Arc::new(GraphNode::new(NodeKind::Predicate, "x")));
        assert_eq!(cache.node_count(), 2);

        let found = cache.find_nodes_by_name("x");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, NodeKind::Concept);
        assert_eq!(found[1].kind, NodeKind::Predicate);
    }

    #[test]
    fn links_are_indexed_by_child() {
        let mut cache = AtomCache::new();
        let cat = cache.insert_node(concept("Cat"));
        let animal = cache.insert_node(concept("Animal"));
        let pet = cache.insert_node(concept("Pet"));

        let l1 = Arc::new(GraphLink::new(LinkKind::Inheritance, vec![cat.clone(), animal.clone()]).unwrap());
        let l2 = Arc::new(GraphLink::new(LinkKind::Inheritance, vec![cat.clone(), pet]).unwrap());
        assert!(cache.insert_link(l1.clone()));
        assert!(cache.insert_link(l2.clone()));

        let incoming = cache.incoming_links(&cat.cache_key());
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming[0].id, l1.id);
        assert_eq!(incoming[1].id, l2.id);
        assert_eq!(cache.incoming_links(&animal.cache_key()).len(), 1);
        assert!(cache.incoming_links("ConceptNode_Dog").is_empty());
        assert!(cache.get_link(l2.id).is_some());
        assert_eq!(cache.link_count(), 2);
    }

    #[test]
    fn repeated_child_indexed_once() {
        let mut cache = AtomCache::new();
        let a = cache.insert_node(concept("A"));
        let link = GraphLink::new(LinkKind::Other("ListLink".into()), vec![a.clone(), a.clone()]).unwrap();
        cache.insert_link(Arc::new(link));
        assert_eq!(cache.incoming_links(&a.cache_key()).len(), 1);
    }

    #[test]
    fn link_lookup_by_id_and_duplicate_id() {
        let mut cache = AtomCache::new();
        let a = cache.insert_node(concept("A"));
        let b = cache.insert_node(concept("B"));

        let links: Vec<LinkHandle> = (0..100)
            .map(|_| Arc::new(GraphLink::new(LinkKind::Inheritance, vec![a.clone(), b.clone()]).unwrap()))
            .collect();
        for link in &links {
            cache.insert_link(link.clone());
        }

        for link in &links {
            let found = cache.get_link(link.id).unwrap();
            assert!(Arc::ptr_eq(found, link));
        }
        assert!(cache.get_link(uuid::Uuid::new_v4()).is_none());

        // mesmo id não entra duas vezes
        assert!(!cache.insert_link(links[7].clone()));
        assert_eq!(cache.link_count(), 100);
        assert_eq!(cache.incoming_links(&a.cache_key()).len(), 100);
    }
}
