//! # Memória Simbólica — Orquestração Sobre o Connector
//!
//! [`SymbolicMemory`] expressa operações de "memória" do host Wolf como
//! composições de nós, links e consultas:
//!
//! | Operação | Átomos criados | Tráfego |
//! |----------|----------------|---------|
//! | `store("physics", "mass=10")` | `Space_physics`, `mass=10`, herança dado → espaço | 3 comandos |
//! | `retrieve("physics", _)` | — | 1 consulta `GetLink` + 1 leitura |
//! | `record_evolution("A", "B", "t")` | `State_A`, `State_B`, `Operation_t`, avaliação | nós + 1 comando |
//!
//! As três operações acima **exigem conexão**: sem ela devolvem `false`,
//! `""` ou nada fazem, sem tocar o cache. As consultas de vizinhança e
//! padrões trabalham só sobre o espelho local.
//!
//! A interface **empresta** o [`Connector`]; não é dona dele.

use std::collections::BTreeSet;

use regex::Regex;

use crate::connector::Connector;
use crate::core::{GraphNode, LinkKind, NodeKind};

/// Prefixo do nó que representa um espaço simbólico.
pub const SPACE_PREFIX: &str = "Space_";
/// Prefixo dos nós de estado em `record_evolution`.
pub const STATE_PREFIX: &str = "State_";
/// Prefixo do predicado de operação em `record_evolution`.
pub const OPERATION_PREFIX: &str = "Operation_";

/// Operações de memória simbólica sobre um [`Connector`] emprestado.
pub struct SymbolicMemory<'a> {
    connector: &'a mut Connector,
}

impl<'a> SymbolicMemory<'a> {
    pub fn new(connector: &'a mut Connector) -> Self {
        Self { connector }
    }

    /// Armazena `data` no espaço `space`.
    ///
    /// Cria `Space_<space>`, o conceito `data` e a herança `data ⊆ Space_<space>`.
    /// Falhas de envio dentro dessas três etapas não são reportadas.
    pub fn store(&mut self, space: &str, data: &str) -> bool {
        if !self.connector.is_connected() {
            return false;
        }

        let space_node = self.connector.create_concept_node(&space_name(space));
        let data_node = self.connector.create_concept_node(data);
        self.connector.create_inheritance_link(data_node, space_node);

        tracing::info!(space, data, "Stored symbolic memory");
        true
    }

    /// Consulta o servidor pelos membros de `space`.
    ///
    /// `query` ainda não entra no template: a consulta sempre traz o
    /// espaço inteiro.
    pub fn retrieve(&mut self, space: &str, query: &str) -> String {
        if !self.connector.is_connected() {
            return String::new();
        }
        tracing::debug!(space, query, "retrieve: query não usada no template");
        self.connector.evaluate(&retrieve_query(space))
    }

    /// Registra a transição `before --[operation]--> after`.
    ///
    /// O link de avaliação `(Operation_<op>, State_<before>, State_<after>)`
    /// é enviado como um único comando.
    pub fn record_evolution(&mut self, before: &str, after: &str, operation: &str) {
        if !self.connector.is_connected() {
            return;
        }

        let before_node = self.connector.create_concept_node(&format!("{STATE_PREFIX}{before}"));
        let after_node = self.connector.create_concept_node(&format!("{STATE_PREFIX}{after}"));
        let operation_node = self
            .connector
            .create_predicate_node(&format!("{OPERATION_PREFIX}{operation}"));

        self.connector
            .create_evaluation_link(operation_node, vec![before_node, after_node]);

        tracing::info!(before, after, operation, "Recorded symbolic evolution");
    }

    /// Renderizações de host de nós e links locais que casam com `pattern`.
    ///
    /// `pattern` é uma regex; se não compilar, é tratado como texto literal.
    /// Resultado ordenado e sem repetições.
    pub fn find_patterns(&self, pattern: &str) -> Vec<String> {
        let re = match Regex::new(pattern).or_else(|_| Regex::new(&regex::escape(pattern))) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Padrão inválido");
                return Vec::new();
            }
        };

        let cache = self.connector.cache();
        let nodes = cache.nodes().map(|n| n.to_host());
        let links = cache.links().iter().map(|l| l.to_host());
        nodes
            .chain(links)
            .filter(|text| re.is_match(text))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Dados guardados em `space` via [`store`](SymbolicMemory::store),
    /// segundo o espelho local. Ordenados.
    pub fn space_members(&self, space: &str) -> Vec<String> {
        let space_node = GraphNode::new(NodeKind::Concept, space_name(space));
        let key = space_node.cache_key();
        self.connector
            .find_incoming_links(&space_node)
            .iter()
            .filter(|l| l.kind == LinkKind::Inheritance && l.children.len() == 2)
            .filter(|l| l.children[1].cache_key() == key)
            .map(|l| l.children[0].name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Conceitos a uma distância ≤ `distance_threshold` de `concept`,
    /// ordenados por nome. O próprio conceito fica de fora.
    pub fn memory_neighbors(&self, concept: &str, distance_threshold: f64) -> Vec<String> {
        let mut names: Vec<String> = self
            .connector
            .cache()
            .nodes()
            .filter(|n| n.kind == NodeKind::Concept && n.name != concept)
            .filter(|n| self.concept_distance(concept, &n.name) <= distance_threshold)
            .map(|n| n.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Distância de Jaccard entre as vizinhanças fechadas de dois conceitos.
    ///
    /// ```text
    /// d(a, b) = 1 − |N[a] ∩ N[b]| / |N[a] ∪ N[b]|
    /// N[x]    = {x} ∪ {nós que dividem algum link com x}
    /// ```
    ///
    /// Mesmo conceito → `0.0`. Conceito desconhecido → `1.0`.
    pub fn concept_distance(&self, concept1: &str, concept2: &str) -> f64 {
        if concept1 == concept2 {
            return 0.0;
        }
        let (Some(a), Some(b)) = (self.neighborhood(concept1), self.neighborhood(concept2)) else {
            return 1.0;
        };
        let shared = a.intersection(&b).count();
        let total = a.union(&b).count();
        1.0 - shared as f64 / total as f64
    }

    /// Chaves de cache da vizinhança fechada de um conceito.
    fn neighborhood(&self, concept: &str) -> Option<BTreeSet<String>> {
        let node = self.connector.cache().get_node(&NodeKind::Concept, concept)?;
        let key = node.cache_key();
        let mut set: BTreeSet<String> = self
            .connector
            .find_incoming_links(node)
            .iter()
            .flat_map(|l| l.children.iter().map(|c| c.cache_key()))
            .collect();
        set.insert(key);
        Some(set)
    }
}

fn space_name(space: &str) -> String {
    format!("{SPACE_PREFIX}{space}")
}

/// Template da consulta de `retrieve`.
pub fn retrieve_query(space: &str) -> String {
    format!(
        "(cog-execute! (GetLink (InheritanceLink (VariableNode \"$x\") (ConceptNode \"{SPACE_PREFIX}{space}\"))))"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::tests::{connected, FakeCogServer};

    // ─── desconectado ──────────────────────────────────────────

    #[test]
    fn store_requires_connection() {
        let mut connector = Connector::default();
        let stored = SymbolicMemory::new(&mut connector).store("physics", "mass=10");
        assert!(!stored);
        assert!(connector.find_nodes_by_name("mass=10").is_empty());
        assert!(connector.find_nodes_by_name("Space_physics").is_empty());
    }

    #[test]
    fn disconnected_operations_return_sentinels() {
        let mut connector = Connector::default();
        let mut memory = SymbolicMemory::new(&mut connector);
        assert_eq!(memory.retrieve("physics", "mass"), "");
        memory.record_evolution("A", "B", "transform");
        assert_eq!(connector.count_nodes(), 0);
        assert_eq!(connector.count_links(), 0);
    }

    // ─── conectado ─────────────────────────────────────────────

    #[test]
    fn store_sends_space_data_and_membership() {
        let server = FakeCogServer::start(None);
        let mut connector = connected(&server);

        let mut memory = SymbolicMemory::new(&mut connector);
        assert!(memory.store("physics", "mass=10"));
        assert_eq!(memory.space_members("physics"), vec!["mass=10".to_string()]);

        let lines = server.finish(connector);
        assert_eq!(
            lines,
            vec![
                "(ConceptNode \"Space_physics\")".to_string(),
                "(ConceptNode \"mass=10\")".to_string(),
                "(InheritanceLink (ConceptNode \"mass=10\") (ConceptNode \"Space_physics\"))"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn retrieve_sends_get_link_query() {
        let server = FakeCogServer::start(Some("(SetLink)\n"));
        let mut connector = connected(&server);

        let reply = SymbolicMemory::new(&mut connector).retrieve("physics", "ignored");
        assert_eq!(reply, "(SetLink)\n");

        let lines = server.finish(connector);
        assert_eq!(lines, vec![retrieve_query("physics")]);
        assert!(lines[0].contains("(ConceptNode \"Space_physics\")"));
    }

    #[test]
    fn record_evolution_sends_one_evaluation_command() {
        let server = FakeCogServer::start(None);
        let mut connector = connected(&server);

        SymbolicMemory::new(&mut connector).record_evolution("A", "B", "transform");
        assert_eq!(connector.count_links(), 1);

        let lines = server.finish(connector);
        let evaluations: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("(EvaluationLink"))
            .collect();
        assert_eq!(evaluations.len(), 1);
        let command = evaluations[0];
        assert!(command.contains("State_A"));
        assert!(command.contains("State_B"));
        assert!(command.contains("Operation_transform"));
        assert_eq!(
            command.as_str(),
            "(EvaluationLink (PredicateNode \"Operation_transform\") (ConceptNode \"State_A\") (ConceptNode \"State_B\"))"
        );
    }

    // ─── consultas locais ──────────────────────────────────────

    fn animals() -> Connector {
        let mut connector = Connector::default();
        let cat = connector.create_concept_node("Cat");
        let dog = connector.create_concept_node("Dog");
        let animal = connector.create_concept_node("Animal");
        connector.create_concept_node("Rock");
        connector.create_inheritance_link(cat, animal.clone());
        connector.create_inheritance_link(dog, animal);
        connector
    }

    #[test]
    fn find_patterns_matches_nodes_and_links() {
        let mut connector = animals();
        let memory = SymbolicMemory::new(&mut connector);

        assert_eq!(
            memory.find_patterns("⊆ Animal$"),
            vec!["Cat ⊆ Animal".to_string(), "Dog ⊆ Animal".to_string()]
        );
        assert_eq!(memory.find_patterns("^Rock$"), vec!["Rock".to_string()]);
        // regex inválida vira literal
        assert!(memory.find_patterns("(").is_empty());
    }

    #[test]
    fn concept_distance_uses_shared_neighbors() {
        let mut connector = animals();
        let memory = SymbolicMemory::new(&mut connector);

        assert_eq!(memory.concept_distance("Cat", "Cat"), 0.0);
        assert!((memory.concept_distance("Cat", "Dog") - 2.0 / 3.0).abs() < 1e-9);
        assert!((memory.concept_distance("Cat", "Animal") - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(memory.concept_distance("Cat", "Rock"), 1.0);
        assert_eq!(memory.concept_distance("Cat", "Unicorn"), 1.0);
    }

    #[test]
    fn memory_neighbors_respects_threshold() {
        let mut connector = animals();
        let memory = SymbolicMemory::new(&mut connector);

        assert_eq!(memory.memory_neighbors("Cat", 0.5), vec!["Animal".to_string()]);
        assert_eq!(
            memory.memory_neighbors("Cat", 0.7),
            vec!["Animal".to_string(), "Dog".to_string()]
        );
        assert!(memory.memory_neighbors("Unicorn", 0.9).is_empty());
    }
}
