//! # GraphNode — Vértice Rotulado do AtomSpace
//!
//! Um [`GraphNode`] é a menor unidade do grafo: um **tipo** ([`NodeKind`])
//! e um **nome**. O par `(kind, name)` é a identidade do nó — duas
//! requisições com o mesmo par devolvem o mesmo handle compartilhado
//! (ver [`AtomCache`](super::AtomCache)).
//!
//! ## Duas Notações
//!
//! | Tipo | Wire (`to_wire`) | Host (`to_host`) |
//! |------|------------------|------------------|
//! | `Concept` | `(ConceptNode "Cat")` | `Cat` |
//! | `Predicate` | `(PredicateNode "likes")` | `likes()` |
//! | `Number` | `(NumberNode "3.000000")` | `3.000000` |
//! | `Other` | `(<tipo> "x")` | `x` |
//!
//! Nenhum escape é aplicado ao nome: quem chama evita aspas embutidas.
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_bridge::core::{GraphNode, NodeKind};
//!
//! let gato = GraphNode::new(NodeKind::Concept, "Cat");
//! assert_eq!(gato.to_wire(), r#"(ConceptNode "Cat")"#);
//! assert_eq!(gato.to_host(), "Cat");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::TruthValue;

/// Handle compartilhado de um nó. O dono é o cache; links e chamadores
/// apenas compartilham a leitura.
pub type NodeHandle = Arc<GraphNode>;

/// Tipo de um nó do AtomSpace.
///
/// Conjunto fechado com uma válvula de escape (`Other`) para tipos que o
/// servidor conhece e a ponte não trata de forma especial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// `ConceptNode` — conceitos e valores simbólicos.
    Concept,
    /// `PredicateNode` — operadores e relações nomeadas.
    Predicate,
    /// `NumberNode` — literais numéricos.
    Number,
    /// Qualquer outro tipo, com o nome de wire literal (ex: `"SchemaNode"`).
    Other(String),
}

impl NodeKind {
    /// Nome do tipo no protocolo do CogServer.
    pub fn wire_name(&self) -> &str {
        match self {
            NodeKind::Concept => "ConceptNode",
            NodeKind::Predicate => "PredicateNode",
            NodeKind::Number => "NumberNode",
            NodeKind::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Vértice rotulado do grafo de conhecimento.
///
/// Imutável após a construção: os truth values são carregados, nunca
/// recalculados.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Tipo do nó.
    pub kind: NodeKind,
    /// Identidade do nó dentro do seu tipo.
    pub name: String,
    /// Grau de verdade — padrão `⟨1.00, 1.00⟩`.
    pub truth: TruthValue,
}

impl GraphNode {
    /// Cria um nó com o truth value padrão.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self::with_truth(kind, name, TruthValue::default())
    }

    pub fn with_truth(kind: NodeKind, name: impl Into<String>, truth: TruthValue) -> Self {
        Self {
            kind,
            name: name.into(),
            truth,
        }
    }

    /// Chave sintética do cache: `<WireKind>_<name>` (ex: `ConceptNode_Cat`).
    pub fn cache_key(&self) -> String {
        cache_key(&self.kind, &self.name)
    }

    /// Renderiza em notação de wire: `(<WireKind> "<name>")`.
    pub fn to_wire(&self) -> String {
        format!("({} \"{}\")", self.kind.wire_name(), self.name)
    }

    /// Projeção para a notação do host.
    ///
    /// Predicados ganham `()` para se lerem como operadores; os demais tipos
    /// projetam para o nome puro.
    pub fn to_host(&self) -> String {
        match &self.kind {
            NodeKind::Predicate => format!("{}()", self.name),
            NodeKind::Concept | NodeKind::Number | NodeKind::Other(_) => self.name.clone(),
        }
    }
}

/// Monta a chave de cache sem precisar construir o nó.
pub fn cache_key(kind: &NodeKind, name: &str) -> String {
    format!("{}_{}", kind.wire_name(), name)
}
