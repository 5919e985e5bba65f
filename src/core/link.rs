//! # GraphLink — Relação Ordenada Entre Nós
//!
//! Um [`GraphLink`] liga uma **sequência ordenada** de nós sob um tipo de
//! relação ([`LinkKind`]). A ordem tem significado: numa herança, a posição
//! 0 é o conceito filho e a posição 1 o conceito pai.
//!
//! ## Tipos de Relação
//!
//! | Tipo | Wire | Host |
//! |------|------|------|
//! | `Inheritance` (2 filhos) | `(InheritanceLink A B)` | `A ⊆ B` |
//! | `Evaluation` (≥2 filhos) | `(EvaluationLink P X Y)` | `P(X, Y)` |
//! | qualquer outro caso | `(<tipo> A B ...)` | `<tipo>(A, B, ...)` |
//!
//! Em `Evaluation`, o primeiro filho é o predicado/operador e os demais
//! são os argumentos. Note que o predicado é renderizado com sua própria
//! projeção de host — um `PredicateNode "f"` vira `f()(x, y)`.
//!
//! ## Propriedade
//!
//! O link possui apenas sua lista de referências; os nós em si pertencem
//! ao [`AtomCache`](super::AtomCache) e são compartilhados via
//! [`NodeHandle`].
//!
//! ## Exemplo
//!
//! ```rust
//! use std::sync::Arc;
//! use atomspace_bridge::core::{GraphLink, GraphNode, LinkKind, NodeKind};
//!
//! let gato = Arc::new(GraphNode::new(NodeKind::Concept, "Cat"));
//! let animal = Arc::new(GraphNode::new(NodeKind::Concept, "Animal"));
//! let link = GraphLink::new(LinkKind::Inheritance, vec![gato, animal])?;
//!
//! assert_eq!(link.to_host(), "Cat ⊆ Animal");
//! assert_eq!(
//!     link.to_wire(),
//!     r#"(InheritanceLink (ConceptNode "Cat") (ConceptNode "Animal"))"#
//! );
//!
//! // link sem filhos não existe
//! assert!(GraphLink::new(LinkKind::Inheritance, vec![]).is_err());
//! # Ok::<(), atomspace_bridge::BridgeError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::NodeHandle;
use super::TruthValue;
use crate::error::{BridgeError, Result};

/// Identificador local de um link (UUID v4).
///
/// Links não são deduplicados, então a identidade vem do id e não do
/// conteúdo.
pub type LinkId = Uuid;

/// Handle compartilhado de um link.
pub type LinkHandle = Arc<GraphLink>;

/// Tipo de relação.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// `InheritanceLink` — "filho ⊆ pai".
    Inheritance,
    /// `EvaluationLink` — aplicação de predicado: `P(args...)`.
    Evaluation,
    /// Qualquer outro tipo, com o nome de wire literal (ex: `"ListLink"`).
    Other(String),
}

impl LinkKind {
    /// Nome do tipo no protocolo do CogServer.
    pub fn wire_name(&self) -> &str {
        match self {
            LinkKind::Inheritance => "InheritanceLink",
            LinkKind::Evaluation => "EvaluationLink",
            LinkKind::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Relação ordenada sobre nós do grafo.
///
/// Sempre tem ao menos um filho: os construtores públicos recusam listas
/// vazias com [`BridgeError::EmptyLink`].
#[derive(Clone, Debug)]
pub struct GraphLink {
    pub(crate) id: LinkId,
    pub(crate) kind: LinkKind,
    /// Filhos em ordem — a posição tem significado.
    pub(crate) children: Vec<NodeHandle>,
    pub(crate) truth: TruthValue,
}

impl GraphLink {
    /// Cria um link com truth value padrão e id novo.
    pub fn new(kind: LinkKind, children: Vec<NodeHandle>) -> Result<Self> {
        Self::with_truth(kind, children, TruthValue::default())
    }

    pub fn with_truth(kind: LinkKind, children: Vec<NodeHandle>, truth: TruthValue) -> Result<Self> {
        if children.is_empty() {
            return Err(BridgeError::EmptyLink);
        }
        Ok(Self::from_parts(Uuid::new_v4(), kind, children, truth))
    }

    /// Montagem sem validação; quem chama garante `children` não vazio.
    pub(crate) fn from_parts(
        id: LinkId,
        kind: LinkKind,
        children: Vec<NodeHandle>,
        truth: TruthValue,
    ) -> Self {
        debug_assert!(!children.is_empty());
        Self {
            id,
            kind,
            children,
            truth,
        }
    }

    /// Identificador local (UUID v4).
    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn kind(&self) -> &LinkKind {
        &self.kind
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Grau de verdade — padrão `⟨1.00, 1.00⟩`.
    pub fn truth(&self) -> TruthValue {
        self.truth
    }

    /// Renderiza em notação de wire: `(<WireKind> <c0> <c1> ...)`.
    ///
    /// Um único espaço entre elementos, nenhum espaço antes do `)`.
    pub fn to_wire(&self) -> String {
        let mut out = format!("({}", self.kind.wire_name());
        for child in &self.children {
            out.push(' ');
            out.push_str(&child.to_wire());
        }
        out.push(')');
        out
    }

    /// Projeção para a notação do host (ver tabela no topo do módulo).
    pub fn to_host(&self) -> String {
        match (&self.kind, self.children.as_slice()) {
            (LinkKind::Inheritance, [child, parent]) => {
                format!("{} ⊆ {}", child.to_host(), parent.to_host())
            }
            (LinkKind::Evaluation, [predicate, args @ ..]) if !args.is_empty() => {
                format!("{}({})", predicate.to_host(), join_host(args))
            }
            (kind, children) => format!("{}({})", kind.wire_name(), join_host(children)),
        }
    }
}

fn join_host(nodes: &[NodeHandle]) -> String {
    nodes
        .iter()
        .map(|n| n.to_host())
        .collect::<Vec<_>>()
        .join(", ")
}
