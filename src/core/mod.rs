//! # Módulo Core — Modelo de Elementos do Grafo
//!
//! Tipos de valor que espelham os átomos do AtomSpace:
//!
//! - [`TruthValue`] — par `(strength, confidence)` carregado por todo átomo
//! - [`GraphNode`] / [`NodeKind`] — vértice rotulado (`ConceptNode "Cat"`)
//! - [`GraphLink`] / [`LinkKind`] — relação ordenada sobre nós
//! - [`AtomCache`] — espelho local que deduplica nós e retém links
//!
//! Nada aqui faz I/O. A transmissão fica com o
//! [`Connector`](crate::connector::Connector).

pub mod truth_value;

pub mod node;

pub mod link;

pub mod atom_cache;

pub use atom_cache::AtomCache;
pub use link::{GraphLink, LinkHandle, LinkId, LinkKind};
pub use node::{GraphNode, NodeHandle, NodeKind};
pub use truth_value::TruthValue;
