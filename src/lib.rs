//! # AtomSpace Bridge
//!
//! Ponte do lado do cliente entre o host simbólico **Wolf** e o
//! **CogServer** do OpenCog, falando o protocolo textual do shell Scheme.
//!
//! ## Camadas
//!
//! ```text
//! kernel_utils  ─── utilitários sem estado (parse, execute, snapshot, stats)
//!      │
//! memory        ─── store / retrieve / record_evolution / padrões
//!      │
//! connector     ─── cache de átomos + conexão + tradução
//!   ├── connection  ─── um socket TCP não bloqueante
//!   ├── core        ─── GraphNode, GraphLink, TruthValue, AtomCache
//!   └── translator  ─── "∇f" ⇄ (ConceptNode "GradientOperatorf")
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use atomspace_bridge::connector::Connector;
//!
//! // sem servidor: o espelho local funciona, nada é transmitido
//! let mut connector = Connector::default();
//! let cat = connector.create_concept_node("Cat");
//! let animal = connector.create_concept_node("Animal");
//! let link = connector.create_inheritance_link(cat, animal);
//!
//! assert_eq!(link.to_host(), "Cat ⊆ Animal");
//! assert_eq!(connector.count_nodes(), 2);
//! assert_eq!(connector.evaluate("(cog-prt-atomspace)"), "");
//! ```

pub mod config;

pub mod connection;

pub mod connector;

pub mod core;

pub mod error;

pub mod kernel_utils;

pub mod memory;

pub mod persistence;

pub mod translator;

pub use config::BridgeConfig;
pub use connector::Connector;
pub use error::{BridgeError, Result};
pub use memory::SymbolicMemory;
