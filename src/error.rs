//! # Erros da Ponte AtomSpace
//!
//! Taxonomia de falhas da ponte com o CogServer. Todas são **recuperáveis**:
//! a camada de baixo nível devolve `Result<_, BridgeError>` e as operações
//! de alto nível ([`Connector`](crate::connector::Connector),
//! [`SymbolicMemory`](crate::memory::SymbolicMemory)) as convertem em
//! `bool` ou string vazia.
//!
//! | Variante | Quando ocorre | Efeito na conexão |
//! |----------|---------------|-------------------|
//! | `ConnectionFailure` | Criação/conexão do socket falhou | Fica `Disconnected` |
//! | `NotConnected` | Operação sem conexão ativa | Nenhum |
//! | `TransmissionFailure` | Erro de escrita/leitura num socket vivo | Rebaixa para `Disconnected` |
//! | `EmptyLink` | Link sem filhos | Nenhum |
//!
//! "Resposta vazia" **não** é erro: é `Ok(String::new())`.

use std::io;

use thiserror::Error;

/// Alias de resultado usado em toda a biblioteca.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Erros da ponte com o CogServer.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to connect to CogServer at {host}:{port}: {source}")]
    ConnectionFailure {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("Not connected to CogServer")]
    NotConnected,

    #[error("Transmission failure: {0}")]
    TransmissionFailure(#[source] io::Error),

    #[error("A link needs at least one child")]
    EmptyLink,

    #[error("Invalid snapshot id: {0:?}")]
    InvalidSnapshotId(String),
}
