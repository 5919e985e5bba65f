//! # Utilitários para Kernels Wolf
//!
//! Funções sem estado que compõem o [tradutor](crate::translator), o
//! [`Connector`] e a [persistência](crate::persistence) para os kernels
//! simbólicos do host.
//!
//! | Função | O que faz |
//! |--------|-----------|
//! | [`parse_wolf_expression`] | Host → wire, sem conexão |
//! | [`execute_symbolic_operation`] | `op(operandos...)` como `EvaluationLink` |
//! | [`snapshot_memory_state`] / [`restore_memory_state`] | Snapshot JSON do cache |
//! | [`get_memory_statistics`] | Contagens, complexidade e memória estimada |

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::connector::{complexity, Connector};
use crate::persistence;
use crate::translator;

/// Bytes estimados por nó no espelho local.
const NODE_FOOTPRINT_BYTES: usize = 64;
/// Bytes estimados por link no espelho local.
const LINK_FOOTPRINT_BYTES: usize = 128;

/// Converte uma expressão do host para notação de wire.
pub fn parse_wolf_expression(wolf_expr: &str) -> String {
    translator::to_wire(wolf_expr)
}

/// Registra `operation(operands...)` no CogServer.
///
/// Cria o predicado `operation`, um conceito por operando e o
/// `EvaluationLink` correspondente. Retorna `false` se não havia conexão ou
/// se algum envio derrubou a conexão no caminho.
pub fn execute_symbolic_operation(connector: &mut Connector, operation: &str, operands: &[&str]) -> bool {
    if !connector.is_connected() {
        return false;
    }

    let op_node = connector.create_predicate_node(operation);
    let operand_nodes = operands
        .iter()
        .map(|operand| connector.create_concept_node(operand))
        .collect();
    connector.create_evaluation_link(op_node, operand_nodes);

    // um envio que falha rebaixa a conexão
    connector.is_connected()
}

/// Salva o cache em `<snapshot_dir>/<snapshot_id>.json`.
pub fn snapshot_memory_state(connector: &Connector, snapshot_id: &str) -> anyhow::Result<PathBuf> {
    persistence::save_snapshot(connector, snapshot_id)
}

/// Restaura um snapshot salvo, retornando quantos átomos foram adicionados.
pub fn restore_memory_state(connector: &mut Connector, snapshot_id: &str) -> anyhow::Result<usize> {
    persistence::restore_snapshot(connector, snapshot_id)
}

/// Retrato das estatísticas do espelho local.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemoryStats {
    pub node_count: usize,
    pub link_count: usize,
    /// `ln(nós + 1) × ln(links + 1)`
    pub complexity_score: f64,
    /// `(nós × 64 + links × 128) / 1 MiB` — estimativa grosseira
    pub memory_usage_mb: f64,
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {} | links: {} | complexity: {:.3} | memory: {:.4} MB",
            self.node_count, self.link_count, self.complexity_score, self.memory_usage_mb
        )
    }
}

pub fn get_memory_statistics(connector: &Connector) -> MemoryStats {
    let node_count = connector.count_nodes();
    let link_count = connector.count_links();
    let bytes = node_count * NODE_FOOTPRINT_BYTES + link_count * LINK_FOOTPRINT_BYTES;
    MemoryStats {
        node_count,
        link_count,
        complexity_score: complexity(node_count, link_count),
        memory_usage_mb: bytes as f64 / (1024.0 * 1024.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::tests::{connected, FakeCogServer};

    #[test]
    fn parse_wraps_simple_terms() {
        assert_eq!(parse_wolf_expression("∂"), "(ConceptNode \"PartialDerivative\")");
        assert_eq!(parse_wolf_expression("(⊗ a b)"), "(TensorProduct a b)");
    }

    #[test]
    fn statistics_of_empty_connector() {
        let stats = get_memory_statistics(&Connector::default());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.link_count, 0);
        assert_eq!(stats.complexity_score, 0.0);
        assert_eq!(stats.memory_usage_mb, 0.0);
    }

    #[test]
    fn statistics_follow_formulas() {
        let mut connector = Connector::default();
        let a = connector.create_concept_node("a");
        let b = connector.create_concept_node("b");
        connector.create_inheritance_link(a, b);

        let stats = get_memory_statistics(&connector);
        assert_eq!((stats.node_count, stats.link_count), (2, 1));
        assert!((stats.complexity_score - 3f64.ln() * 2f64.ln()).abs() < 1e-12);
        assert!((stats.memory_usage_mb - 256.0 / 1_048_576.0).abs() < 1e-15);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["node_count"], 2);
        assert!(stats.to_string().starts_with("nodes: 2 | links: 1"));
    }

    #[test]
    fn execute_requires_connection() {
        let mut connector = Connector::default();
        assert!(!execute_symbolic_operation(&mut connector, "add", &["x", "y"]));
        assert_eq!(connector.count_nodes(), 0);
    }

    #[test]
    fn execute_sends_evaluation_link() {
        let server = FakeCogServer::start(None);
        let mut connector = connected(&server);

        assert!(execute_symbolic_operation(&mut connector, "add", &["x", "y"]));

        let lines = server.finish(connector);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("(EvaluationLink (PredicateNode \"add\") (ConceptNode \"x\") (ConceptNode \"y\"))")
        );
        assert_eq!(lines.len(), 4);
    }
}
