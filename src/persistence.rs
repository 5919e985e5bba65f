//! # Persistência — Snapshots do Espelho Local em Disco
//!
//! Serializa o [`AtomCache`](crate::core::AtomCache) de um
//! [`Connector`] como JSON em `<snapshot_dir>/<id>.json`.
//!
//! ## Formato
//!
//! ```json
//! {
//!   "id": "antes-da-poda",
//!   "created_at": "2026-01-01T12:00:00Z",
//!   "nodes": [{ "kind": "Concept", "name": "Cat", "truth": { ... } }],
//!   "links": [{ "id": "…", "kind": "Inheritance", "children": [ ... ], "truth": { ... } }]
//! }
//! ```
//!
//! JSON "pretty-printed" para facilitar inspeção manual. Links guardam os
//! filhos por valor; na restauração os filhos são reconciliados com o cache,
//! então o compartilhamento de nós se mantém.
//!
//! ## ⚠️ Atomicidade
//!
//! A escrita **não é atômica** — crash durante a escrita pode corromper o
//! snapshot.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::connector::Connector;
use crate::core::{GraphLink, GraphNode, LinkId, LinkKind, TruthValue};
use crate::error::BridgeError;

/// Conteúdo de um arquivo de snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<LinkRecord>,
}

/// Link serializável: filhos por valor em vez de handles.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub kind: LinkKind,
    pub children: Vec<GraphNode>,
    pub truth: TruthValue,
}

impl MemorySnapshot {
    /// Captura o estado atual do cache do connector.
    ///
    /// Nós saem ordenados pela chave de cache; links na ordem de criação.
    pub fn capture(connector: &Connector, id: &str) -> Self {
        let cache = connector.cache();
        let mut nodes: Vec<GraphNode> = cache.nodes().map(|n| GraphNode::clone(n)).collect();
        nodes.sort_by_key(|n| n.cache_key());

        let links = cache
            .links()
            .iter()
            .map(|l| LinkRecord {
                id: l.id,
                kind: l.kind.clone(),
                children: l.children.iter().map(|c| GraphNode::clone(c)).collect(),
                truth: l.truth,
            })
            .collect();

        Self {
            id: id.to_string(),
            created_at: Utc::now(),
            nodes,
            links,
        }
    }

    /// Recria no connector os átomos que ainda não existem.
    ///
    /// Passa pelo connector, então átomos restaurados são transmitidos se
    /// houver conexão. Links já presentes (mesmo id) são ignorados.
    /// Retorna quantos átomos (nós + links) foram adicionados.
    pub fn apply(&self, connector: &mut Connector) -> usize {
        let nodes_before = connector.count_nodes();
        for node in &self.nodes {
            connector.create_node(node.kind.clone(), &node.name);
        }

        let mut restored_links = 0;
        for record in &self.links {
            if record.children.is_empty() || connector.cache().get_link(record.id).is_some() {
                continue;
            }
            let children: Vec<_> = record
                .children
                .iter()
                .map(|c| connector.create_node(c.kind.clone(), &c.name))
                .collect();
            let link = GraphLink::from_parts(record.id, record.kind.clone(), children, record.truth);
            connector.register_link(link);
            restored_links += 1;
        }

        connector.count_nodes() - nodes_before + restored_links
    }
}

/// Ids aceitos: letras, dígitos, `_` e `-`.
fn validate_snapshot_id(id: &str) -> std::result::Result<(), BridgeError> {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid snapshot id regex"));
    if re.is_match(id) {
        Ok(())
    } else {
        Err(BridgeError::InvalidSnapshotId(id.to_string()))
    }
}

fn snapshot_path(connector: &Connector, id: &str) -> Result<PathBuf> {
    validate_snapshot_id(id)?;
    Ok(connector.config().snapshot_dir.join(format!("{id}.json")))
}

/// Salva o cache do connector como `<snapshot_dir>/<id>.json`.
///
/// Cria o diretório se não existir. Retorna o caminho escrito.
pub fn save_snapshot(connector: &Connector, id: &str) -> Result<PathBuf> {
    let path = snapshot_path(connector, id)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
    }
    let snapshot = MemorySnapshot::capture(connector, id);
    let json = serde_json::to_string_pretty(&snapshot).context("Falha ao serializar snapshot")?;
    std::fs::write(&path, json).with_context(|| format!("Falha ao escrever {}", path.display()))?;
    tracing::info!(
        id,
        nodes = snapshot.nodes.len(),
        links = snapshot.links.len(),
        "Snapshot salvo"
    );
    Ok(path)
}

/// Lê `<snapshot_dir>/<id>.json`.
pub fn load_snapshot(connector: &Connector, id: &str) -> Result<MemorySnapshot> {
    let path = snapshot_path(connector, id)?;
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    let snapshot = serde_json::from_str(&json)
        .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
    Ok(snapshot)
}

/// Lê o snapshot e aplica no connector. Retorna quantos átomos foram adicionados.
pub fn restore_snapshot(connector: &mut Connector, id: &str) -> Result<usize> {
    let snapshot = load_snapshot(connector, id)?;
    let restored = snapshot.apply(connector);
    tracing::info!(id, restored, "Snapshot restaurado");
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;

    fn temp_config() -> BridgeConfig {
        BridgeConfig {
            snapshot_dir: std::env::temp_dir().join(format!("bridge-snapshots-{}", uuid::Uuid::new_v4())),
            ..BridgeConfig::default()
        }
    }

    fn populated(config: BridgeConfig) -> Connector {
        let mut connector = Connector::new(config);
        let cat = connector.create_concept_node("Cat");
        let animal = connector.create_concept_node("Animal");
        connector.create_inheritance_link(cat, animal);
        connector.create_number_node(2.5);
        connector
    }

    #[test]
    fn snapshot_roundtrip_into_empty_connector() {
        let config = temp_config();
        let dir = config.snapshot_dir.clone();
        let source = populated(config.clone());

        let path = save_snapshot(&source, "before-prune").unwrap();
        assert!(path.ends_with("before-prune.json"));

        let mut target = Connector::new(config);
        let restored = restore_snapshot(&mut target, "before-prune").unwrap();
        assert_eq!(restored, 4);
        assert_eq!(target.count_nodes(), 3);
        assert_eq!(target.count_links(), 1);
        assert_eq!(target.cache().links()[0].to_host(), "Cat ⊆ Animal");

        // o link restaurado compartilha o nó do cache
        let cat = target.find_nodes_by_name("Cat").remove(0);
        assert_eq!(target.find_incoming_links(&cat).len(), 1);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn restore_is_idempotent() {
        let config = temp_config();
        let dir = config.snapshot_dir.clone();
        let mut connector = populated(config);

        save_snapshot(&connector, "s1").unwrap();
        assert_eq!(restore_snapshot(&mut connector, "s1").unwrap(), 0);
        assert_eq!(connector.count_links(), 1);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let connector = Connector::new(temp_config());
        for id in ["", "../etc/passwd", "a b", "x.json"] {
            let err = save_snapshot(&connector, id).unwrap_err();
            assert!(err.downcast_ref::<BridgeError>().is_some(), "id {id:?}");
        }
    }

    #[test]
    fn missing_snapshot_is_error() {
        let mut connector = Connector::new(temp_config());
        assert!(restore_snapshot(&mut connector, "nope").is_err());
    }
}
