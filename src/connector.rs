//! # Connector — Ponto de Entrada da Ponte
//!
//! O [`Connector`] junta a [`Connection`], o [`AtomCache`] e o
//! [tradutor](crate::translator) numa única API:
//!
//! ```text
//! create_node("Cat") ──┬── cache hit  → handle existente (sem tráfego)
//!                      └── cache miss → novo nó → [conectado?] envia → cache
//!
//! create_*_link(...) ──── link novo → [conectado?] envia → arena de links
//!
//! evaluate(expr) ──── send → espera fixa → uma leitura
//! ```
//!
//! ## Melhor Esforço
//!
//! O cache é atualizado **sempre**; a transmissão é opcional. Uma falha de
//! envio derruba a conexão (ver [`Connection::send`]) mas nunca impede que
//! o átomo seja criado e devolvido — o modelo local continua útil mesmo com
//! o servidor fora do ar.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::BridgeConfig;
use crate::connection::{Connection, ConnectionState};
use crate::core::{AtomCache, GraphLink, GraphNode, LinkHandle, LinkKind, NodeHandle, NodeKind, TruthValue};
use crate::error::{BridgeError, Result};
use crate::translator::Translator;

/// Cliente do CogServer com espelho local dos átomos criados.
pub struct Connector {
    connection: Connection,
    cache: AtomCache,
    translator: Translator,
    config: BridgeConfig,
}

impl Connector {
    /// Connector desconectado, com cache vazio.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            connection: Connection::new(config.read_buffer_size),
            cache: AtomCache::new(),
            translator: Translator,
            config,
        }
    }

    // ─── Conexão ───────────────────────────────────────────────

    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        self.connection.connect(host, port)
    }

    /// Conecta no host/porta da configuração.
    pub fn connect_default(&mut self) -> Result<()> {
        let (host, port) = (self.config.host.clone(), self.config.port);
        self.connect(&host, port)
    }

    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    // ─── Criação de nós ────────────────────────────────────────

    /// Devolve o nó `(kind, name)`, criando-o na primeira vez.
    ///
    /// Na criação, se houver conexão, envia `node.to_wire()`. O resultado do
    /// envio não afeta o cache.
    pub fn create_node(&mut self, kind: NodeKind, name: &str) -> NodeHandle {
        if let Some(node) = self.cache.get_node(&kind, name) {
            return node.clone();
        }

        let node = Arc::new(GraphNode::new(kind, name));
        if self.is_connected() && self.connection.send(&node.to_wire()).is_ok() {
            tracing::debug!(kind = %node.kind, name = %node.name, "Nó criado no CogServer");
        }
        self.cache.insert_node(node)
    }

    pub fn create_concept_node(&mut self, name: &str) -> NodeHandle {
        self.create_node(NodeKind::Concept, name)
    }

    pub fn create_predicate_node(&mut self, name: &str) -> NodeHandle {
        self.create_node(NodeKind::Predicate, name)
    }

    /// `NumberNode` com o valor formatado em 6 casas decimais
    /// (`3.0` → `"3.000000"`), que também é a chave de cache.
    pub fn create_number_node(&mut self, value: f64) -> NodeHandle {
        self.create_node(NodeKind::Number, &format!("{value:.6}"))
    }

    // ─── Criação de links ──────────────────────────────────────

    /// Cria um link novo (nunca deduplicado), transmite se conectado e o
    /// retém na arena de links.
    pub fn create_link(&mut self, kind: LinkKind, children: Vec<NodeHandle>) -> Result<LinkHandle> {
        let link = GraphLink::new(kind, children)?;
        Ok(self.register_link(link))
    }

    /// `child ⊆ parent`.
    pub fn create_inheritance_link(&mut self, child: NodeHandle, parent: NodeHandle) -> LinkHandle {
        self.register_link(fresh_link(LinkKind::Inheritance, vec![child, parent]))
    }

    /// `predicate(arguments...)`.
    pub fn create_evaluation_link(
        &mut self,
        predicate: NodeHandle,
        arguments: Vec<NodeHandle>,
    ) -> LinkHandle {
        let mut children = Vec::with_capacity(arguments.len() + 1);
        children.push(predicate);
        children.extend(arguments);
        self.register_link(fresh_link(LinkKind::Evaluation, children))
    }

    pub(crate) fn register_link(&mut self, link: GraphLink) -> LinkHandle {
        let link = Arc::new(link);
        if self.is_connected() && self.connection.send(&link.to_wire()).is_ok() {
            tracing::debug!(kind = %link.kind, id = %link.id, "Link criado no CogServer");
        }
        self.cache.insert_link(link.clone());
        link
    }

    // ─── Comandos ──────────────────────────────────────────────

    /// Envia um comando Scheme cru.
    pub fn send_raw(&mut self, command: &str) -> Result<()> {
        if !self.is_connected() {
            tracing::warn!("Not connected to CogServer");
            return Err(BridgeError::NotConnected);
        }
        self.connection.send(command)
    }

    /// Envia a expressão, espera `response_delay` e faz **uma** leitura.
    ///
    /// Devolve `""` se o envio falhar ou se o servidor ainda não respondeu.
    /// A espera é um compromisso, não uma sincronização: respostas lentas
    /// ficam no socket para a próxima leitura.
    pub fn evaluate(&mut self, expression: &str) -> String {
        if self.send_raw(expression).is_err() {
            return String::new();
        }
        std::thread::sleep(self.config.response_delay());
        self.connection.receive().unwrap_or_default()
    }

    // ─── Consultas locais ──────────────────────────────────────

    pub fn find_nodes_by_name(&self, name: &str) -> Vec<NodeHandle> {
        self.cache.find_nodes_by_name(name)
    }

    /// Links retidos que referenciam `node`, em ordem de criação.
    pub fn find_incoming_links(&self, node: &GraphNode) -> Vec<LinkHandle> {
        self.cache.incoming_links(&node.cache_key())
    }

    pub fn find_outgoing_nodes(&self, link: &GraphLink) -> Vec<NodeHandle> {
        link.children.clone()
    }

    // ─── Estatísticas ──────────────────────────────────────────

    pub fn count_nodes(&self) -> usize {
        self.cache.node_count()
    }

    pub fn count_links(&self) -> usize {
        self.cache.link_count()
    }

    /// `ln(nós + 1) × ln(links + 1)`.
    pub fn calculate_memory_complexity(&self) -> f64 {
        complexity(self.count_nodes(), self.count_links())
    }

    // ─── Notação ───────────────────────────────────────────────

    pub fn wolf_to_atomspace(&self, wolf_expression: &str) -> String {
        self.translator.to_wire(wolf_expression)
    }

    pub fn atomspace_to_wolf(&self, atomspace_data: &str) -> String {
        self.translator.from_wire(atomspace_data)
    }

    pub fn cache(&self) -> &AtomCache {
        &self.cache
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

/// Link novo com filhos garantidamente não vazios.
fn fresh_link(kind: LinkKind, children: Vec<NodeHandle>) -> GraphLink {
    GraphLink::from_parts(Uuid::new_v4(), kind, children, TruthValue::default())
}

/// Índice de complexidade usado nas estatísticas.
pub(crate) fn complexity(nodes: usize, links: usize) -> f64 {
    ((nodes + 1) as f64).ln() * ((links + 1) as f64).ln()
}
