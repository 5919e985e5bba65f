//! # atomspace-bridge — Binário de Demonstração
//!
//! Conecta no CogServer, envia cada argumento (em notação do host) e mostra
//! a resposta e as estatísticas do espelho local.
//!
//! ```bash
//! # Servidor padrão (localhost:17001)
//! cargo run -- "∇f" "(∂ x)"
//!
//! # Outro servidor, com logs detalhados
//! COGSERVER_HOST=10.0.0.5 RUST_LOG=debug cargo run -- "Ω"
//!
//! # Configuração em arquivo
//! BRIDGE_CONFIG=bridge.json cargo run
//! ```
//!
//! Sem servidor a ponte continua funcionando localmente: as expressões são
//! traduzidas e registradas no cache, mas nada é transmitido.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use atomspace_bridge::kernel_utils::{get_memory_statistics, parse_wolf_expression};
use atomspace_bridge::{BridgeConfig, Connector};

fn main() -> Result<()> {
    // Aceita RUST_LOG para configurar o nível (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match std::env::var("BRIDGE_CONFIG") {
        Ok(path) => BridgeConfig::from_file(Path::new(&path))?,
        Err(_) => BridgeConfig::default(),
    };
    config.apply_env();

    tracing::info!(host = %config.host, port = config.port, "🔗 AtomSpace bridge — Starting...");

    let mut connector = Connector::new(config);
    if let Err(e) = connector.connect_default() {
        tracing::warn!(error = %e, "CogServer indisponível, seguindo só com o cache local");
    }

    for expression in std::env::args().skip(1) {
        let wire = parse_wolf_expression(&expression);
        connector.create_concept_node(&expression);

        if connector.is_connected() {
            let reply = connector.evaluate(&wire);
            println!("{expression} → {wire}");
            if !reply.is_empty() {
                println!("  ← {}", connector.atomspace_to_wolf(reply.trim_end()));
            }
        } else {
            println!("{expression} → {wire} (offline)");
        }
    }

    let stats = get_memory_statistics(&connector);
    tracing::info!(%stats, "Memory statistics");
    println!("{}", serde_json::to_string_pretty(&stats)?);

    connector.disconnect();
    Ok(())
}
