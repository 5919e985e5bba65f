//! # Configuração da Ponte
//!
//! [`BridgeConfig`] reúne os parâmetros de rede e de persistência.
//!
//! ## Fontes (em ordem de precedência crescente)
//!
//! 1. Valores padrão ([`BridgeConfig::default`])
//! 2. Arquivo JSON opcional ([`BridgeConfig::from_file`])
//! 3. Variáveis de ambiente ([`BridgeConfig::apply_env`])
//!
//! | Variável | Campo | Padrão |
//! |----------|-------|--------|
//! | `COGSERVER_HOST` | `host` | `localhost` |
//! | `COGSERVER_PORT` | `port` | `17001` |
//! | `COGSERVER_RESPONSE_DELAY_MS` | `response_delay_ms` | `100` |
//! | `BRIDGE_SNAPSHOT_DIR` | `snapshot_dir` | `data/snapshots` |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Host padrão do CogServer.
pub const DEFAULT_HOST: &str = "localhost";

/// Porta padrão do shell Scheme do CogServer.
pub const DEFAULT_PORT: u16 = 17001;

/// Parâmetros da ponte com o CogServer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Host do CogServer.
    pub host: String,
    /// Porta do CogServer.
    pub port: u16,
    /// Espera fixa entre o envio e a única leitura de [`evaluate`](crate::connector::Connector::evaluate).
    pub response_delay_ms: u64,
    /// Tamanho do buffer de leitura; um byte fica reservado (4096 → 4095 úteis).
    pub read_buffer_size: usize,
    /// Diretório dos snapshots JSON.
    pub snapshot_dir: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            response_delay_ms: 100,
            read_buffer_size: 4096,
            snapshot_dir: PathBuf::from("data/snapshots"),
        }
    }
}

impl BridgeConfig {
    /// Padrões + variáveis de ambiente.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Carrega um arquivo JSON; campos ausentes ficam com o valor padrão.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
        Ok(config)
    }

    /// Sobrescreve campos com as variáveis de ambiente presentes.
    ///
    /// Valores que não fazem parse são ignorados com um `warn!`.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("COGSERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = env_parse("COGSERVER_PORT") {
            self.port = port;
        }
        if let Some(ms) = env_parse("COGSERVER_RESPONSE_DELAY_MS") {
            self.response_delay_ms = ms;
        }
        if let Ok(dir) = std::env::var("BRIDGE_SNAPSHOT_DIR") {
            if !dir.trim().is_empty() {
                self.snapshot_dir = PathBuf::from(dir);
            }
        }
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Valor de ambiente inválido, ignorado");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cogserver_endpoint() {
        let config = BridgeConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 17001);
        assert_eq!(config.response_delay(), Duration::from_millis(100));
        assert_eq!(config.read_buffer_size, 4096);
    }

    /// Campos ausentes no JSON caem para o padrão
    #[test]
    fn partial_json_keeps_defaults() {
        let config: BridgeConfig = serde_json::from_str(r#"{"port": 18001}"#).unwrap();
        assert_eq!(config.port, 18001);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.response_delay_ms, 100);
    }

    #[test]
    fn from_file_reads_json() {
        let dir = std::env::temp_dir().join(format!("bridge-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bridge.json");
        std::fs::write(&path, r#"{"host": "cog.local", "response_delay_ms": 5}"#).unwrap();

        let config = BridgeConfig::from_file(&path).unwrap();
        assert_eq!(config.host, "cog.local");
        assert_eq!(config.response_delay_ms, 5);
        assert_eq!(config.port, DEFAULT_PORT);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn from_file_missing_is_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(BridgeConfig::from_file(&path).is_err());
    }
}
