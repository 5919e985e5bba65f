//! # Conexão — Um Socket TCP até o CogServer
//!
//! A [`Connection`] gerencia **um** socket com o shell Scheme do CogServer.
//!
//! ## Máquina de Estados
//!
//! ```text
//!                 connect()                    ok
//! Disconnected ──────────────→ Connecting ──────────→ Connected
//!      ↑                           │                      │
//!      │         erro              ↓                      │ erro de escrita/leitura,
//!      └────────────────────── (Failed)                   │ par fechou, disconnect()
//!      └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Semântica
//!
//! - **connect**: uma única tentativa **não bloqueante**. "Conexão em
//!   andamento" conta como sucesso: o estado vai direto para `Connected` e o
//!   handshake termina em segundo plano. Se ele falhar, o próximo
//!   `send`/`receive` reporta o erro e rebaixa a conexão.
//! - **send**: acrescenta `\n` e escreve uma vez. Qualquer erro (inclusive
//!   escrita parcial) derruba a conexão — não há reenvio.
//! - **receive**: uma única leitura não bloqueante. `WouldBlock` → `""`.
//! - **disconnect**: idempotente.
//!
//! Nunca reconecta sozinha: só um novo `connect` tira a conexão de
//! `Disconnected`.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{BridgeError, Result};

/// Estado observável da conexão.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Socket com o CogServer.
pub struct Connection {
    stream: Option<TcpStream>,
    state: ConnectionState,
    host: String,
    port: u16,
    read_buffer_size: usize,
}

impl Connection {
    pub fn new(read_buffer_size: usize) -> Self {
        Self {
            stream: None,
            state: ConnectionState::Disconnected,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            // um byte do buffer fica reservado; no mínimo 1 útil
            read_buffer_size: read_buffer_size.max(2),
        }
    }

    /// Abre o socket e dispara uma tentativa de conexão, sem esperar o
    /// handshake.
    ///
    /// Uma conexão já aberta é fechada antes da nova tentativa.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        self.disconnect();
        self.state = ConnectionState::Connecting;

        match self.open(host, port) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = ConnectionState::Connected;
                self.host = host.to_string();
                self.port = port;
                tracing::info!(host, port, "Connected to CogServer");
                Ok(())
            }
            Err(source) => {
                self.state = ConnectionState::Disconnected;
                tracing::warn!(host, port, error = %source, "Failed to connect to CogServer");
                Err(BridgeError::ConnectionFailure {
                    host: host.to_string(),
                    port,
                    source,
                })
            }
        }
    }

    fn open(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
        // `localhost` pode resolver para ::1 e 127.0.0.1; IPv4 primeiro
        let addr = addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| io::Error::new(ErrorKind::AddrNotAvailable, "no address resolved"))?;

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_nonblocking(true)?;
        match socket.connect(&addr.into()) {
            Ok(()) => {}
            Err(e) if connect_in_progress(&e) => {
                tracing::debug!(%addr, "Conexão em andamento");
            }
            Err(e) => return Err(e),
        }

        let stream: TcpStream = socket.into();
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// Envia um comando terminado em `\n`.
    pub fn send(&mut self, command: &str) -> Result<()> {
        let stream = self.live_stream()?;
        let line = format!("{command}\n");

        let outcome = match stream.write(line.as_bytes()) {
            Ok(n) if n == line.len() => Ok(()),
            Ok(n) => Err(io::Error::new(
                ErrorKind::WriteZero,
                format!("short write: {n} of {} bytes", line.len()),
            )),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(command, "CogServer ←");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error sending command to CogServer");
                self.drop_stream();
                Err(BridgeError::TransmissionFailure(e))
            }
        }
    }

    /// Uma leitura não bloqueante. `Ok("")` quando não há nada disponível.
    pub fn receive(&mut self) -> Result<String> {
        let capacity = self.read_buffer_size - 1;
        let stream = self.live_stream()?;
        let mut buffer = vec![0u8; capacity];

        match stream.read(&mut buffer) {
            Ok(0) => {
                tracing::info!("CogServer closed the connection");
                self.drop_stream();
                Ok(String::new())
            }
            Ok(n) => {
                let text = String::from_utf8_lossy(&buffer[..n]).into_owned();
                tracing::debug!(bytes = n, "CogServer →");
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(String::new()),
            Err(e) if e.kind() == ErrorKind::Interrupted => Ok(String::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Error receiving from CogServer");
                self.drop_stream();
                Err(BridgeError::TransmissionFailure(e))
            }
        }
    }

    /// Fecha o socket, se aberto. Pode ser chamado quantas vezes quiser.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
            tracing::info!(host = %self.host, port = self.port, "Disconnected from CogServer");
        }
        self.state = ConnectionState::Disconnected;
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Último endpoint conectado com sucesso (ou o padrão).
    pub fn endpoint(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    fn live_stream(&mut self) -> Result<&mut TcpStream> {
        match (self.state, self.stream.as_mut()) {
            (ConnectionState::Connected, Some(stream)) => Ok(stream),
            _ => Err(BridgeError::NotConnected),
        }
    }

    fn drop_stream(&mut self) {
        self.stream = None;
        self.state = ConnectionState::Disconnected;
    }
}

fn connect_in_progress(e: &io::Error) -> bool {
    #[cfg(unix)]
    {
        if e.raw_os_error() == Some(libc::EINPROGRESS) {
            return true;
        }
    }
    e.kind() == ErrorKind::WouldBlock
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
