//! Low-level SMTP stream handling.

use crate::error::{Error, Result};
use crate::reply::Reply;
use rustls::pki_types::ServerName;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    rustls::{ClientConfig, RootCertStore},
};

#[derive(Debug)]
enum Inner {
    /// Plain TCP connection.
    Tcp(BufReader<TcpStream>),
    /// TLS-encrypted connection.
    Tls(Box<BufReader<tokio_rustls::client::TlsStream<TcpStream>>>),
}

/// SMTP stream (TCP or TLS) with the session's socket timeout applied to
/// every read.
#[derive(Debug)]
pub struct SmtpStream {
    inner: Inner,
    read_timeout: Option<Duration>,
}

impl SmtpStream {
    /// Connects over plain TCP.
    ///
    /// `connection_timeout` bounds the connect itself; `read_timeout` bounds
    /// each subsequent read. A zero or absent value means unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or times out.
    pub async fn connect(
        hostname: &str,
        port: u16,
        connection_timeout: Option<u64>,
        read_timeout: Option<u64>,
    ) -> Result<Self> {
        let addr = format!("{hostname}:{port}");
        let stream = bounded(connection_timeout, TcpStream::connect(&addr)).await??;

        Ok(Self {
            inner: Inner::Tcp(BufReader::new(stream)),
            read_timeout: to_duration(read_timeout),
        })
    }

    /// Connects with TLS negotiated immediately (TLS on connect).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or TLS handshake fails or times
    /// out.
    pub async fn connect_tls(
        hostname: &str,
        port: u16,
        connection_timeout: Option<u64>,
        read_timeout: Option<u64>,
    ) -> Result<Self> {
        let addr = format!("{hostname}:{port}");
        let server_name = ServerName::try_from(hostname.to_string())
            .map_err(|_| Error::Protocol(format!("Invalid hostname: {hostname}")))?;
        let connector = tls_connector();

        let tls_stream = bounded(connection_timeout, async {
            let tcp_stream = TcpStream::connect(&addr).await?;
            connector
                .connect(server_name, tcp_stream)
                .await
                .map_err(Error::from)
        })
        .await??;

        Ok(Self {
            inner: Inner::Tls(Box::new(BufReader::new(tls_stream))),
            read_timeout: to_duration(read_timeout),
        })
    }

    /// Reads a single line, trimmed of the trailing CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or exceeds the socket timeout.
    pub async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let Self {
            inner,
            read_timeout,
        } = self;
        let read = async {
            match inner {
                Inner::Tcp(reader) => reader.read_line(&mut line).await,
                Inner::Tls(reader) => reader.read_line(&mut line).await,
            }
        };

        let read_bytes = match *read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, read)
                .await
                .map_err(|_| Error::Timeout(timeout.as_millis().try_into().unwrap_or(u64::MAX)))??,
            None => read.await?,
        };

        if read_bytes == 0 {
            return Err(Error::Protocol("Connection closed by server".into()));
        }

        Ok(line.trim_end().to_string())
    }

    /// Reads a complete (possibly multi-line) SMTP reply.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails or the reply is malformed.
    pub async fn read_reply(&mut self) -> Result<Reply> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            let last = Reply::is_last_line(&line);
            lines.push(line);
            if last {
                break;
            }
        }
        Reply::parse(&lines)
    }

    /// Writes data to the stream and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.inner {
            Inner::Tcp(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
            Inner::Tls(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
        }
        Ok(())
    }
}

fn to_duration(millis: Option<u64>) -> Option<Duration> {
    millis.filter(|&ms| ms > 0).map(Duration::from_millis)
}

/// Runs a future under an optional millisecond bound.
async fn bounded<F, T>(millis: Option<u64>, future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    match to_duration(millis) {
        Some(timeout) => tokio::time::timeout(timeout, future)
            .await
            .map_err(|_| Error::Timeout(millis.unwrap_or_default())),
        None => Ok(future.await),
    }
}

/// Creates a TLS connector with system root certificates.
fn tls_connector() -> TlsConnector {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}
