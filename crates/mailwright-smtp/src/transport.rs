//! SMTP message delivery.
//!
//! One sequential conversation per send: greeting, EHLO, optional
//! AUTH PLAIN, MAIL FROM, RCPT TO, DATA, QUIT.

use crate::error::{Error, Result};
use crate::reply::Reply;
use crate::session::MailSession;
use crate::stream::SmtpStream;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use mailwright_mime::MimeMessage;
use tracing::debug;

/// Sends a built message through the given session.
///
/// The envelope-from is the session's `mail.smtp.from` property when set,
/// otherwise the message's From address. Every to/cc/bcc recipient receives
/// its own RCPT TO.
///
/// # Errors
///
/// Returns an error if the session has no host, the connection fails, or the
/// server rejects any step of the conversation.
pub async fn send(session: &MailSession, message: &MimeMessage) -> Result<()> {
    let host = session
        .host()
        .ok_or_else(|| Error::InvalidSession("mail.smtp.host not set".into()))?;
    let port = session.port().unwrap_or(25);
    let connection_timeout = session.connection_timeout();
    let read_timeout = session.socket_timeout();

    debug!(host, port, tls = session.ssl_on_connect(), "connecting");
    let mut stream = if session.ssl_on_connect() {
        SmtpStream::connect_tls(host, port, connection_timeout, read_timeout).await?
    } else {
        SmtpStream::connect(host, port, connection_timeout, read_timeout).await?
    };

    expect_success(stream.read_reply().await?)?;

    exchange(&mut stream, "EHLO localhost", "EHLO localhost").await?;

    if let Some(auth) = session.authenticator() {
        let token = BASE64.encode(format!("\0{}\0{}", auth.username(), auth.password()));
        // Credentials never reach the log line
        exchange(&mut stream, &format!("AUTH PLAIN {token}"), "AUTH PLAIN").await?;
    }

    let envelope_from = session
        .envelope_from()
        .unwrap_or_else(|| message.from.address.as_str());
    exchange(
        &mut stream,
        &format!("MAIL FROM:<{envelope_from}>"),
        "MAIL FROM",
    )
    .await?;

    for recipient in message.recipients() {
        exchange(&mut stream, &format!("RCPT TO:<{recipient}>"), "RCPT TO").await?;
    }

    let reply = exchange_raw(&mut stream, "DATA", "DATA").await?;
    if !reply.code.is_intermediate() {
        return Err(Error::smtp_error(reply.code.as_u16(), reply.message_text()));
    }

    // dot_stuff output is always CRLF-terminated
    let payload = dot_stuff(&message.to_rfc5322());
    stream.write_all(payload.as_bytes()).await?;
    stream.write_all(b".\r\n").await?;
    expect_success(stream.read_reply().await?)?;
    debug!(recipients = message.recipients().len(), "message accepted");

    exchange(&mut stream, "QUIT", "QUIT").await?;
    Ok(())
}

/// Sends one command and expects a 2xx reply.
async fn exchange(stream: &mut SmtpStream, command: &str, log_as: &str) -> Result<Reply> {
    let reply = exchange_raw(stream, command, log_as).await?;
    expect_success(reply)
}

/// Sends one command and returns whatever reply the server gives.
async fn exchange_raw(stream: &mut SmtpStream, command: &str, log_as: &str) -> Result<Reply> {
    debug!(command = log_as, "sending");
    stream.write_all(format!("{command}\r\n").as_bytes()).await?;

    let reply = stream.read_reply().await?;
    debug!(command = log_as, code = reply.code.as_u16(), "reply");
    Ok(reply)
}

fn expect_success(reply: Reply) -> Result<Reply> {
    if reply.is_success() {
        Ok(reply)
    } else {
        Err(Error::smtp_error(reply.code.as_u16(), reply.message_text()))
    }
}

/// Normalizes line endings to CRLF and escapes leading dots per RFC 5321.
fn dot_stuff(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with('.') {
            out.push('.');
        }
        out.push_str(line);
        out.push_str("\r\n");
    }
    // split('\n') yields one trailing empty segment when text ends with \n
    if text.ends_with('\n') {
        out.truncate(out.len() - 2);
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::session::Authenticator;
    use chrono::{TimeZone, Utc};
    use mailwright_mime::{ContentType, Headers, Mailbox};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    #[test]
    fn test_dot_stuff_escapes_leading_dots() {
        assert_eq!(dot_stuff(".hidden"), "..hidden\r\n");
        assert_eq!(dot_stuff("a\n.b\nc"), "a\r\n..b\r\nc\r\n");
    }

    #[test]
    fn test_dot_stuff_normalizes_line_endings() {
        assert_eq!(dot_stuff("a\r\nb\n"), "a\r\nb\r\n");
    }

    fn sample_message() -> MimeMessage {
        MimeMessage {
            from: Mailbox::new("sender@example.com").unwrap(),
            to: vec![Mailbox::new("to@example.com").unwrap()],
            cc: vec![Mailbox::new("cc@example.com").unwrap()],
            bcc: Vec::new(),
            reply_to: Vec::new(),
            headers: Headers::new(),
            subject: Some("Hi".to_string()),
            body: Some("Hello".to_string()),
            content_type: ContentType::text_plain(),
            sent_date: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    /// Minimal scripted SMTP server: accepts one connection, records every
    /// command line, replies canned codes.
    async fn fake_server(listener: TcpListener) -> Vec<String> {
        let (stream, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);
        let mut commands = Vec::new();

        reader
            .get_mut()
            .write_all(b"220 fake ESMTP ready\r\n")
            .await
            .unwrap();

        let mut in_data = false;
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let trimmed = line.trim_end().to_string();

            if in_data {
                if trimmed == "." {
                    in_data = false;
                    reader.get_mut().write_all(b"250 queued\r\n").await.unwrap();
                }
                continue;
            }

            commands.push(trimmed.clone());
            let reply: &[u8] = if trimmed.starts_with("EHLO") {
                b"250-fake\r\n250 AUTH PLAIN\r\n"
            } else if trimmed.starts_with("AUTH") {
                b"235 2.7.0 accepted\r\n"
            } else if trimmed == "DATA" {
                in_data = true;
                b"354 go ahead\r\n"
            } else if trimmed == "QUIT" {
                reader.get_mut().write_all(b"221 bye\r\n").await.unwrap();
                break;
            } else {
                b"250 OK\r\n"
            };
            reader.get_mut().write_all(reply).await.unwrap();
        }

        commands
    }

    #[tokio::test]
    async fn test_send_full_conversation() {
        // RUST_LOG=debug shows the command/reply exchange
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(fake_server(listener));

        let mut session = MailSession::new();
        session.set_property(MailSession::MAIL_HOST, "127.0.0.1");
        session.set_property(MailSession::MAIL_PORT, port.to_string());
        session.set_property(MailSession::MAIL_SMTP_TIMEOUT, "5000");
        session.set_property(MailSession::MAIL_SMTP_FROM, "bounce@example.com");
        session.authenticate(Authenticator::new("user", "secret"));

        send(&session, &sample_message()).await.unwrap();

        let commands = server.await.unwrap();
        assert_eq!(commands[0], "EHLO localhost");
        assert!(commands[1].starts_with("AUTH PLAIN "));
        assert_eq!(commands[2], "MAIL FROM:<bounce@example.com>");
        assert_eq!(commands[3], "RCPT TO:<to@example.com>");
        assert_eq!(commands[4], "RCPT TO:<cc@example.com>");
        assert_eq!(commands[5], "DATA");
        assert_eq!(commands[6], "QUIT");
    }

    #[tokio::test]
    async fn test_send_without_host_fails() {
        let session = MailSession::new();
        let err = send(&session, &sample_message()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidSession(_)));
    }
}
