//! Banner grabbing for established TCP connections.
//!
//! The read is passive: whatever the service sends on its own within the
//! deadline is the banner. Silence, EOF, and read errors all give an empty
//! banner rather than an error.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Read up to [`MAX_BANNER_SIZE`] bytes from `stream` within `deadline`.
pub async fn read_banner<S>(stream: &mut S, deadline: Duration) -> Vec<u8>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(deadline, stream.read(&mut buffer)).await {
        Ok(Ok(n)) => {
            buffer.truncate(n);
            buffer
        }
        Ok(Err(e)) => {
            tracing::trace!(error = %e, "banner read failed");
            Vec::new()
        }
        Err(_) => Vec::new(),
    }
}

/// Render raw banner bytes as a single printable line.
///
/// Bytes are decoded as UTF-8 and invalid sequences are dropped. Whitespace
/// runs collapse to one space; any other control character becomes '.'.
pub fn sanitize_banner(data: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(data);
    let mut result = String::with_capacity(decoded.len());
    let mut prev_space = false;

    for c in decoded.chars() {
        if c == char::REPLACEMENT_CHARACTER {
            continue;
        }
        if c.is_whitespace() {
            if !prev_space {
                result.push(' ');
            }
            prev_space = true;
            continue;
        }

        result.push(if c.is_control() { '.' } else { c });
        prev_space = false;
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn test_sanitize_banner() {
        assert_eq!(sanitize_banner(b"SSH-2.0-OpenSSH_8.9\r\n"), "SSH-2.0-OpenSSH_8.9");
        assert_eq!(sanitize_banner(b"220  mail\r\n\r\nready"), "220 mail ready");
    }

    #[test]
    fn test_sanitize_binary_data() {
        assert_eq!(sanitize_banner(b"\x00\x01Hello\x02World\x03"), "..Hello.World.");
        assert_eq!(sanitize_banner(b""), "");
    }

    #[test]
    fn test_sanitize_keeps_utf8_text() {
        let banner = "220 Bienvenue sur le serveur FTP \u{e9}t\u{e9}\r\n".as_bytes();
        assert_eq!(sanitize_banner(banner), "220 Bienvenue sur le serveur FTP \u{e9}t\u{e9}");
        assert_eq!(sanitize_banner("SSH-2.0 \u{4e2d}\u{6587}".as_bytes()), "SSH-2.0 \u{4e2d}\u{6587}");
    }

    #[test]
    fn test_sanitize_drops_invalid_utf8() {
        assert_eq!(sanitize_banner(b"220 \xff\xfeready\r\n"), "220 ready");
    }

    #[tokio::test]
    async fn test_read_banner_caps_at_budget() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        server.write_all(&[b'a'; 2000]).await.unwrap();

        let banner = read_banner(&mut client, Duration::from_millis(200)).await;
        assert!(!banner.is_empty());
        assert!(banner.len() <= MAX_BANNER_SIZE);
    }

    #[tokio::test]
    async fn test_silent_peer_gives_empty_banner() {
        let (mut client, _server) = tokio::io::duplex(64);
        let banner = read_banner(&mut client, Duration::from_millis(50)).await;
        assert!(banner.is_empty());
    }

    #[tokio::test]
    async fn test_closed_peer_gives_empty_banner() {
        let (mut client, server) = tokio::io::duplex(64);
        drop(server);
        let banner = read_banner(&mut client, Duration::from_millis(50)).await;
        assert!(banner.is_empty());
    }
}
