//! Service classification from port numbers and captured banners.
//!
//! The port table is consulted first. Only when the port is unknown does the
//! banner get a say, and then keywords are tried in [`BANNER_KEYWORDS`]
//! order so overlapping matches always resolve the same way.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label returned when neither the port nor the banner identifies a service.
pub const UNKNOWN: &str = "Unknown";

/// Static map of well-known ports to service labels.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(80, "HTTP");
    m.insert(110, "POP3");
    m.insert(111, "RPCbind");
    m.insert(135, "MSRPC");
    m.insert(139, "NetBIOS");
    m.insert(143, "IMAP");
    m.insert(389, "LDAP");
    m.insert(443, "HTTPS");
    m.insert(445, "SMB");
    m.insert(465, "SMTPS");
    m.insert(587, "Submission");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "MSSQL");
    m.insert(1521, "Oracle");
    m.insert(2049, "NFS");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(5900, "VNC");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP-Proxy");
    m.insert(8443, "HTTPS-Alt");
    m.insert(11211, "Memcached");
    m.insert(27017, "MongoDB");

    m
});

/// Banner keywords in match priority order. First hit wins.
///
/// `http` precedes `ssh` and `smtp` so a web server that echoes a mail or
/// shell product name in its headers is still reported as HTTP.
pub const BANNER_KEYWORDS: &[(&str, &str)] = &[
    ("http", "HTTP"),
    ("ssh", "SSH"),
    ("smtp", "SMTP"),
    ("ftp", "FTP"),
    ("imap", "IMAP"),
    ("pop3", "POP3"),
];

/// Look up the well-known service label for a port.
pub fn get_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Classify a service by port, falling back to banner keywords.
///
/// Never fails; an empty banner on an unlisted port is [`UNKNOWN`].
pub fn classify(port: u16, banner: &[u8]) -> &'static str {
    if let Some(name) = get_service_name(port) {
        return name;
    }
    if banner.is_empty() {
        return UNKNOWN;
    }

    let lowered = banner.to_ascii_lowercase();
    BANNER_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains(&lowered, keyword.as_bytes()))
        .map_or(UNKNOWN, |&(_, label)| label)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_table_wins() {
        assert_eq!(classify(80, b""), "HTTP");
        assert_eq!(classify(22, b""), "SSH");
        assert_eq!(classify(3306, b""), "MySQL");
        // Port match beats a contradicting banner.
        assert_eq!(classify(22, b"HTTP/1.1 200 OK"), "SSH");
    }

    #[test]
    fn test_banner_fallback() {
        assert_eq!(classify(9999, b"SSH-2.0-OpenSSH"), "SSH");
        assert_eq!(classify(2525, b"220 mail ESMTP Postfix"), "SMTP");
        assert_eq!(classify(2121, b"220 ProFTPD Server ready"), "FTP");
    }

    #[test]
    fn test_keyword_order_breaks_ties() {
        // Contains both "http" and "ssh"; http is listed first.
        assert_eq!(classify(9999, b"HTTP/1.0 400 Bad Request (ssh?)"), "HTTP");
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify(9999, b""), UNKNOWN);
        assert_eq!(classify(9999, b"\x00\xff\x10garbage"), UNKNOWN);
        assert_eq!(get_service_name(12345), None);
    }
}
