//! Built-in detection expressions.
//!
//! All of these are compiled case-insensitively. Where a value must be
//! isolated from surrounding context (`user=alice`, `alice@10.0.0.1`), the
//! value is the first non-empty capture group.

use crate::core::models::BuiltinPattern;

/// PEM private key block, header through footer
pub const PRIVATE_KEY: &str = r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |PGP |ENCRYPTED )?PRIVATE KEY-----[\s\S]*?-----END (?:RSA |EC |DSA |OPENSSH |PGP |ENCRYPTED )?PRIVATE KEY-----";

/// JWT: three base64url segments, header and payload starting with `eyJ`
pub const JWT: &str = r"\beyJ[A-Za-z0-9_-]{10,}\.eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\b";

/// ADO/JDBC key-value strings carrying a password, or URI-style DSNs
pub const CONNECTION_STRING: &str = concat!(
    r"(?:Server|Data Source|Host|jdbc:[a-z]+:)=[^;\s]+(?:;[^;\s]+)*(?:;(?:Password|Pwd)=[^;\s]+)",
    r"|\b(?:mysql|postgres|postgresql|mongodb(?:\+srv)?|redis|rediss|mssql|mariadb|amqp|amqps)://[^\s]+",
);

/// http(s) URLs
pub const URL: &str = r#"https?://[^\s<>"'{}|\\^`\[\]]+"#;

pub const EMAIL: &str = r"\b[A-Za-z0-9](?:[A-Za-z0-9._%+-]{0,62}[A-Za-z0-9])?@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}\b";

pub const UUID: &str = r"\b[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}\b";

/// Dotted quad with optional CIDR suffix
pub const IPV4: &str = r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:/[0-9]{1,2})?\b";

/// Full and compressed IPv6 forms with optional prefix length.
/// The unspecified address `::` alone is not matched.
pub const IPV6: &str = concat!(
    r"(?:",
    r"(?:[0-9a-f]{1,4}:){7}[0-9a-f]{1,4}",
    r"|(?:[0-9a-f]{1,4}:){6}:[0-9a-f]{1,4}",
    r"|(?:[0-9a-f]{1,4}:){5}(?::[0-9a-f]{1,4}){1,2}",
    r"|(?:[0-9a-f]{1,4}:){4}(?::[0-9a-f]{1,4}){1,3}",
    r"|(?:[0-9a-f]{1,4}:){3}(?::[0-9a-f]{1,4}){1,4}",
    r"|(?:[0-9a-f]{1,4}:){2}(?::[0-9a-f]{1,4}){1,5}",
    r"|[0-9a-f]{1,4}:(?::[0-9a-f]{1,4}){1,6}",
    r"|::(?:[0-9a-f]{1,4}:){0,5}[0-9a-f]{1,4}",
    r"|(?:[0-9a-f]{1,4}:){1,7}:",
    r")(?:/[0-9]{1,3})?",
);

/// Hostnames ending in a known public or infrastructure suffix
pub const HOSTNAME: &str = concat!(
    r"\b(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+",
    r"(?:com|org|net|edu|gov|mil|int|io|fr|de|uk|eu|es|it|nl|be|ch|at|ca|au|nz|jp|cn|kr|br|ru|in|mx|za",
    r"|local|internal|corp|lan|intra|cloud|app|dev|test|staging|prod|localhost|example|invalid",
    r"|onion|i2p|bit|eth|crypto|web3|xyz|online|site|tech|info|biz|co|me|tv|cc|ws|mobi|name|pro",
    r"|aero|coop|museum|travel|jobs|asia|tel|post|arpa",
    r"|amazonaws|azure|gcp|cloudflare|digitalocean|heroku|vercel|netlify)\b",
);

/// Cisco dotted, colon and dash separated MAC addresses
pub const MAC: &str = r"\b(?:[0-9a-f]{2}[:-]){5}[0-9a-f]{2}\b|\b[0-9a-f]{4}\.[0-9a-f]{4}\.[0-9a-f]{4}\b";

pub const PHONE: &str = concat!(
    r"(?:",
    r"(?:\+|00)[1-9][0-9]{0,3}[\s.-]?[0-9]{1,2}(?:[\s.-]?[0-9]{2}){4}",
    r"|\b0[1-9](?:[\s.-]?[0-9]{2}){4}\b",
    r"|\([0-9]{3}\)[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}",
    r"|\b[0-9]{3}[\s.-][0-9]{3}[\s.-][0-9]{4}\b",
    r"|(?:\+|00)[1-9][0-9]{0,2}[\s.-]?\(?[0-9]{2,4}\)?(?:[\s.-]?[0-9]{2,4}){2,4}",
    r")",
);

/// Secret assignments capture only the secret; vendor token formats match whole
pub const API_KEY: &str = concat!(
    r#"(?:api[_-]?key|apikey|api_secret|secret[_-]?key|auth[_-]?token|access[_-]?token|password|passwd|pwd|credentials?|private[_-]?key)[=:\s]+["']?([A-Za-z0-9_\-.=+/]{16,})["']?"#,
    r"|\b(?:sk|pk|rk|ak)[-_](?:[a-z]+[-_])?[a-z0-9]{16,}\b",
    r"|\bgh[pousr]_[A-Za-z0-9]{36,}\b",
    r"|\bxox[baprs]-[A-Za-z0-9-]{10,}\b",
    r"|\bAIza[A-Za-z0-9_-]{35}\b",
);

/// Windows drive paths, or Unix paths under well-known roots
pub const PATH: &str = concat!(
    r#"([a-z]:\\(?:[^\\/:*?"<>|\r\n\s]+\\)*[^\\/:*?"<>|\r\n\s]+)"#,
    r"|(?:^|[^A-Za-z0-9])(/(?:home|var|etc|usr|opt|tmp|root|mnt|srv|data|apps?)/[a-zA-Z0-9._/-]+)",
);

/// Visa, MasterCard, Amex and Discover layouts with optional separators
pub const CREDIT_CARD: &str = concat!(
    r"\b(?:4[0-9]{3}[\s-]?[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}",
    r"|5[1-5][0-9]{2}[\s-]?[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}",
    r"|3[47][0-9]{2}[\s-]?[0-9]{6}[\s-]?[0-9]{5}",
    r"|6(?:011|5[0-9]{2})[\s-]?[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4})\b",
);

/// Day-first and ISO dates
pub const DATE: &str = concat!(
    r"\b(?:0?[1-9]|[12][0-9]|3[01])[/-](?:0?[1-9]|1[012])[/-](?:19|20)?[0-9]{2}\b",
    r"|\b(?:19|20)[0-9]{2}[/-](?:0?[1-9]|1[012])[/-](?:0?[1-9]|[12][0-9]|3[01])\b",
);

pub const IBAN: &str = r"\b[A-Z]{2}[0-9]{2}\s?(?:[A-Z0-9]{4}\s?){2,7}[A-Z0-9]{1,4}\b";

/// US SSN and the 15-digit French NIR
pub const SSN: &str = concat!(
    r"\b(?:[0-9]{3}-[0-9]{2}-[0-9]{4}",
    r"|[12][0-9]{2}(?:0[1-9]|1[0-2]|[2-9][0-9])(?:0[1-9]|[1-8][0-9]|9[0-8]|2[AB])[0-9]{3}[0-9]{3}[0-9]{2})\b",
);

/// `u=alice`, `user: alice`, and `alice@10.0.0.1` (user part only)
pub const USERNAME: &str = concat!(
    r"(?m)",
    r"\bu=([a-z][a-z0-9_-]{1,31})(?:[\s|,;]|$)",
    r#"|\b(?:user|username|usr|login)\s*[=:]\s*["']?([a-z][a-z0-9_.-]{1,63})["']?"#,
    r"|(?:^|\s|\\r\\n|\\n)([a-z][a-z0-9_-]{1,31})@[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}",
);

/// Ansible result lines, bracketed names, play-recap rows and `server:` assignments
pub const SERVER_NAME: &str = concat!(
    r"(?m)",
    r"(?:fatal|ok|changed|unreachable|failed|skipped|rescued|ignored):\s*\[([a-z][a-z0-9_-]{2,})\]",
    r"|\[([a-z][a-z0-9_-]*(?:-[a-z0-9_]+)+)\]",
    r"|(?:^|\|)\s*([a-z][a-z0-9]*(?:-[a-z0-9_]+)+)\s*(?:[|:]|\s+ok=)",
    r#"|\b(?:server|srv|host|hostname|node|machine)\s*[=:]\s*["']?([a-z][a-z0-9-]*(?:\.[a-z0-9-]+)*)"#,
);

/// Source expression for a built-in pattern
pub fn expression(kind: BuiltinPattern) -> &'static str {
    match kind {
        BuiltinPattern::PrivateKey => PRIVATE_KEY,
        BuiltinPattern::Jwt => JWT,
        BuiltinPattern::ConnectionString => CONNECTION_STRING,
        BuiltinPattern::ApiKey => API_KEY,
        BuiltinPattern::Url => URL,
        BuiltinPattern::Email => EMAIL,
        BuiltinPattern::Ipv6 => IPV6,
        BuiltinPattern::Ipv4 => IPV4,
        BuiltinPattern::Hostname => HOSTNAME,
        BuiltinPattern::Path => PATH,
        BuiltinPattern::Mac => MAC,
        BuiltinPattern::Uuid => UUID,
        BuiltinPattern::Phone => PHONE,
        BuiltinPattern::CreditCard => CREDIT_CARD,
        BuiltinPattern::Iban => IBAN,
        BuiltinPattern::Ssn => SSN,
        BuiltinPattern::Username => USERNAME,
        BuiltinPattern::ServerName => SERVER_NAME,
        BuiltinPattern::Date => DATE,
    }
}
