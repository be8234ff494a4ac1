//! Public-suffix aware domain extraction.
//!
//! Finds dotted names, splits them into subdomain / registrable domain /
//! suffix against a compact suffix list, and scores how likely each one is a
//! real domain. Compound suffixes (`co.uk`, `github.io`) are matched longest
//! first.

use std::collections::HashSet;

use regex::Regex;

use super::{Enhancer, EnhancerConfig, EnhancerSpan};
use crate::error::EnhancerError;

const CANDIDATE: &str = r"(?i)\b(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b";

/// Public and private suffixes recognised out of the box
const SUFFIXES: &[&str] = &[
    // generic
    "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "io", "co",
    "me", "tv", "cc", "ws", "app", "dev", "cloud", "tech", "online", "site", "xyz", "ai",
    // country
    "fr", "de", "uk", "eu", "es", "it", "nl", "be", "ch", "at", "ca", "au", "nz", "jp", "cn",
    "kr", "br", "ru", "in", "mx", "za", "se", "no", "dk", "fi", "pl", "pt", "ie", "us",
    // compound
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "com.au", "net.au", "org.au", "co.nz",
    "co.jp", "ne.jp", "com.br", "com.cn", "co.in", "co.za", "com.mx", "gouv.fr",
    // private
    "github.io", "gitlab.io", "herokuapp.com", "azurewebsites.net", "cloudfront.net",
    "appspot.com", "s3.amazonaws.com", "vercel.app", "netlify.app", "pages.dev",
];

/// Top-level suffixes that earn a confidence bonus
const COMMON_TLDS: &[&str] = &["com", "org", "net", "fr", "eu", "io", "co", "uk", "de"];

/// Components of a recognised domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    pub fn fqdn(&self) -> String {
        if self.subdomain.is_empty() {
            format!("{}.{}", self.domain, self.suffix)
        } else {
            format!("{}.{}.{}", self.subdomain, self.domain, self.suffix)
        }
    }
}

pub struct DomainEnhancer {
    matcher: Option<Regex>,
}

impl DomainEnhancer {
    pub fn new() -> Self {
        let matcher = match Regex::new(CANDIDATE) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "domain candidate pattern failed to compile");
                None
            }
        };
        Self { matcher }
    }

    /// Split `candidate` into parts using the built-in plus `extra` suffixes
    pub fn extract(candidate: &str, extra: &HashSet<String>) -> Option<DomainParts> {
        let lower = candidate.to_ascii_lowercase();
        let labels: Vec<&str> = lower.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return None;
        }

        // Longest suffix first; a bare suffix has no registrable domain
        for take in (1..=labels.len()).rev() {
            let suffix = labels[labels.len() - take..].join(".");
            if SUFFIXES.contains(&suffix.as_str()) || extra.contains(&suffix) {
                let (domain, subdomain) = labels[..labels.len() - take].split_last()?;
                return Some(DomainParts {
                    subdomain: subdomain.join("."),
                    domain: domain.to_string(),
                    suffix,
                });
            }
        }

        None
    }

    /// Heuristic confidence in `[0, 1]`
    pub fn confidence(parts: &DomainParts) -> f64 {
        let mut confidence: f64 = 0.5;
        if !parts.domain.is_empty() && !parts.suffix.is_empty() {
            confidence += 0.3;
        }
        if !parts.subdomain.is_empty() {
            confidence += 0.1;
        }
        let tld = parts.suffix.rsplit('.').next().unwrap_or("");
        if COMMON_TLDS.contains(&tld) {
            confidence += 0.1;
        }
        if parts.domain.len() < 3 {
            confidence -= 0.2;
        }
        confidence.clamp(0.0, 1.0)
    }
}

impl Default for DomainEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl Enhancer for DomainEnhancer {
    fn name(&self) -> &str {
        "domains"
    }

    fn is_available(&self) -> bool {
        self.matcher.is_some()
    }

    fn detect(
        &self,
        text: &str,
        config: &EnhancerConfig,
    ) -> Result<Vec<EnhancerSpan>, EnhancerError> {
        let matcher = self.matcher.as_ref().ok_or_else(|| EnhancerError::Unavailable {
            name: self.name().to_string(),
        })?;

        let extra: HashSet<String> = config
            .string_list("extra_suffixes")
            .into_iter()
            .map(|s| s.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        let spans = matcher
            .find_iter(text)
            .filter_map(|m| {
                let parts = Self::extract(m.as_str(), &extra)?;
                let label = if parts.subdomain.is_empty() {
                    "DOMAIN"
                } else {
                    "FQDN"
                };
                Some(EnhancerSpan {
                    start: m.start(),
                    end: m.end(),
                    label: label.to_string(),
                    confidence: Self::confidence(&parts),
                    value: m.as_str().to_string(),
                })
            })
            .collect();

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_extra() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_extract_compound_suffix() {
        let parts = DomainEnhancer::extract("www.bbc.co.uk", &no_extra()).unwrap();
        assert_eq!(parts.subdomain, "www");
        assert_eq!(parts.domain, "bbc");
        assert_eq!(parts.suffix, "co.uk");
        assert_eq!(parts.fqdn(), "www.bbc.co.uk");
    }

    #[test]
    fn test_extract_private_suffix() {
        let parts = DomainEnhancer::extract("acme.github.io", &no_extra()).unwrap();
        assert_eq!(parts.domain, "acme");
        assert_eq!(parts.suffix, "github.io");
        assert!(parts.subdomain.is_empty());
    }

    #[test]
    fn test_extract_rejects_bare_suffix_and_unknown() {
        assert!(DomainEnhancer::extract("co.uk", &no_extra()).is_none());
        assert!(DomainEnhancer::extract("config.yaml", &no_extra()).is_none());
    }

    #[test]
    fn test_extra_suffixes() {
        let extra: HashSet<String> = ["esx".to_string()].into_iter().collect();
        let parts = DomainEnhancer::extract("web-esx-08.web.esx", &extra).unwrap();
        assert_eq!(parts.domain, "web");
        assert_eq!(parts.subdomain, "web-esx-08");
    }

    #[test]
    fn test_confidence_scoring() {
        let fqdn = DomainEnhancer::extract("api.example.com", &no_extra()).unwrap();
        assert!((DomainEnhancer::confidence(&fqdn) - 1.0).abs() < 1e-9);

        let short = DomainEnhancer::extract("ab.xyz", &no_extra()).unwrap();
        assert!((DomainEnhancer::confidence(&short) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_detect_labels() {
        let enhancer = DomainEnhancer::new();
        let spans = enhancer
            .detect(
                "fetch api.example.com then example.org, skip notes.txt",
                &EnhancerConfig::default(),
            )
            .unwrap();

        let found: Vec<(&str, &str)> = spans
            .iter()
            .map(|s| (s.value.as_str(), s.label.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![("api.example.com", "FQDN"), ("example.org", "DOMAIN")]
        );
    }
}
