//! Domain policy for outbound scraping.
//!
//! Two independent policies live here. Direct scrape requests carry
//! user-supplied URLs and must match an explicit allowlist before any fetch.
//! Links discovered through web search are engine-supplied and only pass a
//! coarse denylist, since those targets cannot be pre-vetted.

use reqwest::Url;

#[derive(Debug, Clone)]
pub struct DomainGate {
    allowed: Vec<String>,
    excluded: Vec<String>,
}

impl DomainGate {
    pub fn new(allowed: Vec<String>, excluded: Vec<String>) -> Self {
        DomainGate { allowed, excluded }
    }

    /// True iff the URL's hostname contains one of the trusted recipe-site
    /// fragments. Unparseable URLs are never allowed.
    pub fn is_allowed(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.allowed.iter().any(|d| host.contains(d.as_str())),
            None => false,
        }
    }

    /// True when a discovered link should be dropped during search triage.
    pub fn is_excluded(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.excluded.iter().any(|d| host.contains(d.as_str())),
            None => true,
        }
    }

    /// True when the host is a known recipe site; used to move discovered
    /// links to the front of the candidate list.
    pub fn is_known_recipe_site(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.allowed.iter().any(|d| host.contains(d.as_str())),
            None => false,
        }
    }
}

/// Hostname with any leading "www." stripped, or `None` for junk input.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
