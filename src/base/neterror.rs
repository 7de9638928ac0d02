use thiserror::Error;

/// DNS response code for a server failure (SERVFAIL).
pub const RCODE_SERVER_FAILURE: u16 = 2;
/// DNS response code for a non-existent domain (NXDOMAIN).
pub const RCODE_NAME_ERROR: u16 = 3;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Resolution Errors
    #[error("Name not resolved: {domain}")]
    NameNotResolved { domain: String },
    #[error("Name resolution failed for {domain}: {reason}")]
    NameResolutionFailed { domain: String, reason: String },
    #[error("DNS malformed response for {domain}")]
    DnsMalformedResponse { domain: String },
    #[error("DNS server failed for {domain}")]
    DnsServerFailed { domain: String },
    #[error("DNS timed out for {domain}")]
    DnsTimedOut { domain: String },

    // Cache Errors
    #[error("DNS cache TTL must be greater than zero and representable as a deadline")]
    InvalidCacheTtl,
    #[error("DNS cache check interval is too large to schedule")]
    InvalidCheckInterval,
    #[error("Empty address list for {domain}")]
    EmptyAddressList { domain: String },
    #[error("Invalid host name")]
    InvalidHostName,
    #[error("DNS cache closed")]
    CacheClosed,
    #[error("No tokio runtime available for the cache sweeper")]
    NoRuntime,
    #[error("Invalid DNS cache settings: {reason}")]
    InvalidSettings { reason: String },
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolved { .. } => -105,
            NetError::NameResolutionFailed { .. } => -137,
            NetError::DnsMalformedResponse { .. } => -800,
            NetError::DnsServerFailed { .. } => -802,
            NetError::DnsTimedOut { .. } => -803,
            // Cache errors (custom codes starting at -900)
            NetError::InvalidCacheTtl => -900,
            NetError::EmptyAddressList { .. } => -901,
            NetError::InvalidHostName => -902,
            NetError::CacheClosed => -903,
            NetError::NoRuntime => -904,
            NetError::InvalidSettings { .. } => -905,
            NetError::InvalidCheckInterval => -906,
        }
    }

    /// Returns true if the resolution capability failed for a host.
    ///
    /// These errors are handed back to callers verbatim and never cached.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            NetError::NameNotResolved { .. }
                | NetError::NameResolutionFailed { .. }
                | NetError::DnsMalformedResponse { .. }
                | NetError::DnsServerFailed { .. }
                | NetError::DnsTimedOut { .. }
        )
    }

    /// The domain a resolution error refers to, if any.
    pub fn domain(&self) -> Option<&str> {
        match self {
            NetError::NameNotResolved { domain }
            | NetError::NameResolutionFailed { domain, .. }
            | NetError::DnsMalformedResponse { domain }
            | NetError::DnsServerFailed { domain }
            | NetError::DnsTimedOut { domain }
            | NetError::EmptyAddressList { domain } => Some(domain),
            _ => None,
        }
    }

    /// Map a DNS response code to the matching resolution error.
    pub fn from_rcode(domain: impl Into<String>, rcode: u16) -> Self {
        let domain = domain.into();
        match rcode {
            RCODE_SERVER_FAILURE => NetError::DnsServerFailed { domain },
            RCODE_NAME_ERROR => NetError::NameNotResolved { domain },
            1 => NetError::DnsMalformedResponse { domain },
            _ => NetError::NameResolutionFailed {
                domain,
                reason: format!("rcode {}", rcode),
            },
        }
    }

    pub fn dns_failed(domain: impl Into<String>, err: std::io::Error) -> Self {
        let domain = domain.into();
        match err.kind() {
            std::io::ErrorKind::TimedOut => NetError::DnsTimedOut { domain },
            std::io::ErrorKind::NotFound => NetError::NameNotResolved { domain },
            _ => NetError::NameResolutionFailed {
                domain,
                reason: err.to_string(),
            },
        }
    }
}
