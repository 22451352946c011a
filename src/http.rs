//! Shared HTTP agent configuration.
//!
//! Both the release listing and the archive digesting components issue
//! blocking requests through one lazily initialised agent.

use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout applied to every request, including body reads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent with every request; the release API rejects anonymous
/// clients without one.
pub(crate) const USER_AGENT: &str =
    concat!("provider-shim-gen/", env!("CARGO_PKG_VERSION"));

/// Shared `ureq` agent with request timeout configuration.
pub(crate) fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}
