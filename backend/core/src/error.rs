use thiserror::Error;

/// Failure causes raised inside ipscout components.
///
/// These never reach the caller of the agent directly: tool failures are
/// folded into labeled result strings and inference failures into the
/// `unknown` decision.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("{provider} returned HTTP {status}")]
    ProviderStatus { provider: String, status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("whois error: {0}")]
    Whois(String),

    #[error("configuration error: {0}")]
    Config(String),
}
