use reqwest::StatusCode;
use thiserror::Error;

/// Everything a gateway call can fail with.
///
/// `Http`, `Status` and `MalformedResponse` are transport failures (see
/// [`DpoError::is_transport`]). `GatewayRejected` is a business rejection and
/// displays as the gateway's own explanation text.
#[derive(Debug, Error)]
pub enum DpoError {
    #[error("DPO request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("DPO responded with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("DPO response is not a valid API3G document: {0}")]
    MalformedResponse(#[from] quick_xml::DeError),
    #[error("{explanation}")]
    GatewayRejected { code: String, explanation: String },
    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("Failed to encode DPO request: {0}")]
    Serialize(#[from] quick_xml::SeError),
}

impl DpoError {
    /// True for network failures, non-2xx statuses and unparsable bodies.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DpoError::Http(_) | DpoError::Status { .. } | DpoError::MalformedResponse(_)
        )
    }

    /// True when the gateway answered with a non-`000` result code.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DpoError::GatewayRejected { .. })
    }
}
