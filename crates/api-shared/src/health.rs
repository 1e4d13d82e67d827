use crate::models::HealthRes;

/// Plain-text body served at `/`.
pub const LIVENESS_MESSAGE: &str = "DRUG INTERACTION CHECKER API running successfully!";

/// Simple health service shared by the server and the client
///
/// This service provides a standardised way to check the health status of the checker.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Drug interaction checker is alive".into(),
        }
    }

    /// Whether a body returned from `/` is the expected liveness text.
    pub fn is_live(body: &str) -> bool {
        body.trim() == LIVENESS_MESSAGE
    }
}
