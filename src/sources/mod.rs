/// Sources module
///
/// Token sources the relay can authenticate with. Only the service account
/// JWT-bearer exchange is supported.
pub mod oauth2;

pub use oauth2::ServiceAccountIssuer;
