//! The `PhoneValidator` trait: the seam to the external phone-validation
//! service used to enrich contacts on read.

use std::future::Future;

use serde::Deserialize;

/// The subset of a validation response the contact view needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhoneInfo {
  /// Country of origin for the number. Empty when the service omits it.
  #[serde(default)]
  pub country: String,
}

/// Looks up metadata for a phone number.
///
/// Implementations must not fall back to a default on failure: any error is
/// surfaced to the caller, which aborts the enclosing request.
pub trait PhoneValidator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn lookup<'a>(
    &'a self,
    phone: &'a str,
  ) -> impl Future<Output = Result<PhoneInfo, Self::Error>> + Send + 'a;
}
