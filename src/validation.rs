//! Claims validation
//!
//! [`ValidationHelper`] checks the registered claims of a verified token
//! against a fixed policy. Every check runs on each pass and all failures are
//! reported together in one [`ClaimErrors`].

use crate::claims::{NumericDate, StandardClaims};
use crate::error::{ClaimError, ClaimErrors};

use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Source of the current time for claim checks
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> NumericDate;
}

/// Wall clock with sub-second precision
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NumericDate {
        NumericDate::from_system_time(SystemTime::now())
    }
}

/// A clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NumericDate);

impl FixedClock {
    pub fn new(now: impl Into<NumericDate>) -> Self {
        Self(now.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NumericDate {
        self.0
    }
}

/// Claims validation policy
///
/// # Defaults
///
/// - no leeway
/// - `aud`, `iss` and `sub` are not checked
/// - `exp` is optional
/// - system clock
#[derive(Debug, Clone)]
pub struct ValidationHelper {
    leeway: Duration,
    audience: Option<String>,
    issuer: Option<String>,
    subject: Option<String>,
    skip_audience: bool,
    skip_claims_validation: bool,
    require_expiration: bool,
    clock: Arc<dyn Clock>,
}

impl Default for ValidationHelper {
    fn default() -> Self {
        Self {
            leeway: Duration::ZERO,
            audience: None,
            issuer: None,
            subject: None,
            skip_audience: false,
            skip_claims_validation: false,
            require_expiration: false,
            clock: Arc::new(SystemClock),
        }
    }
}

impl ValidationHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerance applied to `exp`, `nbf` and `iat`
    pub fn leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Require `aud` to contain `audience`
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Require `iss` to equal `issuer`
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Require `sub` to equal `subject`
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Do not check `aud`, even when an audience is configured
    pub fn skip_audience(mut self) -> Self {
        self.skip_audience = true;
        self
    }

    /// Disable every claim check
    ///
    /// Signature verification is unaffected.
    pub fn skip_claims_validation(mut self) -> Self {
        self.skip_claims_validation = true;
        self
    }

    /// Reject tokens without an `exp` claim
    pub fn require_expiration(mut self) -> Self {
        self.require_expiration = true;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_claims_validation
    }

    /// Run every configured check against `claims`
    pub fn validate<C: StandardClaims + ?Sized>(&self, claims: &C) -> Result<(), ClaimErrors> {
        if self.skip_claims_validation {
            return Ok(());
        }

        let now = self.clock.now().as_seconds();
        let leeway = self.leeway.as_secs_f64();
        let mut errors = Vec::new();

        match claims.expiration() {
            Ok(Some(exp)) if now > exp.as_seconds() + leeway => {
                errors.push(ClaimError::Expired {
                    expired_at: exp.as_seconds(),
                    now,
                    leeway,
                });
            }
            Ok(Some(_)) => {}
            Ok(None) if self.require_expiration => {
                errors.push(ClaimError::MissingClaim("exp".to_string()));
            }
            Ok(None) => {}
            Err(e) => errors.push(e),
        }

        match claims.not_before() {
            Ok(Some(nbf)) if now < nbf.as_seconds() - leeway => {
                errors.push(ClaimError::NotYetValid {
                    not_before: nbf.as_seconds(),
                    now,
                    leeway,
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(e),
        }

        match claims.issued_at() {
            Ok(Some(iat)) if iat.as_seconds() > now + leeway => {
                errors.push(ClaimError::UsedBeforeIssued {
                    issued_at: iat.as_seconds(),
                    now,
                    leeway,
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(e),
        }

        if let (Some(expected), false) = (&self.audience, self.skip_audience) {
            match claims.audience() {
                Ok(Some(aud)) if aud.contains(expected) => {}
                Ok(found) => errors.push(ClaimError::AudienceMismatch {
                    expected: expected.clone(),
                    found: found.map(|aud| aud.into_vec()).unwrap_or_default(),
                }),
                Err(e) => errors.push(e),
            }
        }

        if let Some(expected) = &self.issuer {
            match claims.issuer() {
                Ok(Some(iss)) if iss == expected => {}
                Ok(found) => errors.push(ClaimError::IssuerMismatch {
                    expected: expected.clone(),
                    found: found.map(str::to_string),
                }),
                Err(e) => errors.push(e),
            }
        }

        if let Some(expected) = &self.subject {
            match claims.subject() {
                Ok(Some(sub)) if sub == expected => {}
                Ok(found) => errors.push(ClaimError::SubjectMismatch {
                    expected: expected.clone(),
                    found: found.map(str::to_string),
                }),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClaimErrors::new(errors))
        }
    }
}
