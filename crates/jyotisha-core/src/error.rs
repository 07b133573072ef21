//! The error taxonomy of §7: exactly four variants, no HTTP/cache/auth noise.

/// The one error type shared by every core component.
///
/// The core never catches an astronomical error to paper over it: inputs are
/// validated once at the boundary, then trusted. Every root-search has a
/// bounded iteration count; exceeding it is an [`JyotishaError::InvariantViolation`],
/// never a silent non-convergence.
#[derive(Debug, thiserror::Error)]
pub enum JyotishaError {
    /// Malformed date/time/timezone/coordinates, a divisional number outside
    /// the allowed Dn set, or a longitude outside `[0, 360)`. Surfaced to the
    /// caller as-is; never retried internally.
    #[error("input error: {0}")]
    InputError(String),

    /// The ephemeris data file is absent or unreadable at startup. Fatal —
    /// the process must not start with this error pending.
    #[error("ephemeris data unavailable: {0}")]
    EphemerisUnavailable(String),

    /// Sunrise/sunset (or another Pañcāṅga boundary) computation returned no
    /// event for the given day and latitude (e.g. polar regions). No
    /// fallback to an approximate time is permitted.
    #[error("astronomical event unavailable: {0}")]
    AstroEventUnavailable(String),

    /// A §4.C5 chart invariant failed to hold. A programmer error: the
    /// request is aborted and the failure carries the chart state that
    /// triggered it. Never silently corrected.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl JyotishaError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InputError(msg.into())
    }

    pub fn ephemeris_unavailable(msg: impl Into<String>) -> Self {
        Self::EphemerisUnavailable(msg.into())
    }

    pub fn astro_event_unavailable(msg: impl Into<String>) -> Self {
        Self::AstroEventUnavailable(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

pub type JyotishaResult<T> = Result<T, JyotishaError>;
