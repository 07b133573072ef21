//! The shared root-bracketing primitive (`spec.md` §4.C6, §9): interval
//! expansion until a sign change, then bisection to a fixed iteration count
//! and tolerance. Every Pañcāṅga boundary (Tithi end, Nakṣatra end, Yoga
//! end, Amāvāsyā, Pūrṇimā, Saṅkrānti) is a root of a well-behaved scalar
//! function of time, located by this one routine; `jyotisha-transits` reuses
//! it for slow-planet sign ingresses (`spec.md` §4.C8).

use jyotisha_core::JyotishaError;

/// `spec.md` §9: "bisecting ... to a fixed iteration count (>= 60) and
/// tolerance (~1e-5 days)".
pub const DEFAULT_MAX_BISECTIONS: usize = 64;
pub const DEFAULT_TOLERANCE_DAYS: f64 = 1e-5;
pub const DEFAULT_MAX_EXPANSIONS: usize = 48;

/// Finds a root of `f` at or after `t0` (a Julian Day), by expanding a
/// search interval forward from `t0` until `f` changes sign, then bisecting
/// to `tolerance_days`. `f` is expected to be monotonic across the bracket
/// it is evaluated in — true of every boundary function in this crate,
/// each of which tracks a single well-behaved astronomical quantity over a
/// span of at most a few days.
///
/// Exceeding `max_expansions` without finding a sign change, or failing to
/// converge within `max_bisections`, is an [`JyotishaError::InvariantViolation`]
/// — `spec.md` §7 treats a non-convergent bounded search as a programmer
/// error, never a silent approximation.
pub fn find_boundary<F>(
    mut f: F,
    t0: f64,
    initial_step_days: f64,
    max_expansions: usize,
    max_bisections: usize,
    tolerance_days: f64,
) -> Result<f64, JyotishaError>
where
    F: FnMut(f64) -> Result<f64, JyotishaError>,
{
    let mut lo = t0;
    let mut f_lo = f(lo)?;
    let mut step = initial_step_days;
    let mut hi = lo;
    let mut f_hi = f_lo;
    let mut bracketed = f_lo == 0.0;

    if !bracketed {
        for _ in 0..max_expansions {
            hi = lo + step;
            f_hi = f(hi)?;
            if f_hi == 0.0 || f_hi.signum() != f_lo.signum() {
                bracketed = true;
                break;
            }
            lo = hi;
            f_lo = f_hi;
            step *= 1.6;
        }
    }

    if !bracketed {
        return Err(JyotishaError::invariant(format!(
            "root bracketing found no sign change within {max_expansions} expansions from t0={t0}"
        )));
    }

    for _ in 0..max_bisections {
        if (hi - lo).abs() < tolerance_days {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
            f_hi = f_mid;
        }
    }

    if (hi - lo).abs() >= tolerance_days * 10.0 {
        return Err(JyotishaError::invariant(format!(
            "root bracketing failed to converge to {tolerance_days} days within {max_bisections} bisections \
             (final bracket width {})",
            (hi - lo).abs()
        )));
    }

    Ok(0.5 * (lo + hi))
}

/// Convenience wrapper over [`find_boundary`] using the spec's default
/// iteration/tolerance budget.
pub fn find_boundary_default<F>(f: F, t0: f64, initial_step_days: f64) -> Result<f64, JyotishaError>
where
    F: FnMut(f64) -> Result<f64, JyotishaError>,
{
    find_boundary(
        f,
        t0,
        initial_step_days,
        DEFAULT_MAX_EXPANSIONS,
        DEFAULT_MAX_BISECTIONS,
        DEFAULT_TOLERANCE_DAYS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_root_of_a_simple_linear_function() {
        // f(t) = t - 5.3; root at t = 5.3.
        let root = find_boundary_default(|t| Ok(t - 5.3), 0.0, 1.0).unwrap();
        assert!((root - 5.3).abs() < DEFAULT_TOLERANCE_DAYS);
    }

    #[test]
    fn finds_the_root_of_a_slow_moving_function_requiring_expansion() {
        // Root far beyond the initial step; must expand geometrically.
        let root = find_boundary_default(|t| Ok(t - 37.0), 0.0, 0.5).unwrap();
        assert!((root - 37.0).abs() < DEFAULT_TOLERANCE_DAYS);
    }

    #[test]
    fn propagates_an_error_raised_by_the_function_being_bracketed() {
        let err = find_boundary_default(
            |t| {
                if t > 2.0 {
                    Err(JyotishaError::astro_event_unavailable("boom"))
                } else {
                    Ok(t - 10.0)
                }
            },
            0.0,
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, JyotishaError::AstroEventUnavailable(_)));
    }

    #[test]
    fn no_sign_change_within_expansions_is_an_invariant_violation() {
        // f is always positive: never brackets a root.
        let err = find_boundary(|_| Ok(1.0), 0.0, 1.0, 5, 10, 1e-5).unwrap_err();
        assert!(matches!(err, JyotishaError::InvariantViolation(_)));
    }
}
