//! Setpoint profiles
//!
//! A profile produces the target value for a control loop as a function of
//! elapsed simulation time. Profiles are either constant or piecewise
//! linear schedules. Schedules are validated when they are built, never
//! during evaluation: a profile that deserialised from a scenario file
//! must have [`SetpointProfile::validate`] called on it before its first
//! evaluation (the simulation driver does this when it is constructed).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use util::maths::lin_map;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Tolerance used when checking that neighbouring segments join.
const CONTIGUITY_TOL_S: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One linear segment of a piecewise schedule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Segment {
    /// Time at which this segment starts, in seconds.
    pub start_s: f64,

    /// Time at which this segment ends, in seconds.
    pub end_s: f64,

    /// Target value at the start of the segment.
    pub start_value: f64,

    /// Target value at the end of the segment.
    pub end_value: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A target schedule for a control loop.
///
/// Deserialises from scenario parameter files as a tagged table, for
/// example `{ kind = "constant", value = 10.0 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetpointProfile {
    /// A single fixed target for the whole run.
    Constant {
        value: f64,
    },

    /// An ordered, contiguous sequence of linear segments.
    ///
    /// Before the first segment the schedule clamps to the first segment's
    /// start value, after the last segment it holds the last segment's end
    /// value forever.
    PiecewiseLinear {
        segments: Vec<Segment>,
    },
}

/// Possible errors raised when building an invalid profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("A piecewise schedule must contain at least one segment")]
    EmptySchedule,

    #[error("Segment {0} must end after it starts")]
    NonPositiveDuration(usize),

    #[error("Segment {0} contains a non-finite time or value")]
    NonFiniteSegment(usize),

    #[error("Profile value is not finite: {0}")]
    NonFiniteValue(f64),

    #[error("Segments {0} and {1} are not contiguous")]
    NonContiguous(usize, usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SetpointProfile {
    /// Build a constant profile.
    pub fn constant(value: f64) -> Result<Self, ProfileError> {
        let profile = SetpointProfile::Constant { value };
        profile.validate()?;
        Ok(profile)
    }

    /// Build a piecewise linear profile, validating the schedule.
    pub fn piecewise_linear(segments: Vec<Segment>) -> Result<Self, ProfileError> {
        let profile = SetpointProfile::PiecewiseLinear { segments };
        profile.validate()?;
        Ok(profile)
    }

    /// Validate the profile.
    ///
    /// A piecewise schedule must be non-empty and its segments must be
    /// finite, of positive duration, contiguous and non-overlapping.
    pub fn validate(&self) -> Result<(), ProfileError> {
        match self {
            SetpointProfile::Constant { value } => {
                if !value.is_finite() {
                    return Err(ProfileError::NonFiniteValue(*value));
                }
            }
            SetpointProfile::PiecewiseLinear { segments } => {
                if segments.is_empty() {
                    return Err(ProfileError::EmptySchedule);
                }

                for (i, seg) in segments.iter().enumerate() {
                    if !seg.start_s.is_finite()
                        || !seg.end_s.is_finite()
                        || !seg.start_value.is_finite()
                        || !seg.end_value.is_finite()
                    {
                        return Err(ProfileError::NonFiniteSegment(i));
                    }
                    if seg.end_s <= seg.start_s {
                        return Err(ProfileError::NonPositiveDuration(i));
                    }
                }

                // Neighbouring segments must join exactly, no gaps and no
                // overlaps
                for i in 1..segments.len() {
                    if (segments[i].start_s - segments[i - 1].end_s).abs() > CONTIGUITY_TOL_S {
                        return Err(ProfileError::NonContiguous(i - 1, i));
                    }
                }
            }
        }

        Ok(())
    }

    /// Evaluate the profile at the given time.
    ///
    /// The schedule must have passed [`SetpointProfile::validate`], an
    /// empty schedule will panic here rather than produce a value.
    pub fn target(&self, time_s: f64) -> f64 {
        match self {
            SetpointProfile::Constant { value } => *value,
            SetpointProfile::PiecewiseLinear { segments } => {
                let first = &segments[0];
                if time_s < first.start_s {
                    return first.start_value;
                }

                for seg in segments {
                    if time_s < seg.end_s {
                        return lin_map(
                            (seg.start_s, seg.end_s),
                            (seg.start_value, seg.end_value),
                            time_s,
                        );
                    }
                }

                segments[segments.len() - 1].end_value
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// A typical dive schedule: descend, hold, ascend to mid depth, hold.
    fn dive_segments() -> Vec<Segment> {
        vec![
            Segment { start_s: 0.0, end_s: 5.0, start_value: 0.0, end_value: 10.0 },
            Segment { start_s: 5.0, end_s: 15.0, start_value: 10.0, end_value: 10.0 },
            Segment { start_s: 15.0, end_s: 20.0, start_value: 10.0, end_value: 5.0 },
            Segment { start_s: 20.0, end_s: 30.0, start_value: 5.0, end_value: 5.0 },
        ]
    }

    #[test]
    fn test_constant() -> Result<(), ProfileError> {
        let profile = SetpointProfile::constant(10.0)?;

        assert_eq!(profile.target(0.0), 10.0);
        assert_eq!(profile.target(1e6), 10.0);

        assert!(SetpointProfile::constant(std::f64::NAN).is_err());

        Ok(())
    }

    #[test]
    fn test_piecewise_evaluation() -> Result<(), ProfileError> {
        let profile = SetpointProfile::piecewise_linear(dive_segments())?;

        // Ramp interpolation
        assert_eq!(profile.target(0.0), 0.0);
        assert!((profile.target(2.5) - 5.0).abs() < 1e-9);
        assert!((profile.target(17.5) - 7.5).abs() < 1e-9);

        // Hold segments
        assert_eq!(profile.target(10.0), 10.0);
        assert_eq!(profile.target(25.0), 5.0);

        // Before the first segment clamps, after the last holds
        assert_eq!(profile.target(-1.0), 0.0);
        assert_eq!(profile.target(1e6), 5.0);

        Ok(())
    }

    #[test]
    fn test_rejects_empty_schedule() {
        assert!(matches!(
            SetpointProfile::piecewise_linear(vec![]),
            Err(ProfileError::EmptySchedule)
        ));
    }

    #[test]
    fn test_rejects_non_contiguous_schedule() {
        let mut segments = dive_segments();

        // Open a gap between the first two segments
        segments[1].start_s = 6.0;
        assert!(matches!(
            SetpointProfile::piecewise_linear(segments),
            Err(ProfileError::NonContiguous(0, 1))
        ));

        // Overlap the last two segments
        let mut segments = dive_segments();
        segments[3].start_s = 19.0;
        assert!(matches!(
            SetpointProfile::piecewise_linear(segments),
            Err(ProfileError::NonContiguous(2, 3))
        ));
    }

    #[test]
    fn test_rejects_degenerate_segments() {
        let segments = vec![Segment {
            start_s: 5.0,
            end_s: 5.0,
            start_value: 0.0,
            end_value: 1.0,
        }];
        assert!(matches!(
            SetpointProfile::piecewise_linear(segments),
            Err(ProfileError::NonPositiveDuration(0))
        ));

        let segments = vec![Segment {
            start_s: 0.0,
            end_s: std::f64::INFINITY,
            start_value: 0.0,
            end_value: 1.0,
        }];
        assert!(matches!(
            SetpointProfile::piecewise_linear(segments),
            Err(ProfileError::NonFiniteSegment(0))
        ));
    }
}
