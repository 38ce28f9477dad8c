//! # Quote Status
//!
//! Quote lifecycle state machine.
//!
//! # State Machine
//!
//! ```text
//! Draft → Submitted → Generating → Ready
//!                         ↓   ↑
//!                        Failed (retry)
//! ```
//!
//! A quote stays editable until its files are ready: `Draft`, `Submitted`
//! and `Generating` accept item and description changes; `Ready` and
//! `Failed` do not.
//!
//! # Examples
//!
//! ```
//! use oficina_quotes::domain::value_objects::quote_status::{
//!     is_editable, is_valid_transition, QuoteStatus,
//! };
//!
//! assert!(is_valid_transition(QuoteStatus::Draft, QuoteStatus::Submitted));
//! assert!(!is_valid_transition(QuoteStatus::Draft, QuoteStatus::Generating));
//! assert!(is_editable(QuoteStatus::Generating));
//! assert!(!is_editable(QuoteStatus::Ready));
//! ```

use crate::domain::value_objects::enums::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    /// Being drafted.
    #[default]
    Draft,

    /// Sent for file generation; still editable until generation starts.
    Submitted,

    /// Files (PDF/XLSX) are being generated.
    Generating,

    /// Files are ready for download (terminal).
    Ready,

    /// File generation failed; may be retried.
    Failed,
}

impl QuoteStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::Submitted,
        Self::Generating,
        Self::Ready,
        Self::Failed,
    ];

    /// Returns true if this status can transition to the target status.
    ///
    /// - Draft → Submitted
    /// - Submitted → Generating
    /// - Generating → Ready, Failed
    /// - Failed → Generating
    /// - Ready → (none)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Generating)
                | (Self::Generating, Self::Ready)
                | (Self::Generating, Self::Failed)
                | (Self::Failed, Self::Generating)
        )
    }

    /// Returns the valid next statuses from this status.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Draft => vec![Self::Submitted],
            Self::Submitted => vec![Self::Generating],
            Self::Generating => vec![Self::Ready, Self::Failed],
            Self::Ready => vec![],
            Self::Failed => vec![Self::Generating],
        }
    }

    /// Returns true if items and description may still change.
    #[inline]
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted | Self::Generating)
    }

    /// Returns true if no further transition is possible.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns the wire name of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Generating => "GENERATING",
            Self::Ready => "READY",
            Self::Failed => "FAILED",
        }
    }
}

/// Returns true if `from` may transition to `to`.
#[inline]
#[must_use]
pub const fn is_valid_transition(from: QuoteStatus, to: QuoteStatus) -> bool {
    from.can_transition_to(to)
}

/// Returns true if a quote in `status` may be edited.
#[inline]
#[must_use]
pub const fn is_editable(status: QuoteStatus) -> bool {
    status.is_editable()
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "GENERATING" => Ok(Self::Generating),
            "READY" => Ok(Self::Ready),
            "FAILED" => Ok(Self::Failed),
            _ => Err(ParseEnumError::InvalidValue("QuoteStatus", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod transitions {
        use super::*;

        #[test]
        fn allowed_transitions() {
            let allowed = [
                (QuoteStatus::Draft, QuoteStatus::Submitted),
                (QuoteStatus::Submitted, QuoteStatus::Generating),
                (QuoteStatus::Generating, QuoteStatus::Ready),
                (QuoteStatus::Generating, QuoteStatus::Failed),
                (QuoteStatus::Failed, QuoteStatus::Generating),
            ];

            for (from, to) in allowed {
                assert!(is_valid_transition(from, to), "{from} -> {to}");
            }
        }

        #[test]
        fn rejected_transitions() {
            let invalid = [
                (QuoteStatus::Draft, QuoteStatus::Generating),
                (QuoteStatus::Submitted, QuoteStatus::Ready),
                (QuoteStatus::Ready, QuoteStatus::Generating),
                (QuoteStatus::Ready, QuoteStatus::Submitted),
                (QuoteStatus::Failed, QuoteStatus::Ready),
                (QuoteStatus::Draft, QuoteStatus::Draft),
            ];

            for (from, to) in invalid {
                assert!(!is_valid_transition(from, to), "{from} -> {to}");
            }
        }

        #[test]
        fn valid_transitions_agree_with_can_transition_to() {
            for from in QuoteStatus::ALL {
                for to in QuoteStatus::ALL {
                    assert_eq!(
                        from.valid_transitions().contains(&to),
                        from.can_transition_to(to),
                        "{from} -> {to}"
                    );
                }
            }
        }

        #[test]
        fn ready_is_the_only_terminal_status() {
            for status in QuoteStatus::ALL {
                assert_eq!(status.is_terminal(), status.valid_transitions().is_empty());
            }
            assert!(QuoteStatus::Ready.is_terminal());
        }
    }

    mod editability {
        use super::*;

        #[test]
        fn editable_until_files_are_ready() {
            assert!(is_editable(QuoteStatus::Draft));
            assert!(is_editable(QuoteStatus::Submitted));
            assert!(is_editable(QuoteStatus::Generating));
            assert!(!is_editable(QuoteStatus::Ready));
            assert!(!is_editable(QuoteStatus::Failed));
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn parses_wire_names() {
            assert_eq!("draft".parse::<QuoteStatus>().unwrap(), QuoteStatus::Draft);
            assert_eq!(
                "GENERATING".parse::<QuoteStatus>().unwrap(),
                QuoteStatus::Generating
            );
            assert!("ARCHIVED".parse::<QuoteStatus>().is_err());
        }

        #[test]
        fn default_is_draft() {
            assert_eq!(QuoteStatus::default(), QuoteStatus::Draft);
        }

        #[test]
        fn serde_uses_wire_names() {
            let json = serde_json::to_string(&QuoteStatus::Submitted).unwrap();
            assert_eq!(json, "\"SUBMITTED\"");
        }
    }
}
