//! Trip identity, the join key between the plan and change feeds.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::document::HierNode;

/// Tag of the trip-label sub-record of a stop event.
const TRIP_LABEL: &str = "tl";

/// One component of a [`TripIdentity`].
///
/// An attribute that is missing upstream is `Absent`; one that is present
/// but empty is `Present("")`. The two never compare equal.
#[derive(Debug, Clone)]
pub enum IdPart {
    Absent,
    Present(String),
}

impl IdPart {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(v) => IdPart::Present(v.to_string()),
            None => IdPart::Absent,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            IdPart::Absent => None,
            IdPart::Present(v) => Some(v),
        }
    }
}

impl PartialEq for IdPart {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Missing matches missing
            (IdPart::Absent, IdPart::Absent) => true,
            (IdPart::Present(a), IdPart::Present(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for IdPart {}

impl Hash for IdPart {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            IdPart::Absent => state.write_u8(0),
            IdPart::Present(v) => {
                state.write_u8(1);
                v.hash(state);
            }
        }
    }
}

impl From<&str> for IdPart {
    fn from(value: &str) -> Self {
        IdPart::Present(value.to_string())
    }
}

impl fmt::Display for IdPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPart::Absent => f.write_str("-"),
            IdPart::Present(v) => write!(f, "{v:?}"),
        }
    }
}

/// Identity of a scheduled trip, read from a stop event's trip label.
///
/// Two stop events with equal identities are treated as the same physical
/// trip. This includes two labels that are missing the same components,
/// or are missing entirely: such events still match each other. That is
/// deliberately permissive and can merge unrelated stop events, so the
/// change merger logs every multi-match it sees.
///
/// Identities are only ever compared and hashed; no order is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripIdentity {
    /// Train category (`c`), e.g. "ICE" or "S".
    pub category: IdPart,
    /// Train number (`n`).
    pub train_number: IdPart,
    /// Origin/filter code (`f`).
    pub origin: IdPart,
    /// Owner code (`o`).
    pub owner: IdPart,
}

impl TripIdentity {
    pub fn new(
        category: impl Into<IdPart>,
        train_number: impl Into<IdPart>,
        origin: impl Into<IdPart>,
        owner: impl Into<IdPart>,
    ) -> Self {
        Self {
            category: category.into(),
            train_number: train_number.into(),
            origin: origin.into(),
            owner: owner.into(),
        }
    }

    /// Extract the identity of a stop event from its trip-label sub-record.
    ///
    /// A stop without a trip label yields an all-absent identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_board::document::{TreeNode, normalize};
    /// use timetable_board::domain::{IdPart, TripIdentity};
    ///
    /// let stop = normalize(&TreeNode::parse_xml(r#"<s><tl c="ICE" n="598" o="80"/></s>"#).unwrap());
    /// let id = TripIdentity::from_stop(&stop);
    ///
    /// assert_eq!(id, TripIdentity::new("ICE", "598", IdPart::Absent, "80"));
    /// ```
    pub fn from_stop(stop: &HierNode) -> Self {
        let label = stop.child(TRIP_LABEL);
        let part = |name: &str| IdPart::from_attr(label.and_then(|tl| tl.attr(name)));

        Self {
            category: part("c"),
            train_number: part("n"),
            origin: part("f"),
            owner: part("o"),
        }
    }
}

impl fmt::Display for TripIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}/{})",
            self.category, self.train_number, self.origin, self.owner
        )
    }
}
