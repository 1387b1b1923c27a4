//! Stable string identifiers
//!
//! Every entity is keyed by the identifier assigned by the upstream store.
//! The newtypes keep the four id spaces from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier
            #[inline]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Raw identifier
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the raw identifier
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Worldview identifier
    WorldviewId
);

define_id!(
    /// Outcome identifier
    OutcomeId
);

define_id!(
    /// Problem identifier
    ProblemId
);

define_id!(
    /// Project identifier
    ProjectId
);

define_id!(
    /// Problem category identifier
    CategoryId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_display_is_raw_value() {
        let id = OutcomeId::new("rec123");
        assert_eq!(id.to_string(), "rec123");
        assert_eq!(id.as_str(), "rec123");
    }

    #[test]
    fn id_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(WorldviewId::from("w1"));

        assert!(set.contains("w1"));
        assert!(!set.contains("w2"));
    }

    #[test]
    fn id_serializes_transparently() {
        let id = ProjectId::new("p-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-7\"");

        let back: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
