//! Typed identifiers for type-safe entity references.
//!
//! Using typed identifiers prevents accidentally passing a `CourseCode` where a
//! `StudentIndex` is expected. All registrar identifiers are natural keys
//! (strings chosen by staff), not generated values.

use serde::{Deserialize, Serialize};

/// Macro to generate typed string identifier wrappers.
macro_rules! typed_key {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_key!(StudentIndex, "Student index number (e.g. `123/22`).");
typed_key!(CourseCode, "Course code (e.g. `CS101`).");
typed_key!(
    StaffId,
    "Identifier of the staff member (referent) performing an operation."
);
