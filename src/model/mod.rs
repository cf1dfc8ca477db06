//! Models shared between the server and the client.
//!
//! Everything in here compiles for every target: DTOs exchanged over the HTTP API, the
//! status enumerations with their transition tables, role lookups, and the change events
//! published on the realtime channel.

/// Defines a fieldless enum that travels as a fixed snake_case string.
///
/// Generates `as_str`, `Display`, `FromStr` and an `ALL` slice so the same value can be
/// stored in a text column, sent as JSON and parsed from a query string.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string stored in the database and sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err($crate::model::ParseEnumError {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod api;
pub mod appointment;
pub mod document;
pub mod incident;
pub mod notification;
pub mod realtime;
pub mod resident;
pub mod stats;
pub mod user;
pub mod workflow;

/// Returned when a stored or submitted string is not a known variant of an enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for ParseEnumError {}

/// Returned when a required field of a submitted form is missing or blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is required", self.field)
    }
}

impl std::error::Error for ValidationError {}

/// Fails with [`ValidationError`] when `value` is empty or whitespace only.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError { field });
    }

    Ok(())
}

/// Like [`require_non_blank`] but only checks values present in a patch.
pub fn require_non_blank_if_set(
    field: &'static str,
    value: Option<&String>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => require_non_blank(field, value),
        None => Ok(()),
    }
}
