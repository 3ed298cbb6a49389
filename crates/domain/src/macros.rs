//! Macro for implementing Display and FromStr for string-backed enums
//!
//! Resource kinds and HTTP update methods travel through configuration files
//! and log lines as lowercase strings. This macro keeps both directions of
//! that conversion in one place.
//!
//! # Example
//!
//! ```rust
//! use godata_domain::impl_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Gender {
//!     Male,
//!     Female,
//! }
//!
//! impl_str_conversions!(Gender {
//!     Male => "male",
//!     Female => "female",
//! });
//!
//! assert_eq!(Gender::Male.to_string(), "male");
//! assert_eq!("FEMALE".parse::<Gender>(), Ok(Gender::Female));
//! ```

/// Implements Display and FromStr for a fieldless enum
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
