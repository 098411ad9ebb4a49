//! Macro for implementing Display and FromStr for wire-named enums
//!
//! Generates both conversions from one variant-to-string table so the
//! rendered name and the accepted name can never drift apart.
//!
//! # Example
//!
//! ```rust
//! use keystone_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Phone,
//! }
//!
//! impl_wire_name_conversions!(Channel {
//!     Email => "email",
//!     Phone => "phone",
//! });
//!
//! assert_eq!(Channel::Phone.to_string(), "phone");
//! assert_eq!("EMAIL".parse::<Channel>(), Ok(Channel::Email));
//! ```

/// Implements Display and FromStr for an enum from a name table
///
/// - Display writes the mapped string verbatim
/// - FromStr matches case-insensitively; mapped strings must be lowercase
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
