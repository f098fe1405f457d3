//! Macro for implementing string conversions for closed wire enums
//!
//! Remote API values such as report formats travel as lowercase strings. The
//! macro gives such an enum a single source of truth for `as_str`, `Display`
//! and case-insensitive `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use adops_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Display,
//!     Video,
//! }
//!
//! impl_wire_enum_conversions!(Channel {
//!     Display => "display",
//!     Video => "video",
//! });
//!
//! assert_eq!(Channel::Video.as_str(), "video");
//! assert_eq!("DISPLAY".parse::<Channel>().unwrap(), Channel::Display);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for wire enums
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
