//! Enumerated constants and the tokens ffmpeg expects for them.
//!
//! Every enumerated option value is declared with [`command_enum!`], which
//! generates a field-less enum together with a lazily built [`TokenTable`].
//! The table is filled once, on first use, and never mutated afterwards.
//!
//! The token of a variant is its identifier lowercased with underscores
//! removed, unless the declaration attaches an explicit alias:
//!
//! ```
//! use filterkit_core::command_enum;
//! use filterkit_core::token::CommandToken;
//!
//! command_enum! {
//!     pub enum Interpolation {
//!         Nearest,
//!         FastBilinear => "fast_bilinear",
//!         TwoPoint => "2p",
//!     }
//! }
//!
//! assert_eq!(Interpolation::Nearest.token(), "nearest");
//! assert_eq!(Interpolation::FastBilinear.token(), "fast_bilinear");
//! assert_eq!(Interpolation::TwoPoint.token(), "2p");
//! assert_eq!(Interpolation::from_token("2p"), Some(Interpolation::TwoPoint));
//! ```

use std::collections::HashMap;

#[doc(hidden)]
pub use once_cell::sync::Lazy;

/// Immutable ordinal <-> token lookup for one enumeration.
#[derive(Debug)]
pub struct TokenTable {
    identifiers: Vec<&'static str>,
    tokens: Vec<String>,
    by_token: HashMap<String, usize>,
}

impl TokenTable {
    /// Builds a table from `(identifier, alias)` pairs in declaration order.
    pub fn build(entries: &[(&'static str, Option<&'static str>)]) -> Self {
        let mut identifiers = Vec::with_capacity(entries.len());
        let mut tokens = Vec::with_capacity(entries.len());
        let mut by_token = HashMap::with_capacity(entries.len());

        for (ordinal, (identifier, alias)) in entries.iter().enumerate() {
            let token = match alias {
                Some(alias) => (*alias).to_string(),
                None => normalize_identifier(identifier),
            };
            // First declaration wins if two variants collapse to one token.
            by_token.entry(token.clone()).or_insert(ordinal);
            identifiers.push(*identifier);
            tokens.push(token);
        }

        Self {
            identifiers,
            tokens,
            by_token,
        }
    }

    /// Token of the variant at `ordinal`.
    pub fn token(&self, ordinal: usize) -> &str {
        &self.tokens[ordinal]
    }

    /// Declared identifier of the variant at `ordinal`.
    pub fn identifier(&self, ordinal: usize) -> &'static str {
        self.identifiers[ordinal]
    }

    /// Ordinal of the variant rendered as `token`.
    pub fn ordinal_of(&self, token: &str) -> Option<usize> {
        self.by_token.get(token).copied()
    }

    /// Whether `token` belongs to this enumeration.
    pub fn contains(&self, token: &str) -> bool {
        self.by_token.contains_key(token)
    }

    /// All tokens in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Default token for an identifier: lowercase, underscores dropped.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// An enumerated constant with a canonical ffmpeg token.
///
/// Implemented by [`command_enum!`]; there is normally no reason to
/// implement it by hand.
pub trait CommandToken: Copy + Sized + 'static {
    /// The shared, immutable table for this enumeration.
    fn token_table() -> &'static TokenTable;

    /// Every variant in declaration order.
    fn variants() -> &'static [Self];

    /// Position of this variant in declaration order.
    fn ordinal(self) -> usize;

    /// Token ffmpeg expects for this variant.
    fn token(self) -> &'static str {
        Self::token_table().token(self.ordinal())
    }

    /// Identifier the variant was declared with.
    fn identifier(self) -> &'static str {
        Self::token_table().identifier(self.ordinal())
    }

    /// Variant rendered as `token`, if any.
    fn from_token(token: &str) -> Option<Self> {
        Self::token_table()
            .ordinal_of(token)
            .map(|ordinal| Self::variants()[ordinal])
    }

    /// All tokens of this enumeration.
    fn tokens() -> Vec<&'static str> {
        Self::token_table().tokens().collect()
    }
}

/// Declares an enumeration whose variants render as ffmpeg tokens.
///
/// A variant may carry `=> "alias"` to override the default token.
#[macro_export]
macro_rules! command_enum {
    (@alias) => {
        ::std::option::Option::None
    };
    (@alias $alias:literal) => {
        ::std::option::Option::Some($alias)
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(=> $alias:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::token::CommandToken for $name {
            fn token_table() -> &'static $crate::token::TokenTable {
                static TABLE: $crate::token::Lazy<$crate::token::TokenTable> =
                    $crate::token::Lazy::new(|| {
                        $crate::token::TokenTable::build(&[
                            $(
                                (
                                    stringify!($variant),
                                    $crate::command_enum!(@alias $($alias)?),
                                ),
                            )+
                        ])
                    });
                &TABLE
            }

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::token::CommandToken::token(*self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    command_enum! {
        #[allow(non_camel_case_types)]
        enum Interpolation {
            Nearest,
            FastBilinear => "fast_bilinear",
            TWO_POINT => "2p",
            Bt470m => "470m",
            Bt709 => "709",
            SPLINE_16,
        }
    }

    #[test]
    fn test_default_token_is_normalized_identifier() {
        assert_eq!(Interpolation::Nearest.token(), "nearest");
        assert_eq!(Interpolation::SPLINE_16.token(), "spline16");
    }

    #[test]
    fn test_alias_overrides_identifier() {
        assert_eq!(Interpolation::TWO_POINT.token(), "2p");
        assert_eq!(Interpolation::Bt470m.token(), "470m");
        assert_eq!(Interpolation::Bt709.token(), "709");
        assert_eq!(Interpolation::FastBilinear.token(), "fast_bilinear");
        assert_eq!(Interpolation::TWO_POINT.identifier(), "TWO_POINT");
    }

    #[test]
    fn test_token_is_stable_across_calls() {
        let first = Interpolation::TWO_POINT.token();
        let second = Interpolation::TWO_POINT.token();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_from_token() {
        assert_eq!(
            Interpolation::from_token("fast_bilinear"),
            Some(Interpolation::FastBilinear)
        );
        assert_eq!(Interpolation::from_token("FastBilinear"), None);
        assert_eq!(Interpolation::from_token("bogus"), None);
    }

    #[test]
    fn test_display_writes_token() {
        assert_eq!(Interpolation::Bt709.to_string(), "709");
        assert_eq!(format!("{}", Interpolation::Nearest), "nearest");
    }

    #[test]
    fn test_tokens_in_declaration_order() {
        assert_eq!(
            Interpolation::tokens(),
            vec!["nearest", "fast_bilinear", "2p", "470m", "709", "spline16"]
        );
        assert_eq!(Interpolation::variants().len(), 6);
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("TWO_POINT"), "twopoint");
        assert_eq!(normalize_identifier("FastBilinear"), "fastbilinear");
        assert_eq!(normalize_identifier("lanczos"), "lanczos");
    }

    #[test]
    fn test_duplicate_tokens_resolve_to_first() {
        let table = TokenTable::build(&[("Linear", None), ("LINEAR", None)]);
        assert_eq!(table.ordinal_of("linear"), Some(0));
        assert_eq!(table.len(), 2);
    }
}
