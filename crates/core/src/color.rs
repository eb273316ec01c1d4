//! Color tokens.
//!
//! The engine only ever sees a color that has already been resolved to the
//! text ffmpeg accepts (`0xRRGGBB`, `#RRGGBB`, a color name, optionally with
//! an `@alpha` suffix). Turning a symbolic request into such a token is the
//! job of a [`ColorResolver`].

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;

use crate::error::{FilterError, Result};
use crate::validate::check_range;

static HEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#|0x|0X)[0-9A-Fa-f]{6}([0-9A-Fa-f]{2})?$").expect("valid hex color regex")
});
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid color name regex"));

/// A resolved color token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Opaque color from its components, rendered as `0xRRGGBB`.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("0x{r:02X}{g:02X}{b:02X}"))
    }

    /// Color with alpha from its components, rendered as `0xRRGGBBAA`.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(format!("0x{r:02X}{g:02X}{b:02X}{a:02X}"))
    }

    /// A named color such as `white` or `DarkOrange`.
    pub fn named(name: &str) -> Result<Self> {
        if !NAME_RE.is_match(name) {
            return Err(FilterError::invalid_argument(
                "color",
                format!("'{name}' is not a color name"),
            ));
        }
        Ok(Self(name.to_string()))
    }

    /// Parses an already resolved token, with an optional `@alpha` suffix.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (base, alpha) = match input.split_once('@') {
            Some((base, alpha)) => (base, Some(alpha)),
            None => (input, None),
        };

        if !HEX_RE.is_match(base) && !NAME_RE.is_match(base) {
            return Err(FilterError::invalid_argument(
                "color",
                format!("'{input}' is neither a hex color nor a color name"),
            ));
        }

        let color = Self(base.to_string());
        match alpha {
            Some(alpha) => {
                let alpha: f64 = alpha.parse().map_err(|_| {
                    FilterError::invalid_argument("color", format!("invalid alpha '{alpha}'"))
                })?;
                color.with_alpha(alpha)
            }
            None => Ok(color),
        }
    }

    /// Attaches an alpha multiplier in `[0, 1]`, rendered as `color@alpha`.
    pub fn with_alpha(self, alpha: f64) -> Result<Self> {
        let alpha = check_range("color alpha", alpha, 0.0, 1.0)?;
        let base = match self.0.split_once('@') {
            Some((base, _)) => base.to_string(),
            None => self.0,
        };
        Ok(Self(format!("{base}@{alpha}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a color request into a resolved token.
pub trait ColorResolver {
    /// Resolves `request` or reports why it cannot be resolved.
    fn resolve(&self, request: &str) -> Result<Color>;
}

/// Resolver that accepts only requests that already are valid tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralColorResolver;

impl ColorResolver for LiteralColorResolver {
    fn resolve(&self, request: &str) -> Result<Color> {
        Color::parse(request)
    }
}
