//! Typed option values and their textual form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::trace;

use crate::color::Color;
use crate::error::{FilterError, Result};
use crate::escape::{escape, needs_escaping, Quoting};
use crate::token::CommandToken;

/// A value supplied for one option, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Token of an enumerated constant.
    Token(&'static str),
    /// Several enumerated tokens combined into one option.
    Flags(Vec<&'static str>),
    Color(Color),
    /// Free text, escaped according to the option's quoting.
    Text(String),
    /// An ffmpeg expression, quoted when it contains separators.
    Expr(String),
    Duration(Duration),
}

impl OptionValue {
    /// Value of an enumerated constant.
    pub fn token<T: CommandToken>(value: T) -> Self {
        Self::Token(value.token())
    }

    /// Combination of enumerated constants, in the given order.
    pub fn flags<T: CommandToken>(values: impl IntoIterator<Item = T>) -> Self {
        Self::Flags(values.into_iter().map(CommandToken::token).collect())
    }

    /// An ffmpeg expression such as `main_w-overlay_w-10`.
    pub fn expr(expression: impl Into<String>) -> Self {
        Self::Expr(expression.into())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Token(_) => "token",
            Self::Flags(_) => "flags",
            Self::Color(_) => "color",
            Self::Text(_) => "text",
            Self::Expr(_) => "expression",
            Self::Duration(_) => "duration",
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Color> for OptionValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Duration> for OptionValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

/// How a boolean option is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolStyle {
    /// Always written, as `name=0` or `name=1`.
    #[default]
    Explicit,
    /// Written as a bare `name` when true, left out when false.
    Presence,
}

/// Per-option formatting choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatStyle {
    pub bool_style: BoolStyle,
    pub quoting: Quoting,
    pub flag_separator: char,
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self {
            bool_style: BoolStyle::Explicit,
            quoting: Quoting::Escape,
            flag_separator: '+',
        }
    }
}

/// Text ready to be embedded in a filter invocation.
///
/// Only the formatter creates these, and nothing turns one back into an
/// [`OptionValue`], so a stored value is never escaped a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue(String);

impl RenderedValue {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of formatting one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedValue {
    /// Store `name=value`.
    Value(RenderedValue),
    /// Store the bare option name (presence flag set).
    Bare,
    /// Store nothing and drop any earlier value (presence flag cleared).
    Omitted,
}

/// Converts typed values into ffmpeg's textual representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFormatter {
    float_precision: Option<u8>,
}

impl ValueFormatter {
    /// Creates a formatter; `float_precision` fixes the number of decimals.
    pub fn new(float_precision: Option<u8>) -> Self {
        Self { float_precision }
    }

    /// Formats `value` for `option` using `style`.
    pub fn format(
        &self,
        option: &str,
        value: &OptionValue,
        style: &FormatStyle,
    ) -> Result<FormattedValue> {
        let text = match value {
            OptionValue::Int(v) => v.to_string(),
            OptionValue::Float(v) => self.format_float(option, *v)?,
            OptionValue::Bool(v) => match style.bool_style {
                BoolStyle::Explicit => String::from(if *v { "1" } else { "0" }),
                BoolStyle::Presence if *v => return Ok(FormattedValue::Bare),
                BoolStyle::Presence => return Ok(FormattedValue::Omitted),
            },
            OptionValue::Token(token) => (*token).to_string(),
            OptionValue::Flags(tokens) => {
                if tokens.is_empty() {
                    return Err(FilterError::invalid_argument(
                        option,
                        "at least one flag is required",
                    ));
                }
                tokens.join(&style.flag_separator.to_string())
            }
            OptionValue::Color(color) => color.as_str().to_string(),
            OptionValue::Text(raw) => escape(raw, style.quoting),
            OptionValue::Expr(raw) => {
                if needs_escaping(raw) {
                    escape(raw, Quoting::Quote)
                } else {
                    raw.clone()
                }
            }
            OptionValue::Duration(d) => self.format_float(option, d.as_secs_f64())?,
        };

        trace!(option, value = %text, "formatted option value");
        Ok(FormattedValue::Value(RenderedValue::new(text)))
    }

    /// Plain decimal, `.` separator, never an exponent.
    pub fn format_float(&self, option: &str, value: f64) -> Result<String> {
        if !value.is_finite() {
            return Err(FilterError::invalid_argument(
                option,
                format!("must be a finite number, got {value}"),
            ));
        }
        // Collapse -0.0 so it prints as "0".
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(match self.float_precision {
            Some(precision) => format!("{value:.prec$}", prec = usize::from(precision)),
            None => value.to_string(),
        })
    }
}
