//! Table-driven option declarations.
//!
//! A filter is described once by a static [`FilterSpec`] listing every
//! option with its kind and constraint. The generic setter in
//! [`FilterBuilder`](crate::builder::FilterBuilder) processes every option
//! through the same path using these records.

use serde::Serialize;
use std::time::Duration;

use crate::args::{RenderStrategy, RenderStyle};
use crate::color::Color;
use crate::error::{FilterError, Result};
use crate::escape::Quoting;
use crate::token::{CommandToken, TokenTable};
use crate::validate::{check_bounds, check_not_empty, check_predicate, NumericBounds, Rule};
use crate::value::{BoolStyle, FormatStyle, OptionValue};

/// The set of tokens an enumerated option accepts.
#[derive(Clone, Copy)]
pub struct EnumDomain(pub fn() -> &'static TokenTable);

impl EnumDomain {
    /// Domain of the enumeration `T`.
    pub const fn of<T: CommandToken>() -> Self {
        Self(T::token_table)
    }

    pub fn table(&self) -> &'static TokenTable {
        (self.0)()
    }

    fn require(&self, option: &str, token: &str) -> Result<&'static str> {
        let table = self.table();
        match table.ordinal_of(token) {
            Some(ordinal) => Ok(table.token(ordinal)),
            None => Err(FilterError::invalid_argument(
                option,
                format!(
                    "'{token}' is not one of: {}",
                    table.tokens().collect::<Vec<_>>().join(", ")
                ),
            )),
        }
    }
}

impl std::fmt::Debug for EnumDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.table().tokens()).finish()
    }
}

/// Declared kind and constraint of an option.
#[derive(Debug, Clone, Copy)]
pub enum OptionKind {
    Int(NumericBounds<i64>),
    Float(NumericBounds<f64>),
    Bool(BoolStyle),
    Enum(EnumDomain),
    Flags {
        domain: EnumDomain,
        separator: char,
    },
    Color,
    Text {
        quoting: Quoting,
        rule: Option<Rule>,
    },
    Expr,
    Duration,
}

impl OptionKind {
    /// Free text escaped in place.
    pub const fn text() -> Self {
        Self::Text {
            quoting: Quoting::Escape,
            rule: None,
        }
    }

    /// Free text always wrapped in quotes (paths).
    pub const fn quoted_text() -> Self {
        Self::Text {
            quoting: Quoting::Quote,
            rule: None,
        }
    }

    /// Flags joined with `+`.
    pub const fn flags(domain: EnumDomain) -> Self {
        Self::Flags {
            domain,
            separator: '+',
        }
    }

    /// Formatting choices implied by this kind.
    pub fn format_style(&self) -> FormatStyle {
        let mut style = FormatStyle::default();
        match self {
            Self::Bool(bool_style) => style.bool_style = *bool_style,
            Self::Flags { separator, .. } => style.flag_separator = *separator,
            Self::Text { quoting, .. } => style.quoting = *quoting,
            _ => {}
        }
        style
    }

    /// Checks `value` against this kind, normalizing compatible variants.
    pub fn accept(&self, option: &str, value: OptionValue) -> Result<OptionValue> {
        match (self, value) {
            (Self::Int(bounds), OptionValue::Int(v)) => {
                check_bounds(option, v, bounds).map(OptionValue::Int)
            }
            (Self::Float(bounds), OptionValue::Float(v)) => {
                check_bounds(option, v, bounds).map(OptionValue::Float)
            }
            (Self::Float(bounds), OptionValue::Int(v)) => {
                check_bounds(option, v as f64, bounds).map(OptionValue::Float)
            }
            (Self::Bool(_), value @ OptionValue::Bool(_)) => Ok(value),
            (Self::Enum(domain), OptionValue::Token(token)) => {
                domain.require(option, token).map(OptionValue::Token)
            }
            (Self::Flags { domain, .. }, OptionValue::Token(token)) => {
                Ok(OptionValue::Flags(vec![domain.require(option, token)?]))
            }
            (Self::Flags { domain, .. }, OptionValue::Flags(tokens)) => tokens
                .into_iter()
                .map(|token| domain.require(option, token))
                .collect::<Result<Vec<_>>>()
                .map(OptionValue::Flags),
            (Self::Color, value @ OptionValue::Color(_)) => Ok(value),
            (Self::Text { rule, .. }, OptionValue::Text(text)) => {
                check_not_empty(option, &text)?;
                if let Some(rule) = rule {
                    rule.check(option, &text)?;
                }
                Ok(OptionValue::Text(text))
            }
            (Self::Expr, OptionValue::Expr(expr) | OptionValue::Text(expr)) => {
                check_not_empty(option, &expr)?;
                Ok(OptionValue::Expr(expr))
            }
            (Self::Expr, value @ (OptionValue::Int(_) | OptionValue::Float(_))) => Ok(value),
            (Self::Duration, value @ OptionValue::Duration(_)) => Ok(value),
            (Self::Duration, OptionValue::Float(seconds)) => {
                seconds_to_duration(option, seconds).map(OptionValue::Duration)
            }
            (Self::Duration, OptionValue::Int(seconds)) => {
                seconds_to_duration(option, seconds as f64).map(OptionValue::Duration)
            }
            (kind, value) => Err(FilterError::invalid_argument(
                option,
                format!("expected {}, got {}", kind.describe(), value.kind_name()),
            )),
        }
    }

    /// Parses textual input (command line, config) into a value of this kind.
    ///
    /// Text and expressions are taken verbatim; other kinds ignore
    /// surrounding whitespace.
    pub fn parse_value(&self, option: &str, input: &str) -> Result<OptionValue> {
        let verbatim = input;
        let input = input.trim();
        let invalid = |what: &str| {
            FilterError::invalid_argument(option, format!("'{input}' is not a valid {what}"))
        };

        let value = match self {
            Self::Int(_) => OptionValue::Int(input.parse().map_err(|_| invalid("integer"))?),
            Self::Float(_) => OptionValue::Float(input.parse().map_err(|_| invalid("number"))?),
            Self::Bool(_) => OptionValue::Bool(match input {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid("boolean")),
            }),
            Self::Enum(domain) => OptionValue::Token(domain.require(option, input)?),
            Self::Flags { domain, separator } => OptionValue::Flags(
                input
                    .split(|c: char| c == *separator || c == '+')
                    .map(|token| domain.require(option, token.trim()))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Self::Color => OptionValue::Color(Color::parse(input)?),
            Self::Text { .. } => OptionValue::Text(verbatim.to_string()),
            Self::Expr => OptionValue::Expr(verbatim.to_string()),
            Self::Duration => {
                let seconds: f64 = input.parse().map_err(|_| invalid("duration in seconds"))?;
                OptionValue::Duration(seconds_to_duration(option, seconds)?)
            }
        };

        self.accept(option, value)
    }

    /// Human-readable summary, e.g. `integer in [0, 32767]`.
    pub fn describe(&self) -> String {
        match self {
            Self::Int(bounds) => format!("integer in {bounds}"),
            Self::Float(bounds) => format!("number in {bounds}"),
            Self::Bool(BoolStyle::Explicit) => "boolean (0/1)".to_string(),
            Self::Bool(BoolStyle::Presence) => "flag".to_string(),
            Self::Enum(domain) => {
                format!("one of {}", domain.table().tokens().collect::<Vec<_>>().join("|"))
            }
            Self::Flags { domain, separator } => format!(
                "{separator}-joined flags from {}",
                domain.table().tokens().collect::<Vec<_>>().join("|")
            ),
            Self::Color => "color".to_string(),
            Self::Text { rule: Some(rule), .. } => format!("text ({})", rule.description),
            Self::Text { .. } => "text".to_string(),
            Self::Expr => "expression".to_string(),
            Self::Duration => "duration in seconds".to_string(),
        }
    }
}

fn seconds_to_duration(option: &str, seconds: f64) -> Result<Duration> {
    let seconds = check_predicate(
        option,
        seconds,
        |s| s.is_finite() && *s >= 0.0,
        "duration must be a non-negative number of seconds",
    )?;
    Ok(Duration::from_secs_f64(seconds))
}

/// Declaration of one option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub is_required: bool,
    pub is_positional: bool,
    pub conflicts: &'static [&'static str],
}

impl OptionSpec {
    pub const fn new(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            description: "",
            kind,
            is_required: false,
            is_positional: false,
            conflicts: &[],
        }
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Render fails while this option is unset.
    pub const fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Stored and rendered value-only, in call order.
    pub const fn positional(mut self) -> Self {
        self.is_positional = true;
        self
    }

    /// Options that cannot be set together with this one.
    pub const fn conflicts_with(mut self, names: &'static [&'static str]) -> Self {
        self.conflicts = names;
        self
    }
}

/// Declaration of a whole filter.
#[derive(Debug)]
pub struct FilterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub style: RenderStyle,
    pub options: &'static [OptionSpec],
}

impl FilterSpec {
    pub fn option(&self, name: &str) -> Option<&'static OptionSpec> {
        let options: &'static [OptionSpec] = self.options;
        options.iter().find(|o| o.name == name)
    }

    /// Options that must be set before rendering.
    pub fn required(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.is_required)
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.style.strategy
    }

    /// Serializable description for listings.
    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            name: self.name,
            description: self.description,
            strategy: self.style.strategy,
            options: self
                .options
                .iter()
                .map(|o| OptionSummary {
                    name: o.name,
                    description: o.description,
                    kind: o.kind.describe(),
                    required: o.is_required,
                    positional: o.is_positional,
                    conflicts_with: o.conflicts.to_vec(),
                })
                .collect(),
        }
    }
}

/// Serializable view of a [`FilterSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub strategy: RenderStrategy,
    pub options: Vec<OptionSummary>,
}

/// Serializable view of an [`OptionSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct OptionSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: String,
    pub required: bool,
    pub positional: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_enum;

    command_enum! {
        enum Mode {
            Linear,
            Cubic,
        }
    }

    static DEMO: FilterSpec = FilterSpec {
        name: "demo",
        description: "test filter",
        style: RenderStyle::new(RenderStrategy::Mixed),
        options: &[
            OptionSpec::new("w", OptionKind::Int(NumericBounds::inclusive(0, 32767))).required(),
            OptionSpec::new("mode", OptionKind::Enum(EnumDomain::of::<Mode>())),
            OptionSpec::new("text", OptionKind::text()).conflicts_with(&["textfile"]),
        ],
    };

    #[test]
    fn test_option_lookup() {
        assert!(DEMO.option("w").is_some());
        assert!(DEMO.option("missing").is_none());
        assert_eq!(DEMO.required().map(|o| o.name).collect::<Vec<_>>(), vec!["w"]);
    }

    #[test]
    fn test_accept_int_bounds() {
        let kind = OptionKind::Int(NumericBounds::inclusive(0, 10));
        assert_eq!(kind.accept("n", OptionValue::Int(10)).unwrap(), OptionValue::Int(10));
        assert!(kind.accept("n", OptionValue::Int(11)).is_err());
    }

    #[test]
    fn test_accept_float_from_int() {
        let kind = OptionKind::Float(NumericBounds::inclusive(0.0, 1.0));
        assert_eq!(kind.accept("o", OptionValue::Int(1)).unwrap(), OptionValue::Float(1.0));
    }

    #[test]
    fn test_accept_kind_mismatch() {
        let kind = OptionKind::Int(NumericBounds::any());
        let err = kind.accept("n", OptionValue::Text("x".into())).unwrap_err();
        assert_eq!(
            err,
            FilterError::invalid_argument("n", "expected integer in (-inf, +inf), got text")
        );
    }

    #[test]
    fn test_accept_enum_domain() {
        let kind = OptionKind::Enum(EnumDomain::of::<Mode>());
        assert!(kind.accept("mode", OptionValue::token(Mode::Cubic)).is_ok());
        let err = kind.accept("mode", OptionValue::Token("bogus")).unwrap_err();
        assert_eq!(
            err,
            FilterError::invalid_argument("mode", "'bogus' is not one of: linear, cubic")
        );
    }

    #[test]
    fn test_accept_single_token_as_flags() {
        let kind = OptionKind::flags(EnumDomain::of::<Mode>());
        assert_eq!(
            kind.accept("flags", OptionValue::token(Mode::Linear)).unwrap(),
            OptionValue::Flags(vec!["linear"])
        );
    }

    #[test]
    fn test_accept_text_rejects_blank() {
        assert!(OptionKind::text().accept("text", OptionValue::from("  ")).is_err());
    }

    #[test]
    fn test_parse_value() {
        let int = OptionKind::Int(NumericBounds::inclusive(0, 100));
        assert_eq!(int.parse_value("n", "42").unwrap(), OptionValue::Int(42));
        assert!(int.parse_value("n", "4.2").is_err());
        assert!(int.parse_value("n", "420").is_err());

        let flag = OptionKind::Bool(BoolStyle::Explicit);
        assert_eq!(flag.parse_value("b", "yes").unwrap(), OptionValue::Bool(true));
        assert!(flag.parse_value("b", "maybe").is_err());

        let flags = OptionKind::flags(EnumDomain::of::<Mode>());
        assert_eq!(
            flags.parse_value("f", "linear+cubic").unwrap(),
            OptionValue::Flags(vec!["linear", "cubic"])
        );

        assert_eq!(
            OptionKind::Duration.parse_value("d", "1.5").unwrap(),
            OptionValue::Duration(Duration::from_millis(1500))
        );
        assert!(OptionKind::Duration.parse_value("d", "-1").is_err());
    }

    #[test]
    fn test_parse_value_keeps_text_verbatim() {
        assert_eq!(
            OptionKind::text().parse_value("t", " padded ").unwrap(),
            OptionValue::Text(" padded ".to_string())
        );
        assert_eq!(
            OptionKind::Expr.parse_value("e", " w/2").unwrap(),
            OptionValue::Expr(" w/2".to_string())
        );
        let int = OptionKind::Int(NumericBounds::inclusive(0, 100));
        assert_eq!(int.parse_value("n", " 42 ").unwrap(), OptionValue::Int(42));
    }

    #[test]
    fn test_format_style_follows_kind() {
        assert_eq!(OptionKind::quoted_text().format_style().quoting, Quoting::Quote);
        assert_eq!(
            OptionKind::Bool(BoolStyle::Presence).format_style().bool_style,
            BoolStyle::Presence
        );
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_value(DEMO.summary()).unwrap();
        assert_eq!(json["name"], "demo");
        assert_eq!(json["strategy"], "mixed");
        assert_eq!(json["options"][0]["kind"], "integer in [0, 32767]");
        assert_eq!(json["options"][2]["conflicts_with"][0], "textfile");
        assert!(json["options"][0].get("conflicts_with").is_none());
    }
}
