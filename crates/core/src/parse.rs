//! Reading a rendered filter invocation back into its parts.
//!
//! Follows ffmpeg's option tokenizer: `:` separates entries, the first
//! unescaped `=` of an entry separates key and value, a backslash takes the
//! next character literally and single quotes delimit literal runs.

use serde::Serialize;

use crate::builder::FilterBuilder;
use crate::config::EngineConfig;
use crate::error::{FilterError, Result};
use crate::escape::{find_unescaped, split_unescaped, unescape};
use crate::registry;

/// One filter invocation, e.g. `scale=w=100:h=200`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFilter {
    pub name: String,
    pub params: Vec<FilterParam>,
}

/// A `key=value` or positional entry with escapes removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterParam {
    pub key: Option<String>,
    pub value: String,
}

impl ParsedFilter {
    pub fn parse(input: &str) -> Result<Self> {
        // Trailing whitespace may be escaped; each entry's unescape strips
        // the unprotected rest.
        let input = input.trim_start();
        check_quotes(input)?;

        let (name, args) = match find_unescaped(input, '=') {
            Some(at) => (&input[..at], Some(&input[at + 1..])),
            None => (input, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(FilterError::parse("missing filter name"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::parse(format!("invalid filter name '{name}'")));
        }

        let params = match args {
            Some(args) if !args.is_empty() => split_unescaped(args, ':')
                .into_iter()
                .map(parse_param)
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }

    /// Value of the named entry `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key.as_deref() == Some(key))
            .map(|p| p.value.as_str())
    }

    /// Values of the positional entries, in order.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.key.is_none())
            .map(|p| p.value.as_str())
    }

    /// Replays the entries through the builder of the known filter with the
    /// same name.
    ///
    /// Positional entries bind to declared options in declaration order, as
    /// ffmpeg binds them.
    pub fn to_builder(&self) -> Result<FilterBuilder> {
        self.to_builder_with_config(EngineConfig::default())
    }

    pub fn to_builder_with_config(&self, config: EngineConfig) -> Result<FilterBuilder> {
        let mut builder = registry::builder_with_config(&self.name, config)?;
        let options = builder.spec().options;
        let mut next_positional = 0;

        for param in &self.params {
            let key = match &param.key {
                Some(key) => key.as_str(),
                None => {
                    let option = options.get(next_positional).ok_or_else(|| {
                        FilterError::parse(format!(
                            "too many positional values for '{}'",
                            self.name
                        ))
                    })?;
                    next_positional += 1;
                    option.name
                }
            };
            builder.set_str(key, &param.value)?;
        }

        Ok(builder)
    }
}

fn parse_param(entry: &str) -> Result<FilterParam> {
    match find_unescaped(entry, '=') {
        Some(at) => {
            let key = entry[..at].trim();
            if key.is_empty() {
                return Err(FilterError::parse(format!("empty option name in '{entry}'")));
            }
            Ok(FilterParam {
                key: Some(key.to_string()),
                value: unescape(&entry[at + 1..]),
            })
        }
        None => Ok(FilterParam {
            key: None,
            value: unescape(entry),
        }),
    }
}

fn check_quotes(input: &str) -> Result<()> {
    let mut in_quotes = false;
    let mut escaped = false;
    for c in input.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '\'' => in_quotes = !in_quotes,
            _ => {}
        }
    }
    if in_quotes {
        return Err(FilterError::parse("unterminated quote"));
    }
    Ok(())
}
