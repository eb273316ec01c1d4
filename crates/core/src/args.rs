//! Ordered storage of pending arguments and their rendering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value::{OptionValue, RenderedValue};

/// One stored argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Option name; `None` for a positional argument.
    pub name: Option<String>,
    /// The value as supplied by the caller.
    pub raw: OptionValue,
    /// Formatted text; `None` renders the bare name (presence flag).
    pub rendered: Option<RenderedValue>,
}

impl Argument {
    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }

    fn write_pair(&self, out: &mut String, pair_separator: char) {
        match (&self.name, &self.rendered) {
            (Some(name), Some(value)) => {
                out.push_str(name);
                out.push(pair_separator);
                out.push_str(value.as_str());
            }
            (Some(name), None) => out.push_str(name),
            (None, Some(value)) => out.push_str(value.as_str()),
            (None, None) => {}
        }
    }

    fn write_value(&self, out: &mut String) {
        match (&self.name, &self.rendered) {
            (_, Some(value)) => out.push_str(value.as_str()),
            (Some(name), None) => out.push_str(name),
            (None, None) => {}
        }
    }
}

/// How stored arguments are laid out on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Positional values first in call order, then `name=value` pairs.
    #[default]
    Mixed,
    /// Every argument in insertion order; positional ones stay value-only.
    Named,
    /// Values only: positional arguments first, then named ones.
    Positional,
}

/// Separators and layout used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub strategy: RenderStrategy,
    pub entry_separator: char,
    pub pair_separator: char,
}

impl RenderStyle {
    pub const fn new(strategy: RenderStrategy) -> Self {
        Self {
            strategy,
            entry_separator: ':',
            pair_separator: '=',
        }
    }

    pub const fn with_separators(mut self, entry: char, pair: char) -> Self {
        self.entry_separator = entry;
        self.pair_separator = pair;
        self
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(RenderStrategy::Mixed)
    }
}

/// Insertion-ordered list of arguments with at most one entry per name.
#[derive(Debug, Clone, Default)]
pub struct ArgumentList {
    entries: Vec<Argument>,
    index: HashMap<String, usize>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a named argument, or replaces it in place if already set.
    pub fn set_named(
        &mut self,
        name: impl Into<String>,
        raw: OptionValue,
        rendered: Option<RenderedValue>,
    ) {
        let name = name.into();
        self.upsert(name.clone(), Some(name), raw, rendered);
    }

    /// Appends a positional argument.
    pub fn add_positional(&mut self, raw: OptionValue, rendered: RenderedValue) {
        self.entries.push(Argument {
            name: None,
            raw,
            rendered: Some(rendered),
        });
    }

    /// Stores a positional argument under `key` so a later call with the
    /// same key replaces it in place instead of appending.
    pub fn set_positional(
        &mut self,
        key: impl Into<String>,
        raw: OptionValue,
        rendered: RenderedValue,
    ) {
        self.upsert(key.into(), None, raw, Some(rendered));
    }

    fn upsert(
        &mut self,
        key: String,
        name: Option<String>,
        raw: OptionValue,
        rendered: Option<RenderedValue>,
    ) {
        match self.index.get(&key) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                entry.raw = raw;
                entry.rendered = rendered;
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(Argument {
                    name,
                    raw,
                    rendered,
                });
            }
        }
    }

    /// Removes a named or keyed positional argument, returning it if it was set.
    pub fn remove(&mut self, name: &str) -> Option<Argument> {
        let slot = self.index.remove(name)?;
        let removed = self.entries.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.entries.iter()
    }

    /// Positional arguments in call order.
    pub fn positional(&self) -> impl Iterator<Item = &Argument> {
        self.entries.iter().filter(|a| a.is_positional())
    }

    /// Named arguments in first-set order.
    pub fn named(&self) -> impl Iterator<Item = &Argument> {
        self.entries.iter().filter(|a| !a.is_positional())
    }

    /// Joins the stored arguments according to `style`.
    pub fn render(&self, style: &RenderStyle) -> String {
        let mut out = String::new();
        let mut first = true;
        let mut separate = |out: &mut String| {
            if !first {
                out.push(style.entry_separator);
            }
            first = false;
        };

        match style.strategy {
            RenderStrategy::Mixed => {
                for arg in self.positional().chain(self.named()) {
                    separate(&mut out);
                    arg.write_pair(&mut out, style.pair_separator);
                }
            }
            RenderStrategy::Named => {
                for arg in self.iter() {
                    separate(&mut out);
                    arg.write_pair(&mut out, style.pair_separator);
                }
            }
            RenderStrategy::Positional => {
                for arg in self.positional().chain(self.named()) {
                    separate(&mut out);
                    arg.write_value(&mut out);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> RenderedValue {
        RenderedValue::new(text.to_string())
    }

    fn set(list: &mut ArgumentList, name: &str, text: &str) {
        list.set_named(name, OptionValue::Text(text.to_string()), Some(value(text)));
    }

    fn push(list: &mut ArgumentList, text: &str) {
        list.add_positional(OptionValue::Text(text.to_string()), value(text));
    }

    #[test]
    fn test_named_render() {
        let mut list = ArgumentList::new();
        set(&mut list, "w", "100");
        set(&mut list, "h", "200");
        set(&mut list, "mode", "cubic");
        assert_eq!(list.render(&RenderStyle::default()), "w=100:h=200:mode=cubic");
    }

    #[test]
    fn test_overwrite_keeps_first_position() {
        let mut list = ArgumentList::new();
        set(&mut list, "w", "100");
        set(&mut list, "h", "200");
        set(&mut list, "w", "300");
        assert_eq!(list.len(), 2);
        assert_eq!(list.render(&RenderStyle::default()), "w=300:h=200");
    }

    #[test]
    fn test_positional_order_with_interleaved_named() {
        let mut list = ArgumentList::new();
        push(&mut list, "1");
        set(&mut list, "a", "x");
        push(&mut list, "2");
        set(&mut list, "b", "y");
        push(&mut list, "3");

        assert_eq!(list.render(&RenderStyle::new(RenderStrategy::Mixed)), "1:2:3:a=x:b=y");
        assert_eq!(list.render(&RenderStyle::new(RenderStrategy::Named)), "1:a=x:2:b=y:3");
        assert_eq!(list.render(&RenderStyle::new(RenderStrategy::Positional)), "1:2:3:x:y");
    }

    #[test]
    fn test_positional_render_from_named_storage() {
        let mut list = ArgumentList::new();
        set(&mut list, "w", "1280");
        set(&mut list, "h", "720");
        assert_eq!(list.render(&RenderStyle::new(RenderStrategy::Positional)), "1280:720");
    }

    #[test]
    fn test_custom_separators() {
        let mut list = ArgumentList::new();
        set(&mut list, "a", "1");
        set(&mut list, "b", "2");
        let style = RenderStyle::new(RenderStrategy::Mixed).with_separators('|', ':');
        assert_eq!(list.render(&style), "a:1|b:2");
    }

    #[test]
    fn test_bare_presence_flag() {
        let mut list = ArgumentList::new();
        set(&mut list, "w", "10");
        list.set_named("enable", OptionValue::Bool(true), None);
        assert_eq!(list.render(&RenderStyle::default()), "w=10:enable");
        assert_eq!(list.render(&RenderStyle::new(RenderStrategy::Positional)), "10:enable");
    }

    #[test]
    fn test_remove_reindexes() {
        let mut list = ArgumentList::new();
        set(&mut list, "a", "1");
        set(&mut list, "b", "2");
        set(&mut list, "c", "3");
        assert!(list.remove("a").is_some());
        assert!(list.remove("a").is_none());
        set(&mut list, "c", "4");
        assert_eq!(list.render(&RenderStyle::default()), "b=2:c=4");
        assert_eq!(list.get("b").map(|a| a.raw.clone()), Some(OptionValue::Text("2".into())));
    }

    #[test]
    fn test_keyed_positional_overwrites_in_place() {
        let mut list = ArgumentList::new();
        list.set_positional("w", OptionValue::Int(100), value("100"));
        list.set_positional("h", OptionValue::Int(50), value("50"));
        set(&mut list, "x", "10");
        list.set_positional("w", OptionValue::Int(200), value("200"));

        assert_eq!(list.len(), 3);
        assert!(list.get("w").is_some_and(Argument::is_positional));
        assert_eq!(list.render(&RenderStyle::default()), "200:50:x=10");

        list.remove("w");
        assert_eq!(list.render(&RenderStyle::default()), "50:x=10");
    }

    #[test]
    fn test_empty_render() {
        let list = ArgumentList::new();
        assert!(list.is_empty());
        assert_eq!(list.render(&RenderStyle::default()), "");
    }
}
