//! Name-keyed lookup of the built-in filter declarations.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::builder::FilterBuilder;
use crate::config::EngineConfig;
use crate::error::{FilterError, Result};
use crate::filters::all_specs;
use crate::schema::FilterSpec;

static REGISTRY: Lazy<BTreeMap<&'static str, &'static FilterSpec>> =
    Lazy::new(|| all_specs().into_iter().map(|spec| (spec.name, spec)).collect());

/// Declaration of the filter called `name`.
pub fn lookup(name: &str) -> Result<&'static FilterSpec> {
    REGISTRY
        .get(name)
        .copied()
        .ok_or_else(|| FilterError::UnknownFilter {
            name: name.to_string(),
        })
}

/// Names of all known filters, sorted.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Empty builder for the filter called `name`.
pub fn builder(name: &str) -> Result<FilterBuilder> {
    lookup(name).map(FilterBuilder::new)
}

/// Empty builder for `name` using `config`.
pub fn builder_with_config(name: &str, config: EngineConfig) -> Result<FilterBuilder> {
    lookup(name).map(|spec| FilterBuilder::with_config(spec, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_filter() {
        let spec = lookup("scale").unwrap();
        assert_eq!(spec.name, "scale");
        assert!(spec.option("flags").is_some());
    }

    #[test]
    fn test_lookup_unknown_filter() {
        assert_eq!(
            lookup("blur").unwrap_err(),
            FilterError::UnknownFilter {
                name: "blur".to_string()
            }
        );
    }

    #[test]
    fn test_names_sorted_and_complete() {
        let names: Vec<_> = names().collect();
        assert_eq!(names.len(), 11);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"drawtext"));
        assert!(names.contains(&"zscale"));
    }

    #[test]
    fn test_builder_from_registry() {
        let mut builder = builder("transpose").unwrap();
        builder.set_str("dir", "clock").unwrap();
        assert_eq!(builder.render().unwrap(), "transpose=dir=clock");
    }

    #[test]
    fn test_option_names_unique_per_filter() {
        for name in names() {
            let spec = lookup(name).unwrap();
            for (i, option) in spec.options.iter().enumerate() {
                assert!(
                    spec.options[i + 1..].iter().all(|o| o.name != option.name),
                    "{name} declares '{}' twice",
                    option.name
                );
                for other in option.conflicts {
                    assert!(spec.option(other).is_some(), "{name}: unknown conflict {other}");
                }
            }
        }
    }
}
