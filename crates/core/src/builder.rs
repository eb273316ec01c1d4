//! Generic filter builder and filter-graph assembly.
//!
//! [`FilterBuilder`] is the single setter path every filter goes through:
//! declaration lookup, kind check, constraint check, exclusivity check,
//! formatting and storage. A call that fails at any step stores nothing, so
//! the builder stays usable in its last valid state.

use tracing::{debug, warn};

use crate::args::ArgumentList;
use crate::config::{EngineConfig, RequiredPolicy};
use crate::error::{FilterError, Result};
use crate::escape::escape_graph_args;
use crate::schema::{FilterSpec, OptionSpec};
use crate::validate::check_predicate;
use crate::value::{FormattedValue, OptionValue, RenderedValue, ValueFormatter};

/// Collects the options of one filter invocation.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    spec: &'static FilterSpec,
    config: EngineConfig,
    formatter: ValueFormatter,
    args: ArgumentList,
}

impl FilterBuilder {
    /// Empty builder for `spec` with the default configuration.
    pub fn new(spec: &'static FilterSpec) -> Self {
        Self::with_config(spec, EngineConfig::default())
    }

    pub fn with_config(spec: &'static FilterSpec, config: EngineConfig) -> Self {
        Self {
            spec,
            config,
            formatter: ValueFormatter::new(config.float_precision),
            args: ArgumentList::new(),
        }
    }

    pub fn spec(&self) -> &'static FilterSpec {
        self.spec
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stored arguments in insertion order.
    pub fn arguments(&self) -> &ArgumentList {
        &self.args
    }

    /// Validates, formats and stores one option.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self> {
        let option = self.declaration(name)?;
        let value = option.kind.accept(option.name, value.into())?;
        let style = option.kind.format_style();
        let formatted = self.formatter.format(option.name, &value, &style)?;

        if formatted != FormattedValue::Omitted {
            self.check_conflicts(option)?;
        }

        debug!(filter = self.spec.name, option = option.name, "option accepted");
        self.store(option, value, formatted);
        Ok(self)
    }

    /// Like [`set`](Self::set), parsing `input` according to the declared kind.
    pub fn set_str(&mut self, name: &str, input: &str) -> Result<&mut Self> {
        let option = self.declaration(name)?;
        let value = option.kind.parse_value(option.name, input)?;
        self.set(name, value)
    }

    /// Drops a previously set option. Unsetting an option that was never set
    /// is not an error.
    pub fn unset(&mut self, name: &str) -> Result<&mut Self> {
        let option = self.declaration(name)?;
        self.args.remove(option.name);
        Ok(self)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.args.contains(name)
    }

    /// The value stored for `name`, as it was supplied.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.args.get(name).map(|arg| &arg.raw)
    }

    /// Renders `name=args`, or the bare filter name when nothing is set.
    pub fn render(&self) -> Result<String> {
        let args = self.render_args()?;
        let rendered = if args.is_empty() {
            self.spec.name.to_string()
        } else {
            format!("{}={}", self.spec.name, args)
        };
        debug!(filter = self.spec.name, rendered = %rendered, "rendered filter");
        Ok(rendered)
    }

    /// Renders the argument part only.
    ///
    /// Positional options come out in declaration order, the order ffmpeg
    /// binds them in. Once a declared positional is missing, the later ones
    /// are written as `name=value`.
    pub fn render_args(&self) -> Result<String> {
        self.check_required()?;
        Ok(self.ordered_args().render(&self.spec.style))
    }

    fn ordered_args(&self) -> ArgumentList {
        let mut ordered = ArgumentList::new();
        let mut contiguous = true;

        for option in self.spec.options.iter().filter(|o| o.is_positional) {
            let Some(arg) = self.args.get(option.name) else {
                contiguous = false;
                continue;
            };
            let raw = arg.raw.clone();
            match (contiguous, arg.rendered.clone()) {
                (true, Some(rendered)) => ordered.set_positional(option.name, raw, rendered),
                (_, rendered) => ordered.set_named(option.name, raw, rendered),
            }
        }

        for arg in self.args.named() {
            if let Some(name) = &arg.name {
                ordered.set_named(name.as_str(), arg.raw.clone(), arg.rendered.clone());
            }
        }
        ordered
    }

    fn declaration(&self, name: &str) -> Result<&'static OptionSpec> {
        self.spec.option(name).ok_or_else(|| FilterError::UnknownOption {
            filter: self.spec.name.to_string(),
            option: name.to_string(),
        })
    }

    fn check_conflicts(&self, option: &OptionSpec) -> Result<()> {
        let declared = option.conflicts.iter().copied();
        let reverse = self
            .spec
            .options
            .iter()
            .filter(|other| other.conflicts.contains(&option.name))
            .map(|other| other.name);

        match declared.chain(reverse).find(|other| self.args.contains(other)) {
            Some(other) => Err(FilterError::unsupported_combination(option.name, other)),
            None => Ok(()),
        }
    }

    fn store(&mut self, option: &OptionSpec, value: OptionValue, formatted: FormattedValue) {
        match (option.is_positional, formatted) {
            (_, FormattedValue::Omitted) => {
                self.args.remove(option.name);
            }
            (true, FormattedValue::Value(rendered)) => {
                self.args.set_positional(option.name, value, rendered);
            }
            (true, FormattedValue::Bare) => {
                let rendered = RenderedValue::new(option.name.to_string());
                self.args.set_positional(option.name, value, rendered);
            }
            (false, FormattedValue::Value(rendered)) => {
                self.args.set_named(option.name, value, Some(rendered));
            }
            (false, FormattedValue::Bare) => {
                self.args.set_named(option.name, value, None);
            }
        }
    }

    fn check_required(&self) -> Result<()> {
        for option in self.spec.required() {
            if self.args.contains(option.name) {
                continue;
            }
            match self.config.required_policy {
                RequiredPolicy::Fail => {
                    return Err(FilterError::missing_required(self.spec.name, option.name));
                }
                RequiredPolicy::Omit => {
                    warn!(
                        filter = self.spec.name,
                        option = option.name,
                        "required option not set, leaving it to ffmpeg's default"
                    );
                }
            }
        }
        Ok(())
    }
}

impl AsRef<FilterBuilder> for FilterBuilder {
    fn as_ref(&self) -> &FilterBuilder {
        self
    }
}

fn check_label(option: &str, label: &str) -> Result<String> {
    check_predicate(
        option,
        label.to_string(),
        |l| {
            !l.is_empty()
                && l
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        },
        "pad labels may only contain letters, digits and _-.:",
    )
}

/// Filters applied one after another, joined with `,`.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    inputs: Vec<String>,
    filters: Vec<String>,
    outputs: Vec<String>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input pad, written as `[label]` before the first filter.
    pub fn input(&mut self, label: &str) -> Result<&mut Self> {
        let label = check_label("input", label)?;
        self.inputs.push(label);
        Ok(self)
    }

    /// Adds an output pad, written as `[label]` after the last filter.
    pub fn output(&mut self, label: &str) -> Result<&mut Self> {
        let label = check_label("output", label)?;
        self.outputs.push(label);
        Ok(self)
    }

    /// Renders `filter` and appends it to the chain.
    ///
    /// The argument part is escaped once more for the graph parser, which
    /// unescapes it before the filter's own option parser sees it.
    pub fn push(&mut self, filter: &impl AsRef<FilterBuilder>) -> Result<&mut Self> {
        let filter = filter.as_ref();
        let args = filter.render_args()?;
        let rendered = if args.is_empty() {
            filter.spec().name.to_string()
        } else {
            format!("{}={}", filter.spec().name, escape_graph_args(&args))
        };
        debug!(filter = filter.spec().name, rendered = %rendered, "added filter to chain");
        self.filters.push(rendered);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn render(&self) -> Result<String> {
        if self.filters.is_empty() {
            return Err(FilterError::invalid_argument(
                "chain",
                "a chain needs at least one filter",
            ));
        }
        let mut out = String::new();
        for label in &self.inputs {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        out.push_str(&self.filters.join(","));
        for label in &self.outputs {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        Ok(out)
    }
}

/// Independent chains, joined with `;`.
#[derive(Debug, Clone, Default)]
pub struct FilterGraph {
    chains: Vec<FilterChain>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&mut self, chain: FilterChain) -> &mut Self {
        self.chains.push(chain);
        self
    }

    pub fn render(&self) -> Result<String> {
        let chains = self
            .chains
            .iter()
            .map(FilterChain::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(chains.join(";"))
    }
}
