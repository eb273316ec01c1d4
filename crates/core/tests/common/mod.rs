//! Shared declarations for integration tests.

#![allow(dead_code)]

use filterkit_core::{
    command_enum, EnumDomain, FilterSpec, NumericBounds, OptionKind, OptionSpec, RenderStrategy,
    RenderStyle,
};

command_enum! {
    /// Interpolation used by the test filter.
    pub enum Mode {
        Linear,
        Cubic,
    }
}

/// Filter with bounded sizes, an enumerated mode and an opacity in `[0, 1]`.
pub static RESIZE: FilterSpec = FilterSpec {
    name: "resize",
    description: "integration test filter",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("w", OptionKind::Int(NumericBounds::inclusive(0, 32767))),
        OptionSpec::new("h", OptionKind::Int(NumericBounds::inclusive(0, 32767))),
        OptionSpec::new("mode", OptionKind::Enum(EnumDomain::of::<Mode>())),
        OptionSpec::new("opacity", OptionKind::Float(NumericBounds::inclusive(0.0, 1.0))),
        OptionSpec::new("label", OptionKind::text()),
        OptionSpec::new("path", OptionKind::quoted_text()),
    ],
};

/// Filter whose first three options are positional.
pub static TRIPLE: FilterSpec = FilterSpec {
    name: "triple",
    description: "positional integration test filter",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("first", OptionKind::Int(NumericBounds::any())).positional(),
        OptionSpec::new("second", OptionKind::Int(NumericBounds::any())).positional(),
        OptionSpec::new("third", OptionKind::Int(NumericBounds::any())).positional(),
        OptionSpec::new("name", OptionKind::text()),
        OptionSpec::new("other", OptionKind::text()),
    ],
};
