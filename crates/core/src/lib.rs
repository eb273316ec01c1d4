//! Typed builders for ffmpeg filter-graph option strings.
//!
//! ```
//! use filterkit_core::filters::{DrawText, Scale};
//! use filterkit_core::FilterChain;
//!
//! let mut scale = Scale::new();
//! scale.size(1280, 720)?;
//!
//! let mut text = DrawText::new();
//! text.text("Take 1: intro")?.font_size(32)?;
//!
//! assert_eq!(text.render()?, r"drawtext=text=Take 1\: intro:fontsize=32");
//!
//! // Inside a graph the argument part is escaped once more.
//! let mut chain = FilterChain::new();
//! chain.push(&scale)?.push(&text)?;
//! assert_eq!(
//!     chain.render()?,
//!     r"scale=w=1280:h=720,drawtext=text=Take 1\\: intro:fontsize=32"
//! );
//! # Ok::<(), filterkit_core::FilterError>(())
//! ```

pub mod args;
pub mod builder;
pub mod color;
pub mod config;
pub mod error;
pub mod escape;
pub mod filters;
pub mod parse;
pub mod registry;
pub mod schema;
pub mod token;
pub mod validate;
pub mod value;

pub use args::{Argument, ArgumentList, RenderStrategy, RenderStyle};
pub use builder::{FilterBuilder, FilterChain, FilterGraph};
pub use color::{Color, ColorResolver, LiteralColorResolver};
pub use config::{
    load_config, load_config_from_str, validate_config, ConfigError, EngineConfig, RequiredPolicy,
};
pub use error::{FilterError, Result};
pub use escape::{escape, escape_graph_args, unescape, Quoting};
pub use parse::{FilterParam, ParsedFilter};
pub use schema::{EnumDomain, FilterSpec, FilterSummary, OptionKind, OptionSpec, OptionSummary};
pub use token::{CommandToken, TokenTable};
pub use validate::{check_bounds, check_not_empty, check_predicate, check_range, NumericBounds, Rule};
pub use value::{BoolStyle, FormatStyle, FormattedValue, OptionValue, RenderedValue, ValueFormatter};
