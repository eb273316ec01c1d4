//! Typed facades over [`FilterBuilder`](crate::builder::FilterBuilder).
//!
//! Each facade owns a builder bound to a static [`FilterSpec`] and exposes
//! one method per option. The methods only pick the option name and wrap
//! the argument; validation and formatting happen in the shared setter.
//!
//! ```
//! use filterkit_core::filters::{Scale, ScaleFlag};
//!
//! let mut scale = Scale::new();
//! scale
//!     .size(1280, -2)?
//!     .flags([ScaleFlag::Lanczos, ScaleFlag::AccurateRnd])?;
//! assert_eq!(scale.render()?, "scale=w=1280:h=-2:flags=lanczos+accurate_rnd");
//! # Ok::<(), filterkit_core::FilterError>(())
//! ```

macro_rules! filter_facade {
    ($(#[$meta:meta])* $name:ident => $spec:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: $crate::builder::FilterBuilder,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    inner: $crate::builder::FilterBuilder::new(&$spec),
                }
            }

            pub fn with_config(config: $crate::config::EngineConfig) -> Self {
                Self {
                    inner: $crate::builder::FilterBuilder::with_config(&$spec, config),
                }
            }

            /// Declaration backing this filter.
            pub fn spec() -> &'static $crate::schema::FilterSpec {
                &$spec
            }

            pub fn render(&self) -> $crate::error::Result<String> {
                self.inner.render()
            }

            pub fn render_args(&self) -> $crate::error::Result<String> {
                self.inner.render_args()
            }

            pub fn into_builder(self) -> $crate::builder::FilterBuilder {
                self.inner
            }

            fn set(
                &mut self,
                option: &str,
                value: impl Into<$crate::value::OptionValue>,
            ) -> $crate::error::Result<&mut Self> {
                self.inner.set(option, value)?;
                Ok(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<$crate::builder::FilterBuilder> for $name {
            fn as_ref(&self) -> &$crate::builder::FilterBuilder {
                &self.inner
            }
        }
    };
}

mod audio;
mod compose;
mod geometry;
mod scale;
mod timing;

pub use audio::{Precision, ReplayGain, Volume, VolumeEval, VOLUME};
pub use compose::{DrawText, EofAction, Overlay, OverlayFormat, DRAWTEXT, OVERLAY};
pub use geometry::{Crop, Pad, Transpose, TransposeDir, TransposePassthrough, CROP, PAD, TRANSPOSE};
pub use scale::{
    ColorRange, Dither, ForceAspect, Interlacing, Matrix, Primaries, Scale, ScaleFlag, Transfer,
    Zscale, ZscaleFilter, SCALE, ZSCALE,
};
pub use timing::{Fade, FadeType, Movie, Setpts, FADE, MOVIE, SETPTS};

use crate::command_enum;

command_enum! {
    /// When expressions such as `w` or `x` are evaluated.
    pub enum EvalMode {
        /// Once, at filter initialization.
        Init,
        /// For every frame.
        Frame,
    }
}

/// Every built-in filter declaration.
pub(crate) fn all_specs() -> [&'static crate::schema::FilterSpec; 11] {
    [
        &SCALE, &CROP, &PAD, &OVERLAY, &DRAWTEXT, &FADE, &VOLUME, &ZSCALE, &MOVIE, &SETPTS,
        &TRANSPOSE,
    ]
}
