//! Frame geometry: `crop`, `pad`, `transpose`.

use super::EvalMode;
use crate::args::{RenderStrategy, RenderStyle};
use crate::color::Color;
use crate::command_enum;
use crate::error::Result;
use crate::schema::{EnumDomain, FilterSpec, OptionKind, OptionSpec};
use crate::value::{BoolStyle, OptionValue};

pub static CROP: FilterSpec = FilterSpec {
    name: "crop",
    description: "Crop the input video to the given size",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("w", OptionKind::Expr)
            .positional()
            .describe("Width of the output, positional"),
        OptionSpec::new("h", OptionKind::Expr)
            .positional()
            .describe("Height of the output, positional"),
        OptionSpec::new("x", OptionKind::Expr).describe("Horizontal offset"),
        OptionSpec::new("y", OptionKind::Expr).describe("Vertical offset"),
        OptionSpec::new("keep_aspect", OptionKind::Bool(BoolStyle::Explicit))
            .describe("Keep the display aspect ratio"),
        OptionSpec::new("exact", OptionKind::Bool(BoolStyle::Explicit))
            .describe("Do not round to chroma subsampling"),
    ],
};

filter_facade! {
    /// Builder for `crop`.
    ///
    /// Width and height are written positionally, so they are only set
    /// together through [`Crop::size`] to keep them in order.
    Crop => CROP
}

impl Crop {
    pub fn size(
        &mut self,
        width: impl Into<OptionValue>,
        height: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.set("w", width)?;
        self.set("h", height)
    }

    pub fn x(&mut self, x: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("x", x)
    }

    pub fn y(&mut self, y: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("y", y)
    }

    pub fn keep_aspect(&mut self, keep: bool) -> Result<&mut Self> {
        self.set("keep_aspect", keep)
    }

    pub fn exact(&mut self, exact: bool) -> Result<&mut Self> {
        self.set("exact", exact)
    }
}

pub static PAD: FilterSpec = FilterSpec {
    name: "pad",
    description: "Add borders around the input video",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("w", OptionKind::Expr).describe("Padded width"),
        OptionSpec::new("h", OptionKind::Expr).describe("Padded height"),
        OptionSpec::new("x", OptionKind::Expr).describe("Input offset from the left"),
        OptionSpec::new("y", OptionKind::Expr).describe("Input offset from the top"),
        OptionSpec::new("color", OptionKind::Color).describe("Border color"),
        OptionSpec::new("eval", OptionKind::Enum(EnumDomain::of::<EvalMode>())),
    ],
};

filter_facade! {
    /// Builder for `pad`.
    Pad => PAD
}

impl Pad {
    pub fn size(
        &mut self,
        width: impl Into<OptionValue>,
        height: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.set("w", width)?;
        self.set("h", height)
    }

    pub fn position(
        &mut self,
        x: impl Into<OptionValue>,
        y: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.set("x", x)?;
        self.set("y", y)
    }

    pub fn color(&mut self, color: Color) -> Result<&mut Self> {
        self.set("color", color)
    }

    pub fn eval(&mut self, mode: EvalMode) -> Result<&mut Self> {
        self.set("eval", OptionValue::token(mode))
    }
}

command_enum! {
    /// Rotation and flip applied by `transpose`.
    pub enum TransposeDir {
        CclockFlip => "cclock_flip",
        Clock,
        Cclock,
        ClockFlip => "clock_flip",
    }
}

command_enum! {
    /// Skip the transposition for input already in this orientation.
    pub enum TransposePassthrough {
        None,
        Portrait,
        Landscape,
    }
}

pub static TRANSPOSE: FilterSpec = FilterSpec {
    name: "transpose",
    description: "Transpose rows with columns",
    style: RenderStyle::new(RenderStrategy::Named),
    options: &[
        OptionSpec::new("dir", OptionKind::Enum(EnumDomain::of::<TransposeDir>()))
            .describe("Transposition direction"),
        OptionSpec::new(
            "passthrough",
            OptionKind::Enum(EnumDomain::of::<TransposePassthrough>()),
        ),
    ],
};

filter_facade! {
    /// Builder for `transpose`.
    Transpose => TRANSPOSE
}

impl Transpose {
    pub fn dir(&mut self, dir: TransposeDir) -> Result<&mut Self> {
        self.set("dir", OptionValue::token(dir))
    }

    pub fn passthrough(&mut self, mode: TransposePassthrough) -> Result<&mut Self> {
        self.set("passthrough", OptionValue::token(mode))
    }
}
