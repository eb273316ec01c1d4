//! `scale` (libswscale) and `zscale` (zimg).

use super::EvalMode;
use crate::args::{RenderStrategy, RenderStyle};
use crate::command_enum;
use crate::error::Result;
use crate::schema::{EnumDomain, FilterSpec, OptionKind, OptionSpec};
use crate::validate::NumericBounds;
use crate::value::OptionValue;

command_enum! {
    /// Algorithm and behaviour flags of libswscale.
    pub enum ScaleFlag {
        FastBilinear => "fast_bilinear",
        Bilinear,
        Bicubic,
        Experimental,
        Neighbor,
        Area,
        Bicublin,
        Gauss,
        Sinc,
        Lanczos,
        Spline,
        PrintInfo => "print_info",
        AccurateRnd => "accurate_rnd",
        FullChromaInt => "full_chroma_int",
        FullChromaInp => "full_chroma_inp",
        Bitexact,
    }
}

command_enum! {
    /// Interlaced-aware scaling.
    pub enum Interlacing {
        Enabled => "1",
        Disabled => "0",
        /// Follow the frame's interlacing flag.
        Auto => "-1",
    }
}

command_enum! {
    pub enum ForceAspect {
        Disable,
        Decrease,
        Increase,
    }
}

command_enum! {
    /// Resampling kernel of zimg.
    pub enum ZscaleFilter {
        Point,
        Bilinear,
        Bicubic,
        Spline16,
        Spline36,
        Lanczos,
    }
}

command_enum! {
    pub enum Dither {
        None,
        Ordered,
        Random,
        ErrorDiffusion => "error_diffusion",
    }
}

command_enum! {
    /// Color primaries.
    pub enum Primaries {
        Input,
        Bt709 => "709",
        Unspecified,
        Smpte170m => "170m",
        Smpte240m => "240m",
        Bt2020 => "2020",
    }
}

command_enum! {
    /// YUV/RGB conversion matrix.
    pub enum Matrix {
        Input,
        Bt709 => "709",
        Unspecified,
        Bt470bg => "470bg",
        Smpte170m => "170m",
        Bt2020Ncl => "2020_ncl",
        Bt2020Cl => "2020_cl",
    }
}

command_enum! {
    /// Transfer characteristics.
    pub enum Transfer {
        Input,
        Bt709 => "709",
        Unspecified,
        Bt601 => "601",
        Linear,
        Bt2020_10 => "2020_10",
        Bt2020_12 => "2020_12",
        Smpte2084,
        Srgb => "iec61966-2-1",
        AribStdB67 => "arib-std-b67",
    }
}

command_enum! {
    pub enum ColorRange {
        Input,
        Limited,
        Full,
        Unknown,
        Tv,
        Pc,
    }
}

pub static SCALE: FilterSpec = FilterSpec {
    name: "scale",
    description: "Resize video using libswscale",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("w", OptionKind::Expr).describe("Output width"),
        OptionSpec::new("h", OptionKind::Expr).describe("Output height"),
        OptionSpec::new("flags", OptionKind::flags(EnumDomain::of::<ScaleFlag>()))
            .describe("Scaler flags"),
        OptionSpec::new("interl", OptionKind::Enum(EnumDomain::of::<Interlacing>()))
            .describe("Interlaced-aware scaling"),
        OptionSpec::new("eval", OptionKind::Enum(EnumDomain::of::<EvalMode>()))
            .describe("When to evaluate width and height"),
        OptionSpec::new(
            "force_original_aspect_ratio",
            OptionKind::Enum(EnumDomain::of::<ForceAspect>()),
        )
        .describe("Shrink or grow the output to keep the input aspect ratio"),
        OptionSpec::new(
            "force_divisible_by",
            OptionKind::Int(NumericBounds::inclusive(1, 256)),
        )
        .describe("Round the forced size to a multiple of this"),
    ],
};

filter_facade! {
    /// Builder for `scale`.
    Scale => SCALE
}

impl Scale {
    /// Output width: pixels, or an expression such as `iw/2`. `-1` and `-2`
    /// keep the aspect ratio.
    pub fn width(&mut self, width: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("w", width)
    }

    pub fn height(&mut self, height: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("h", height)
    }

    pub fn size(&mut self, width: i64, height: i64) -> Result<&mut Self> {
        self.set("w", width)?;
        self.set("h", height)
    }

    pub fn flags(&mut self, flags: impl IntoIterator<Item = ScaleFlag>) -> Result<&mut Self> {
        self.set("flags", OptionValue::flags(flags))
    }

    pub fn interlacing(&mut self, mode: Interlacing) -> Result<&mut Self> {
        self.set("interl", OptionValue::token(mode))
    }

    pub fn eval(&mut self, mode: EvalMode) -> Result<&mut Self> {
        self.set("eval", OptionValue::token(mode))
    }

    pub fn force_original_aspect_ratio(&mut self, mode: ForceAspect) -> Result<&mut Self> {
        self.set("force_original_aspect_ratio", OptionValue::token(mode))
    }

    pub fn force_divisible_by(&mut self, divisor: i64) -> Result<&mut Self> {
        self.set("force_divisible_by", divisor)
    }
}

pub static ZSCALE: FilterSpec = FilterSpec {
    name: "zscale",
    description: "Resize and convert color space using zimg",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("w", OptionKind::Expr).describe("Output width"),
        OptionSpec::new("h", OptionKind::Expr).describe("Output height"),
        OptionSpec::new("filter", OptionKind::Enum(EnumDomain::of::<ZscaleFilter>()))
            .describe("Resampling kernel"),
        OptionSpec::new("dither", OptionKind::Enum(EnumDomain::of::<Dither>())),
        OptionSpec::new("primaries", OptionKind::Enum(EnumDomain::of::<Primaries>()))
            .describe("Output color primaries"),
        OptionSpec::new("primariesin", OptionKind::Enum(EnumDomain::of::<Primaries>()))
            .describe("Input color primaries"),
        OptionSpec::new("matrix", OptionKind::Enum(EnumDomain::of::<Matrix>()))
            .describe("Output matrix"),
        OptionSpec::new("matrixin", OptionKind::Enum(EnumDomain::of::<Matrix>()))
            .describe("Input matrix"),
        OptionSpec::new("transfer", OptionKind::Enum(EnumDomain::of::<Transfer>()))
            .describe("Output transfer characteristics"),
        OptionSpec::new("transferin", OptionKind::Enum(EnumDomain::of::<Transfer>()))
            .describe("Input transfer characteristics"),
        OptionSpec::new("range", OptionKind::Enum(EnumDomain::of::<ColorRange>()))
            .describe("Output color range"),
        OptionSpec::new("rangein", OptionKind::Enum(EnumDomain::of::<ColorRange>()))
            .describe("Input color range"),
        OptionSpec::new("npl", OptionKind::Float(NumericBounds::at_least(0.0)))
            .describe("Nominal peak luminance in cd/m^2"),
    ],
};

filter_facade! {
    /// Builder for `zscale`.
    Zscale => ZSCALE
}

impl Zscale {
    pub fn width(&mut self, width: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("w", width)
    }

    pub fn height(&mut self, height: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("h", height)
    }

    pub fn filter(&mut self, filter: ZscaleFilter) -> Result<&mut Self> {
        self.set("filter", OptionValue::token(filter))
    }

    pub fn dither(&mut self, dither: Dither) -> Result<&mut Self> {
        self.set("dither", OptionValue::token(dither))
    }

    pub fn primaries(&mut self, primaries: Primaries) -> Result<&mut Self> {
        self.set("primaries", OptionValue::token(primaries))
    }

    pub fn primaries_in(&mut self, primaries: Primaries) -> Result<&mut Self> {
        self.set("primariesin", OptionValue::token(primaries))
    }

    pub fn matrix(&mut self, matrix: Matrix) -> Result<&mut Self> {
        self.set("matrix", OptionValue::token(matrix))
    }

    pub fn matrix_in(&mut self, matrix: Matrix) -> Result<&mut Self> {
        self.set("matrixin", OptionValue::token(matrix))
    }

    pub fn transfer(&mut self, transfer: Transfer) -> Result<&mut Self> {
        self.set("transfer", OptionValue::token(transfer))
    }

    pub fn transfer_in(&mut self, transfer: Transfer) -> Result<&mut Self> {
        self.set("transferin", OptionValue::token(transfer))
    }

    pub fn range(&mut self, range: ColorRange) -> Result<&mut Self> {
        self.set("range", OptionValue::token(range))
    }

    pub fn range_in(&mut self, range: ColorRange) -> Result<&mut Self> {
        self.set("rangein", OptionValue::token(range))
    }

    pub fn nominal_peak_luminance(&mut self, npl: f64) -> Result<&mut Self> {
        self.set("npl", npl)
    }
}
