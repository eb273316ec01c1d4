//! `volume`.

use crate::args::{RenderStrategy, RenderStyle};
use crate::command_enum;
use crate::error::Result;
use crate::schema::{EnumDomain, FilterSpec, OptionKind, OptionSpec};
use crate::value::OptionValue;

command_enum! {
    /// Sample precision used while scaling.
    pub enum Precision {
        Fixed,
        Float,
        Double,
    }
}

command_enum! {
    /// When the volume expression is evaluated.
    pub enum VolumeEval {
        Once,
        Frame,
    }
}

command_enum! {
    /// Handling of ReplayGain side data.
    pub enum ReplayGain {
        Drop,
        Ignore,
        Track,
        Album,
    }
}

pub static VOLUME: FilterSpec = FilterSpec {
    name: "volume",
    description: "Change the input audio volume",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("volume", OptionKind::Expr)
            .describe("Gain factor or expression, e.g. 0.5 or 3dB"),
        OptionSpec::new("precision", OptionKind::Enum(EnumDomain::of::<Precision>())),
        OptionSpec::new("eval", OptionKind::Enum(EnumDomain::of::<VolumeEval>())),
        OptionSpec::new("replaygain", OptionKind::Enum(EnumDomain::of::<ReplayGain>())),
    ],
};

filter_facade! {
    /// Builder for `volume`.
    Volume => VOLUME
}

impl Volume {
    /// Gain as a factor (`0.5`) or an expression (`3dB`, `if(lt(t,2),0,1)`).
    pub fn volume(&mut self, gain: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("volume", gain)
    }

    pub fn precision(&mut self, precision: Precision) -> Result<&mut Self> {
        self.set("precision", OptionValue::token(precision))
    }

    pub fn eval(&mut self, mode: VolumeEval) -> Result<&mut Self> {
        self.set("eval", OptionValue::token(mode))
    }

    pub fn replay_gain(&mut self, mode: ReplayGain) -> Result<&mut Self> {
        self.set("replaygain", OptionValue::token(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_factor() {
        let mut volume = Volume::new();
        volume.volume(0.5).unwrap().precision(Precision::Float).unwrap();
        assert_eq!(volume.render().unwrap(), "volume=volume=0.5:precision=float");
    }

    #[test]
    fn test_volume_expression() {
        let mut volume = Volume::new();
        volume
            .volume("if(lt(t,2),0,1)")
            .unwrap()
            .eval(VolumeEval::Frame)
            .unwrap();
        assert_eq!(
            volume.render().unwrap(),
            "volume=volume='if(lt(t,2),0,1)':eval=frame"
        );
    }

    #[test]
    fn test_volume_decibels() {
        let mut volume = Volume::new();
        volume.volume("-3dB").unwrap();
        assert_eq!(volume.render().unwrap(), "volume=volume=-3dB");
    }

    #[test]
    fn test_unknown_enum_token_rejected() {
        let mut volume = Volume::new();
        volume.volume(1).unwrap();
        assert!(volume.into_builder().set_str("replaygain", "loud").is_err());
    }
}
