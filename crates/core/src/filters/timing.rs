//! Timing and sources: `fade`, `setpts`, `movie`.

use std::time::Duration;

use crate::args::{RenderStrategy, RenderStyle};
use crate::color::Color;
use crate::command_enum;
use crate::error::Result;
use crate::escape::Quoting;
use crate::schema::{EnumDomain, FilterSpec, OptionKind, OptionSpec};
use crate::validate::{NumericBounds, Rule};
use crate::value::{BoolStyle, OptionValue};

command_enum! {
    pub enum FadeType {
        In,
        Out,
    }
}

pub static FADE: FilterSpec = FilterSpec {
    name: "fade",
    description: "Fade video in from or out to a color",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("type", OptionKind::Enum(EnumDomain::of::<FadeType>()))
            .describe("Fade in or out"),
        OptionSpec::new("start_frame", OptionKind::Int(NumericBounds::at_least(0))),
        OptionSpec::new("nb_frames", OptionKind::Int(NumericBounds::at_least(1)))
            .describe("Number of frames the fade lasts"),
        OptionSpec::new("alpha", OptionKind::Bool(BoolStyle::Explicit))
            .describe("Fade only the alpha channel"),
        OptionSpec::new("start_time", OptionKind::Duration),
        OptionSpec::new("duration", OptionKind::Duration),
        OptionSpec::new("color", OptionKind::Color),
    ],
};

filter_facade! {
    /// Builder for `fade`.
    Fade => FADE
}

impl Fade {
    pub fn fade_type(&mut self, kind: FadeType) -> Result<&mut Self> {
        self.set("type", OptionValue::token(kind))
    }

    pub fn start_frame(&mut self, frame: i64) -> Result<&mut Self> {
        self.set("start_frame", frame)
    }

    pub fn frames(&mut self, count: i64) -> Result<&mut Self> {
        self.set("nb_frames", count)
    }

    pub fn alpha(&mut self, alpha_only: bool) -> Result<&mut Self> {
        self.set("alpha", alpha_only)
    }

    pub fn start_time(&mut self, start: Duration) -> Result<&mut Self> {
        self.set("start_time", start)
    }

    pub fn duration(&mut self, duration: Duration) -> Result<&mut Self> {
        self.set("duration", duration)
    }

    pub fn color(&mut self, color: Color) -> Result<&mut Self> {
        self.set("color", color)
    }
}

pub static SETPTS: FilterSpec = FilterSpec {
    name: "setpts",
    description: "Rewrite presentation timestamps",
    style: RenderStyle::new(RenderStrategy::Positional),
    options: &[OptionSpec::new("expr", OptionKind::Expr)
        .positional()
        .required()
        .describe("Timestamp expression")],
};

filter_facade! {
    /// Builder for `setpts`.
    Setpts => SETPTS
}

impl Setpts {
    pub fn expr(&mut self, expr: &str) -> Result<&mut Self> {
        self.set("expr", OptionValue::expr(expr))
    }
}

fn is_demuxer_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub static MOVIE: FilterSpec = FilterSpec {
    name: "movie",
    description: "Read frames from a media file",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("filename", OptionKind::quoted_text())
            .positional()
            .required()
            .describe("Media file to read"),
        OptionSpec::new(
            "format_name",
            OptionKind::Text {
                quoting: Quoting::Escape,
                rule: Some(Rule::new("must be a demuxer name", is_demuxer_name)),
            },
        )
        .describe("Force the input format"),
        OptionSpec::new(
            "stream_index",
            OptionKind::Int(NumericBounds::at_least(0).with_unset(-1)),
        )
        .describe("Stream to read, -1 picks the best one"),
        OptionSpec::new("seek_point", OptionKind::Duration),
        OptionSpec::new("streams", OptionKind::text()).describe("Streams to read, '+'-separated"),
        OptionSpec::new("loop", OptionKind::Int(NumericBounds::at_least(0)))
            .describe("Times to read the streams, 0 loops forever"),
    ],
};

filter_facade! {
    /// Builder for `movie`.
    ///
    /// The file name is required and always quoted, so Windows paths and
    /// names containing `:` survive the option parser.
    Movie => MOVIE
}

impl Movie {
    pub fn filename(&mut self, path: &str) -> Result<&mut Self> {
        self.set("filename", path)
    }

    pub fn format_name(&mut self, format: &str) -> Result<&mut Self> {
        self.set("format_name", format)
    }

    pub fn stream_index(&mut self, index: i64) -> Result<&mut Self> {
        self.set("stream_index", index)
    }

    pub fn seek_point(&mut self, position: Duration) -> Result<&mut Self> {
        self.set("seek_point", position)
    }

    pub fn streams(&mut self, streams: &str) -> Result<&mut Self> {
        self.set("streams", streams)
    }

    pub fn loop_count(&mut self, count: i64) -> Result<&mut Self> {
        self.set("loop", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_fade_out() {
        let mut fade = Fade::new();
        fade.fade_type(FadeType::Out)
            .unwrap()
            .start_time(Duration::from_millis(9500))
            .unwrap()
            .duration(Duration::from_millis(500))
            .unwrap();
        assert_eq!(fade.render().unwrap(), "fade=type=out:start_time=9.5:duration=0.5");
    }

    #[test]
    fn test_fade_frames_lower_bound() {
        let mut fade = Fade::new();
        assert!(fade.frames(0).is_err());
        assert!(fade.start_frame(-1).is_err());
        fade.frames(1).unwrap();
        assert_eq!(fade.render().unwrap(), "fade=nb_frames=1");
    }

    #[test]
    fn test_setpts_is_positional() {
        let mut setpts = Setpts::new();
        setpts.expr("PTS-STARTPTS").unwrap();
        assert_eq!(setpts.render().unwrap(), "setpts=PTS-STARTPTS");
    }

    #[test]
    fn test_setpts_requires_expression() {
        assert_eq!(
            Setpts::new().render().unwrap_err(),
            FilterError::missing_required("setpts", "expr")
        );
    }

    #[test]
    fn test_movie_windows_path() {
        let mut movie = Movie::new();
        movie.loop_count(0).unwrap().filename(r"C:\videos\clip.mp4").unwrap();
        assert_eq!(movie.render().unwrap(), r"movie='C:\videos\clip.mp4':loop=0");
    }

    #[test]
    fn test_movie_stream_index_sentinel() {
        let mut movie = Movie::new();
        movie.filename("in.mkv").unwrap();
        assert!(movie.stream_index(-1).is_ok());
        assert!(movie.stream_index(-2).is_err());
        assert_eq!(movie.render().unwrap(), "movie='in.mkv':stream_index=-1");
    }

    #[test]
    fn test_movie_format_name_rule() {
        let mut movie = Movie::new();
        assert_eq!(
            movie.format_name("mp4 --bad").unwrap_err(),
            FilterError::invalid_argument("format_name", "must be a demuxer name")
        );
        movie.format_name("matroska").unwrap();
        assert!(movie.render().is_err());
    }
}
