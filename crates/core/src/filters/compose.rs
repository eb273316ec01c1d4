//! Compositing onto the frame: `overlay` and `drawtext`.

use super::EvalMode;
use crate::args::{RenderStrategy, RenderStyle};
use crate::color::Color;
use crate::command_enum;
use crate::error::Result;
use crate::schema::{EnumDomain, FilterSpec, OptionKind, OptionSpec};
use crate::validate::NumericBounds;
use crate::value::{BoolStyle, OptionValue};

command_enum! {
    /// What `overlay` does when the secondary input ends.
    pub enum EofAction {
        Repeat,
        EndAll => "endall",
        Pass,
    }
}

command_enum! {
    /// Pixel format `overlay` blends in.
    pub enum OverlayFormat {
        Yuv420,
        Yuv420p10,
        Yuv422,
        Yuv422p10,
        Yuv444,
        Rgb,
        Gbrp,
        Auto,
    }
}

pub static OVERLAY: FilterSpec = FilterSpec {
    name: "overlay",
    description: "Overlay one video on top of another",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("x", OptionKind::Expr).describe("Horizontal position of the overlay"),
        OptionSpec::new("y", OptionKind::Expr).describe("Vertical position of the overlay"),
        OptionSpec::new("eof_action", OptionKind::Enum(EnumDomain::of::<EofAction>())),
        OptionSpec::new("eval", OptionKind::Enum(EnumDomain::of::<EvalMode>())),
        OptionSpec::new("shortest", OptionKind::Bool(BoolStyle::Explicit))
            .describe("End with the shortest input"),
        OptionSpec::new("format", OptionKind::Enum(EnumDomain::of::<OverlayFormat>())),
        OptionSpec::new("repeatlast", OptionKind::Bool(BoolStyle::Explicit))
            .describe("Keep showing the last overlay frame"),
        OptionSpec::new("enable", OptionKind::Expr).describe("Timeline expression"),
    ],
};

filter_facade! {
    /// Builder for `overlay`.
    Overlay => OVERLAY
}

impl Overlay {
    /// Position as expressions, e.g. `main_w-overlay_w-10`.
    pub fn position(
        &mut self,
        x: impl Into<OptionValue>,
        y: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.set("x", x)?;
        self.set("y", y)
    }

    pub fn eof_action(&mut self, action: EofAction) -> Result<&mut Self> {
        self.set("eof_action", OptionValue::token(action))
    }

    pub fn eval(&mut self, mode: EvalMode) -> Result<&mut Self> {
        self.set("eval", OptionValue::token(mode))
    }

    pub fn shortest(&mut self, shortest: bool) -> Result<&mut Self> {
        self.set("shortest", shortest)
    }

    pub fn format(&mut self, format: OverlayFormat) -> Result<&mut Self> {
        self.set("format", OptionValue::token(format))
    }

    pub fn repeat_last(&mut self, repeat: bool) -> Result<&mut Self> {
        self.set("repeatlast", repeat)
    }

    pub fn enable(&mut self, expr: &str) -> Result<&mut Self> {
        self.set("enable", OptionValue::expr(expr))
    }
}

pub static DRAWTEXT: FilterSpec = FilterSpec {
    name: "drawtext",
    description: "Draw text using libfreetype",
    style: RenderStyle::new(RenderStrategy::Mixed),
    options: &[
        OptionSpec::new("fontfile", OptionKind::quoted_text()).describe("Path to the font file"),
        OptionSpec::new("text", OptionKind::text())
            .conflicts_with(&["textfile"])
            .describe("Text to draw"),
        OptionSpec::new("textfile", OptionKind::quoted_text())
            .conflicts_with(&["text"])
            .describe("File holding the text to draw"),
        OptionSpec::new("fontcolor", OptionKind::Color),
        OptionSpec::new("fontsize", OptionKind::Expr),
        OptionSpec::new("x", OptionKind::Expr),
        OptionSpec::new("y", OptionKind::Expr),
        OptionSpec::new("alpha", OptionKind::Float(NumericBounds::inclusive(0.0, 1.0)))
            .describe("Text opacity"),
        OptionSpec::new("box", OptionKind::Bool(BoolStyle::Explicit))
            .describe("Draw a box behind the text"),
        OptionSpec::new("boxcolor", OptionKind::Color),
        OptionSpec::new("boxborderw", OptionKind::Int(NumericBounds::at_least(0))),
        OptionSpec::new("borderw", OptionKind::Int(NumericBounds::at_least(0))),
        OptionSpec::new("bordercolor", OptionKind::Color),
        OptionSpec::new("shadowx", OptionKind::Int(NumericBounds::any())),
        OptionSpec::new("shadowy", OptionKind::Int(NumericBounds::any())),
        OptionSpec::new("line_spacing", OptionKind::Int(NumericBounds::any())),
        OptionSpec::new("enable", OptionKind::Expr).describe("Timeline expression"),
    ],
};

filter_facade! {
    /// Builder for `drawtext`.
    ///
    /// `text` and `textfile` are mutually exclusive; setting one while the
    /// other is set fails with `UnsupportedCombination`.
    DrawText => DRAWTEXT
}

impl DrawText {
    pub fn font_file(&mut self, path: &str) -> Result<&mut Self> {
        self.set("fontfile", path)
    }

    pub fn text(&mut self, text: &str) -> Result<&mut Self> {
        self.set("text", text)
    }

    pub fn text_file(&mut self, path: &str) -> Result<&mut Self> {
        self.set("textfile", path)
    }

    pub fn font_color(&mut self, color: Color) -> Result<&mut Self> {
        self.set("fontcolor", color)
    }

    pub fn font_size(&mut self, size: impl Into<OptionValue>) -> Result<&mut Self> {
        self.set("fontsize", size)
    }

    pub fn position(
        &mut self,
        x: impl Into<OptionValue>,
        y: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        self.set("x", x)?;
        self.set("y", y)
    }

    pub fn alpha(&mut self, alpha: f64) -> Result<&mut Self> {
        self.set("alpha", alpha)
    }

    pub fn draw_box(&mut self, enabled: bool) -> Result<&mut Self> {
        self.set("box", enabled)
    }

    pub fn box_color(&mut self, color: Color) -> Result<&mut Self> {
        self.set("boxcolor", color)
    }

    pub fn box_border_width(&mut self, width: i64) -> Result<&mut Self> {
        self.set("boxborderw", width)
    }

    pub fn border_width(&mut self, width: i64) -> Result<&mut Self> {
        self.set("borderw", width)
    }

    pub fn border_color(&mut self, color: Color) -> Result<&mut Self> {
        self.set("bordercolor", color)
    }

    pub fn shadow(&mut self, x: i64, y: i64) -> Result<&mut Self> {
        self.set("shadowx", x)?;
        self.set("shadowy", y)
    }

    pub fn line_spacing(&mut self, spacing: i64) -> Result<&mut Self> {
        self.set("line_spacing", spacing)
    }

    pub fn enable(&mut self, expr: &str) -> Result<&mut Self> {
        self.set("enable", OptionValue::expr(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_overlay_bottom_right() {
        let mut overlay = Overlay::new();
        overlay
            .position("main_w-overlay_w-10", "main_h-overlay_h-10")
            .unwrap()
            .eof_action(EofAction::EndAll)
            .unwrap()
            .shortest(true)
            .unwrap();
        assert_eq!(
            overlay.render().unwrap(),
            "overlay=x=main_w-overlay_w-10:y=main_h-overlay_h-10:eof_action=endall:shortest=1"
        );
    }

    #[test]
    fn test_overlay_enable_expression_is_quoted() {
        let mut overlay = Overlay::new();
        overlay.enable("between(t,1,5)").unwrap();
        assert_eq!(overlay.render().unwrap(), "overlay=enable='between(t,1,5)'");
    }

    #[test]
    fn test_drawtext_escapes_text() {
        let mut text = DrawText::new();
        text.text("Time: 10:00").unwrap().font_size(24).unwrap();
        assert_eq!(text.render().unwrap(), r"drawtext=text=Time\: 10\:00:fontsize=24");
    }

    #[test]
    fn test_drawtext_text_and_textfile_conflict() {
        let mut text = DrawText::new();
        text.text("hello").unwrap();
        assert_eq!(
            text.text_file("/tmp/caption.txt").unwrap_err(),
            FilterError::unsupported_combination("textfile", "text")
        );
        assert_eq!(text.render().unwrap(), "drawtext=text=hello");
    }

    #[test]
    fn test_drawtext_alpha_out_of_range_keeps_state() {
        let mut text = DrawText::new();
        text.text("hi").unwrap().alpha(0.5).unwrap();
        assert!(text.alpha(1.5).is_err());
        assert_eq!(text.render().unwrap(), "drawtext=text=hi:alpha=0.5");
    }

    #[test]
    fn test_drawtext_colors_and_box() {
        let mut text = DrawText::new();
        text.text("x")
            .unwrap()
            .font_color(Color::named("white").unwrap())
            .unwrap()
            .draw_box(true)
            .unwrap()
            .box_color(Color::parse("black@0.5").unwrap())
            .unwrap()
            .box_border_width(5)
            .unwrap();
        assert_eq!(
            text.render().unwrap(),
            "drawtext=text=x:fontcolor=white:box=1:boxcolor=black@0.5:boxborderw=5"
        );
        assert!(text.border_width(-1).is_err());
    }
}
