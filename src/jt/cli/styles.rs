use colored::{ColoredString, Colorize};
use jt::config::{Palette, Rgb};
use jt::tag::TagKind;

pub const ARROW_RIGHT: &str = "\u{2192}";
pub const ARROW_LEFT: &str = "\u{2190}";

/// The configured palette, resolved once per run.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    palette: Palette,
}

fn truecolor(text: &str, Rgb(r, g, b): Rgb) -> ColoredString {
    text.truecolor(r, g, b)
}

impl Styles {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn icon_tag(&self) -> &str {
        &self.palette.icon_tag
    }

    pub fn icon_dir(&self) -> &str {
        &self.palette.icon_dir
    }

    pub fn paint(&self, kind: TagKind, text: &str) -> ColoredString {
        truecolor(text, self.palette.color_for(kind))
    }

    pub fn ok(&self, text: &str) -> ColoredString {
        truecolor(text, self.palette.color_ok)
    }

    pub fn err(&self, text: &str) -> ColoredString {
        truecolor(text, self.palette.color_err)
    }

    /// `<icon> [key] name`, or `<icon> [key]` when the name is empty.
    pub fn tag_line(&self, kind: TagKind, key: &str, name: &str) -> ColoredString {
        let icon = self.palette.icon_for(kind);
        let text = if name.is_empty() {
            format!("{} [{}]", icon, key)
        } else {
            format!("{} [{}] {}", icon, key, name)
        };
        self.paint(kind, &text)
    }

    /// `<icon> key name` for a directory in a link line.
    pub fn dir_ref(&self, key: &str, name: &str) -> ColoredString {
        let text = if name.is_empty() {
            format!("{} {}", self.icon_dir(), key)
        } else {
            format!("{} {} {}", self.icon_dir(), key, name)
        };
        self.paint(TagKind::Directory, &text)
    }
}
