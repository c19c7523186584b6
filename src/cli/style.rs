//! CLI styling utilities
//!
//! Status output goes to stderr so stdout carries only the release summary.
//! Styles therefore detect color support on stderr unless told otherwise.
//!
//! | Method       | Color  | Semantic Use                     |
//! |--------------|--------|----------------------------------|
//! | `.accent()`  | Cyan   | Tags, PR numbers, topics         |
//! | `.success()` | Green  | Published release                |
//! | `.warn()`    | Yellow | Dry run, transient trigger errors |
//! | `.muted()`   | Dim    | Release URL                      |
//! | `.emphasis()`| Bold   | Phase headers                    |

use std::fmt::{self, Display};
use std::sync::OnceLock;

use indicatif::ProgressStyle;
pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied.
///
/// Renders ANSI codes only when the target stream supports them
/// (`owo-colors` honours `NO_COLOR`, `CLICOLOR` and TTY detection).
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style) -> Self {
        Self {
            value,
            style,
            stream: Stream::Stderr,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Extension trait for semantic terminal styling.
pub trait Stylize: Display {
    /// Cyan, for primary information
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT)
    }

    /// Green, for completion
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS)
    }

    /// Yellow, for attention
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN)
    }

    /// Dim, for secondary details
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED)
    }

    /// Bold, for headers
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green checkmark
pub const fn check() -> Styled<&'static str> {
    Styled::new("✓", SUCCESS)
}

/// Yellow warning sign
pub const fn caution() -> Styled<&'static str> {
    Styled::new("!", WARN)
}

const fn to_hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// Clickable OSC 8 link showing the URL itself, or the plain URL
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    if supports_hyperlinks::on(to_hyperlink_stream(stream)) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while waiting on the trigger channel
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        })
        .clone()
}
