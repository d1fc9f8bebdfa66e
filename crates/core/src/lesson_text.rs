//! Line-based formatter for lesson bodies.
//!
//! Supports a small markdown subset: `#`/`##`/`###` headings, `- ` bullets,
//! blank lines, paragraphs and `**bold**` spans. Emoji are stripped. The output
//! always has exactly one entry per input line.

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonLine {
    Heading { level: u8, spans: Vec<Span> },
    Bullet(Vec<Span>),
    Paragraph(Vec<Span>),
    Blank,
}

impl LessonLine {
    /// Line text without emphasis markers.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            LessonLine::Heading { spans, .. }
            | LessonLine::Bullet(spans)
            | LessonLine::Paragraph(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            LessonLine::Blank => String::new(),
        }
    }
}

/// Format a lesson body into classified lines.
#[must_use]
pub fn render_lesson(body: &str) -> Vec<LessonLine> {
    body.split('\n').map(render_line).collect()
}

fn render_line(raw: &str) -> LessonLine {
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    let cleaned = strip_emoji(raw);
    let line = cleaned.trim();

    if line.is_empty() {
        return LessonLine::Blank;
    }
    if let Some((level, rest)) = heading(line) {
        return LessonLine::Heading {
            level,
            spans: inline_spans(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return LessonLine::Bullet(inline_spans(rest.trim()));
    }
    LessonLine::Paragraph(inline_spans(line))
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        let level = u8::try_from(hashes).ok()?;
        Some((level, rest.trim()))
    } else {
        None
    }
}

fn inline_spans(text: &str) -> Vec<Span> {
    let mut parts: Vec<String> = text.split("**").map(str::to_owned).collect();
    // odd number of delimiters: the last one stays literal
    if parts.len() % 2 == 0 {
        let tail = parts.pop().unwrap_or_default();
        if let Some(last) = parts.last_mut() {
            last.push_str("**");
            last.push_str(&tail);
        }
    }

    parts
        .into_iter()
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, text)| Span {
            text,
            bold: i % 2 == 1,
        })
        .collect()
}

/// Emoji-presentation code points plus the joiners, keycaps, variation
/// selectors and tag characters that combine with them. Technical symbols and
/// arrows outside the emoji set are kept.
fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x231A..=0x231B
            | 0x2328
            | 0x23CF
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x2B05..=0x2B07
            | 0x2B1B..=0x2B1C
            | 0x2B50
            | 0x2B55
            | 0xE0020..=0xE007F
            | 0x200D
            | 0x20E3
            | 0xFE0E
            | 0xFE0F
    )
}

/// Remove emoji and their joiner / variation-selector code points.
#[must_use]
pub fn strip_emoji(text: &str) -> String {
    text.chars().filter(|c| !is_emoji(*c)).collect()
}
