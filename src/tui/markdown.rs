//! Markdown → ratatui `Text` renderer.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, inline code, fenced
//! code blocks (with syntect highlighting), lists, blockquotes, and links.
//!
//! Output is word-wrapped to the requested width with span styles kept
//! intact. Rendering never fails: a zero width yields the raw text, and a
//! code line syntect cannot highlight is emitted unhighlighted.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Longest horizontal rule drawn, in columns.
const MAX_RULE_WIDTH: usize = 40;

/// Render markdown wrapped at `width` columns in the terminal's default colour.
pub fn render(content: &str, width: u16) -> Text<'static> {
    render_with_color(content, width, Color::Reset)
}

/// Parse markdown content into styled `Text`, wrapped at `width` columns.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render_with_color(content: &str, width: u16, base_fg: Color) -> Text<'static> {
    if width == 0 {
        return Text::raw(content.to_owned());
    }

    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg, width as usize);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }

    let lines = w
        .text
        .lines
        .into_iter()
        .zip(w.prefix_counts)
        .flat_map(|(line, prefixes)| wrap_line(line, prefixes, width as usize))
        .collect::<Vec<_>>();
    Text::from(lines)
}

// ── Wrapping ────────────────────────────────────────────────────────────────

/// Greedy word wrap over styled spans. The first `prefix_count` spans are
/// line decoration (code block or blockquote border) and are repeated on
/// every continuation row. Words wider than the row are broken at
/// character boundaries, and rows never end in a space.
fn wrap_line(line: Line<'static>, prefix_count: usize, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    let mut body = line.spans;
    let mut prefix = body.drain(..prefix_count.min(body.len())).collect::<Vec<_>>();
    let mut prefix_width: usize = prefix.iter().map(Span::width).sum();
    if prefix_width >= width {
        // No room for decoration: wrap it along with the text.
        prefix.append(&mut body);
        body = prefix;
        prefix = Vec::new();
        prefix_width = 0;
    }

    let mut rows = Rows::new(width - prefix_width);
    for span in body {
        rows.push_span(span);
    }

    rows.finish()
        .into_iter()
        .map(|row| {
            let mut spans = prefix.clone();
            spans.extend(row);
            Line::from(spans)
        })
        .collect()
}

/// Row builder for [`wrap_line`].
struct Rows {
    width: usize,
    done: Vec<Vec<Span<'static>>>,
    current: Vec<Span<'static>>,
    used: usize,
}

impl Rows {
    fn new(width: usize) -> Self {
        Self {
            width,
            done: Vec::new(),
            current: Vec::new(),
            used: 0,
        }
    }

    fn push_span(&mut self, span: Span<'static>) {
        let style = span.style;
        for word in span.content.split_inclusive(' ') {
            let text = word.trim_end_matches(' ');
            let spaces = &word[text.len()..];
            let visible = text.width();

            if self.used > 0 && self.used + visible > self.width {
                self.break_row();
            }
            // Continuation rows don't start with whitespace.
            if self.used == 0 && text.is_empty() && !self.done.is_empty() {
                continue;
            }

            if visible > self.width {
                for c in text.chars() {
                    let cw = c.width().unwrap_or(0);
                    if self.used > 0 && self.used + cw > self.width {
                        self.break_row();
                    }
                    let mut buf = [0u8; 4];
                    self.append(c.encode_utf8(&mut buf), style);
                }
            } else if !text.is_empty() {
                self.append(text, style);
            }
            if !spaces.is_empty() {
                self.append(spaces, style);
            }
        }
    }

    fn append(&mut self, text: &str, style: Style) {
        match self.current.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(text),
            _ => self.current.push(Span::styled(text.to_owned(), style)),
        }
        self.used += text.width();
    }

    fn break_row(&mut self) {
        let mut row = std::mem::take(&mut self.current);
        trim_trailing_spaces(&mut row);
        if !row.is_empty() {
            self.done.push(row);
        }
        self.used = 0;
    }

    fn finish(mut self) -> Vec<Vec<Span<'static>>> {
        if !self.current.is_empty() {
            self.break_row();
        }
        self.done
    }
}

fn trim_trailing_spaces(row: &mut Vec<Span<'static>>) {
    loop {
        let kept = match row.last() {
            Some(last) => last.content.trim_end_matches(' ').len(),
            None => return,
        };
        if kept > 0 {
            if let Some(last) = row.last_mut() {
                last.content.to_mut().truncate(kept);
            }
            return;
        }
        row.pop();
    }
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Target wrap width (used for rules)
    width: usize,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`).
    line_prefixes: Vec<Span<'static>>,
    /// How many prefix spans each line in `text` starts with.
    prefix_counts: Vec<usize>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Active syntax highlighter for fenced code blocks.
    highlighter: Option<HighlightLines<'static>>,
    /// True when inside a fenced code block without syntax highlighting.
    in_plain_code: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color, width: usize) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            width,
            styles: vec![],
            line_prefixes: vec![],
            prefix_counts: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            link_url: None,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    /// Push a style that composes with the current one (inherits parent modifiers).
    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
        self.prefix_counts.push(self.line_prefixes.len());
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(self.width.min(MAX_RULE_WIDTH)),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            _ => {} // HTML, footnotes, math: skipped
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                let depth = heading_depth(level) as usize;
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(depth)),
                    hs,
                )));
                // Heading text inherits the style, not just the `#` prefix.
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes.push(Span::styled(
                    "│ ",
                    Style::default().fg(Color::DarkGray),
                ));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                if !self.text.lines.is_empty() {
                    self.push_line(Line::default());
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };

                // Top border: ╭── lang  or just ╭──
                let bs = Style::default().fg(Color::DarkGray);
                let top = if lang.is_empty() {
                    Line::from(Span::styled("╭──", bs))
                } else {
                    Line::from(vec![
                        Span::styled("╭── ", bs),
                        Span::styled(
                            lang.to_owned(),
                            bs.add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" ──", bs),
                    ])
                };
                self.push_line(top);

                // Left border prefix for code content
                self.line_prefixes
                    .push(Span::styled("│ ", bs));

                // Syntax highlighting setup
                if !lang.is_empty()
                    && let Some(syn) = SYNTAX_SET.find_syntax_by_token(lang)
                    && let Some(theme) = THEME_SET.themes.get("base16-ocean.dark")
                {
                    self.highlighter = Some(HighlightLines::new(syn, theme));
                }
                if self.highlighter.is_none() {
                    self.in_plain_code = true;
                }
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(
                        marker,
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions: skipped
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.line_prefixes.pop(); // remove │ prefix before bottom border
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(Line::from(Span::styled("╰──", bs)));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {}
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
        let raw = cow.to_string();
        let text = if raw.contains('\t') {
            raw.replace('\t', "    ")
        } else {
            raw
        };

        // Syntax-highlighted code block. Take the highlighter out to avoid
        // double-mutable-borrow (highlight_line borrows it, push_line borrows self)
        if let Some(mut hl) = self.highlighter.take() {
            for line in LinesWithEndings::from(text.as_str()) {
                let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) else {
                    let plain = line.trim_end_matches('\n').to_owned();
                    self.push_line(Line::from(Span::styled(
                        plain,
                        Style::default().fg(Color::White),
                    )));
                    continue;
                };
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = frag.trim_end_matches('\n').replace('\t', "    ");
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                if !spans.is_empty() {
                    self.push_line(Line::from(spans));
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        // Plain code block (no highlighting available)
        if self.in_plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        // Normal text inherits current style (heading, bold, etc.)
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
