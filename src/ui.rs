use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::filler::FillerSource;
use crate::page::Page;
use crate::typewriter::Phase;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const CURSOR: &str = "▌";

/// Lines a paragraph needs when word wrapped to `width` columns, matching
/// `Wrap { trim: true }`: words move to the next line whole and only words
/// wider than a line are split.
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = usize::from(width);
    let mut lines = 1usize;
    let mut line_width = 0;
    for word in text.split_whitespace() {
        let mut word_width = word.width();
        if line_width > 0 && line_width + 1 + word_width <= width {
            line_width += 1 + word_width;
            continue;
        }
        if line_width > 0 {
            lines += 1;
        }
        while word_width > width {
            lines += 1;
            word_width -= width;
        }
        line_width = word_width;
    }
    u16::try_from(lines).unwrap_or(u16::MAX)
}

impl<F: FillerSource> Widget for &Page<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let name_style = Style::default().patch(bold_style).fg(Color::Cyan);
        let typed_style = Style::default().fg(Color::Magenta);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let body_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let body_height: u16 = self
            .paragraph_texts()
            .map(|p| wrapped_height(p, body_width) + 1)
            .sum();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),           // name
                Constraint::Length(1),           // typewriter
                Constraint::Length(1),           // padding
                Constraint::Length(1),           // section title
                Constraint::Length(1),           // padding
                Constraint::Length(body_height), // paragraphs
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(self.name_text(), name_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        // the cursor rests while holding a full phrase
        let cursor_style = if self.typewriter_phase() == Phase::PausedAtFull {
            dim_style
        } else {
            typed_style
        };
        Paragraph::new(Line::from(vec![
            Span::styled(self.typed_text(), typed_style),
            Span::styled(CURSOR, cursor_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        if self.section_count() > 0 {
            Paragraph::new(Line::from(vec![
                Span::styled(self.section_title(), bold_style),
                Span::styled(
                    format!("  {}/{}", self.section_index() + 1, self.section_count()),
                    dim_style,
                ),
            ]))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }

        let mut lines = Vec::new();
        for text in self.paragraph_texts() {
            lines.push(Line::from(text));
            lines.push(Line::default());
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);

        let legend = format!(
            "(←/→) section / (r)eplay / (p)lay: {} / (esc)ape",
            if self.is_playing() { "on" } else { "off" }
        );
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Section};
    use crate::filler::FixedFiller;
    use std::time::Duration;

    fn hash_filler() -> FixedFiller {
        FixedFiller('#')
    }

    fn create_test_page(settled: bool) -> Page<FixedFiller> {
        let config = Config {
            name: "Ada Lovelace".into(),
            sections: vec![
                Section::new("About Me", &["Analytical engines and poetry."]),
                Section::new("Notes", &["Note G"]),
            ],
            ..Config::default()
        };
        let mut page = Page::with_filler(&config, hash_filler).unwrap();
        page.start(Duration::ZERO).unwrap();
        if settled {
            page.advance(Duration::from_millis(1_400));
        }
        page
    }

    fn render_to_string(page: &Page<FixedFiller>, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        page.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_ui_renders_settled_page() {
        let page = create_test_page(true);
        let rendered = render_to_string(&page, Rect::new(0, 0, 80, 24));

        assert!(rendered.contains("Ada Lovelace"));
        assert!(rendered.contains("About Me"));
        assert!(rendered.contains("1/2"));
        assert!(rendered.contains("Analytical engines and poetry."));
        assert!(rendered.contains(page.typed_text()));
        assert!(rendered.contains(CURSOR));
    }

    #[test]
    fn test_ui_renders_scrambled_frames() {
        let page = create_test_page(false);
        let rendered = render_to_string(&page, Rect::new(0, 0, 80, 24));

        // step 2 keeps the whole name masked on the first frame
        assert!(!rendered.contains("Ada Lovelace"));
        assert!(rendered.contains("### #######"));
        assert!(rendered.contains("A######### ####### ### #######"));
    }

    #[test]
    fn test_ui_legend_reflects_play_toggle() {
        let mut page = create_test_page(true);
        let area = Rect::new(0, 0, 80, 24);
        assert!(render_to_string(&page, area).contains("(p)lay: on"));

        page.toggle_play(Duration::from_millis(1_500)).unwrap();
        assert!(render_to_string(&page, area).contains("(p)lay: off"));
    }

    #[test]
    fn test_ui_narrow_area_keeps_last_wrapped_line() {
        let config = Config {
            name: "Ada".into(),
            sections: vec![Section::new("Notes", &["aaaa bbbbbb cccc"])],
            ..Config::default()
        };
        let mut page = Page::with_filler(&config, hash_filler).unwrap();
        page.start(Duration::ZERO).unwrap();
        page.advance(Duration::from_millis(1_400));

        // 20 columns minus the margins leaves 10 for the body
        let rendered = render_to_string(&page, Rect::new(0, 0, 20, 24));
        assert!(rendered.contains("aaaa"));
        assert!(rendered.contains("bbbbbb"));
        assert!(rendered.contains("cccc"));
    }

    #[test]
    fn test_ui_small_area() {
        let page = create_test_page(true);
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);

        (&page).render(area, &mut buffer);

        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("abcdefghij", 10), 1);
        assert_eq!(wrapped_height("abcdefghijk", 10), 2);
        assert_eq!(wrapped_height("abc", 0), 0);
        // three rows by words even though 16 columns fit in two by characters
        assert_eq!(wrapped_height("aaaa bbbbbb cccc", 10), 3);
        assert_eq!(wrapped_height("aaaa bbbb cccc", 9), 2);
        assert_eq!(wrapped_height("abcdefghijklmnopqrstuvwxy", 10), 3);
    }
}
