use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::article::Token;
use crate::config::{CursorStyle, ThemeStyle};
use crate::result::{ResultsSummary, SessionResult};
use crate::session::{Session, SessionStatus};
use crate::store::State;
use crate::util::format_elapsed;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

struct Palette {
    text: Color,
    done: Color,
    error: Color,
    future: Color,
    accent: Color,
    background: Color,
}

impl Palette {
    fn for_theme(theme: ThemeStyle) -> Self {
        match theme {
            ThemeStyle::Day => Palette {
                text: Color::Black,
                done: Color::Green,
                error: Color::Red,
                future: Color::DarkGray,
                accent: Color::Blue,
                background: Color::White,
            },
            ThemeStyle::Night => Palette {
                text: Color::White,
                done: Color::LightGreen,
                error: Color::LightRed,
                future: Color::Gray,
                accent: Color::Magenta,
                background: Color::Black,
            },
        }
    }
}

/// Read-only rendering of the session state
pub struct SessionView<'a> {
    pub state: &'a State,
    pub now: DateTime<Local>,
}

impl<'a> SessionView<'a> {
    pub fn new(state: &'a State, now: DateTime<Local>) -> Self {
        Self { state, now }
    }

    fn article_lines(&self, palette: &Palette) -> Vec<Line<'a>> {
        let Some(article) = self.state.article.as_ref() else {
            return vec![Line::from(Span::styled(
                "waiting for the next article...",
                Style::default().fg(palette.future).add_modifier(Modifier::ITALIC),
            ))];
        };

        let input = &self.state.current_input;
        let mut lines = vec![];
        let mut spans = vec![];

        for (index, token) in article.tokens.iter().enumerate() {
            if token.is_whitespace() {
                let breaks = token.value.matches('\n').count();
                if breaks == 0 {
                    spans.push(Span::raw(" "));
                }
                for _ in 0..breaks {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                }
                continue;
            }

            if index < input.token_index {
                let perfect = input
                    .finished_tokens
                    .get(index)
                    .is_some_and(|f| f.mistakes == 0);
                let color = if perfect { palette.done } else { palette.error };
                spans.push(Span::styled(token.value.clone(), Style::default().fg(color)));
            } else if index == input.token_index && self.state.session != Session::Pending {
                spans.extend(self.active_token(token, palette));
            } else {
                spans.push(Span::styled(
                    token.value.clone(),
                    Style::default().fg(palette.future),
                ));
            }
        }

        lines.push(Line::from(spans));
        lines
    }

    fn active_token(&self, token: &Token, palette: &Palette) -> Vec<Span<'a>> {
        let input = &self.state.current_input;
        let color = if input.is_accurate {
            palette.text
        } else {
            palette.error
        };
        let base = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let chars: Vec<char> = token.value.chars().collect();
        let split = input.char_index.min(chars.len());
        let left: String = chars[..split].iter().collect();
        let at: String = chars.get(split).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
        let right: String = chars.iter().skip(split + 1).collect();

        let cursor = match self.state.preferences.cursor_style {
            CursorStyle::Block => base.add_modifier(Modifier::REVERSED),
            CursorStyle::Line => base.add_modifier(Modifier::UNDERLINED),
            CursorStyle::Invisible => base,
        };

        vec![
            Span::styled(left, base),
            Span::styled(at, cursor),
            Span::styled(right, Style::default().fg(palette.future)),
        ]
    }

    fn status_line(&self) -> String {
        let elapsed = self
            .state
            .session
            .started_at()
            .map(|start| (self.now - start).num_milliseconds().max(0) as u64);

        match (self.state.status(), elapsed, &self.state.interim_result) {
            (SessionStatus::Ongoing, Some(ms), Some(interim)) => format!(
                "{}   {:.0} wpm   {:.0}% acc",
                format_elapsed(ms),
                interim.wpm(),
                interim.accuracy()
            ),
            (SessionStatus::Ongoing, Some(ms), None) => format_elapsed(ms),
            (SessionStatus::Ready, _, _) => "start typing".to_string(),
            _ => String::new(),
        }
    }
}

fn result_line(result: &SessionResult) -> String {
    format!(
        "last: {:.0} wpm   {:.0}% acc   {} mistakes   {}",
        result.wpm(),
        result.accuracy(),
        result.mistakes,
        format_elapsed(result.duration_ms)
    )
}

fn summary_line(summary: &ResultsSummary) -> String {
    format!(
        "{} done   avg {:.0} wpm   {:.0}% acc   {:.1} sd",
        summary.count, summary.mean_wpm, summary.mean_accuracy, summary.wpm_std_dev
    )
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.state.preferences.theme_style);
        buf.set_style(area, Style::default().bg(palette.background).fg(palette.text));

        let lines = self.article_lines(&palette);
        let max_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let text_width = self
            .state
            .article
            .as_ref()
            .map(|a| a.text().width())
            .unwrap_or_default();
        let article_height = (lines.len() as u16).max((text_width as u16 / max_width) + 1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(article_height),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let dim = Style::default().fg(palette.future);
        let accent = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(self.status_line(), accent))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let single_line = lines.len() == 1 && text_width <= max_width as usize;
        Paragraph::new(lines)
            .alignment(if single_line {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        if let Some(last) = self.state.results.last() {
            Paragraph::new(Span::styled(result_line(last), accent))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);

            let summary = ResultsSummary::from_results(&self.state.results);
            Paragraph::new(Span::styled(summary_line(&summary), dim))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled(
            "(tab) new   (ctrl-t) theme   (ctrl-k) cursor   (esc) quit",
            dim.add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
    }
}
