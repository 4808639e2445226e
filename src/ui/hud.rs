use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::config::Theme;
use crate::game::GameState;

const CONTROLS_HINT: &str =
    "arrows/WASD move · space step · p autoplay · +/- speed · r restart · q quit";

/// Front-end values the HUD shows next to the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub autoplay: bool,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, status_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(status_line(state, info)).alignment(Alignment::Center),
        status_area,
    );

    let hint = fit_to_width(CONTROLS_HINT, usize::from(hint_area.width));
    frame.render_widget(
        Paragraph::new(Line::from(hint))
            .alignment(Alignment::Center)
            .style(Style::default().fg(info.theme.hud_label)),
        hint_area,
    );

    play_area
}

fn status_line<'a>(state: &GameState, info: &HudInfo<'a>) -> Line<'a> {
    let label = Style::default().fg(info.theme.hud_label);
    let value = Style::default()
        .fg(info.theme.hud_value)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(state.score().to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(state.snake().len().to_string(), value),
        Span::styled("  Speed ", label),
        Span::styled(format!("{:.1}/s", state.speed()), value),
        Span::styled("  Autoplay ", label),
        Span::styled(if info.autoplay { "on" } else { "off" }, value),
    ])
}

/// Truncates `text` to at most `width` terminal columns, marking the cut with `…`.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::fit_to_width;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_to_width("a · b", 10), "a · b");
    }

    #[test]
    fn long_text_is_cut_to_width() {
        let cut = fit_to_width("space step · p autoplay", 10);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.width(), 10);
    }

    #[test]
    fn zero_width_yields_empty() {
        assert_eq!(fit_to_width("anything", 0), "");
    }
}
