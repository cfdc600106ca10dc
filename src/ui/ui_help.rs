use super::*;

const HELP_WIDTH: u16 = 60;

pub(super) fn draw_help_overlay(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let lines = BINDING_SPECS
        .iter()
        .map(|spec| {
            let binding = app
                .keybinds()
                .binding_for(spec.action)
                .unwrap_or_else(|| "unbound".to_string());
            Line::from(vec![
                Span::styled(
                    format!("{:>10}  ", binding),
                    Style::default()
                        .fg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(spec.description),
            ])
        })
        .collect::<Vec<Line<'static>>>();

    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered_rect(HELP_WIDTH, height, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(popup_block("Keys", theme)),
        popup,
    );
}
