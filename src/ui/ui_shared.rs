use super::*;

pub(super) fn panel_block<'a>(title: &'a str, theme: &ThemePalette) -> Block<'a> {
    panel_block_with_border(title, theme.border_panel, theme)
}

pub(super) fn panel_block_with_border<'a>(
    title: &'a str,
    border: Color,
    theme: &ThemePalette,
) -> Block<'a> {
    let focused = border == theme.border_focus;
    Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(if focused { theme.border_focus } else { theme.accent_primary })
                .add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .style(Style::default().bg(theme.bg_panel).fg(theme.text_primary))
        .border_style(Style::default().fg(border))
}

pub(super) fn popup_block<'a>(title: &'a str, theme: &ThemePalette) -> Block<'a> {
    Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.border_popup)
                .add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(Style::default().bg(theme.bg_popup).fg(theme.text_primary))
        .border_style(Style::default().fg(theme.border_popup))
}

/// Checkbox-style indicator for a boolean filter.
pub(super) fn flag_span(label: &str, enabled: bool, theme: &ThemePalette) -> Span<'static> {
    let (mark, color) = if enabled {
        ("[x]", theme.accent_success)
    } else {
        ("[ ]", theme.text_muted)
    };
    Span::styled(format!("{} {}", mark, label), Style::default().fg(color))
}

pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(super) fn ellipsize(input: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if input.chars().count() <= max {
        return input.to_string();
    }
    let mut clipped = input.chars().take(max.saturating_sub(1)).collect::<String>();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_rect, ellipsize};

    #[test]
    fn ellipsize_keeps_short_values() {
        assert_eq!(ellipsize("octo", 10), "octo");
        assert_eq!(ellipsize("octo/widgets", 6), "octo/…");
        assert_eq!(ellipsize("octo", 0), "");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }
}
