use super::*;

pub(super) fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let dashboard = app.dashboard();
    let filters = dashboard.filters();
    let editing = app.input_mode() == InputMode::EditingFilter;

    let totals_line = if dashboard.loaded() {
        let totals = dashboard.totals();
        Line::from(vec![
            Span::styled(
                format!("{} repos", totals.repos),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" · ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{} open issues", totals.open_issues),
                Style::default().fg(theme.accent_success),
            ),
            Span::styled(" · ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{} open PRs", totals.open_prs),
                Style::default().fg(theme.accent_primary),
            ),
            Span::styled(
                format!("   of {} fetched", dashboard.repos().len()),
                Style::default().fg(theme.text_muted),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "loading repositories...",
            Style::default().fg(theme.text_muted),
        ))
    };

    let filter_display = if filters.filter_text.is_empty() && !editing {
        "none".to_string()
    } else {
        ellipsize(filters.filter_text.as_str(), 40)
    };
    let filter_hint = if editing {
        "(Enter to apply, Esc to clear)"
    } else {
        "(/ to edit)"
    };
    let filters_line = Line::from(vec![
        Span::styled("filter: ", Style::default().fg(theme.text_muted)),
        Span::raw(filter_display.clone()),
        Span::raw(" "),
        Span::styled(filter_hint, Style::default().fg(theme.text_muted)),
        Span::raw("   "),
        flag_span("hide archived", filters.hide_archived, theme),
        Span::raw("  "),
        flag_span("has issues", filters.require_open_issues, theme),
        Span::raw("  "),
        flag_span("has PRs", filters.require_open_prs, theme),
    ]);

    let border = if editing {
        theme.border_focus
    } else {
        theme.border_panel
    };
    let block = panel_block_with_border("Dashboard", border, theme);
    frame.render_widget(
        Paragraph::new(Text::from(vec![totals_line, filters_line])).block(block),
        area,
    );

    if editing {
        let content = area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if content.width > 0 && content.height > 1 {
            let offset = ("filter: ".len() + filter_display.chars().count()) as u16;
            let cursor_x = content
                .x
                .saturating_add(offset)
                .min(content.x.saturating_add(content.width.saturating_sub(1)));
            frame.set_cursor_position((cursor_x, content.y.saturating_add(1)));
        }
    }
}

pub(super) fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let block = panel_block("Details", theme);
    let lines = match app.selected_repo().filter(|_| app.dashboard().loaded()) {
        Some(repo) => detail_lines(repo, theme),
        None => vec![Line::from(Span::styled(
            "No repository selected",
            Style::default().fg(theme.text_muted),
        ))],
    };
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn detail_lines(repo: &RepositoryRecord, theme: &ThemePalette) -> Vec<Line<'static>> {
    let mut tags = Vec::new();
    if repo.private {
        tags.push("private".to_string());
    }
    if repo.fork {
        tags.push("fork".to_string());
    }
    if repo.archived {
        tags.push("archived".to_string());
    }
    if let Some(branch) = &repo.default_branch {
        tags.push(format!("branch {}", branch));
    }
    if let Some(parent) = &repo.parent {
        tags.push(format!("forked from {}", parent));
    }
    if let Some(organization) = &repo.organization {
        tags.push(format!("org {}", organization));
    }

    let mut title = vec![Span::styled(
        repo.full_name.clone(),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    )];
    if !tags.is_empty() {
        title.push(Span::styled(
            format!("  {}", tags.join(" · ")),
            Style::default().fg(theme.text_muted),
        ));
    }

    let description = repo
        .description
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("No description");
    vec![
        Line::from(title),
        Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(theme.text_muted),
        )),
    ]
}

pub(super) fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let dashboard = app.dashboard();
    let last_updated = dashboard
        .last_updated()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    let mut spans = vec![
        Span::raw(" "),
        connection_span(dashboard.connection(Instant::now()), theme),
        Span::styled("  last updated: ", Style::default().fg(theme.text_muted)),
        Span::raw(last_updated),
    ];
    for endpoint in Endpoint::ALL {
        if endpoint == Endpoint::Repos {
            continue;
        }
        let failing = dashboard
            .health(endpoint)
            .is_some_and(|health| health.consecutive_failures > 0);
        if failing {
            spans.push(Span::styled(
                format!("  ⚠ {} failing", endpoint.label()),
                Style::default().fg(theme.accent_danger),
            ));
        }
    }
    if dashboard.waiting_for_update() {
        spans.push(Span::styled(
            "  ⟳ backend update in progress",
            Style::default().fg(theme.accent_warning),
        ));
    }
    if !app.status().is_empty() {
        spans.push(Span::styled("  │ ", Style::default().fg(theme.text_muted)));
        spans.push(Span::raw(app.status().to_string()));
    }
    spans.push(Span::styled("  ? help", Style::default().fg(theme.text_muted)));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.bg_panel).fg(theme.text_primary)),
        area,
    );
}

fn connection_span(connection: Connection, theme: &ThemePalette) -> Span<'static> {
    match connection {
        Connection::Connecting => Span::styled("○ connecting", Style::default().fg(theme.text_muted)),
        Connection::Online => Span::styled("● online", Style::default().fg(theme.accent_success)),
        Connection::Stale { since } => Span::styled(
            format!("● stale ({}s)", since.as_secs()),
            Style::default().fg(theme.accent_warning),
        ),
        Connection::Offline { failures, message } => Span::styled(
            format!("● offline ×{}: {}", failures, ellipsize(message.as_str(), 48)),
            Style::default().fg(theme.accent_danger),
        ),
    }
}
