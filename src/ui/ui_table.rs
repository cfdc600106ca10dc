use super::*;

const NAME_MIN_WIDTH: u16 = 24;
const OWNER_WIDTH: u16 = 18;
const COUNT_WIDTH: u16 = 7;
const ARCHIVED_WIDTH: u16 = 9;

pub(super) fn draw_repo_table(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &ThemePalette) {
    let dashboard = app.dashboard();
    let rows = dashboard.filtered_rows();
    let block = panel_block("Repositories", theme);

    if !dashboard.loaded() {
        let message = format!("{}... waiting for {}", PLACEHOLDER_NAME, app.base_url());
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(theme.text_muted))
                .block(block),
            area,
        );
        return;
    }

    if rows.is_empty() {
        let message = if dashboard.repos().is_empty() {
            "The backend returned no repositories."
        } else {
            "No repositories match the current filters. Press / to edit, Esc to clear."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(theme.text_muted))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Repository", "Owner", "Issues", "PRs", "Archived"]
            .into_iter()
            .map(|title| Cell::from(title).style(Style::default().fg(theme.text_muted))),
    )
    .style(
        Style::default()
            .bg(theme.bg_table_header)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows
        .iter()
        .map(|repo| repo_row(repo, theme))
        .collect::<Vec<Row<'static>>>();

    let widths = [
        Constraint::Min(NAME_MIN_WIDTH),
        Constraint::Length(OWNER_WIDTH),
        Constraint::Length(COUNT_WIDTH),
        Constraint::Length(COUNT_WIDTH),
        Constraint::Length(ARCHIVED_WIDTH),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(theme.bg_selected)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌ ");

    let mut state = TableState::default().with_selected(Some(app.selected_index()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn repo_row(repo: &RepositoryRecord, theme: &ThemePalette) -> Row<'static> {
    let name_style = if repo.archived {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default().fg(theme.text_primary)
    };
    Row::new(vec![
        Cell::from(Span::styled(repo.full_name.clone(), name_style)),
        Cell::from(ellipsize(repo.owner_or_empty(), OWNER_WIDTH as usize)),
        count_cell(repo.open_issues, theme.accent_success, theme),
        count_cell(repo.open_prs, theme.accent_primary, theme),
        Cell::from(if repo.archived { "archived" } else { "" })
            .style(Style::default().fg(theme.accent_warning)),
    ])
}

fn count_cell(value: u64, color: Color, theme: &ThemePalette) -> Cell<'static> {
    let style = if value == 0 {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default().fg(color)
    };
    Cell::from(Line::from(Span::styled(value.to_string(), style)).right_aligned())
}
