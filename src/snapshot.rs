use crate::backend::{Freshness, RepositoryRecord};
use crate::view::Totals;

const NAME_WIDTH: usize = 40;
const OWNER_WIDTH: usize = 20;

/// Plain-text rendering of the filtered view for the `snapshot` command.
pub fn render_table(rows: &[&RepositoryRecord], totals: Totals, last_updated: Option<&Freshness>) -> String {
    let mut out = table_line("REPOSITORY", "OWNER", "ISSUES", "PRS", "ARCHIVED");
    for repo in rows {
        out.push_str(&table_line(
            &truncate(&repo.full_name, NAME_WIDTH),
            &truncate(repo.owner_or_empty(), OWNER_WIDTH),
            &repo.open_issues.to_string(),
            &repo.open_prs.to_string(),
            if repo.archived { "yes" } else { "" },
        ));
    }
    out.push('\n');
    out.push_str(&totals_line(totals));
    out.push('\n');
    if let Some(value) = last_updated {
        out.push_str(&format!("last updated: {}\n", value));
    }
    out
}

fn table_line(name: &str, owner: &str, issues: &str, prs: &str, archived: &str) -> String {
    format!(
        "{:<name_width$}  {:<owner_width$}  {:>6}  {:>5}  {}\n",
        name,
        owner,
        issues,
        prs,
        archived,
        name_width = NAME_WIDTH,
        owner_width = OWNER_WIDTH,
    )
}

pub fn totals_line(totals: Totals) -> String {
    format!(
        "{} repos · {} open issues · {} open PRs",
        totals.repos, totals.open_issues, totals.open_prs
    )
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut clipped = value.chars().take(max.saturating_sub(1)).collect::<String>();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::{render_table, totals_line, truncate};
    use crate::backend::{Freshness, RepositoryRecord};
    use crate::view::{self, Filters};

    #[test]
    fn renders_rows_and_totals() {
        let mut archived = RepositoryRecord::new("octo/old");
        archived.owner = Some("octo".to_string());
        archived.archived = true;
        archived.open_issues = 2;
        let mut active = RepositoryRecord::new("octo/new");
        active.open_issues = 1;
        active.open_prs = 3;
        let repos = vec![archived, active];
        let filters = Filters {
            require_open_issues: false,
            ..Filters::default()
        };

        let rows = view::filtered_rows(&repos, &filters);
        let output = render_table(&rows, view::totals(&rows), Some(&Freshness::Integer(42)));

        let lines = output.lines().collect::<Vec<&str>>();
        assert!(lines[0].starts_with("REPOSITORY"));
        assert!(lines[1].starts_with("octo/old"));
        assert!(lines[1].trim_end().ends_with("yes"));
        assert!(lines[2].starts_with("octo/new"));
        assert!(output.contains("2 repos · 3 open issues · 3 open PRs"));
        assert!(output.contains("last updated: 42"));
    }

    #[test]
    fn empty_view_prints_header_and_totals_only() {
        let output = render_table(&[], view::totals(&[]), None);
        let lines = output.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("REPOSITORY"));
        assert!(lines[0].ends_with("ISSUES    PRS  ARCHIVED"));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "0 repos · 0 open issues · 0 open PRs");
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn totals_line_formats_zeroes() {
        assert_eq!(
            totals_line(view::totals(&[])),
            "0 repos · 0 open issues · 0 open PRs"
        );
    }

    #[test]
    fn truncate_marks_clipped_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijk", 5), "abcd…");
    }
}
