use serde::{Deserialize, Serialize};

use crate::backend::RepositoryRecord;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Filters {
    #[serde(skip)]
    pub filter_text: String,
    pub hide_archived: bool,
    pub require_open_issues: bool,
    pub require_open_prs: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            hide_archived: false,
            require_open_issues: true,
            require_open_prs: false,
        }
    }
}

impl Filters {
    pub fn matches(&self, repo: &RepositoryRecord) -> bool {
        let search = self.filter_text.to_lowercase();
        let name_matches = repo.full_name.to_lowercase().contains(search.as_str());
        let owner_matches = repo
            .owner_or_empty()
            .to_lowercase()
            .contains(search.as_str());
        if !(name_matches || owner_matches) {
            return false;
        }
        if self.require_open_issues && repo.open_issues == 0 {
            return false;
        }
        if self.require_open_prs && repo.open_prs == 0 {
            return false;
        }
        if self.hide_archived && repo.archived {
            return false;
        }
        true
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub repos: usize,
    pub open_issues: u64,
    pub open_prs: u64,
}

/// Rows of `repos` that pass `filters`, in their original order.
pub fn filtered_rows<'a>(repos: &'a [RepositoryRecord], filters: &Filters) -> Vec<&'a RepositoryRecord> {
    repos.iter().filter(|repo| filters.matches(repo)).collect()
}

pub fn totals(rows: &[&RepositoryRecord]) -> Totals {
    let mut open_issues = 0u64;
    let mut open_prs = 0u64;
    for repo in rows {
        open_issues += repo.open_issues;
        open_prs += repo.open_prs;
    }
    Totals {
        repos: rows.len(),
        open_issues,
        open_prs,
    }
}

#[cfg(test)]
mod tests {
    use super::{Filters, filtered_rows, totals};
    use crate::backend::RepositoryRecord;

    fn repo(full_name: &str, owner: Option<&str>, archived: bool, issues: u64, prs: u64) -> RepositoryRecord {
        let mut record = RepositoryRecord::new(full_name);
        record.owner = owner.map(ToString::to_string);
        record.archived = archived;
        record.open_issues = issues;
        record.open_prs = prs;
        record
    }

    fn open_filters() -> Filters {
        Filters {
            require_open_issues: false,
            ..Filters::default()
        }
    }

    fn sample() -> Vec<RepositoryRecord> {
        vec![
            repo("octo/alpha", Some("octo"), false, 3, 0),
            repo("octo/beta", Some("octo"), true, 0, 2),
            repo("hub/gamma", None, false, 0, 0),
            repo("hub/delta", Some("Hub-Team"), true, 5, 1),
            repo("misc/epsilon", Some("misc"), false, 1, 4),
        ]
    }

    #[test]
    fn text_filter_matches_name_or_owner_case_insensitively() {
        let repos = vec![
            repo("Xyz", None, false, 1, 0),
            repo("abc", Some("X-team"), false, 1, 0),
            repo("other", Some("nobody"), false, 1, 0),
        ];
        let filters = Filters {
            filter_text: "x".to_string(),
            ..open_filters()
        };

        let names = filtered_rows(&repos, &filters)
            .iter()
            .map(|repo| repo.full_name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["Xyz", "abc"]);
    }

    #[test]
    fn empty_filter_text_matches_missing_owner() {
        let repos = vec![repo("solo", None, false, 0, 0)];
        assert_eq!(filtered_rows(&repos, &open_filters()).len(), 1);
    }

    #[test]
    fn require_open_issues_drops_exactly_zero_issue_rows() {
        let repos = vec![repo("a", None, false, 0, 0), repo("b", None, false, 3, 0)];
        let filters = Filters {
            require_open_issues: true,
            ..open_filters()
        };

        let rows = filtered_rows(&repos, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "b");
    }

    #[test]
    fn require_open_prs_is_conjunctive_with_issues() {
        let repos = sample();
        let filters = Filters {
            require_open_issues: true,
            require_open_prs: true,
            ..open_filters()
        };

        let names = filtered_rows(&repos, &filters)
            .iter()
            .map(|repo| repo.full_name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["hub/delta", "misc/epsilon"]);
    }

    #[test]
    fn hide_archived_removes_only_archived_rows() {
        let repos = sample();
        for require_open_issues in [false, true] {
            for require_open_prs in [false, true] {
                let base = Filters {
                    require_open_issues,
                    require_open_prs,
                    ..open_filters()
                };
                let hidden = Filters {
                    hide_archived: true,
                    ..base.clone()
                };
                let expected = filtered_rows(&repos, &base)
                    .into_iter()
                    .filter(|repo| !repo.archived)
                    .collect::<Vec<_>>();
                assert_eq!(filtered_rows(&repos, &hidden), expected);
            }
        }
    }

    #[test]
    fn every_flag_combination_yields_ordered_subset() {
        let repos = sample();
        for mask in 0..16u8 {
            let filters = Filters {
                filter_text: if mask & 8 != 0 { "O".to_string() } else { String::new() },
                hide_archived: mask & 1 != 0,
                require_open_issues: mask & 2 != 0,
                require_open_prs: mask & 4 != 0,
            };
            let rows = filtered_rows(&repos, &filters);
            let mut cursor = repos.iter();
            for row in rows {
                assert!(
                    cursor.any(|candidate| std::ptr::eq(candidate, row)),
                    "row {} out of order for mask {}",
                    row.full_name,
                    mask
                );
            }
        }
    }

    #[test]
    fn totals_sum_over_filtered_rows() {
        let repos = sample();
        let filters = Filters {
            hide_archived: true,
            ..open_filters()
        };
        let rows = filtered_rows(&repos, &filters);

        let totals = totals(&rows);
        assert_eq!(totals.repos, 3);
        assert_eq!(totals.open_issues, 4);
        assert_eq!(totals.open_prs, 4);
    }

    #[test]
    fn totals_are_zero_for_empty_view() {
        let repos = sample();
        let filters = Filters {
            filter_text: "no such repo".to_string(),
            ..open_filters()
        };
        let rows = filtered_rows(&repos, &filters);

        let totals = totals(&rows);
        assert_eq!(totals.repos, 0);
        assert_eq!(totals.open_issues, 0);
        assert_eq!(totals.open_prs, 0);
    }

    #[test]
    fn default_filters_require_open_issues() {
        let filters = Filters::default();
        assert!(filters.require_open_issues);
        assert!(!filters.hide_archived);
        assert!(!filters.require_open_prs);
    }
}
