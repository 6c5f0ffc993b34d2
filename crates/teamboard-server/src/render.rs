// SPDX-License-Identifier: Apache-2.0

//! HTML presentation of the issue board.
//!
//! The page template is compiled into the binary and rendered with
//! `minijinja`. Because the template name ends in `.html`, every
//! interpolated value is HTML-escaped.

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use teamboard_core::{Issue, IssueMapping, RepoId};

const TEMPLATE_NAME: &str = "issues.html";
const TEMPLATE_SOURCE: &str = include_str!("../templates/issues.html");

#[derive(Debug, Serialize)]
struct UserSection<'a> {
    login: &'a str,
    issues: Vec<IssueRow<'a>>,
}

#[derive(Debug, Serialize)]
struct IssueRow<'a> {
    number: u64,
    title: &'a str,
    url: String,
    labels: Vec<LabelChip<'a>>,
}

#[derive(Debug, Serialize)]
struct LabelChip<'a> {
    name: &'a str,
    color: &'a str,
}

impl<'a> IssueRow<'a> {
    fn new(repo: &RepoId, issue: &'a Issue) -> Self {
        Self {
            number: issue.number,
            title: &issue.title,
            url: repo.issue_url(issue.number),
            labels: issue
                .labels
                .iter()
                .map(|l| LabelChip {
                    name: &l.name,
                    color: &l.color,
                })
                .collect(),
        }
    }
}

/// Renders an [`IssueMapping`] as the board page.
#[derive(Debug)]
pub struct Presenter {
    env: Environment<'static>,
}

impl Presenter {
    /// Compiles the page template.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .context("invalid board template")?;
        Ok(Self { env })
    }

    /// Renders the board for `repo`. Users are listed in login order and
    /// each user's issues in the order they were fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if template evaluation fails.
    pub fn render(&self, repo: &RepoId, issues: &IssueMapping) -> Result<String> {
        let users: Vec<UserSection<'_>> = issues
            .iter()
            .map(|(login, user_issues)| UserSection {
                login,
                issues: user_issues.iter().map(|i| IssueRow::new(repo, i)).collect(),
            })
            .collect();

        let template = self.env.get_template(TEMPLATE_NAME)?;
        template
            .render(context! {
                repo => repo.to_string(),
                repo_url => format!("https://github.com/{repo}"),
                users => users,
            })
            .context("failed to render board")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamboard_core::Label;

    fn label(name: &str, color: &str) -> Label {
        Label {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    fn two_user_board() -> IssueMapping {
        let mut issues = IssueMapping::new();
        issues.insert("idle".to_string(), Vec::new());
        issues.insert(
            "busy".to_string(),
            vec![
                Issue {
                    number: 101,
                    title: "Router drops connections".to_string(),
                    labels: vec![label("bug", "ee0701"), label("networking", "1d76db")],
                },
                Issue {
                    number: 202,
                    title: "Document build secrets".to_string(),
                    labels: vec![label("docs", "c5def5")],
                },
            ],
        );
        issues
    }

    fn section<'a>(html: &'a str, login: &str) -> &'a str {
        let start = html
            .find(&format!("@{login}</h4>"))
            .unwrap_or_else(|| panic!("no section for {login}"));
        let rest = &html[start..];
        let end = rest.find("</table>").expect("section has a table");
        &rest[..end]
    }

    #[test]
    fn test_render_two_users() {
        let presenter = Presenter::new().unwrap();
        let repo = RepoId::new("openshift", "origin");

        let html = presenter.render(&repo, &two_user_board()).unwrap();

        assert!(html.contains("@busy"));
        assert!(html.contains("@idle"));
        assert!(html.contains("Router drops connections"));
        assert!(html.contains("Document build secrets"));
        for name in ["bug", "networking", "docs"] {
            assert!(html.contains(name), "missing label {name}");
        }
        assert!(html.contains("background-color:#ee0701"));
        assert!(html.contains(">#101</a>"));
        assert!(html.contains(">#202</a>"));

        assert!(!section(&html, "idle").contains("<tr>"));
        assert_eq!(section(&html, "busy").matches("<tr>").count(), 2);
    }

    #[test]
    fn test_render_sorts_users_by_login() {
        let presenter = Presenter::new().unwrap();
        let html = presenter
            .render(&RepoId::new("o", "r"), &two_user_board())
            .unwrap();

        let busy = html.find("@busy").unwrap();
        let idle = html.find("@idle").unwrap();
        assert!(busy < idle);
    }

    #[test]
    fn test_render_escapes_titles() {
        let mut issues = IssueMapping::new();
        issues.insert(
            "mallory".to_string(),
            vec![Issue {
                number: 1,
                title: "<script>alert(1)</script>".to_string(),
                labels: Vec::new(),
            }],
        );

        let html = Presenter::new()
            .unwrap()
            .render(&RepoId::new("o", "r"), &issues)
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_empty_board() {
        let html = Presenter::new()
            .unwrap()
            .render(&RepoId::new("o", "r"), &IssueMapping::new())
            .unwrap();

        assert!(html.contains("Assigned issues in"));
        assert!(!html.contains("<table"));
    }
}
