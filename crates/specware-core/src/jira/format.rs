use super::{Issue, Named};
use std::fmt::Write;

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

fn name_of(named: &Option<Named>) -> Option<&str> {
    named.as_ref().map(|n| n.name.as_str())
}

/// Render an issue as the plain-text block printed by `jira get-issue`.
/// The result has no trailing newline.
pub fn format_issue(issue: &Issue) -> String {
    let f = &issue.fields;
    let mut out = String::new();

    let _ = writeln!(out, "Issue: {}", issue.key);
    let _ = writeln!(out, "Title: {}", or_default(f.summary.as_deref(), "No title provided"));
    let _ = writeln!(out, "Type: {}", or_default(name_of(&f.issue_type), "Unknown"));
    let _ = writeln!(out, "Status: {}", or_default(name_of(&f.status), "Unknown"));
    let _ = writeln!(out, "Priority: {}", or_default(name_of(&f.priority), "None"));
    let assignee = f.assignee.as_ref().map(|u| u.display_name.as_str());
    let _ = writeln!(out, "Assignee: {}", or_default(assignee, "Not assigned"));
    out.push('\n');
    out.push_str("Description:\n");
    out.push_str(or_default(f.description.as_deref(), "No description provided"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::{IssueFields, User};

    fn complete() -> Issue {
        Issue {
            key: "PROJ-123".into(),
            fields: IssueFields {
                summary: Some("Fix authentication bug".into()),
                description: Some("Users are experiencing authentication failures".into()),
                status: Some(Named::new("In Progress")),
                issue_type: Some(Named::new("Bug")),
                priority: Some(Named::new("High")),
                assignee: Some(User::new("John Smith")),
                reporter: Some(User::new("Jane Doe")),
                ..Default::default()
            },
        }
    }

    #[test]
    fn formats_complete_issue() {
        let expected = "Issue: PROJ-123
Title: Fix authentication bug
Type: Bug
Status: In Progress
Priority: High
Assignee: John Smith

Description:
Users are experiencing authentication failures";
        assert_eq!(format_issue(&complete()), expected);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let issue = Issue {
            key: "PROJ-456".into(),
            fields: IssueFields {
                summary: Some("Add new feature".into()),
                description: Some(String::new()),
                ..Default::default()
            },
        };
        let expected = "Issue: PROJ-456
Title: Add new feature
Type: Unknown
Status: Unknown
Priority: None
Assignee: Not assigned

Description:
No description provided";
        assert_eq!(format_issue(&issue), expected);
    }

    #[test]
    fn whitespace_only_fields_use_defaults() {
        let issue = Issue {
            key: "PROJ-789".into(),
            fields: IssueFields {
                summary: Some("   ".into()),
                description: Some("\t\n".into()),
                status: Some(Named::new(" ")),
                issue_type: Some(Named::new("")),
                priority: Some(Named::new("  ")),
                assignee: Some(User::new("   ")),
                ..Default::default()
            },
        };
        let out = format_issue(&issue);
        assert!(out.contains("Title: No title provided"));
        assert!(out.contains("Type: Unknown"));
        assert!(out.contains("Status: Unknown"));
        assert!(out.contains("Priority: None"));
        assert!(out.contains("Assignee: Not assigned"));
        assert!(out.contains("Description:\nNo description provided"));
    }

    #[test]
    fn keeps_multiline_description() {
        let description = "First line\nSecond line\n\n- bullet one\n- bullet two";
        let mut issue = complete();
        issue.fields.description = Some(description.into());
        let out = format_issue(&issue);
        assert!(out.ends_with(&format!("Description:\n{description}")));
    }

    #[test]
    fn special_characters_untouched() {
        let mut issue = complete();
        issue.fields.summary = Some("Handle \"quotes\" & <tags>".into());
        issue.fields.description = Some("Test with & < > \" ' special chars".into());
        issue.fields.assignee = Some(User::new("O'Brien"));
        let out = format_issue(&issue);
        assert!(out.contains("Title: Handle \"quotes\" & <tags>"));
        assert!(out.contains("Assignee: O'Brien"));
        assert!(out.contains("Test with & < > \" ' special chars"));
    }

    #[test]
    fn no_trailing_newline() {
        let out = format_issue(&complete());
        assert!(!out.ends_with('\n'));
        assert_eq!(out.lines().nth(6), Some(""));
    }
}
