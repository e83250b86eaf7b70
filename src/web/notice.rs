use serde::Serialize;

/// Severity of a transient page notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A single-use message rendered at the top of the next page. Mutating
/// handlers hand notices across a redirect as short codes in the dashboard
/// query string; validation failures pass them straight into the re-render.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

pub const COURSE_SAVED: &str = "course-saved";
pub const COURSE_DELETED: &str = "course-deleted";
pub const ASSIGNMENT_SAVED: &str = "assignment-saved";
pub const ASSIGNMENT_DELETED: &str = "assignment-deleted";
pub const DUE_DATE_HINT: &str = "due-date-hint";

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// Resolves a redirect code to its notice. Unknown codes resolve to
    /// nothing, so a hand-edited query string renders a plain page.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            COURSE_SAVED => Some(Self::success("Your course has been saved! \u{2713}")),
            COURSE_DELETED => Some(Self::info("Course deleted.")),
            ASSIGNMENT_SAVED => Some(Self::success("Your assignment has been saved! \u{2713}")),
            ASSIGNMENT_DELETED => Some(Self::info("Assignment deleted.")),
            DUE_DATE_HINT => Some(Self::info("Tip: use YYYY-MM-DD for due date.")),
            _ => None,
        }
    }

    /// Parses the comma-separated `notice` query parameter.
    pub fn parse_codes(raw: &str) -> Vec<Self> {
        raw.split(',')
            .filter_map(|code| Self::from_code(code.trim()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_with_severity() {
        let notice = Notice::from_code(COURSE_SAVED).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);

        let notice = Notice::from_code(COURSE_DELETED).unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
    }

    #[test]
    fn unknown_codes_are_ignored() {
        assert!(Notice::from_code("not-a-code").is_none());
        let notices = Notice::parse_codes("assignment-saved,not-a-code,due-date-hint");
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].kind, NoticeKind::Success);
        assert_eq!(notices[1].kind, NoticeKind::Info);
    }

    #[test]
    fn empty_query_yields_no_notices() {
        assert!(Notice::parse_codes("").is_empty());
    }
}
