//! Navigation paths: the ordered label sequences that locate documents.

use crate::error::PathError;
use std::fmt;

/// Separator used in breadcrumb strings like `APE > Billing > Invoices`.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// A validated navigation path.
///
/// `labels[0]` is the root category, the last label is the document title and
/// anything in between names categories. Always holds at least two labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationPath {
    labels: Vec<String>,
}

impl NavigationPath {
    /// Validate a label list.
    ///
    /// Labels are trimmed and internal whitespace runs collapse to one space.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();

        if labels.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(position) = labels.iter().position(String::is_empty) {
            return Err(PathError::BlankLabel { position });
        }
        if labels.len() < 2 {
            return Err(PathError::TooShallow {
                depth: labels.len(),
            });
        }

        Ok(Self { labels })
    }

    /// Parse a breadcrumb string such as `APE > Category > Document`.
    ///
    /// Examples:
    /// - `A > B` → `["A", "B"]`
    /// - `A >  X Y  > Doc` → `["A", "X Y", "Doc"]`
    /// - `A` → `TooShallow`
    pub fn parse(breadcrumb: &str) -> Result<Self, PathError> {
        if breadcrumb.trim().is_empty() {
            return Err(PathError::Empty);
        }
        Self::from_labels(breadcrumb.split('>'))
    }

    /// The root category label.
    pub fn root(&self) -> &str {
        &self.labels[0]
    }

    /// Everything below the root: intermediate categories then the title.
    pub fn remaining(&self) -> &[String] {
        &self.labels[1..]
    }

    /// The document title (last label).
    pub fn title(&self) -> &str {
        &self.labels[self.labels.len() - 1]
    }

    /// All labels, root first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The breadcrumb shown above a search result: every label except the title.
    pub fn breadcrumb(&self) -> String {
        self.labels[..self.labels.len() - 1].join(BREADCRUMB_SEPARATOR)
    }

    /// File name for the converted artifact: labels with spaces removed, joined by `_`.
    pub fn artifact_file_name(&self) -> String {
        let parts: Vec<String> = self.labels.iter().map(|l| l.replace(' ', "")).collect();
        format!("{}.html", parts.join("_"))
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join(BREADCRUMB_SEPARATOR))
    }
}

/// A validated document record: where it sits in the hierarchy and where its artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub path: NavigationPath,
    pub location: String,
}

/// An unvalidated record as returned by an artifact source listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedUpload {
    pub navigation: Vec<String>,
    pub location: String,
}

impl ListedUpload {
    /// Validate the navigation labels.
    pub fn into_record(self) -> Result<UploadRecord, PathError> {
        Ok(UploadRecord {
            path: NavigationPath::from_labels(&self.navigation)?,
            location: self.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_parse_breadcrumb() {
        let path = NavigationPath::parse("APE > Billing >  Monthly   Invoices ").unwrap();
        check!(path.labels() == ["APE", "Billing", "Monthly Invoices"]);
        check!(path.root() == "APE");
        check!(path.title() == "Monthly Invoices");
        check!(path.remaining() == ["Billing", "Monthly Invoices"]);
        check!(path.breadcrumb() == "APE > Billing");
        check!(path.to_string() == "APE > Billing > Monthly Invoices");
    }

    #[test]
    fn test_two_labels_is_a_document_under_root() {
        let path = NavigationPath::parse("APE > Overview").unwrap();
        check!(path.remaining() == ["Overview"]);
        check!(path.breadcrumb() == "APE");
    }

    #[test]
    fn test_rejects_malformed() {
        check!(NavigationPath::parse("") == Err(PathError::Empty));
        check!(NavigationPath::parse("   ") == Err(PathError::Empty));
        check!(NavigationPath::parse("APE") == Err(PathError::TooShallow { depth: 1 }));
        check!(NavigationPath::parse("APE >  > Doc") == Err(PathError::BlankLabel { position: 1 }));
        check!(NavigationPath::from_labels(Vec::<String>::new()) == Err(PathError::Empty));
    }

    #[test]
    fn test_artifact_file_name() {
        let path = NavigationPath::parse("APE > Market Roles > Password Reset").unwrap();
        check!(path.artifact_file_name() == "APE_MarketRoles_PasswordReset.html");
    }

    #[test]
    fn test_listed_upload_validation() {
        let listed = ListedUpload {
            navigation: vec!["APE".into()],
            location: "upload-html/APE.html".into(),
        };
        check!(listed.into_record().is_err());

        let listed = ListedUpload {
            navigation: vec!["APE".into(), "Doc".into()],
            location: "upload-html/APE_Doc.html".into(),
        };
        let record = listed.into_record().unwrap();
        check!(record.path.title() == "Doc");
        check!(record.location == "upload-html/APE_Doc.html");
    }
}
