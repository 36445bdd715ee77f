//! Draft validation run before a mutation reaches the board model.

use airdrop_core::config::ValidationLimits;
use airdrop_core::BoardError;
use std::fmt;

use crate::column::is_hex_color;
use crate::field_update::{CardUpdate, NewCard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    TitleRequired,
    TitleTooLong { max: usize },
    DescriptionTooLong { max: usize },
    TooManyTags { max: usize },
    TagTooLong { tag: String, max: usize },
    InvalidLink(String),
    ColumnNameRequired,
    InvalidColor(String),
    TooManyColumns { max: usize },
    ColumnFull { max: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::TitleTooLong { max } => write!(f, "title is longer than {} characters", max),
            Self::DescriptionTooLong { max } => {
                write!(f, "description is longer than {} characters", max)
            }
            Self::TooManyTags { max } => write!(f, "more than {} tags", max),
            Self::TagTooLong { tag, max } => {
                write!(f, "tag '{}' is longer than {} characters", tag, max)
            }
            Self::InvalidLink(link) => write!(f, "'{}' is not an http(s) URL", link),
            Self::ColumnNameRequired => write!(f, "column name is required"),
            Self::InvalidColor(color) => write!(f, "'{}' is not a #rrggbb colour", color),
            Self::TooManyColumns { max } => write!(f, "a board holds at most {} columns", max),
            Self::ColumnFull { max } => write!(f, "a column holds at most {} cards", max),
        }
    }
}

impl From<ValidationIssue> for BoardError {
    fn from(issue: ValidationIssue) -> Self {
        BoardError::Validation(issue.to_string())
    }
}

pub type ValidationResult = Result<(), ValidationIssue>;

pub fn validate_new_card(card: &NewCard, limits: &ValidationLimits) -> ValidationResult {
    validate_title(&card.title, limits)?;
    validate_description(&card.description, limits)?;
    validate_tags(&card.tags, limits)?;
    if let Some(link) = &card.link {
        validate_link(link)?;
    }
    Ok(())
}

pub fn validate_card_update(update: &CardUpdate, limits: &ValidationLimits) -> ValidationResult {
    if let Some(title) = &update.title {
        validate_title(title, limits)?;
    }
    if let Some(description) = &update.description {
        validate_description(description, limits)?;
    }
    if let Some(tags) = &update.tags {
        validate_tags(tags, limits)?;
    }
    if let Some(link) = update.link.as_set() {
        validate_link(link)?;
    }
    Ok(())
}

pub fn validate_column(name: &str, color: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationIssue::ColumnNameRequired);
    }
    let color = color.trim();
    if !color.is_empty() && !is_hex_color(color) {
        return Err(ValidationIssue::InvalidColor(color.to_string()));
    }
    Ok(())
}

fn validate_title(title: &str, limits: &ValidationLimits) -> ValidationResult {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationIssue::TitleRequired);
    }
    if title.chars().count() > limits.max_title_length {
        return Err(ValidationIssue::TitleTooLong {
            max: limits.max_title_length,
        });
    }
    Ok(())
}

fn validate_description(description: &str, limits: &ValidationLimits) -> ValidationResult {
    if description.chars().count() > limits.max_description_length {
        return Err(ValidationIssue::DescriptionTooLong {
            max: limits.max_description_length,
        });
    }
    Ok(())
}

fn validate_tags(tags: &[String], limits: &ValidationLimits) -> ValidationResult {
    let tags = crate::tag::normalize_tags(tags);
    if tags.len() > limits.max_tags {
        return Err(ValidationIssue::TooManyTags {
            max: limits.max_tags,
        });
    }
    if let Some(tag) = tags
        .iter()
        .find(|t| t.chars().count() > limits.max_tag_length)
    {
        return Err(ValidationIssue::TagTooLong {
            tag: tag.clone(),
            max: limits.max_tag_length,
        });
    }
    Ok(())
}

/// Blank links are treated as "no link" and pass.
pub fn validate_link(link: &str) -> ValidationResult {
    let link = link.trim();
    if link.is_empty() || is_http_url(link) {
        Ok(())
    } else {
        Err(ValidationIssue::InvalidLink(link.to_string()))
    }
}

fn is_http_url(link: &str) -> bool {
    if link.chars().any(char::is_whitespace) {
        return false;
    }
    let lower = link.to_ascii_lowercase();
    let rest = match lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = if host_port.starts_with('[') {
        host_port.split(']').next().unwrap_or_default().trim_start_matches('[')
    } else {
        host_port.split(':').next().unwrap_or_default()
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | ':'))
        && !host.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    #[test]
    fn test_title_required() {
        let card = NewCard::titled("   ");
        assert_eq!(
            validate_new_card(&card, &limits()),
            Err(ValidationIssue::TitleRequired)
        );
    }

    #[test]
    fn test_title_length_counts_chars() {
        let card = NewCard::titled("é".repeat(100));
        assert!(validate_new_card(&card, &limits()).is_ok());
        let card = NewCard::titled("é".repeat(101));
        assert_eq!(
            validate_new_card(&card, &limits()),
            Err(ValidationIssue::TitleTooLong { max: 100 })
        );
    }

    #[test]
    fn test_tag_limits() {
        let mut card = NewCard::titled("ok");
        card.tags = (0..11).map(|i| format!("t{}", i)).collect();
        assert_eq!(
            validate_new_card(&card, &limits()),
            Err(ValidationIssue::TooManyTags { max: 10 })
        );
        card.tags = vec!["a".repeat(21)];
        assert!(matches!(
            validate_new_card(&card, &limits()),
            Err(ValidationIssue::TagTooLong { .. })
        ));
    }

    #[test]
    fn test_links() {
        assert!(validate_link("https://layerzero.network/claim").is_ok());
        assert!(validate_link("http://localhost:8080").is_ok());
        assert!(validate_link("").is_ok());
        assert!(validate_link("ftp://example.com").is_err());
        assert!(validate_link("https://").is_err());
        assert!(validate_link("https://exa mple.com").is_err());
        assert!(validate_link("example.com").is_err());
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        let update = CardUpdate {
            notes: Some("n".into()),
            ..Default::default()
        };
        assert!(validate_card_update(&update, &limits()).is_ok());
        let update = CardUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_card_update(&update, &limits()).is_err());
    }

    #[test]
    fn test_column_validation() {
        assert!(validate_column("Todo", "").is_ok());
        assert!(validate_column("Todo", "#16a34a").is_ok());
        assert_eq!(validate_column(" ", ""), Err(ValidationIssue::ColumnNameRequired));
        assert!(validate_column("Todo", "green").is_err());
    }

    #[test]
    fn test_issue_converts_to_validation_error() {
        let err: BoardError = ValidationIssue::TitleRequired.into();
        assert!(matches!(err, BoardError::Validation(_)));
    }
}
