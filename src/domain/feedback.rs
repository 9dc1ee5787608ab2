use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Feedback ticket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackType {
    Bug,
    Feature,
    Improvement,
}

impl FeedbackType {
    /// Prefix used in case numbers (`BUG-001`, `FEA-002`, `IMP-003`).
    pub fn case_prefix(&self) -> &'static str {
        match self {
            Self::Bug => "BUG",
            Self::Feature => "FEA",
            Self::Improvement => "IMP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            other => Err(format!("Unknown feedback status: {}", other)),
        }
    }
}

/// Feedback ticket as stored in the feedback file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackTicket {
    pub id: String,
    pub case_number: String,
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub title: String,
    pub description: String,
    pub priority: FeedbackPriority,
    pub status: FeedbackStatus,
    pub screenshots: Vec<String>,
    pub page_url: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for filing a ticket
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<FeedbackPriority>,
    #[serde(default)]
    pub screenshots: Option<Vec<String>>,
    #[serde(default)]
    pub page_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackResponse {
    pub id: String,
    pub case_number: String,
}

/// Request DTO for `PATCH /api/feedback/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFeedbackRequest {
    #[serde(default)]
    pub status: Option<FeedbackStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListFeedbackQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl ListFeedbackQuery {
    /// `None` or `ALL` means no filter.
    pub fn status_filter(&self) -> Result<Option<FeedbackStatus>, String> {
        match self.status.as_deref() {
            None | Some("") | Some("ALL") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_uses_client_field_names() {
        let ticket = FeedbackTicket {
            id: "1700000000000-abc123".to_string(),
            case_number: "BUG-001".to_string(),
            feedback_type: FeedbackType::Bug,
            title: "Knappen syns inte".to_string(),
            description: String::new(),
            priority: FeedbackPriority::High,
            status: FeedbackStatus::InProgress,
            screenshots: Vec::new(),
            page_url: "/".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["caseNumber"], "BUG-001");
        assert_eq!(json["type"], "BUG");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["pageUrl"], "/");
    }

    #[test]
    fn status_filter_parsing() {
        let all = ListFeedbackQuery {
            status: Some("ALL".to_string()),
        };
        assert_eq!(all.status_filter(), Ok(None));

        let open = ListFeedbackQuery {
            status: Some("OPEN".to_string()),
        };
        assert_eq!(open.status_filter(), Ok(Some(FeedbackStatus::Open)));

        let bogus = ListFeedbackQuery {
            status: Some("DONE".to_string()),
        };
        assert!(bogus.status_filter().is_err());
    }
}
