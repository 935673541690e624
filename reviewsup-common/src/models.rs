//! Domain models shared between the persistence and HTTP layers
//!
//! Wire names are camelCase to stay compatible with the dashboard and the
//! embeddable widget, which both consume these shapes as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Showcase layout variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Grid,
    Flow,
    Carousel,
    List,
}

/// Review ordering strategy stored inside a showcase config.
///
/// Unknown values deserialize to `Unspecified`, which ranks as a
/// pass-through (input order preserved) rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Newest,
    Oldest,
    Random,
    Rating,
    #[serde(other)]
    Unspecified,
}

/// Column counts per responsive breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
}

/// Flow-layout specific settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub columns: u32,
}

/// Per-showcase display configuration, persisted as a JSON column.
///
/// Fields irrelevant to the selected layout (carousel speed when the type
/// is grid, flow columns when the type is carousel) are persisted anyway;
/// consumers ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowcaseConfig {
    #[serde(rename = "type")]
    pub layout: LayoutType,
    pub flow: FlowConfig,
    pub breakpoints: Breakpoints,
    /// Carousel row count
    pub rows: u32,
    /// Carousel scroll speed
    pub speed: u32,
    /// Maximum reviews to display; zero or negative disables truncation
    pub count: i64,
    pub sort_by: SortBy,
    pub is_rating_summary_enabled: bool,
    pub is_rating_enabled: bool,
    pub is_source_enabled: bool,
    pub is_date_enabled: bool,
    pub is_image_enabled: bool,
    pub is_video_enabled: bool,
    pub is_powered_by_enabled: bool,
    pub is_do_follow_enabled: bool,
}

impl Default for ShowcaseConfig {
    /// The configuration every newly created showcase starts from.
    fn default() -> Self {
        Self {
            layout: LayoutType::Flow,
            flow: FlowConfig { columns: 4 },
            breakpoints: Breakpoints { sm: 1, md: 2, lg: 3 },
            rows: 1,
            speed: 40,
            count: 20,
            sort_by: SortBy::Newest,
            is_rating_summary_enabled: true,
            is_rating_enabled: true,
            is_source_enabled: true,
            is_date_enabled: true,
            is_image_enabled: true,
            is_video_enabled: true,
            is_powered_by_enabled: true,
            is_do_follow_enabled: false,
        }
    }
}

/// Review moderation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Public,
    Hidden,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Public => "public",
            ReviewStatus::Hidden => "hidden",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "public" => Some(ReviewStatus::Public),
            "hidden" => Some(ReviewStatus::Hidden),
            _ => None,
        }
    }
}

/// Attached media kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// Media item attached to a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMedia {
    pub id: Uuid,
    pub review_id: Uuid,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

/// A single piece of customer feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub form_id: Option<Uuid>,
    pub reviewer_name: String,
    pub reviewer_title: Option<String>,
    pub reviewer_image: Option<String>,
    pub reviewer_email: Option<String>,
    pub reviewer_url: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub status: ReviewStatus,
    /// Wire name kept plural-as-is for widget compatibility
    #[serde(default)]
    pub medias: Vec<ReviewMedia>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named, configurable public display surface for a workspace's reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showcase {
    pub id: Uuid,
    /// Public-facing slug; unique and immutable after creation
    pub short_id: String,
    pub user_id: String,
    pub workspace_id: Uuid,
    pub name: String,
    pub config: ShowcaseConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Render-ready showcase: the persisted record plus its final review set
#[derive(Debug, Clone, Serialize)]
pub struct ShowcaseView {
    #[serde(flatten)]
    pub showcase: Showcase,
    pub reviews: Vec<Review>,
}

/// Tenant-scoped grouping that owns forms, reviews and showcases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub short_id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Collection form reviews are submitted through
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Uniform response envelope used by verification-style endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RrResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_creation_template() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.layout, LayoutType::Flow);
        assert_eq!(config.flow.columns, 4);
        assert_eq!(config.breakpoints, Breakpoints { sm: 1, md: 2, lg: 3 });
        assert_eq!(config.rows, 1);
        assert_eq!(config.speed, 40);
        assert_eq!(config.count, 20);
        assert_eq!(config.sort_by, SortBy::Newest);
        assert!(config.is_rating_summary_enabled);
        assert!(config.is_rating_enabled);
        assert!(config.is_source_enabled);
        assert!(config.is_date_enabled);
        assert!(config.is_image_enabled);
        assert!(config.is_video_enabled);
        assert!(config.is_powered_by_enabled);
        assert!(!config.is_do_follow_enabled);
    }

    #[test]
    fn config_round_trips_with_camel_case_wire_names() {
        let config = ShowcaseConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "flow");
        assert_eq!(json["sortBy"], "newest");
        assert_eq!(json["isPoweredByEnabled"], true);
        assert_eq!(json["flow"]["columns"], 4);

        let back: ShowcaseConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_sort_strategy_deserializes_as_unspecified() {
        let json = r#"{"sortBy": "trending"}"#;
        let config: ShowcaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sort_by, SortBy::Unspecified);
        // Remaining fields fall back to the creation template
        assert_eq!(config.count, 20);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let json = r#"{"type": "carousel", "rows": 2, "speed": 55}"#;
        let config: ShowcaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.layout, LayoutType::Carousel);
        assert_eq!(config.rows, 2);
        assert_eq!(config.speed, 55);
        assert_eq!(config.flow.columns, 4);
    }

    #[test]
    fn review_status_round_trip() {
        for status in [
            ReviewStatus::Pending,
            ReviewStatus::Public,
            ReviewStatus::Hidden,
        ] {
            assert_eq!(ReviewStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReviewStatus::parse("archived"), None);
    }
}
