//! Featured / similar selection and the display state derived from a
//! class's [`TimeStatus`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Viewer;
use crate::models::ClassRecord;
use crate::time_status::{
    ClassStatus, TimeStatus, compute_time_status, format_duration, minutes_label,
};

/// Paragraphs shown before "Read more".
pub const DESCRIPTION_PREVIEW_PARAGRAPHS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTone {
    Login,
    Live,
    Soon,
    Upcoming,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct JoinButton {
    pub enabled: bool,
    pub label: String,
    pub tone: ButtonTone,
}

impl JoinButton {
    pub fn for_status(status: &TimeStatus, viewer: Viewer) -> Self {
        let (label, tone) = if !viewer.logged_in {
            ("Login to Join".to_string(), ButtonTone::Login)
        } else {
            match status.status() {
                ClassStatus::Live => ("Join Live Class".to_string(), ButtonTone::Live),
                ClassStatus::StartingSoon => ("Join Class".to_string(), ButtonTone::Soon),
                ClassStatus::Upcoming => (
                    format!("Starts in {}", minutes_label(status.minutes_until_start)),
                    ButtonTone::Upcoming,
                ),
            }
        };
        Self {
            enabled: can_join(status),
            label,
            tone,
        }
    }
}

/// Whether the join button is active. Every class qualifies: live ones join
/// directly and the rest open the modal with its countdown.
pub fn can_join(status: &TimeStatus) -> bool {
    status.is_live || status.minutes_until_start > 0
}

/// Hero badge for the featured class.
pub fn featured_badge(status: &TimeStatus) -> Option<String> {
    match status.status() {
        ClassStatus::Live => Some("LIVE".to_string()),
        ClassStatus::StartingSoon => Some(format!(
            "Starts in {}",
            minutes_label(status.minutes_until_start)
        )),
        ClassStatus::Upcoming => Some("Upcoming".to_string()),
    }
}

/// Compact badge on similar-class thumbnails.
pub fn thumbnail_badge(status: &TimeStatus) -> Option<String> {
    match status.status() {
        ClassStatus::Live => Some("LIVE".to_string()),
        ClassStatus::StartingSoon => Some(format!("{}m", status.minutes_until_start)),
        ClassStatus::Upcoming => None,
    }
}

pub fn status_text(status: &TimeStatus) -> String {
    if status.is_live {
        "Live now".to_string()
    } else if status.minutes_until_start > 0 {
        format!("in {} minutes", status.minutes_until_start)
    } else {
        "Upcoming".to_string()
    }
}

/// One row of the class list.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ClassSummary {
    #[serde(flatten)]
    pub class: ClassRecord,
    pub time_status: TimeStatus,
    pub status: ClassStatus,
    pub duration: String,
    pub badge: Option<String>,
}

impl ClassSummary {
    pub fn new(class: &ClassRecord, now: DateTime<Utc>) -> Self {
        let time_status = compute_time_status(class.start_datetime, now);
        Self {
            class: class.clone(),
            status: time_status.status(),
            duration: format_duration(class.duration_minutes),
            badge: featured_badge(&time_status),
            time_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct FeaturedClass {
    #[serde(flatten)]
    pub class: ClassRecord,
    pub time_status: TimeStatus,
    pub status: ClassStatus,
    pub badge: Option<String>,
    pub status_text: String,
    pub duration: String,
    pub intensity_label: String,
    pub difficulty_label: String,
    pub equipment: Vec<String>,
    pub description_preview: Vec<String>,
    pub description_paragraphs: Vec<String>,
    pub has_more_description: bool,
    pub join_button: JoinButton,
}

impl FeaturedClass {
    pub fn new(class: &ClassRecord, viewer: Viewer, now: DateTime<Utc>) -> Self {
        let time_status = compute_time_status(class.start_datetime, now);
        let paragraphs = class.paragraphs();
        let preview = paragraphs
            .iter()
            .take(DESCRIPTION_PREVIEW_PARAGRAPHS)
            .cloned()
            .collect();

        Self {
            status: time_status.status(),
            badge: featured_badge(&time_status),
            status_text: status_text(&time_status),
            duration: format_duration(class.duration_minutes),
            intensity_label: class.intensity_label().to_string(),
            difficulty_label: class.difficulty_label().to_string(),
            equipment: class.equipment(),
            description_preview: preview,
            has_more_description: paragraphs.len() > DESCRIPTION_PREVIEW_PARAGRAPHS,
            description_paragraphs: paragraphs,
            join_button: JoinButton::for_status(&time_status, viewer),
            time_status,
            class: class.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct SimilarClassCard {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub instructor_name: Option<String>,
    pub duration: String,
    pub badge: Option<String>,
}

impl SimilarClassCard {
    pub fn new(class: &ClassRecord, now: DateTime<Utc>) -> Self {
        let time_status = compute_time_status(class.start_datetime, now);
        Self {
            id: class.id.clone(),
            title: class.title.clone(),
            image_url: class.image_url.clone(),
            instructor_name: class.instructor_name().map(str::to_string),
            duration: format_duration(class.duration_minutes),
            badge: thumbnail_badge(&time_status),
        }
    }
}

/// Featured class plus everything else in list order.
#[derive(Debug, Clone)]
pub struct ClassView<'a> {
    pub featured: &'a ClassRecord,
    pub similar: Vec<&'a ClassRecord>,
}

impl<'a> ClassView<'a> {
    /// Selects the class with `selected` id, falling back to the first one.
    /// Returns `None` for an empty list.
    pub fn select(classes: &'a [ClassRecord], selected: Option<&str>) -> Option<Self> {
        let index = selected
            .and_then(|id| classes.iter().position(|c| c.id == id))
            .unwrap_or(0);
        let featured = classes.get(index)?;
        let similar = classes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, c)| c)
            .collect();
        Some(Self { featured, similar })
    }

    pub fn render(&self, viewer: Viewer, now: DateTime<Utc>) -> ClassViewResponse {
        ClassViewResponse {
            featured: FeaturedClass::new(self.featured, viewer, now),
            similar: self
                .similar
                .iter()
                .map(|c| SimilarClassCard::new(c, now))
                .collect(),
            logged_in: viewer.logged_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ClassViewResponse {
    pub featured: FeaturedClass,
    pub similar: Vec<SimilarClassCard>,
    pub logged_in: bool,
}
