use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::Viewer;
use crate::models::ClassRecord;
use crate::time_status::{TimeStatus, compute_time_status, format_countdown, format_duration};

pub const BEFORE_YOU_JOIN: [&str; 3] = [
    "Make sure your camera and microphone are working",
    "Clear some space so you can move freely",
    "Keep water and a towel nearby",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("Please log in to join the class")]
    LoginRequired,
}

/// Live indicator shown inside the join modal, refreshed every tick.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct ModalCountdown {
    pub is_live: bool,
    pub countdown: String,
    pub time_status: TimeStatus,
}

impl ModalCountdown {
    pub fn at(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff = (start - now).num_milliseconds();
        // The modal counts down to the exact start instant rather than
        // applying the sub-minute live rounding.
        let (is_live, countdown) = if diff <= 0 {
            (true, "0:00".to_string())
        } else {
            (false, format_countdown(diff))
        };
        Self {
            is_live,
            countdown,
            time_status: compute_time_status(start, now),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct JoinModal {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_avatar_url: Option<String>,
    pub category: String,
    pub equipment: Vec<String>,
    pub duration_minutes: u32,
    pub duration: String,
    pub intensity: String,
    pub difficulty: String,
    pub before_you_join: Vec<String>,
    #[serde(flatten)]
    pub countdown: ModalCountdown,
}

impl JoinModal {
    pub fn new(class: &ClassRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: class.id.clone(),
            title: class.title.clone(),
            image_url: class.image_url.clone(),
            instructor_name: class.instructor_name().map(str::to_string),
            instructor_avatar_url: class
                .instructor
                .as_ref()
                .and_then(|i| i.avatar_url.clone()),
            category: class.category_label().to_string(),
            equipment: class.equipment(),
            duration_minutes: class.duration_minutes,
            duration: format_duration(class.duration_minutes),
            intensity: class.intensity_label().to_string(),
            difficulty: class.difficulty_label().to_string(),
            before_you_join: BEFORE_YOU_JOIN.iter().map(|s| s.to_string()).collect(),
            countdown: ModalCountdown::at(class.start_datetime, now),
        }
    }
}

/// Opens the join modal for a logged-in viewer. Any class can be joined:
/// live ones immediately, later ones with the modal counting down.
pub fn request_join(
    viewer: Viewer,
    class: &ClassRecord,
    now: DateTime<Utc>,
) -> Result<JoinModal, JoinError> {
    if !viewer.logged_in {
        return Err(JoinError::LoginRequired);
    }
    tracing::info!(class_id = %class.id, "join modal opened");
    Ok(JoinModal::new(class, now))
}
