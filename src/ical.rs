use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::ClassRecord;

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, classes: &[ClassRecord]) -> Vec<u8> {
        if classes.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name("Live Fitness Classes");

        for class in classes {
            let schedule = class.schedule();
            let end = schedule.start_instant + Duration::minutes(schedule.duration_minutes.into());

            let mut description = format!(
                "{} class\nIntensity: {}\nLevel: {}",
                class.category_label(),
                class.intensity_label(),
                class.difficulty_label()
            );
            if let Some(name) = class.instructor_name() {
                description.push_str(&format!("\nInstructor: {name}"));
            }

            let mut event = Event::new();
            event.summary(&class.title);
            event.starts(schedule.start_instant);
            event.ends(end);
            event.description(&description);
            event.uid(&format!("{}-class-viewer", class.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}
