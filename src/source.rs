use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::ACCEPT;
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

use crate::models::{ClassRecord, ClassesEnvelope, Instructor};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Class source returned status {0}")]
    Status(reqwest::StatusCode),
}

type CacheKey = (NaiveDate, u32);

/// Client for the remote class-data source.
///
/// Failures never propagate: a class list that cannot be fetched is an
/// empty class list.
#[derive(Clone)]
pub struct ClassSource {
    client: reqwest::Client,
    base_url: Arc<Url>,
    token: Arc<String>,
    cache_ttl: Duration,
    cache: Arc<RwLock<HashMap<CacheKey, (Instant, Vec<ClassRecord>)>>>,
}

impl ClassSource {
    pub fn new(base_url: Url, token: impl Into<String>, cache_ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::new(base_url),
            token: Arc::new(token.into()),
            cache_ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn classes_url(&self, date: NaiveDate, page: u32) -> Url {
        let mut url = (*self.base_url).clone();
        url.query_pairs_mut()
            .append_pair("date", &date.format("%Y-%m-%d").to_string())
            .append_pair("page", &page.to_string());
        url
    }

    pub async fn fetch_classes(&self, date: NaiveDate, page: u32) -> Vec<ClassRecord> {
        let key = (date, page);
        if let Some(classes) = self.cached(&key).await {
            tracing::debug!(%date, page, "serving classes from cache");
            return classes;
        }

        match self.try_fetch(date, page).await {
            Ok(classes) => {
                tracing::debug!(%date, page, count = classes.len(), "fetched classes");
                if !self.cache_ttl.is_zero() {
                    let mut cache = self.cache.write().await;
                    cache.retain(|_, (stored_at, _)| stored_at.elapsed() < self.cache_ttl);
                    cache.insert(key, (Instant::now(), classes.clone()));
                }
                classes
            }
            Err(err) => {
                tracing::warn!(error = %err, %date, page, "failed to fetch classes");
                Vec::new()
            }
        }
    }

    async fn cached(&self, key: &CacheKey) -> Option<Vec<ClassRecord>> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        {
            let cache = self.cache.read().await;
            let (stored_at, classes) = cache.get(key)?;
            if stored_at.elapsed() < self.cache_ttl {
                return Some(classes.clone());
            }
        }
        self.cache.write().await.remove(key);
        None
    }

    #[cfg(test)]
    async fn cached_entries(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn try_fetch(&self, date: NaiveDate, page: u32) -> Result<Vec<ClassRecord>, SourceError> {
        let url = self.classes_url(date, page);
        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, "*/*")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let envelope: ClassesEnvelope = response.json().await?;
        Ok(envelope.into_classes())
    }
}

/// Two showcase classes relative to `now`: one that went live five minutes
/// ago and one starting in fifteen minutes.
pub fn demo_classes(now: DateTime<Utc>) -> Vec<ClassRecord> {
    let instructor = Instructor {
        name: "Marcus Johnson".to_string(),
        avatar_url: Some("/instruct.jpg".to_string()),
    };

    vec![
        ClassRecord {
            id: "demo-live".to_string(),
            title: "Tabata Blast: 20 Minutes of Intensity".to_string(),
            description: Some(
                "Push your limits with this intense Tabata-style workout! Short bursts of all-out effort followed by brief rest periods.\n\
                 This class will test your endurance and mental toughness.\n\
                 What to expect:\n\
                 - 20-second work intervals at max effort\n\
                 - 10-second rest periods\n\
                 - 8 rounds per exercise"
                    .to_string(),
            ),
            image_url: Some("/Thumbnail.jpg".to_string()),
            start_datetime: now - chrono::Duration::minutes(5),
            duration_minutes: 20,
            intensity: Some("High".to_string()),
            difficulty_level: Some("All Levels".to_string()),
            difficulty_levels: Vec::new(),
            category: Some("HIIT & Boxing".to_string()),
            equipment_requirements: Some("None".to_string()),
            instructor: Some(instructor.clone()),
        },
        ClassRecord {
            id: "demo-soon".to_string(),
            title: "HIIT Bootcamp".to_string(),
            description: Some(
                "Get ready to sweat in this high-intensity interval training session!\n\
                 This 30-minute bootcamp is packed with explosive movements, cardio intervals, and bodyweight exercises.\n\
                 Class structure:\n\
                 - 5-minute dynamic warm-up\n\
                 - 20 minutes of HIIT intervals\n\
                 - 5-minute cool-down and stretch"
                    .to_string(),
            ),
            image_url: Some("/Thumbnail2.jpg".to_string()),
            start_datetime: now + chrono::Duration::minutes(15),
            duration_minutes: 30,
            intensity: Some("High".to_string()),
            difficulty_level: Some("Intermediate".to_string()),
            difficulty_levels: Vec::new(),
            category: Some("HIIT & Boxing".to_string()),
            equipment_requirements: Some("None".to_string()),
            instructor: Some(instructor),
        },
    ]
}
