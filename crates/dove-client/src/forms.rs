//! Admin back-office forms and their required-field checks.
//!
//! Every form is validated before anything is sent, so a rejected form
//! never results in a partial submission.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dove_types::models::BroadcastStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A form submitted to one of the admin collections.
pub trait AdminForm: Serialize + Send + Sync {
    /// REST collection the form writes to, e.g. `devotions`.
    const COLLECTION: &'static str;

    /// Report the first missing or invalid field.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

fn required_some<T>(field: &'static str, value: &Option<T>) -> Result<(), ValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(field, "is required")),
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionForm {
    pub title: String,
    pub scripture: String,
    pub content: String,
    pub reflection: Option<String>,
    pub prayer: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub thumbnail: Option<String>,
}

impl AdminForm for DevotionForm {
    const COLLECTION: &'static str = "devotions";

    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required("scripture", &self.scripture)?;
        required("content", &self.content)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub location: String,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl AdminForm for EventForm {
    const COLLECTION: &'static str = "events";

    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required_some("date", &self.date)?;
        required("location", &self.location)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinistryForm {
    pub name: String,
    pub description: String,
    pub leader: Option<String>,
    pub meeting_time: Option<String>,
    pub image: Option<String>,
}

impl AdminForm for MinistryForm {
    const COLLECTION: &'static str = "ministries";

    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("description", &self.description)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastForm {
    pub title: String,
    pub speaker: String,
    pub description: Option<String>,
    pub audio_url: String,
    pub thumbnail: Option<String>,
    pub status: BroadcastStatus,
    pub broadcast_start_time: Option<DateTime<Utc>>,
}

impl AdminForm for PodcastForm {
    const COLLECTION: &'static str = "podcasts";

    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required("speaker", &self.speaker)?;
        required("audioUrl", &self.audio_url)?;
        if self.status == BroadcastStatus::Scheduled {
            return Err(ValidationError::new(
                "status",
                "podcasts are either draft or published",
            ));
        }
        Ok(())
    }
}

/// Singleton contact details; updated in place rather than per id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoForm {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub office_hours: Option<String>,
}

impl ContactInfoForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if present(&self.email) || present(&self.phone) {
            Ok(())
        } else {
            Err(ValidationError::new("email", "an email or phone number is required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devotion_reports_first_missing_field() {
        let form = DevotionForm {
            title: "Morning Grace".into(),
            scripture: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "scripture");

        let form = DevotionForm {
            title: "Morning Grace".into(),
            scripture: "Psalm 23:1".into(),
            content: "The Lord is my shepherd".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn event_needs_a_date() {
        let mut form = EventForm {
            title: "Youth Camp".into(),
            location: "Nairobi".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "date");
        form.date = Some(Utc::now());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn podcast_cannot_be_scheduled() {
        let form = PodcastForm {
            title: "Sunday Sermon".into(),
            speaker: "Pastor Grace".into(),
            audio_url: "https://cdn.example.org/a.mp3".into(),
            status: BroadcastStatus::Scheduled,
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!(err.to_string(), "status: podcasts are either draft or published");
    }

    #[test]
    fn ministry_and_contact() {
        assert!(MinistryForm::default().validate().is_err());
        assert!(ContactInfoForm::default().validate().is_err());
        let contact = ContactInfoForm {
            phone: Some("+254 700 000000".into()),
            ..Default::default()
        };
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn forms_serialize_camel_case() {
        let form = PodcastForm {
            audio_url: "x".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["audioUrl"], "x");
        assert_eq!(value["status"], "draft");
    }
}
