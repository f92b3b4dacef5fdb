use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-progress appointment assembled across turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub person: Option<String>,
    pub day: Option<String>,
    pub is_all_day: Option<bool>,
    pub time: Option<String>,
}

impl AppointmentDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Turns a fully populated draft into a booked appointment.
    ///
    /// Returns `None` when a slot the schedule depends on is still missing:
    /// an all-day draft needs person and day, a timed draft also needs the time.
    pub fn complete(&self) -> Option<Appointment> {
        let person = self.person.clone()?;
        let day = self.day.clone()?;
        let schedule = match self.is_all_day? {
            true => Schedule::AllDay,
            false => Schedule::At {
                time: self.time.clone()?,
            },
        };

        Some(Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            person,
            day,
            schedule,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Schedule {
    AllDay,
    At { time: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub person: String,
    pub day: String,
    pub schedule: Schedule,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn summary(&self) -> String {
        match &self.schedule {
            Schedule::AllDay => format!("{} on {} (all day)", self.person, self.day),
            Schedule::At { time } => format!("{} on {} at {}", self.person, self.day, time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(all_day: Option<bool>, time: Option<&str>) -> AppointmentDraft {
        AppointmentDraft {
            person: Some("Rasmus Blanck".to_string()),
            day: Some("Tuesday".to_string()),
            is_all_day: all_day,
            time: time.map(str::to_string),
        }
    }

    #[test]
    fn test_complete_all_day() {
        let appt = draft(Some(true), None).complete().unwrap();
        assert_eq!(appt.schedule, Schedule::AllDay);
        assert_eq!(appt.summary(), "Rasmus Blanck on Tuesday (all day)");
    }

    #[test]
    fn test_complete_timed() {
        let appt = draft(Some(false), Some("11:00")).complete().unwrap();
        assert_eq!(
            appt.schedule,
            Schedule::At {
                time: "11:00".to_string()
            }
        );
        assert_eq!(appt.summary(), "Rasmus Blanck on Tuesday at 11:00");
    }

    #[test]
    fn test_incomplete_drafts() {
        assert!(draft(None, None).complete().is_none());
        assert!(draft(Some(false), None).complete().is_none());
        assert!(AppointmentDraft::default().complete().is_none());
        assert!(AppointmentDraft::default().is_empty());
    }
}
