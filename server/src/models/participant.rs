use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "participant_type", rename_all = "snake_case")]
pub enum ParticipantType {
    Individual,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: i64,
    pub event_id: i64,
    pub participant_type: ParticipantType,
    pub payment_method: PaymentMethod,
    pub first_name: String,
    pub last_name: String,
    pub personal_code: String,
    pub company_name: String,
    pub registration_code: String,
    pub number_of_participants: Option<i32>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn display_name(&self) -> String {
        match self.participant_type {
            ParticipantType::Individual => format!("{} {}", self.first_name, self.last_name),
            ParticipantType::Company => self.company_name.clone(),
        }
    }

    pub fn headcount(&self) -> i64 {
        match self.participant_type {
            ParticipantType::Individual => 1,
            ParticipantType::Company => i64::from(self.number_of_participants.unwrap_or(0)),
        }
    }
}

/// A participant as returned by the API, with its computed display name.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    #[serde(flatten)]
    pub participant: Participant,
    pub display_name: String,
}

impl From<Participant> for ParticipantView {
    fn from(participant: Participant) -> Self {
        let display_name = participant.display_name();
        Self {
            participant,
            display_name,
        }
    }
}

/// Participant fields as submitted by a client, before any validation.
///
/// Every type-conditional field is optional here; which ones are required
/// depends on `participant_type`. The participant count is kept as text so
/// that non-numeric input can be rejected with a specific reason instead of
/// failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantDraft {
    pub participant_type: ParticipantType,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub personal_code: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub registration_code: Option<String>,
    #[serde(default, deserialize_with = "count_as_text")]
    pub number_of_participants: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Body of `POST /api/participants`, which names the event explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipantRequest {
    pub event_id: i64,
    #[serde(flatten)]
    pub draft: ParticipantDraft,
}

/// A participant record that passed validation, normalized for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidParticipant {
    pub event_id: i64,
    pub participant_type: ParticipantType,
    pub payment_method: PaymentMethod,
    pub first_name: String,
    pub last_name: String,
    pub personal_code: String,
    pub company_name: String,
    pub registration_code: String,
    pub number_of_participants: Option<i32>,
    pub additional_info: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn count_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<CountInput>::deserialize(deserializer)?;
    Ok(count.map(|count| match count {
        CountInput::Integer(n) => n.to_string(),
        // keep the fraction (`5.0`, `1000.0`) so it never parses as an integer
        CountInput::Float(n) => format!("{n:?}"),
        CountInput::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_accepts_numbers_and_strings() {
        let draft: ParticipantDraft = serde_json::from_str(
            r#"{"participant_type":"company","payment_method":"cash","number_of_participants":5}"#,
        )
        .unwrap();
        assert_eq!(draft.number_of_participants.as_deref(), Some("5"));

        let draft: ParticipantDraft = serde_json::from_str(
            r#"{"participant_type":"company","payment_method":"cash","number_of_participants":"abc"}"#,
        )
        .unwrap();
        assert_eq!(draft.number_of_participants.as_deref(), Some("abc"));

        let draft: ParticipantDraft = serde_json::from_str(
            r#"{"participant_type":"company","payment_method":"bank_transfer"}"#,
        )
        .unwrap();
        assert!(draft.number_of_participants.is_none());
    }

    #[test]
    fn test_count_floats_keep_their_fraction() {
        for (raw, expected) in [("5.0", "5.0"), ("2.5", "2.5"), ("1e3", "1000.0")] {
            let draft: ParticipantDraft = serde_json::from_str(&format!(
                r#"{{"participant_type":"company","payment_method":"cash","number_of_participants":{raw}}}"#
            ))
            .unwrap();
            assert_eq!(draft.number_of_participants.as_deref(), Some(expected));
            assert!(expected.parse::<i32>().is_err());
        }
    }

    #[test]
    fn test_create_request_flattens_draft() {
        let request: CreateParticipantRequest = serde_json::from_str(
            r#"{"event_id":7,"participant_type":"individual","payment_method":"cash",
                "first_name":"John","number_of_participants":"3"}"#,
        )
        .unwrap();
        assert_eq!(request.event_id, 7);
        assert_eq!(request.draft.participant_type, ParticipantType::Individual);
        assert_eq!(request.draft.first_name.as_deref(), Some("John"));
        assert_eq!(request.draft.number_of_participants.as_deref(), Some("3"));
    }

    #[test]
    fn test_display_name_and_headcount() {
        let mut participant = Participant {
            id: 1,
            event_id: 1,
            participant_type: ParticipantType::Individual,
            payment_method: PaymentMethod::Cash,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            personal_code: "37605030299".to_string(),
            company_name: String::new(),
            registration_code: String::new(),
            number_of_participants: None,
            additional_info: None,
            created_at: Utc::now(),
        };
        assert_eq!(participant.display_name(), "John Doe");
        assert_eq!(participant.headcount(), 1);

        participant.participant_type = ParticipantType::Company;
        participant.company_name = "Test Company".to_string();
        participant.number_of_participants = Some(5);
        assert_eq!(participant.display_name(), "Test Company");
        assert_eq!(participant.headcount(), 5);
    }
}
