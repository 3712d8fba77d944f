//! Verification request model

use super::ids::PatientId;
use super::patient::Patient;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Request payload for one eligibility verification
///
/// Combines the patient demographics used for registry reconciliation with
/// the insurance details used for outcome generation.
///
/// # Examples
///
/// ```
/// use eligo::domain::VerificationRequest;
/// use chrono::NaiveDate;
///
/// let request = VerificationRequest::new(
///     "P1",
///     "Jane Doe",
///     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
/// )
/// .unwrap()
/// .with_insurance_company("Cigna")
/// .with_insurance_member_id("MBR001");
///
/// assert_eq!(request.insurance_company.as_deref(), Some("Cigna"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Unique patient identifier
    pub patient_id: PatientId,

    /// Patient's full name
    #[serde(alias = "name")]
    pub patient_name: String,

    /// Patient's date of birth
    pub date_of_birth: NaiveDate,

    /// Date of the service requiring verification; a full ISO timestamp is
    /// accepted and truncated to its date
    #[serde(deserialize_with = "deserialize_service_date")]
    pub service_date: NaiveDate,

    /// Insurance member ID (may differ from the patient ID)
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub insurance_member_id: Option<String>,

    /// Insurance company name
    #[serde(
        default,
        alias = "insuranceCompanyName",
        deserialize_with = "deserialize_optional_text"
    )]
    pub insurance_company: Option<String>,
}

impl VerificationRequest {
    /// Creates a request without insurance details
    ///
    /// # Errors
    ///
    /// Returns an error if the patient ID or name is blank
    pub fn new(
        patient_id: impl Into<String>,
        patient_name: impl Into<String>,
        date_of_birth: NaiveDate,
        service_date: NaiveDate,
    ) -> Result<Self, String> {
        let patient_name = patient_name.into();
        if patient_name.trim().is_empty() {
            return Err("Patient name cannot be empty".to_string());
        }
        Ok(Self {
            patient_id: PatientId::new(patient_id)?,
            patient_name,
            date_of_birth,
            service_date,
            insurance_member_id: None,
            insurance_company: None,
        })
    }

    /// Sets the insurance member ID; blank values are treated as absent
    pub fn with_insurance_member_id(mut self, member_id: impl Into<String>) -> Self {
        self.insurance_member_id = non_blank(member_id.into());
        self
    }

    /// Sets the insurance company; blank values are treated as absent
    pub fn with_insurance_company(mut self, company: impl Into<String>) -> Self {
        self.insurance_company = non_blank(company.into());
        self
    }

    /// Patient record implied by this request
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank (possible for deserialized requests)
    pub fn patient(&self) -> Result<Patient, String> {
        Patient::new(
            self.patient_id.clone(),
            self.patient_name.clone(),
            self.date_of_birth,
        )
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parses a service date from `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_service_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| {
            format!("Invalid service date '{value}'. Expected ISO date string or timestamp")
        })
}

fn deserialize_service_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_service_date(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(non_blank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_service_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(parse_service_date("2024-02-01").unwrap(), expected);
        assert_eq!(parse_service_date("2024-02-01T10:30:00Z").unwrap(), expected);
        assert!(parse_service_date("02/01/2024").is_err());
    }

    #[test]
    fn test_blank_insurance_fields_are_absent() {
        let request = VerificationRequest::new(
            "P1",
            "Jane Doe",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .unwrap()
        .with_insurance_company("  ")
        .with_insurance_member_id("");
        assert!(request.insurance_company.is_none());
        assert!(request.insurance_member_id.is_none());
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = VerificationRequest::new(
            "P1",
            "",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_request_body() {
        let request: VerificationRequest = serde_json::from_value(json!({
            "patientId": "P123456",
            "patientName": "John Doe",
            "dateOfBirth": "1985-03-15",
            "insuranceMemberId": "MBR001",
            "insuranceCompanyName": "Cigna",
            "serviceDate": "2024-02-01T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(request.patient_id.as_str(), "P123456");
        assert_eq!(request.insurance_company.as_deref(), Some("Cigna"));
        assert_eq!(
            request.service_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(request.patient().unwrap().name, "John Doe");
    }

    #[test]
    fn test_deserialize_without_insurance() {
        let request: VerificationRequest = serde_json::from_value(json!({
            "patientId": "P1",
            "name": "Jane Doe",
            "dateOfBirth": "1990-01-01",
            "serviceDate": "2024-02-01",
            "insuranceCompany": ""
        }))
        .unwrap();
        assert!(request.insurance_company.is_none());
        assert!(request.insurance_member_id.is_none());
    }
}
