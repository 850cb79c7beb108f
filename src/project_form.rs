// Create-project form: field set, validation report and wire payload

use crate::validation::{
    validate_date_with, validate_latitude, validate_longitude, validate_text, ValidationPolicy,
};
use serde::{Deserialize, Serialize};

/// The fields of the create-project form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Lat,
    Long,
    StartDate,
    EndDate,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Lat,
        FieldId::Long,
        FieldId::StartDate,
        FieldId::EndDate,
    ];

    /// Id of the input element on the page
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Lat => "lat",
            FieldId::Long => "long",
            FieldId::StartDate => "startDate",
            FieldId::EndDate => "endDate",
        }
    }

    /// Key used in the JSON sent to the server
    pub fn wire_key(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Lat => "lat",
            FieldId::Long => "long",
            FieldId::StartDate => "start_date",
            FieldId::EndDate => "end_date",
        }
    }

    /// Resolve a field named by the server, by wire key or element id
    pub fn from_name(name: &str) -> Option<FieldId> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.wire_key() == name || field.element_id() == name)
    }
}

/// Raw form values exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    pub name: String,
    pub lat: String,
    pub long: String,
    pub start_date: String,
    pub end_date: String,
}

/// Body of the create-project request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub lat: String,
    pub long: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: Vec<(FieldId, bool)>,
}

impl ValidationReport {
    pub fn results(&self) -> &[(FieldId, bool)] {
        &self.results
    }

    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|&(_, passed)| passed)
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        self.results
            .iter()
            .filter(|(_, passed)| !passed)
            .map(|&(field, _)| field)
            .collect()
    }

    pub fn passed(&self, field: FieldId) -> bool {
        self.results
            .iter()
            .any(|&(checked, passed)| checked == field && passed)
    }
}

impl ProjectForm {
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Lat => &self.lat,
            FieldId::Long => &self.long,
            FieldId::StartDate => &self.start_date,
            FieldId::EndDate => &self.end_date,
        }
    }

    /// Run every validator; no short-circuit, so each field gets a verdict
    pub fn validate(&self, policy: &ValidationPolicy) -> ValidationReport {
        let results = FieldId::ALL
            .into_iter()
            .map(|field| {
                let value = self.value(field);
                let passed = match field {
                    FieldId::Name => validate_text(Some(value)),
                    FieldId::Lat => validate_latitude(value, policy),
                    FieldId::Long => validate_longitude(value, policy),
                    FieldId::StartDate | FieldId::EndDate => validate_date_with(value, policy),
                };
                (field, passed)
            })
            .collect();

        ValidationReport { results }
    }

    pub fn to_payload(&self) -> ProjectPayload {
        ProjectPayload {
            name: self.name.clone(),
            lat: self.lat.clone(),
            long: self.long.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProjectForm {
        ProjectForm {
            name: "Lake Project".into(),
            lat: "45.5".into(),
            long: "-122.4194".into(),
            start_date: "2023-01-01".into(),
            end_date: "2023-12-31".into(),
        }
    }

    #[test]
    fn form_reads_camel_case_keys() {
        let parsed: ProjectForm = serde_json::from_str(
            r#"{"name":"A","lat":"1","long":"2","startDate":"2020-01-01","endDate":"2020-02-01"}"#,
        )
        .unwrap();
        assert_eq!(parsed.start_date, "2020-01-01");
        assert_eq!(parsed.end_date, "2020-02-01");
    }

    #[test]
    fn payload_uses_snake_case_keys() {
        let json = serde_json::to_value(form().to_payload()).unwrap();
        assert_eq!(json["start_date"], "2023-01-01");
        assert_eq!(json["end_date"], "2023-12-31");
        assert!(json.get("startDate").is_none());
    }

    #[test]
    fn every_field_gets_a_verdict() {
        let mut bad = form();
        bad.name = "   ".into();
        bad.end_date = "31-12-2023".into();
        let report = bad.validate(&ValidationPolicy::default());
        assert_eq!(report.results().len(), 5);
        assert_eq!(report.invalid_fields(), vec![FieldId::Name, FieldId::EndDate]);
        assert!(report.passed(FieldId::Lat));
    }

    #[test]
    fn server_field_names_resolve() {
        assert_eq!(FieldId::from_name("start_date"), Some(FieldId::StartDate));
        assert_eq!(FieldId::from_name("endDate"), Some(FieldId::EndDate));
        assert_eq!(FieldId::from_name("elevation"), None);
    }
}
