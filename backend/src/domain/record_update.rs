//! Partial metadata updates for records.
//!
//! Only four fields can change after a record is written. The encoded form is
//! a JSON object; keys outside the four and values that are not strings are
//! ignored, which leaves the corresponding field untouched.

use serde_json::Value;

use crate::domain::Error;

/// Present-or-absent values for the mutable record fields.
///
/// An empty string is a real value: `Some(String::new())` for `policy_id`
/// clears the record's policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMetadataUpdate {
    pub policy_id: Option<String>,
    pub record_type: Option<String>,
    pub owner_org: Option<String>,
    pub description: Option<String>,
}

impl RecordMetadataUpdate {
    /// Decode caller-supplied JSON.
    ///
    /// `null` decodes to an empty update. Anything other than an object or
    /// `null` is `InvalidInput`.
    ///
    /// # Examples
    /// ```
    /// use cdms::domain::RecordMetadataUpdate;
    ///
    /// let update = RecordMetadataUpdate::from_json(r#"{"description":"x","colour":"red"}"#)
    ///     .expect("valid update");
    /// assert_eq!(update.description.as_deref(), Some("x"));
    /// assert!(update.record_type.is_none());
    /// ```
    pub fn from_json(encoded: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(encoded)
            .map_err(|err| Error::invalid_input(format!("invalid metadata JSON: {err}")))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => {
                let mut update = Self::default();
                for (key, value) in fields {
                    update.set(&key, value);
                }
                Ok(update)
            }
            _ => Err(Error::invalid_input(
                "invalid metadata JSON: expected an object",
            )),
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        let slot = match key {
            "policyId" => &mut self.policy_id,
            "recordType" => &mut self.record_type,
            "ownerOrg" => &mut self.owner_org,
            "description" => &mut self.description,
            _ => {
                tracing::debug!(key, "ignoring unrecognized metadata key");
                return;
            }
        };
        match value {
            Value::String(text) => *slot = Some(text),
            other => tracing::debug!(key, value = %other, "ignoring non-string metadata value"),
        }
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.policy_id.is_none()
            && self.record_type.is_none()
            && self.owner_org.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Record};
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> Record {
        Record {
            id: "R1".to_owned(),
            case_id: "C1".to_owned(),
            record_type: "photo".to_owned(),
            owner_org: "OrgA".to_owned(),
            policy_id: Some("P1".to_owned()),
            description: "front door".to_owned(),
            ..Record::default()
        }
    }

    #[rstest]
    #[case("null")]
    #[case("{}")]
    #[case(r#"{"caseId":"C9","fileHash":"abc"}"#)]
    #[case(r#"{"description":7,"ownerOrg":null,"policyId":["P2"]}"#)]
    fn empty_or_unrecognized_updates_change_nothing(record: Record, #[case] encoded: &str) {
        let update = RecordMetadataUpdate::from_json(encoded).expect("decode");
        let mut updated = record.clone();

        assert!(update.is_empty());
        assert!(!updated.apply(&update));
        assert_eq!(updated, record);
    }

    #[rstest]
    fn description_update_changes_only_description(record: Record) {
        let update = RecordMetadataUpdate::from_json(r#"{"description":"x"}"#).expect("decode");
        let mut updated = record.clone();
        updated.apply(&update);

        assert_eq!(updated.description, "x");
        assert_eq!(
            Record {
                description: record.description.clone(),
                ..updated
            },
            record
        );
    }

    #[rstest]
    fn empty_policy_id_clears_policy(record: Record) {
        let update = RecordMetadataUpdate::from_json(r#"{"policyId":""}"#).expect("decode");
        let mut updated = record;
        updated.apply(&update);
        assert_eq!(updated.policy_id, None);
    }

    #[rstest]
    fn all_recognized_fields_apply(record: Record) {
        let update = RecordMetadataUpdate::from_json(
            r#"{"policyId":"P2","recordType":"video","ownerOrg":"OrgB","description":"rear"}"#,
        )
        .expect("decode");
        let mut updated = record;
        updated.apply(&update);

        assert_eq!(updated.policy_id.as_deref(), Some("P2"));
        assert_eq!(updated.record_type, "video");
        assert_eq!(updated.owner_org, "OrgB");
        assert_eq!(updated.description, "rear");
    }

    #[rstest]
    #[case("[]")]
    #[case("\"description\"")]
    #[case("42")]
    #[case("{broken")]
    fn non_objects_are_invalid_input(#[case] encoded: &str) {
        let error = RecordMetadataUpdate::from_json(encoded).expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
        assert!(error.message().starts_with("invalid metadata JSON"));
    }
}
