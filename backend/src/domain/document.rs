//! Stored document encoding.
//!
//! Documents are camelCase JSON objects carrying a `docType` discriminator.
//! Decoding is lenient: absent fields take their defaults and unknown fields
//! are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::{EntityKind, Error};

/// An entity persisted under its own key prefix.
pub trait LedgerDocument: Serialize + DeserializeOwned {
    /// Kind determining the key prefix and `docType`.
    const KIND: EntityKind;

    /// Identifier appended to the key prefix.
    fn ledger_id(&self) -> &str;
}

#[derive(Serialize)]
struct Tagged<'a, D> {
    #[serde(rename = "docType")]
    doc_type: &'static str,
    #[serde(flatten)]
    body: &'a D,
}

fn tagged<D: LedgerDocument>(document: &D) -> Tagged<'_, D> {
    Tagged {
        doc_type: D::KIND.doc_type(),
        body: document,
    }
}

/// Encode `document` into its stored byte form.
pub fn encode<D: LedgerDocument>(document: &D) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(&tagged(document)).map_err(|err| {
        Error::invalid_input(format!(
            "failed to encode {} {}: {err}",
            D::KIND,
            document.ledger_id()
        ))
    })
}

/// Render `document` as the JSON value returned to callers.
pub fn to_payload<D: LedgerDocument>(document: &D) -> Result<Value, Error> {
    serde_json::to_value(tagged(document)).map_err(|err| {
        Error::invalid_input(format!(
            "failed to encode {} {}: {err}",
            D::KIND,
            document.ledger_id()
        ))
    })
}

/// Decode stored bytes read from a point lookup.
///
/// The `docType` is not checked here: the key prefix already names the kind.
pub fn decode<D: LedgerDocument>(id: &str, bytes: &[u8]) -> Result<D, Error> {
    serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_input(format!("failed to unmarshal {} {id}: {err}", D::KIND))
    })
}

/// Outcome of classifying one range-scan entry.
pub enum ScanItem<D> {
    /// The entry holds a document of the scanned kind.
    Matched(D),
    /// The entry carries a different `docType` and is skipped.
    Foreign,
}

/// Decode one entry returned by a range scan.
///
/// Entries whose `docType` differs from `D`'s are reported as foreign. A value
/// that is not a JSON object, or a matching document that fails to decode,
/// is an error.
pub fn decode_scanned<D: LedgerDocument>(key: &str, bytes: &[u8]) -> Result<ScanItem<D>, Error> {
    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_input(format!("failed to unmarshal {} entry {key}: {err}", D::KIND))
    })?;
    let Value::Object(fields) = &value else {
        return Err(Error::invalid_input(format!(
            "failed to unmarshal {} entry {key}: not a JSON object",
            D::KIND
        )));
    };
    let doc_type = fields.get("docType").and_then(Value::as_str).unwrap_or_default();
    if doc_type != D::KIND.doc_type() {
        return Ok(ScanItem::Foreign);
    }
    serde_json::from_value(value)
        .map(ScanItem::Matched)
        .map_err(|err| {
            Error::invalid_input(format!("failed to unmarshal {} entry {key}: {err}", D::KIND))
        })
}

/// Serde adapter for optional policy references.
///
/// The stored form uses the empty string for "no policy".
pub mod policy_reference {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|value| !value.is_empty()))
    }
}

/// Deserializer for string lists that treats JSON `null` as empty.
///
/// Provisioning tools write nil lists as `null`; a missing field is covered
/// by the container `default`.
pub mod nullable_list {
    use super::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Normalize a caller-supplied policy reference.
pub fn policy_ref(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Case, ErrorCode};
    use rstest::rstest;
    use serde_json::json;

    fn case_with_policy(policy: Option<&str>) -> Case {
        Case {
            id: "C1".to_owned(),
            title: "Burglary".to_owned(),
            policy_id: policy.map(str::to_owned),
            ..Case::default()
        }
    }

    #[rstest]
    fn encode_adds_doc_type_and_uses_camel_case() {
        let bytes = encode(&case_with_policy(Some("P1"))).expect("encode");
        let value: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["docType"], json!("case"));
        assert_eq!(value["policyId"], json!("P1"));
        assert_eq!(value["caseType"], json!(""));
    }

    #[rstest]
    fn absent_policy_is_stored_as_empty_string() {
        let value = to_payload(&case_with_policy(None)).expect("payload");
        assert_eq!(value["policyId"], json!(""));
    }

    #[rstest]
    #[case(json!({"id": "C1"}))]
    #[case(json!({"id": "C1", "policyId": ""}))]
    #[case(json!({"id": "C1", "policyId": null}))]
    fn missing_or_empty_policy_decodes_as_none(#[case] stored: Value) {
        let bytes = serde_json::to_vec(&stored).expect("bytes");
        let case: Case = decode("C1", &bytes).expect("decode");
        assert_eq!(case.policy_id, None);
    }

    #[rstest]
    fn decode_ignores_unknown_fields() {
        let bytes = br#"{"docType":"case","id":"C1","extra":{"nested":true}}"#;
        let case: Case = decode("C1", bytes).expect("decode");
        assert_eq!(case.id, "C1");
    }

    #[rstest]
    fn decode_rejects_invalid_json() {
        let error = decode::<Case>("C1", b"{not json").expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
        assert!(error.message().starts_with("failed to unmarshal case C1"));
    }

    #[rstest]
    fn scanned_foreign_doc_type_is_skipped() {
        let item = decode_scanned::<Case>("case:X", br#"{"docType":"record","id":"X"}"#)
            .expect("classify");
        assert!(matches!(item, ScanItem::Foreign));
    }

    #[rstest]
    fn scanned_missing_doc_type_is_skipped() {
        let item = decode_scanned::<Case>("case:X", br#"{"id":"X"}"#).expect("classify");
        assert!(matches!(item, ScanItem::Foreign));
    }

    #[rstest]
    #[case(b"[1,2]".as_slice())]
    #[case(b"\"case\"".as_slice())]
    #[case(b"{oops".as_slice())]
    fn scanned_non_objects_abort(#[case] bytes: &[u8]) {
        let error = decode_scanned::<Case>("case:X", bytes).err().expect("abort");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
    }

    #[rstest]
    fn scanned_matching_doc_with_bad_field_aborts() {
        let error = decode_scanned::<Case>("case:X", br#"{"docType":"case","id":7}"#)
            .err()
            .expect("abort");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
    }

    #[rstest]
    #[case("", None)]
    #[case("P1", Some("P1"))]
    fn policy_ref_treats_empty_as_absent(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(policy_ref(raw).as_deref(), expected);
    }
}
