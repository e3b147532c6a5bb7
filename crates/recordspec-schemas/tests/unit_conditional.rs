//! Conditional rule tests against the bundled vendor schema
//!
//! Covers the identification-number rules driven by organization type and
//! the postal-code patterns driven by country code, plus the open-schema
//! and depth-limit behavior of the walker.

use recordspec_schemas::{
    validate, validate_with_config, RecordType, Report, Schema, ValidationConfig, Value, ViolationKind,
};
use serde_json::json;

fn vendor_schema() -> Schema {
    RecordType::Vendor.schema().unwrap()
}

fn sample_vendor() -> serde_json::Value {
    serde_json::from_str(RecordType::Vendor.samples()[0].source).unwrap()
}

fn check(record: serde_json::Value) -> Report {
    vendor_schema().validate(&Value::from_json(&record).unwrap())
}

fn kinds(report: &Report) -> Vec<ViolationKind> {
    report.violations().iter().map(|v| v.kind).collect()
}

#[cfg(test)]
mod organization_type_rules {
    use super::*;

    #[test]
    fn test_individual_without_identification_numbers() {
        let report = check(json!({"organizationType": "Individual"}));
        assert!(!report.is_valid());

        let any_of: Vec<_> = report.of_kind(ViolationKind::AnyOfRequiredViolation).collect();
        assert_eq!(any_of.len(), 1);
        assert_eq!(any_of[0].path.to_string(), "$");
        for field in ["uniqueIdentifier", "sinNumber", "businessNumber"] {
            assert!(any_of[0].expected.contains(field), "missing {} in {}", field, any_of[0].expected);
        }
    }

    #[test]
    fn test_individual_with_sin_number() {
        let mut record = sample_vendor();
        record["organizationType"] = json!("Individual");
        record["vendorIdentificationNumbers"] = json!({"sinNumber": "046454286"});
        assert!(check(record).is_valid());
    }

    #[test]
    fn test_individual_with_only_supplier_number() {
        let mut record = sample_vendor();
        record["organizationType"] = json!("Individual");
        record["vendorIdentificationNumbers"] = json!({"supplierNumber": "SUPP-12345"});
        let report = check(record);
        assert_eq!(kinds(&report), vec![ViolationKind::AnyOfRequiredViolation]);
    }

    #[test]
    fn test_canadian_corporation_requires_business_number() {
        let mut record = sample_vendor();
        record["organizationType"] = json!("Corporation/Partnership");
        record["vendorIdentificationNumbers"] = json!({"supplierNumber": "SUPP-12345"});

        let report = check(record.clone());
        assert_eq!(kinds(&report), vec![ViolationKind::MissingRequiredField]);
        assert_eq!(
            report.violations()[0].path.to_string(),
            "vendorIdentificationNumbers.businessNumber"
        );

        record["vendorIdentificationNumbers"]["businessNumber"] = json!("123456789");
        assert!(check(record).is_valid());
    }

    #[test]
    fn test_foreign_corporation_needs_no_business_number() {
        let mut record = sample_vendor();
        record["organizationType"] = json!("Corporation/Partnership");
        record["countryCode"] = json!("US");
        record["contactInformation"]["address"]["postalCode"] = json!("20500");
        record["vendorIdentificationNumbers"] = json!({"dunsNumber": "123456789"});
        assert!(check(record).is_valid());
    }

    #[test]
    fn test_business_number_pattern_still_applies() {
        let mut record = sample_vendor();
        record["organizationType"] = json!("Corporation/Partnership");
        record["vendorIdentificationNumbers"] = json!({"businessNumber": "12345"});
        let report = check(record);
        assert_eq!(kinds(&report), vec![ViolationKind::PatternViolation]);
    }
}

#[cfg(test)]
mod postal_code_rules {
    use super::*;

    #[test]
    fn test_zip_code_rejected_for_canada() {
        let mut record = sample_vendor();
        record["contactInformation"]["address"]["postalCode"] = json!("12345");
        let report = check(record);
        assert_eq!(kinds(&report), vec![ViolationKind::PatternViolation]);
        let violation = &report.violations()[0];
        assert_eq!(violation.path.to_string(), "contactInformation.address.postalCode");
        assert!(violation.expected.contains("[A-Z][0-9][A-Z]"));
    }

    #[test]
    fn test_zip_code_accepted_for_united_states() {
        let mut record = sample_vendor();
        record["countryCode"] = json!("US");
        record["contactInformation"]["address"]["postalCode"] = json!("12345");
        assert!(check(record.clone()).is_valid());

        record["contactInformation"]["address"]["postalCode"] = json!("12345-6789");
        assert!(check(record).is_valid());
    }

    #[test]
    fn test_other_countries_have_no_postal_pattern() {
        let mut record = sample_vendor();
        record["countryCode"] = json!("FR");
        record["contactInformation"]["address"]["postalCode"] = json!("75008");
        assert!(check(record).is_valid());
    }

    #[test]
    fn test_postal_code_without_space() {
        let mut record = sample_vendor();
        record["contactInformation"]["address"]["postalCode"] = json!("K1A0A9");
        assert!(check(record).is_valid());
    }
}

#[cfg(test)]
mod walker_behavior {
    use super::*;

    #[test]
    fn test_sample_with_unknown_keys_is_valid() {
        let mut record = sample_vendor();
        record["internalNotes"] = json!("preferred supplier");
        record["contactInformation"]["address"]["unit"] = json!({"floor": 4});
        record["bankingInformation"] = json!({"accountNumber": "0012345", "swift": "ROYCCAT2"});
        let report = check(record);
        assert!(report.is_valid());
        assert!(report.violations().is_empty());
    }

    #[test]
    fn test_violations_reported_in_schema_order() {
        let report = check(json!({
            "commodityCodes": ["43211500", 43232400],
            "size": "Huge",
            "legalName": "x".repeat(121),
            "countryCode": "can"
        }));
        let paths: Vec<String> = report.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "vendorIdentificationNumbers",
                "legalName",
                "countryCode",
                "size",
                "commodityCodes[1]",
            ]
        );
        assert_eq!(
            kinds(&report),
            vec![
                ViolationKind::MissingRequiredField,
                ViolationKind::LengthViolation,
                ViolationKind::PatternViolation,
                ViolationKind::EnumViolation,
                ViolationKind::TypeMismatch,
            ]
        );
    }

    #[test]
    fn test_type_mismatch_stops_subtree_only() {
        let mut record = sample_vendor();
        record["contactInformation"] = json!("613-555-1234");
        record["legalName"] = json!(42);
        let report = check(record);
        assert_eq!(
            kinds(&report),
            vec![ViolationKind::TypeMismatch, ViolationKind::TypeMismatch]
        );
        assert_eq!(report.violations()[0].path.to_string(), "legalName");
        assert_eq!(report.violations()[1].path.to_string(), "contactInformation");
    }

    #[test]
    fn test_structure_too_deep() {
        let config = ValidationConfig::default().with_max_depth(2);
        let record = Value::from_json(&sample_vendor()).unwrap();
        let report = validate_with_config(&vendor_schema(), &[], &record, &config);
        let deep: Vec<String> = report
            .of_kind(ViolationKind::StructureTooDeep)
            .map(|v| v.path.to_string())
            .collect();
        assert_eq!(
            deep,
            vec![
                "contactInformation.address.streetAddress",
                "contactInformation.address.city",
                "contactInformation.address.province",
                "contactInformation.address.postalCode",
            ]
        );
    }

    #[test]
    fn test_sample_is_valid_with_default_depth() {
        let record = Value::from_json(&sample_vendor()).unwrap();
        assert!(validate(&vendor_schema(), &[], &record).is_valid());
    }
}
