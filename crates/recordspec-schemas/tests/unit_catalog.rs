//! Tests for the bundled reference catalog
//!
//! Every bundled sample must validate against its schema, the customer
//! rules must behave as documented, and bundled schemas must survive a
//! render and reparse unchanged.

use recordspec_schemas::{RecordType, Report, Schema, Value, ViolationKind};
use serde_json::json;

fn customer(file_name: &str) -> serde_json::Value {
    let sample = RecordType::Customer
        .samples()
        .iter()
        .find(|s| s.file_name == file_name)
        .unwrap();
    serde_json::from_str(sample.source).unwrap()
}

fn check_customer(record: serde_json::Value) -> Report {
    RecordType::Customer
        .schema()
        .unwrap()
        .validate(&Value::from_json(&record).unwrap())
}

#[cfg(test)]
mod bundled_documents {
    use super::*;

    #[test]
    fn test_every_sample_is_valid() {
        for record_type in RecordType::ALL {
            let schema = record_type.schema().unwrap();
            for sample in record_type.samples() {
                let report = schema.validate(&sample.record().unwrap());
                assert!(report.is_valid(), "{} failed:\n{}", sample.file_name, report);
            }
        }
    }

    #[test]
    fn test_sample_counts() {
        assert_eq!(RecordType::Vendor.samples().len(), 1);
        assert_eq!(RecordType::Customer.samples().len(), 3);
    }

    #[test]
    fn test_schemas_render_and_reparse() {
        for record_type in RecordType::ALL {
            let schema = record_type.schema().unwrap();
            let reparsed = Schema::from_json(&schema.to_json()).unwrap();
            assert_eq!(schema, reparsed, "{} changed on render", record_type);
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            RecordType::Vendor.schema().unwrap().title(),
            Some("Vendor Record Structure")
        );
        assert_eq!(
            RecordType::Customer.schema().unwrap().title(),
            Some("Customer Record Schema")
        );
    }
}

#[cfg(test)]
mod customer_rules {
    use super::*;

    #[test]
    fn test_canadian_address_requires_province_and_postal_code() {
        let mut record = customer("sample_customer.json");
        let address = record["contactInformation"]["address"].as_object_mut().unwrap();
        address.remove("province");
        address.remove("postalCode");

        let report = check_customer(record);
        let paths: Vec<String> = report.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "contactInformation.address.province",
                "contactInformation.address.postalCode",
            ]
        );
        assert!(report
            .violations()
            .iter()
            .all(|v| v.kind == ViolationKind::MissingRequiredField));
    }

    #[test]
    fn test_foreign_address_needs_no_province() {
        let mut record = customer("sample_customer.json");
        record["contactInformation"]["address"] = json!({
            "streetAddress": "1600 Pennsylvania Avenue NW",
            "city": "Washington",
            "country": "US",
            "postalCode": "20500"
        });
        assert!(check_customer(record).is_valid());
    }

    #[test]
    fn test_canadian_postal_code_pattern() {
        let mut record = customer("sample_government_customer.json");
        record["contactInformation"]["address"]["postalCode"] = json!("K1A-1A1");
        let report = check_customer(record);
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].kind, ViolationKind::PatternViolation);
    }

    #[test]
    fn test_business_requires_business_number() {
        let mut record = customer("sample_business_customer.json");
        record.as_object_mut().unwrap().remove("identificationNumbers");
        let report = check_customer(record.clone());
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path.to_string(), "identificationNumbers");

        record["identificationNumbers"] = json!({"programIdentifier": "PRG1234"});
        let report = check_customer(record.clone());
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.violations()[0].path.to_string(),
            "identificationNumbers.businessNumber"
        );

        record["identificationNumbers"]["businessNumber"] = json!("12345678X");
        let report = check_customer(record);
        assert_eq!(report.violations()[0].kind, ViolationKind::PatternViolation);
    }

    #[test]
    fn test_government_needs_no_business_number() {
        let record = customer("sample_government_customer.json");
        assert!(record["identificationNumbers"].get("businessNumber").is_none());
        assert!(check_customer(record).is_valid());
    }

    #[test]
    fn test_date_formats() {
        let mut record = customer("sample_customer.json");
        record["accountDetails"]["creationDate"] = json!("2025-02-30");
        record["accountDetails"]["lastModified"] = json!("April 8th");
        let report = check_customer(record);
        let paths: Vec<String> = report.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(
            paths,
            vec!["accountDetails.creationDate", "accountDetails.lastModified"]
        );
        assert!(report
            .violations()
            .iter()
            .all(|v| v.kind == ViolationKind::FormatViolation));
    }

    #[test]
    fn test_invalid_email() {
        let mut record = customer("sample_business_customer.json");
        record["contactInformation"]["alternateContact"]["email"] = json!("john.doe");
        let report = check_customer(record);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.violations()[0].path.to_string(),
            "contactInformation.alternateContact.email"
        );
    }
}
