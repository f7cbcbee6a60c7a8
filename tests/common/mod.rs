use octofhir_vocabgen::*;

#[allow(dead_code)]
pub fn create_test_config() -> VocabGenConfig {
    VocabGenConfig::default()
        .with_max_literals(10)
        .with_preferred_realm("UV")
        .with_package("org.example.hl7")
}

#[allow(dead_code)]
pub fn create_gender_value_set() -> Enumeration {
    Enumeration::value_set("Gender")
        .with_realm("UV")
        .with_content_oid("2.16.840.1.113883.5.1")
        .with_literal(EnumerationValue::new("M").with_label("Male"))
        .with_literal(EnumerationValue::new("F").with_label("Female"))
        .with_literal(EnumerationValue::new("UN").with_label("Undifferentiated"))
}

/// `BloodType` bound to `{A+, B+}` and `{O+}`.
#[allow(dead_code)]
pub fn create_blood_type_model() -> (VocabularyModel, EnumId) {
    let mut model = VocabularyModel::new();
    let ab = model.insert(
        Enumeration::value_set("BloodTypeAB")
            .with_realm("UV")
            .with_content_oid("2.16.1")
            .with_literal(EnumerationValue::new("A+").with_label("A positive"))
            .with_literal(EnumerationValue::new("B+").with_label("B positive")),
    );
    let o = model.insert(
        Enumeration::value_set("BloodTypeO")
            .with_realm("UV")
            .with_content_oid("2.16.2")
            .with_literal(EnumerationValue::new("O+").with_label("O positive")),
    );
    let domain = model.insert(
        Enumeration::concept_domain("BloodType")
            .with_realm("UV")
            .with_binding(ab)
            .with_binding(o),
    );
    (model, domain)
}

#[allow(dead_code)]
pub fn create_large_value_set(literals: usize) -> Enumeration {
    Enumeration::value_set("Large").with_literals((0..literals).map(|i| format!("code{i}")))
}

#[allow(dead_code)]
pub const MODEL_JSON: &str = r#"{
    "enumerations": [
        {
            "name": "Gender", "kind": "ValueSet", "ownerRealm": "UV",
            "contentOid": "2.16.840.1.113883.5.1",
            "documentation": { "description": ["Administrative gender"] },
            "literals": [
                { "name": "M", "businessName": "Male" },
                { "name": "F", "businessName": "Female" },
                { "name": "UN", "businessName": "Undifferentiated" }
            ]
        },
        {
            "name": "ActStatus", "kind": "ValueSet", "ownerRealm": "UV",
            "contentOid": "2.16.840.1.113883.5.14",
            "literals": [
                { "name": "normal", "businessName": "normal", "relatedCodes": [
                    { "name": "active", "businessName": "active" },
                    { "name": "held", "businessName": "held",
                      "annotations": [ { "type": "suppressBrowse" } ] }
                ] }
            ]
        },
        { "name": "Unreferenced", "kind": "ValueSet", "literals": [ { "name": "x" } ] },
        { "name": "AdministrativeGender", "kind": "ConceptDomain", "contextBinding": ["Gender"] },
        { "name": "Orphan", "kind": "ConceptDomain" }
    ],
    "referenced": [
        { "name": "AdministrativeGender", "kind": "ConceptDomain" },
        { "name": "ActStatus", "kind": "ValueSet" }
    ]
}"#;
