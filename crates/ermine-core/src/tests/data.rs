use crate::*;

#[test]
fn from_json_str_keeps_entity_insertion_order() {
    let text = r#"{
        "entities": {
            "Zebra": { "properties": [] },
            "Apple": { "properties": [{ "name": "id", "type": "int" }] },
            "Mango": { "properties": [] }
        },
        "relationships": []
    }"#;
    let data = EntityRelationshipData::from_json_str(text).unwrap();
    let names: Vec<&str> = data.entities.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
    assert_eq!(data.entities["Apple"].properties[0].ty, "int");
}

#[test]
fn missing_sections_default_to_empty() {
    let data = EntityRelationshipData::from_json_str("{}").unwrap();
    assert!(data.entities.is_empty());
    assert!(data.relationships.is_empty());

    let data = EntityRelationshipData::from_json_str(r#"{"entities":{"A":{}}}"#).unwrap();
    assert!(data.entities["A"].properties.is_empty());
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = EntityRelationshipData::from_json_str("{\"entities\": [").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "unexpected error: {err:?}");
}

#[test]
fn relationship_endpoints_deserialize_from_nested_objects() {
    let text = r#"{
        "entities": {},
        "relationships": [
            { "source": { "entity": "Order", "property": "customerId" },
              "target": { "entity": "Customer", "property": "id" } }
        ]
    }"#;
    let data = EntityRelationshipData::from_json_slice(text.as_bytes()).unwrap();
    let rel = &data.relationships[0];
    assert_eq!(rel.source, EntityPropertyAccess::new("Order", "customerId"));
    assert_eq!(rel.target, EntityPropertyAccess::new("Customer", "id"));
}
