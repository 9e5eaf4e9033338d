use super::xml_chars;
use crate::votable::test_support::parse;
use crate::votable::{Cell, FieldSpec, Info, VoTableDocument};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("obs_id", "meta.id;obs"),
    FieldSpec::double("t_start", "time.start", "d"),
    FieldSpec::double("t_stop", "time.end", "d"),
];

fn document() -> VoTableDocument {
    let mut doc = VoTableDocument::new("Test service", FIELDS);
    doc.push_info(Info::new("QUERY_STATUS", "OK"));
    doc.push_info(Info::new("REQUEST_DATE", "2024-01-01T00:00:00Z").with_content("Query execution date"));
    doc
}

#[test]
fn test_empty_document_keeps_schema_but_omits_data() {
    let xml = document().to_xml().unwrap();
    let parsed = parse(&xml);

    assert_eq!(parsed.declarations, 1);
    assert_eq!(parsed.fields, vec!["obs_id", "t_start", "t_stop"]);
    assert!(!parsed.has_data);
    assert!(!xml.contains("<DATA"));
    assert!(!xml.contains("TABLEDATA"));
    assert!(xml.contains("<TABLE>"));
}

#[test]
fn test_rows_written_in_order() {
    let mut doc = document();
    doc.push_row(vec![Cell::from("a"), Cell::from(60000.0), Cell::from(60000.5)]);
    doc.push_row(vec![Cell::from("b"), Cell::from(60001.0), Cell::from(60001.25)]);

    let parsed = parse(&doc.to_xml().unwrap());
    assert!(parsed.has_data);
    assert_eq!(
        parsed.rows,
        vec![
            vec!["a".to_string(), "60000".to_string(), "60000.5".to_string()],
            vec!["b".to_string(), "60001".to_string(), "60001.25".to_string()],
        ]
    );
}

#[test]
fn test_infos_in_order_with_content() {
    let xml = document().to_xml().unwrap();
    let parsed = parse(&xml);
    assert_eq!(parsed.info_names(), vec!["QUERY_STATUS", "REQUEST_DATE"]);
    assert!(xml.contains("Query execution date"));
}

#[test]
fn test_header_and_namespace() {
    let xml = document().to_xml().unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("xmlns=\"http://www.ivoa.net/xml/VOTable/v1.3\""));
    assert!(xml.contains("<RESOURCE type=\"results\">"));
    assert_eq!(parse(&xml).description, "Test service");
}

#[test]
fn test_field_attributes() {
    let xml = document().to_xml().unwrap();
    assert!(xml.contains(
        r#"<FIELD name="obs_id" datatype="char" arraysize="*" ucd="meta.id;obs"/>"#
    ));
    assert!(xml.contains(r#"<FIELD name="t_start" datatype="double" ucd="time.start" unit="d"/>"#));
}

#[test]
fn test_text_is_escaped() {
    let mut doc = VoTableDocument::new("A & B <service>", FIELDS);
    doc.push_info(Info::new("REQUEST", "https://host/q?POS=1,2&TIME=3/4"));
    doc.push_row(vec![Cell::from("<target>"), Cell::from(1.0), Cell::from(2.0)]);

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("A &amp; B &lt;service&gt;"));

    let parsed = parse(&xml);
    assert_eq!(parsed.description, "A & B <service>");
    assert_eq!(parsed.info("REQUEST"), Some("https://host/q?POS=1,2&TIME=3/4"));
    assert_eq!(parsed.rows[0][0], "<target>");
}

#[test]
fn test_characters_outside_xml_are_dropped() {
    let mut doc = VoTableDocument::new("Swift\u{0}VO", FIELDS);
    doc.push_info(Info::new("UP\u{1}LOAD", "a\u{1}b\u{1b}c").with_content("x\u{FFFF}y"));
    doc.push_row(vec![Cell::from("Crab\u{8}\u{7f}"), Cell::from(1.0), Cell::from(2.0)]);

    let xml = doc.to_xml().unwrap();
    let parsed = parse(&xml);
    assert_eq!(parsed.description, "SwiftVO");
    assert_eq!(parsed.info("UPLOAD"), Some("abc"));
    assert!(xml.contains("xy"));
    // DEL is a legal XML character
    assert_eq!(parsed.rows[0][0], "Crab\u{7f}");
}

#[test]
fn test_xml_chars_keeps_whitespace_and_unicode() {
    assert!(matches!(xml_chars("a\tb\nc\rd"), std::borrow::Cow::Borrowed(_)));
    assert_eq!(xml_chars("M31 \u{2013} Andromeda \u{1F52D}"), "M31 \u{2013} Andromeda \u{1F52D}");
    assert_eq!(xml_chars("\u{0}\u{1f}\u{FFFE}"), "");
}
