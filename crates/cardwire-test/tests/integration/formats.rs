//! One property, four encodings.

use cardwire_test::rfc::rfc::vcard::{
    CompatibilityMode, NoDocument, PropertyExt, VCardVersion, WriteOutcome, write_json_property,
    write_text_property, write_xml_property,
};
use serde_json::json;

use super::helpers::{read_html, read_json, read_text, read_xml};

fn text(property: &dyn cardwire_test::rfc::rfc::vcard::Property, version: VCardVersion) -> String {
    match write_text_property(property, version, CompatibilityMode::Rfc, &NoDocument, None) {
        Ok(WriteOutcome::Written(line)) => line,
        other => panic!("expected a written line, got {other:?}"),
    }
}

#[test_log::test]
fn gender_in_every_format() {
    let from_text = read_text("GENDER:F;woman", VCardVersion::V4_0);
    let from_xml = read_xml(
        r#"<gender xmlns="urn:ietf:params:xml:ns:vcard-4.0"><sex>F</sex><identity>woman</identity></gender>"#,
    );
    let from_json = read_json(r#"["gender", {}, "text", ["F", "woman"]]"#);
    let from_html = read_html(r#"<span class="gender">F;woman</span>"#);

    for property in [&from_text, &from_xml, &from_json, &from_html] {
        assert_eq!(text(property.as_ref(), VCardVersion::V4_0), "GENDER:F;woman");
    }

    let xml = write_xml_property(from_text.as_ref(), CompatibilityMode::Rfc, &NoDocument)
        .unwrap()
        .written()
        .unwrap();
    assert_eq!(
        xml,
        r#"<gender xmlns="urn:ietf:params:xml:ns:vcard-4.0"><sex>F</sex><identity>woman</identity></gender>"#
    );

    let json = write_json_property(from_text.as_ref(), VCardVersion::V4_0, &NoDocument)
        .unwrap()
        .written()
        .unwrap();
    assert_eq!(json, json!(["gender", {}, "text", ["F", "woman"]]));
}

#[test_log::test]
fn text_parameters_survive_xml() {
    let note = read_text("item2.NOTE;LANGUAGE=de;PREF=2:Hallo\\, Welt", VCardVersion::V4_0);
    let xml = write_xml_property(note.as_ref(), CompatibilityMode::Rfc, &NoDocument)
        .unwrap()
        .written()
        .unwrap();

    let back = read_xml(&xml);
    assert_eq!(back.parameter("LANGUAGE"), Some("de"));
    assert_eq!(back.parameter("PREF"), Some("2"));
    assert_eq!(text(back.as_ref(), VCardVersion::V4_0), "NOTE;LANGUAGE=de;PREF=2:Hallo\\, Welt");
}

#[test_log::test]
fn long_lines_are_folded() {
    let value = "x".repeat(100);
    let note = read_text(&format!("NOTE:{value}"), VCardVersion::V4_0);
    let folded = match write_text_property(
        note.as_ref(),
        VCardVersion::V4_0,
        CompatibilityMode::Rfc,
        &NoDocument,
        Some(75),
    )
    .unwrap()
    {
        WriteOutcome::Written(line) => line,
        other => panic!("unexpected {other:?}"),
    };

    let lines: Vec<&str> = folded.split("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 75);
    assert!(lines[1].starts_with(' '));
    assert_eq!(folded.replace("\r\n ", ""), format!("NOTE:{value}"));
}

#[test_log::test]
fn vcard_21_type_parameters_are_bare() {
    let tel = read_text("X-TEL;HOME;WORK:555", VCardVersion::V2_1);
    assert_eq!(tel.parameter_values("TYPE"), ["HOME", "WORK"]);
    assert_eq!(text(tel.as_ref(), VCardVersion::V2_1), "X-TEL;HOME;WORK:555");
}

#[test_log::test]
fn outlook_gets_charset_in_21() {
    let title = read_text("TITLE:Gérante", VCardVersion::V2_1);
    let line = match write_text_property(
        title.as_ref(),
        VCardVersion::V2_1,
        CompatibilityMode::MsOutlook,
        &NoDocument,
        None,
    )
    .unwrap()
    {
        WriteOutcome::Written(line) => line,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(line, "TITLE;CHARSET=UTF-8:Gérante");
    assert_eq!(title.parameter("CHARSET"), None);
}

#[test_log::test]
fn categories_json_entries_are_not_split() {
    let categories = read_json(r#"["categories", {}, "text", "a,b", "c"]"#);
    assert_eq!(text(categories.as_ref(), VCardVersion::V4_0), "CATEGORIES:a\\,b,c");
}

#[test_log::test]
fn hcard_value_rules() {
    let fn_ = read_html(
        r#"<div class="fn"><span class="value">Jane</span> (<span class="value">Doe</span>)</div>"#,
    );
    assert_eq!(text(fn_.as_ref(), VCardVersion::V3_0), "FN:JaneDoe");

    let note = read_html("<p class=\"note\">line one<br/>line two</p>");
    assert_eq!(text(note.as_ref(), VCardVersion::V3_0), "NOTE:line one\\nline two");
}
