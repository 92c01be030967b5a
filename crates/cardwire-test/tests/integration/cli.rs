//! The `convert` and `validate` commands over multi-line input.

use cardwire_test::app::cli::{InputFormat, OutputFormat};
use cardwire_test::app::commands::{Summary, validate};
use cardwire_test::rfc::rfc::vcard::{CompatibilityMode, VCardVersion};

use super::helpers::run_convert;

const CARD_LINES: &str = "FN:Jane Doe\r\n\
    GENDER:F\r\n\
    CATEGORIES:friends,work\r\n\
    X-SHOE-SIZE:9\r\n";

#[test_log::test]
fn text_to_xml_and_back() {
    let (xml, summary) = run_convert(
        CARD_LINES,
        InputFormat::Text,
        OutputFormat::Xml,
        VCardVersion::V4_0,
        CompatibilityMode::Rfc,
    )
    .unwrap();
    assert_eq!(summary, Summary { written: 4, dropped: 0 });
    assert!(xml.contains("<fn xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\"><text>Jane Doe</text></fn>"));
    assert!(xml.contains("<unknown>9</unknown>"));

    // The raw extension property cannot be read back from xCard.
    let err = run_convert(
        &xml,
        InputFormat::Xml,
        OutputFormat::Text,
        VCardVersion::V4_0,
        CompatibilityMode::Rfc,
    )
    .unwrap_err();
    assert!(err.chain().any(|e| e.to_string().contains("does not support xCard parsing")));

    let known: String = xml
        .lines()
        .filter(|l| !l.contains("x-shoe-size"))
        .map(|l| format!("{l}\n"))
        .collect();
    let (text, summary) = run_convert(
        &known,
        InputFormat::Xml,
        OutputFormat::Text,
        VCardVersion::V4_0,
        CompatibilityMode::Rfc,
    )
    .unwrap();
    assert_eq!(summary.written, 3);
    assert_eq!(text, "FN:Jane Doe\nGENDER:F\nCATEGORIES:friends,work\n");
}

#[test_log::test]
fn embedded_agents_are_dropped() {
    let (output, summary) = run_convert(
        "AGENT:BEGIN:VCARD\\nEND:VCARD\nAGENT;VALUE=uri:http://example.com/a.vcf\n",
        InputFormat::Text,
        OutputFormat::Text,
        VCardVersion::V3_0,
        CompatibilityMode::Rfc,
    )
    .unwrap();
    assert_eq!(summary, Summary { written: 1, dropped: 1 });
    assert_eq!(output, "AGENT;VALUE=uri:http://example.com/a.vcf\n");
}

#[test_log::test]
fn validate_against_older_version() {
    let mut output = Vec::new();
    let count = validate(CARD_LINES.as_bytes(), &mut output, VCardVersion::V3_0).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        output,
        "GENDER: Property is not supported by version 3.0.  Supported versions are: [4.0]\n"
    );
}

#[test_log::test]
fn untokenizable_line_names_its_number() {
    let err = run_convert(
        "FN:ok\nnot a content line\n",
        InputFormat::Text,
        OutputFormat::Text,
        VCardVersion::V4_0,
        CompatibilityMode::Rfc,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("line 2"));
}
