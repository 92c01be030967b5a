#![allow(dead_code, clippy::expect_used)]
//! Test helpers for integration tests.
//!
//! Reading helpers panic on anything but a successfully read property, so
//! tests can focus on the value that comes back.

use cardwire_test::app::cli::{InputFormat, OutputFormat};
use cardwire_test::app::commands::{ConvertOptions, Summary, convert};
use cardwire_test::rfc::rfc::vcard::{
    CompatibilityMode, Property, PropertyRegistry, ReadOutcome, VCardVersion,
    read_html_property, read_json_property, read_text_property, read_xml_property,
};

pub fn registry() -> PropertyRegistry {
    PropertyRegistry::standard()
}

fn expect_property(outcome: ReadOutcome) -> Box<dyn Property> {
    match outcome {
        ReadOutcome::Property { property, .. } => property,
        other => panic!("expected a property, got {other:?}"),
    }
}

pub fn read_text(line: &str, version: VCardVersion) -> Box<dyn Property> {
    expect_property(
        read_text_property(line, version, CompatibilityMode::Rfc, &registry())
            .expect("content line should read"),
    )
}

pub fn read_xml(xml: &str) -> Box<dyn Property> {
    expect_property(
        read_xml_property(xml, CompatibilityMode::Rfc, &registry()).expect("xCard should read"),
    )
}

pub fn read_json(json: &str) -> Box<dyn Property> {
    expect_property(
        read_json_property(json, VCardVersion::V4_0, &registry()).expect("jCard should read"),
    )
}

pub fn read_html(html: &str) -> Box<dyn Property> {
    expect_property(read_html_property(html, None, &registry()).expect("hCard should read"))
}

/// Runs `convert` over `input` and returns its output and summary.
pub fn run_convert(
    input: &str,
    from: InputFormat,
    to: OutputFormat,
    version: VCardVersion,
    compat: CompatibilityMode,
) -> anyhow::Result<(String, Summary)> {
    let options = ConvertOptions {
        from,
        to,
        version,
        compat,
        fold_width: Some(75),
    };
    let mut output = Vec::new();
    let summary = convert(input.as_bytes(), &mut output, &options)?;
    Ok((String::from_utf8(output)?, summary))
}
