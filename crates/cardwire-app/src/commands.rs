//! Command implementations, over any line-oriented input and output.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use cardwire_rfc::rfc::vcard::{
    CompatibilityMode, NoDocument, PropertyExt, PropertyRegistry, ReadOutcome, VCardVersion,
    WriteOutcome, read_html_property, read_json_property, read_text_property, read_xml_property,
    write_json_property, write_text_property, write_xml_property,
};

use crate::cli::{InputFormat, OutputFormat};

/// Settings for one `convert` run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub from: InputFormat,
    pub to: OutputFormat,
    pub version: VCardVersion,
    pub compat: CompatibilityMode,
    pub fold_width: Option<usize>,
}

/// Counts of what happened to each input line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub dropped: usize,
}

/// Converts each non-empty input line and writes one output line per
/// property. Dropped properties are logged and counted.
///
/// ## Errors
/// Returns an error on I/O failure, on a line that cannot be tokenized, or
/// when a property type does not support the input or output format.
pub fn convert(
    input: impl BufRead,
    output: &mut impl Write,
    options: &ConvertOptions,
) -> Result<Summary> {
    let registry = PropertyRegistry::standard();
    let mut summary = Summary::default();

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let outcome = read(line, options, &registry)
            .with_context(|| format!("line {}: cannot read property", number + 1))?;
        let ReadOutcome::Property { property, warnings } = outcome else {
            summary.dropped += 1;
            continue;
        };
        for warning in &warnings {
            tracing::warn!(line = number + 1, %warning, "Read warning");
        }

        let written = match options.to {
            OutputFormat::Text => write_text_property(
                property.as_ref(),
                options.version,
                options.compat,
                &NoDocument,
                options.fold_width,
            )?,
            OutputFormat::Xml => write_xml_property(property.as_ref(), options.compat, &NoDocument)?,
            OutputFormat::Json => {
                match write_json_property(property.as_ref(), options.version, &NoDocument)? {
                    WriteOutcome::Written(value) => WriteOutcome::Written(value.to_string()),
                    WriteOutcome::Skipped(reason) => WriteOutcome::Skipped(reason),
                    WriteOutcome::Embedded(document) => WriteOutcome::Embedded(document),
                }
            }
        };

        match written {
            WriteOutcome::Written(text) => {
                writeln!(output, "{text}")?;
                summary.written += 1;
            }
            WriteOutcome::Skipped(_) => summary.dropped += 1,
            WriteOutcome::Embedded(_) => {
                tracing::warn!(
                    line = number + 1,
                    type_name = property.type_name(),
                    "Embedded vCards are not converted"
                );
                summary.dropped += 1;
            }
        }
    }

    Ok(summary)
}

fn read(line: &str, options: &ConvertOptions, registry: &PropertyRegistry) -> Result<ReadOutcome> {
    Ok(match options.from {
        InputFormat::Text => read_text_property(line, options.version, options.compat, registry)?,
        InputFormat::Xml => read_xml_property(line, options.compat, registry)?,
        InputFormat::Json => read_json_property(line, options.version, registry)?,
        InputFormat::Html => read_html_property(line, None, registry)?,
    })
}

/// Validates each content line against `version` and prints
/// `NAME: warning` for every warning. Returns the number of warnings.
///
/// ## Errors
/// Returns an error on I/O failure or on a line that cannot be tokenized.
pub fn validate(
    input: impl BufRead,
    output: &mut impl Write,
    version: VCardVersion,
) -> Result<usize> {
    let registry = PropertyRegistry::standard();
    let mut count = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let outcome = read_text_property(line, version, CompatibilityMode::Rfc, &registry)
            .with_context(|| format!("line {}: cannot read property", number + 1))?;
        match outcome {
            ReadOutcome::Property { property, warnings } => {
                for warning in warnings {
                    writeln!(output, "{}: {warning}", property.type_name())?;
                    count += 1;
                }
                for warning in property.validate(version, &NoDocument) {
                    writeln!(output, "{}: {warning}", property.type_name())?;
                    count += 1;
                }
            }
            ReadOutcome::Skipped { type_name, reason }
            | ReadOutcome::Failed { type_name, reason } => {
                writeln!(output, "{type_name}: {reason}")?;
                count += 1;
            }
            ReadOutcome::Embedded { property, .. } => {
                for warning in property.validate(version, &NoDocument) {
                    writeln!(output, "{}: {warning}", property.type_name())?;
                    count += 1;
                }
            }
        }
    }

    Ok(count)
}
