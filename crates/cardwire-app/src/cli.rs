use cardwire_rfc::rfc::vcard::{CompatibilityMode, VCardVersion};
use clap::{Parser, Subcommand, ValueEnum};

/// Convert and validate vCard properties, one per input line.
#[derive(Debug, Parser)]
#[command(name = "cardwire")]
#[command(about = "Convert and validate vCard properties", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read properties from stdin and write them in another format
    Convert {
        /// Input format
        #[arg(long, value_enum)]
        from: InputFormat,
        /// Output format
        #[arg(long, value_enum)]
        to: OutputFormat,
        /// vCard version (defaults to `output.version`)
        #[arg(long)]
        version: Option<VCardVersion>,
        /// Compatibility mode (defaults to `output.compatibility`)
        #[arg(long)]
        compat: Option<CompatibilityMode>,
    },
    /// Read content lines from stdin and print their validation warnings
    Validate {
        /// vCard version to validate against
        #[arg(long)]
        version: Option<VCardVersion>,
    },
}

/// A wire format properties can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Content line
    Text,
    /// xCard element
    Xml,
    /// jCard array
    Json,
    /// hCard element
    Html,
}

/// A wire format properties can be written to. hCard is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Content line
    Text,
    /// xCard element
    Xml,
    /// jCard array
    Json,
}
