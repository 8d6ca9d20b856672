//! cli component of the vitter coder.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable name,
//! `<description>` denotes a required argument and `[description]` an optional one.
//!
//! # Encoding
//!
//! > `$exename enc <input text file> [output path]`
//!
//! the input is read line by line and the lines are joined with `'\n'`, so a trailing newline and
//! carriage returns before line breaks do not take part in coding. the output is a single line of
//! `'0'` and `'1'` characters. the output path defaults to `output.txt`.
//!
//! # Decoding
//!
//! > `$exename dec <input bit file> [output path]`
//!
//! only the first line of the input is decoded. the output path defaults to `output.txt`.
//!
//! # Testing
//!
//! > `$exename test <input text file> [--json]`
//!
//! encodes and decodes the input in memory and reports sizes, bits per character and timings.
//!
//! # Configuration
//!
//! > `$exename config show`
//! > `$exename config save <output path>`
//!
//! every command takes the same codec flags: `--group-size`, `--alphabet-start`, `--alphabet-chars`,
//! `--pad` and `--config <json file>`. flags win over the file, the file wins over the defaults.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vitter::{CodecConfig, CodingError};

pub mod config;
pub mod decode;
pub mod encode;
pub mod test;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Coding(#[from] CodingError),

    #[error("round trip mismatch at character {position}")]
    Mismatch { position: usize },
}

impl CliError {
    /// One line for the person at the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) if err.kind() == io::ErrorKind::NotFound => format!("File not found: {err}"),
            Self::Io(err) => format!("Could not read or write a file: {err}"),
            Self::Json(err) => format!("Invalid configuration file: {err}"),
            Self::Coding(CodingError::SymbolOutOfAlphabet { symbol }) => {
                format!("Invalid input: the text contains {symbol:?}, which the configured alphabet does not cover")
            }
            Self::Coding(err @ CodingError::InvalidSequence { .. }) => {
                format!("Invalid input: this is not a bit string produced with the same settings ({err})")
            }
            Self::Coding(err @ CodingError::InvalidConfiguration(_)) => format!("Invalid settings: {err}"),
            Self::Coding(err) => format!("Coding failed: {err}"),
            Self::Mismatch { position } => {
                format!("Round trip failed: decoded text differs from the input at character {position}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for the vitter application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for vitter
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a text file into a bit string
    #[command(aliases = ["enc", "e"])]
    Encode(EncodeArgs),

    /// Decode a bit string back into text
    #[command(aliases = ["dec", "d"])]
    Decode(DecodeArgs),

    /// Test the encode/decode round trip on a text file
    Test(TestArgs),

    /// Show or store codec settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Codec settings shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// Number of characters coded together as one symbol
    #[arg(long, short = 'g')]
    pub group_size: Option<usize>,

    /// First alphabet character, given as itself, as a code point (`9`, `0x09`) or as `\t`, `\n`, `\r`
    #[arg(long, value_parser = parse_char_code)]
    pub alphabet_start: Option<char>,

    /// Number of contiguous characters in the alphabet
    #[arg(long)]
    pub alphabet_chars: Option<u32>,

    /// Character that fills up the last symbol group, same notation as --alphabet-start
    #[arg(long, value_parser = parse_char_code)]
    pub pad: Option<char>,

    /// Load settings from a JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CodecArgs {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => CodecConfig::default(),
        };

        if let Some(group_size) = self.group_size {
            config.group_size = group_size;
        }
        if let Some(alphabet_start) = self.alphabet_start {
            config.alphabet_start = alphabet_start;
        }
        if let Some(alphabet_chars) = self.alphabet_chars {
            config.alphabet_chars = alphabet_chars;
        }
        if let Some(pad) = self.pad {
            config.pad = pad;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Path for the bit string
    #[arg(default_value = "output.txt")]
    pub output: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the bit string file
    pub input: PathBuf,

    /// Path for the decoded text
    #[arg(default_value = "output.txt")]
    pub output: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the input text file
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings as JSON
    Show {
        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Save the effective settings to a JSON file
    Save {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

/// Parses a character given literally, by code point, or as a common escape.
pub fn parse_char_code(value: &str) -> std::result::Result<char, String> {
    match value {
        "\\t" => return Ok('\t'),
        "\\n" => return Ok('\n'),
        "\\r" => return Ok('\r'),
        _ => {}
    }

    let mut chars = value.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if !c.is_ascii_digit() {
            return Ok(c);
        }
    }

    let code = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| format!("`{value}` is neither a single character nor a code point"))?;
    char::from_u32(code).ok_or_else(|| format!("{code:#x} is not a valid character"))
}

/// Lines joined by `'\n'`, without a trailing newline.
pub fn normalize_text(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join("\n")
}

pub fn read_text(path: &Path) -> Result<String> {
    Ok(normalize_text(&fs::read_to_string(path)?))
}

/// The first line of the file; an empty file is an empty bit string.
pub fn read_bits(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    Ok(raw.lines().next().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vitter-cli-{}-{name}", std::process::id()))
    }

    #[test]
    fn parses_character_notations() {
        assert_eq!(parse_char_code("a"), Ok('a'));
        assert_eq!(parse_char_code("9"), Ok('\t'));
        assert_eq!(parse_char_code("0x09"), Ok('\t'));
        assert_eq!(parse_char_code("0X7d"), Ok('}'));
        assert_eq!(parse_char_code("\\n"), Ok('\n'));
        assert_eq!(parse_char_code("32"), Ok(' '));
        assert!(parse_char_code("ab").is_err());
        assert!(parse_char_code("0xD800").is_err());
        assert!(parse_char_code("").is_err());
    }

    #[test]
    fn encode_aliases_and_default_output() {
        for alias in ["encode", "enc", "e"] {
            let Command::Encode(args) = parse(&["vitter", alias, "in.txt"]).command else {
                panic!("{alias} did not parse as encode");
            };
            assert_eq!(args.input, PathBuf::from("in.txt"));
            assert_eq!(args.output, PathBuf::from("output.txt"));
        }
    }

    #[test]
    fn decode_takes_codec_flags() {
        let Command::Decode(args) = parse(&["vitter", "d", "bits.txt", "out.txt", "-g", "2", "--pad", "32"]).command else {
            panic!("expected decode");
        };
        assert_eq!(args.output, PathBuf::from("out.txt"));
        let config = args.codec.resolve().unwrap();
        assert_eq!(config.group_size, 2);
        assert_eq!(config.pad, ' ');
    }

    #[test]
    fn flags_override_config_file() {
        let path = temp_path("override.json");
        fs::write(&path, r#"{ "group_size": 3, "alphabet_start": "a", "alphabet_chars": 26, "pad": "x" }"#).unwrap();

        let from_file = CodecArgs { config: Some(path.clone()), ..CodecArgs::default() };
        let config = from_file.resolve().unwrap();
        assert_eq!((config.group_size, config.alphabet_start, config.pad), (3, 'a', 'x'));

        let overridden = CodecArgs {
            group_size: Some(1),
            pad: Some('z'),
            config: Some(path.clone()),
            ..CodecArgs::default()
        };
        let config = overridden.resolve().unwrap();
        assert_eq!((config.group_size, config.alphabet_chars, config.pad), (1, 26, 'z'));

        fs::remove_file(path).ok();
    }

    #[test]
    fn invalid_settings_are_reported() {
        let args = CodecArgs { group_size: Some(0), ..CodecArgs::default() };
        let err = args.resolve().unwrap_err();
        assert!(err.user_message().starts_with("Invalid settings"));

        let missing = CodecArgs { config: Some(temp_path("missing.json")), ..CodecArgs::default() };
        assert!(missing.resolve().unwrap_err().user_message().starts_with("File not found"));
    }

    #[test]
    fn text_is_normalized_like_a_line_reader() {
        assert_eq!(normalize_text("ab\r\ncd\n"), "ab\ncd");
        assert_eq!(normalize_text("ab\n\n"), "ab\n");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn reads_the_first_line_of_bits() {
        let path = temp_path("bits.txt");
        fs::write(&path, "0101\n1111\n").unwrap();
        assert_eq!(read_bits(&path).unwrap(), "0101");
        fs::write(&path, "").unwrap();
        assert_eq!(read_bits(&path).unwrap(), "");
        fs::remove_file(path).ok();
    }
}
