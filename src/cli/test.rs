use serde::Serialize;
use vitter::VitterCodec;
use voxell_timer::time_fn;

use crate::cli::{CliError, Result, TestArgs, read_text};

/// Outcome of an in-memory round trip.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoundTripReport {
    pub input: String,
    pub passed: bool,
    pub group_size: usize,
    pub chars: usize,
    pub symbols: u64,
    pub distinct_symbols: usize,
    pub bits: usize,
    pub bits_per_char: f64,
    /// bits spent against 8 bits per character
    pub ratio: f64,
    pub encode_us: u128,
    pub decode_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_mismatch: Option<usize>,
}

pub fn test(args: TestArgs) -> Result<()> {
    let codec = VitterCodec::new(args.codec.resolve()?)?;
    let text = read_text(&args.input)?;
    let report = run_roundtrip(&codec, &args.input.display().to_string(), &text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    match report.first_mismatch {
        Some(position) => Err(CliError::Mismatch { position }),
        None => Ok(()),
    }
}

pub fn run_roundtrip(codec: &VitterCodec, input: &str, text: &str) -> Result<RoundTripReport> {
    let mut encoder = codec.session()?;
    let (bits, encode_time) = time_fn(|| encoder.encode(text));
    let bits = bits?;
    let (decoded, decode_time) = time_fn(|| codec.decode(&bits));
    let decoded = decoded?;

    let first_mismatch = first_difference(&codec.padded(text), &decoded);
    let chars = text.chars().count();
    let (bits_per_char, ratio) = if chars == 0 {
        (0.0, 0.0)
    } else {
        let bits_per_char = bits.len() as f64 / chars as f64;
        (bits_per_char, bits_per_char / 8.0)
    };

    Ok(RoundTripReport {
        input: input.to_string(),
        passed: first_mismatch.is_none(),
        group_size: codec.config().group_size,
        chars,
        symbols: encoder.total_weight(),
        distinct_symbols: encoder.symbol_count(),
        bits: bits.len(),
        bits_per_char,
        ratio,
        encode_us: encode_time.as_micros(),
        decode_us: decode_time.as_micros(),
        first_mismatch,
    })
}

fn first_difference(expected: &str, got: &str) -> Option<usize> {
    if expected == got {
        return None;
    }
    Some(expected.chars().zip(got.chars()).take_while(|(a, b)| a == b).count())
}

fn print_report(report: &RoundTripReport) {
    eprintln!(
        "======== {} {} ========\n\t{}us encode\n\t{}us decode\n\tgroup size: {}\n\toriginal: {} chars\n\tsymbols: {} ({} distinct)\n\tencoded: {} bits\n\t{:.3} bits per char\n\tratio: {:.1}% (encoded/8-bit text)",
        if report.passed { "PASSED" } else { "FAILED" },
        report.input,
        report.encode_us,
        report.decode_us,
        report.group_size,
        report.chars,
        report.symbols,
        report.distinct_symbols,
        report.bits,
        report.bits_per_char,
        report.ratio * 100.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitter::CodecConfig;

    #[test]
    fn reports_symbol_statistics() {
        let codec = VitterCodec::default();
        let report = run_roundtrip(&codec, "inline", "aa bbb c").unwrap();
        assert!(report.passed);
        assert_eq!(report.chars, 8);
        assert_eq!(report.symbols, 8);
        assert_eq!(report.distinct_symbols, 4);
        assert_eq!(report.bits, codec.encode("aa bbb c").unwrap().len());
        assert_eq!(report.bits_per_char, report.bits as f64 / 8.0);
    }

    #[test]
    fn padded_groups_still_pass() {
        let codec = VitterCodec::new(CodecConfig::default().with_group_size(3)).unwrap();
        let report = run_roundtrip(&codec, "inline", "Hello").unwrap();
        assert!(report.passed);
        assert_eq!(report.symbols, 2);
    }

    #[test]
    fn foreign_characters_fail_the_run() {
        let err = run_roundtrip(&VitterCodec::default(), "inline", "caf\u{e9}").unwrap_err();
        assert!(err.user_message().contains("'\u{e9}'"));
    }

    #[test]
    fn json_report_skips_absent_mismatch() {
        let report = run_roundtrip(&VitterCodec::default(), "inline", "").unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""passed":true"#));
        assert!(!json.contains("first_mismatch"));
        assert_eq!(report.ratio, 0.0);
    }

    #[test]
    fn finds_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("abc", "ab"), Some(2));
    }
}
