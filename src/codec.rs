use std::borrow::Cow;

use crate::compressor::{Compressor, Result};
use crate::config::CodecConfig;
use crate::error::CodingError;
use crate::tree::AdaptiveTree;

if_tracing! {
    use tracing::{debug, info, warn};
    use voxell_timer::time_fn;
}

/// Whole-text encoder and decoder. Every call runs a fresh session on a fresh tree, so one codec
/// value can serve any number of independent texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitterCodec {
    config: CodecConfig,
}

impl VitterCodec {
    pub fn new(config: CodecConfig) -> Result<Self, CodingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// A new tree for one encoding or decoding session.
    pub fn session(&self) -> Result<AdaptiveTree, CodingError> {
        AdaptiveTree::with_config(&self.config)
    }

    /// `text` with its last group filled up with the pad character, which is what decoding the
    /// encoded `text` gives back.
    pub fn padded(&self, text: &str) -> String {
        let group_size = self.config.group_size.max(1);
        let short = text.chars().count() % group_size;
        let mut padded = text.to_string();
        if short != 0 {
            padded.extend(core::iter::repeat_n(self.config.pad, group_size - short));
        }
        padded
    }

    pub fn encode(&self, text: &str) -> Result<String, CodingError> {
        let result;
        if_tracing! {{
            debug!(input_len = text.len(), group_size = self.config.group_size, "encode start");
            let (outcome, elapsed) = time_fn(|| self.session()?.encode(text));
            match &outcome {
                Ok(bits) => info!(input_len = text.len(), output_bits = bits.len(), elapsed_us = elapsed.as_micros(), "encode finished"),
                Err(err) => warn!(%err, "encode failed"),
            }
            result = outcome;
        }}
        if_not_tracing! {{
            result = self.session()?.encode(text);
        }}
        result
    }

    pub fn decode(&self, bits: &str) -> Result<String, CodingError> {
        let result;
        if_tracing! {{
            debug!(input_bits = bits.len(), group_size = self.config.group_size, "decode start");
            let (outcome, elapsed) = time_fn(|| self.session()?.decode(bits));
            match &outcome {
                Ok(text) => info!(input_bits = bits.len(), output_len = text.len(), elapsed_us = elapsed.as_micros(), "decode finished"),
                Err(err) => warn!(%err, "decode failed"),
            }
            result = outcome;
        }}
        if_not_tracing! {{
            result = self.session()?.decode(bits);
        }}
        result
    }
}

impl Compressor for VitterCodec {
    fn compress_text(&mut self, text: &str) -> Result<String> {
        Ok(self.encode(text)?)
    }

    fn decompress_text(&mut self, bits: &str) -> Result<String> {
        Ok(self.decode(bits)?)
    }

    fn expected_roundtrip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.group_size <= 1 {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(self.padded(text))
        }
    }

    fn compressor_name(&self) -> String {
        format!("vitter (group size {})", self.config.group_size)
    }
}
