use std::borrow::Cow;

pub use anyhow::Result;

/// Represents shared behavior for all text coders.
///
/// Provides a method [`compress_text`](Compressor::compress_text) to encode text into a bit string
/// and [`decompress_text`](Compressor::decompress_text) to turn such a bit string back into text.
///
/// # Note
///
/// The compressed form is a string of `'0'` and `'1'` characters, one per bit. Its length counts
/// bits, not bytes.
pub trait Compressor: 'static {
    /// Encodes `text` and returns the bit string.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` cannot be represented by the coder, e.g. it holds characters the
    /// coder does not know.
    fn compress_text(&mut self, text: &str) -> Result<String>;

    /// Decodes a bit string produced by [`compress_text`](Compressor::compress_text).
    ///
    /// # Errors
    ///
    /// Returns an error if `bits` is malformed or cut short.
    fn decompress_text(&mut self, bits: &str) -> Result<String>;

    /// What [`decompress_text`](Compressor::decompress_text) is expected to give back for `text`.
    ///
    /// Defaults to `text` itself. Coders that pad their input override this.
    fn expected_roundtrip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the encoder and decoder.
    fn test_roundtrip<'orig>(&mut self, text: &'orig str) -> Result<RoundTripTestResult<'orig>> {
        let compressed = <Self as Compressor>::compress_text(self, text)?;
        let decompressed = <Self as Compressor>::decompress_text(self, &compressed)?;
        let equal = self.expected_roundtrip(text) == decompressed.as_str();

        Ok(RoundTripTestResult {
            equal,
            original: text,
            compressed,
            decompressed,
        })
    }

    /// Returns the name of the compressor algorithm.
    /// Use for debugging purposes.
    ///
    /// Defaults to the type name of the compressor.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Converts the compressor into a boxed trait object.
    fn into_boxed(self) -> Box<dyn Compressor>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original text`][RoundTripTestResult::get_original],
/// the [`bit string`][RoundTripTestResult::get_compressed],
/// and the [`decoded text`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig str,
    pub(crate) compressed: String,
    pub(crate) decompressed: String,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the decoded text was what the coder promised to give back.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The text before any action was taken.
    pub const fn get_original(&self) -> &'orig str {
        self.original
    }

    /// The bit string produced by the encoder.
    pub fn get_compressed(&self) -> &str {
        self.compressed.as_str()
    }

    /// The text after it has been decoded by the decoder.
    pub fn get_decompressed(&self) -> &str {
        self.decompressed.as_str()
    }

    /// Average number of bits spent per character of the original text. `0.0` for empty text.
    pub fn bits_per_char(&self) -> f64 {
        let chars = self.original.chars().count();
        if chars == 0 {
            return 0.0;
        }
        self.compressed.len() as f64 / chars as f64
    }
}
