//! # vitter
//!
//! One-pass adaptive Huffman coding after Vitter (1987).
//!
//! Encoder and decoder each grow the same code tree as symbols go by, so no frequency table is ever
//! transmitted. The first occurrence of a symbol is sent as the path to the not-yet-transmitted (NYT)
//! leaf followed by a phased binary code for the symbol's rank in the alphabet; later occurrences are
//! sent as the path to the symbol's own leaf.
//!
//! The coded stream is text made of the characters `'0'` and `'1'`. It is not packed into bytes.
//!
//! ```
//! use vitter::{AdaptiveTree, CodecConfig};
//!
//! let config = CodecConfig::default();
//! let bits = AdaptiveTree::with_config(&config)?.encode("Hello World!")?;
//! let text = AdaptiveTree::with_config(&config)?.decode(&bits)?;
//! assert_eq!(text, "Hello World!");
//! # Ok::<(), vitter::CodingError>(())
//! ```

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

pub mod alphabet;
pub mod bits;
pub mod codec;
pub mod compressor;
pub mod config;
pub mod error;
pub mod phased;
pub mod tree;


pub use alphabet::Alphabet;
pub use bits::{BitReader, push_bits};
pub use codec::VitterCodec;
pub use compressor::{Compressor, RoundTripTestResult};
pub use config::CodecConfig;
pub use error::{CodingError, SequenceFault};
pub use phased::PhasedCode;
pub use tree::AdaptiveTree;
pub use tree::node::{Node, NodeId};
