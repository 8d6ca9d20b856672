use std::fs;

use vitter::VitterCodec;

use crate::cli::{EncodeArgs, Result, read_text};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let codec = VitterCodec::new(args.codec.resolve()?)?;
    let text = read_text(&args.input)?;
    let bits = codec.encode(&text)?;
    if_tracing! {
        tracing::info!(event = "encode_complete", input = %args.input.display(), output = %args.output.display(), chars = text.chars().count(), bits = bits.len(), "encode finished");
    }
    fs::write(&args.output, bits)?;
    Ok(())
}
