use std::fs;

use vitter::VitterCodec;

use crate::cli::{DecodeArgs, Result, read_bits};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let codec = VitterCodec::new(args.codec.resolve()?)?;
    let bits = read_bits(&args.input)?;
    let text = codec.decode(&bits)?;
    if_tracing! {
        tracing::info!(event = "decode_complete", input = %args.input.display(), output = %args.output.display(), bits = bits.len(), chars = text.chars().count(), "decode finished");
    }
    fs::write(&args.output, text)?;
    Ok(())
}
