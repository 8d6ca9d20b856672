use std::fs;

use crate::cli::{ConfigCommand, Result};

pub fn config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show { codec } => {
            let json = serde_json::to_string_pretty(&codec.resolve()?)?;
            println!("{json}");
        }
        ConfigCommand::Save { output, codec } => {
            let json = serde_json::to_string_pretty(&codec.resolve()?)?;
            fs::write(&output, json)?;
            if_tracing! {
                tracing::info!(output = %output.display(), "configuration saved");
            }
        }
    }
    Ok(())
}
