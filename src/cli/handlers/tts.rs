//! `newscast tts <text>`

use anyhow::Result;

use crate::cli::output::{output_json, print_kv, print_section, print_success, print_warning, OutputMode};
use crate::cli::progress::SpinnerProgress;
use crate::init::AppContext;

pub async fn handle_tts(ctx: &AppContext, text: &str, mode: OutputMode) -> Result<()> {
    let spinner = SpinnerProgress::start("Starting");
    let result = ctx.pipeline.speak_text(text, spinner.clone()).await;
    spinner.clear();
    let response = result?;

    match mode {
        OutputMode::Json => output_json(&response),
        OutputMode::Human => {
            let language = ctx.pipeline.target_language();
            print_section(&format!("Translated ({})", language.name()), &response.translated_text);
            println!();
            match &response.audio_file {
                Some(path) => {
                    print_success(&response.message);
                    print_kv("File", path);
                }
                None => print_warning(&response.message),
            }
        }
    }
    Ok(())
}
