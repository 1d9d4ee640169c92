/*!
 * Prompt construction for translation requests.
 *
 * The combined prompt asks for one translation per line in a fixed numbered
 * order; the numbering is what the orchestrator's parser strips back off.
 * The single-target prompt restates the target twice because smaller models
 * otherwise tend to echo the source language.
 */

use crate::clients::{ClientRequest, Targets};
use crate::lang::Language;

/// Build the model prompt for a client request
pub fn build_prompt(request: &ClientRequest) -> String {
    match request.targets {
        Targets::Pair(targets) => combined_prompt(&request.text, request.source, targets),
        Targets::Single(target) => single_prompt(&request.text, request.source, target),
    }
}

/// One request asking for both target translations, one per line
fn combined_prompt(text: &str, source: Language, targets: [Language; 2]) -> String {
    format!(
        "You are a professional translator. Translate the following text from {} into {} and {}.\n\
         \n\
         IMPORTANT: Provide ONLY the translations, one per line, in this exact order:\n\
         1. {} translation\n\
         2. {} translation\n\
         \n\
         Do not include any explanations, labels, or additional text.\n\
         \n\
         Text to translate: \"{}\"\n\
         \n\
         Translations:",
        source.display_name(),
        targets[0].display_name(),
        targets[1].display_name(),
        targets[0].display_name(),
        targets[1].display_name(),
        text
    )
}

/// One request for a single target language
fn single_prompt(text: &str, source: Language, target: Language) -> String {
    format!(
        "You are a professional translator. Translate this text from {} into {}.\n\
         \n\
         IMPORTANT: You must translate the text into {}. Do not keep it in {}.\n\
         \n\
         Source language: {}\n\
         Target language: {}\n\
         Text to translate: \"{}\"\n\
         \n\
         Translation in {}:",
        source.display_name(),
        target.display_name(),
        target.display_name(),
        source.display_name(),
        source.display_name(),
        target.display_name(),
        text,
        target.display_name()
    )
}
