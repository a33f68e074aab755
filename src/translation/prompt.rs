pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a professional translator. \
     Translate the given word from {source_language} to {target_language}.";

pub const CONTEXT_CLAUSE_TEMPLATE: &str = " Important: Consider this specific context: \"{context}\". \
     The translation should be appropriate for this context.";

pub const REPLY_CONSTRAINT: &str = " Respond with just the translated word, nothing else.";

/// Builds the system instruction for a single word.
///
/// The context clause is only added when `context` has non-whitespace content,
/// and the context is quoted exactly as given.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(source_language: &str, target_language: &str, context: &str) -> String {
    // {..} are placeholders for string replacement, not format arguments
    let mut prompt = SYSTEM_PROMPT_TEMPLATE
        .replace("{source_language}", source_language)
        .replace("{target_language}", target_language);

    if !context.trim().is_empty() {
        prompt.push_str(&CONTEXT_CLAUSE_TEMPLATE.replace("{context}", context));
    }

    prompt.push_str(REPLY_CONSTRAINT);
    prompt
}
