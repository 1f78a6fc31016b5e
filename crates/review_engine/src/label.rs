use rand::Rng;

const FALLBACK_LABEL: &str = "user";

/// Restricts a rater label to `[A-Za-z0-9_-]`, replacing anything else with `_`.
/// Falls back to `user` when nothing usable remains.
pub fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        cleaned
    }
}

/// Label for raters who do not give a name: `session-` plus 8 hex digits.
pub fn generate_session_label<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("session-{:08x}", rng.gen::<u32>())
}
