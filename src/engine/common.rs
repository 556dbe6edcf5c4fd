//! Redaction helpers shared by the engine, errors and audit log

/// Token that replaces a redacted value in generated scripts
pub const REDACTION_PLACEHOLDER: &str = "[REDACTED]";

/// Number of leading characters kept in a preview
const PREVIEW_PREFIX_CHARS: usize = 3;

/// Values at or below this length are fully masked in previews
const PREVIEW_MIN_CHARS: usize = 8;

/// Build a redacted preview of a value for errors and logs.
///
/// Keeps at most a short prefix and the character count; the full value
/// never appears.
pub fn redacted_preview(value: &str) -> String {
    let len = value.chars().count();
    if len <= PREVIEW_MIN_CHARS {
        return format!("*** ({} chars)", len);
    }
    let prefix: String = value.chars().take(PREVIEW_PREFIX_CHARS).collect();
    format!("{}*** ({} chars)", prefix, len)
}
