// src/utils.rs

/// True when the text is empty once surrounding whitespace is removed
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Normalize the backend origin so endpoint paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
