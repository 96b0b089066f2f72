//! Inline Markdown formatting
//!
//! Pure functions: each takes text and returns the formatted Markdown. Leading
//! and trailing whitespace is stripped from the visible text first.

/// `**text**`
pub fn bold(text: &str) -> String {
    format!("**{}**", text.trim())
}

/// `*text*`
pub fn italic(text: &str) -> String {
    format!("*{}*", text.trim())
}

/// `***text***`
pub fn bold_italic(text: &str) -> String {
    format!("***{}***", text.trim())
}

/// `[text](url)` or `[text](url "title")`
pub fn link(text: &str, url: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("[{}]({} \"{}\")", text.trim(), url.trim(), title),
        None => format!("[{}]({})", text.trim(), url.trim()),
    }
}

/// `![alt](uri)` or `![alt](uri "title")`
pub fn image(uri: &str, alt_text: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("![{}]({} \"{}\")", alt_text.trim(), uri.trim(), title),
        None => format!("![{}]({})", alt_text.trim(), uri.trim()),
    }
}

/// Code between single backticks, embedded backticks escaped
pub fn code(text: &str) -> String {
    format!("`{}`", escape_backticks(text.trim()))
}

/// Put a backslash before every backtick so the text cannot close a code span or fence
pub fn escape_backticks(text: &str) -> String {
    text.replace('`', "\\`")
}
