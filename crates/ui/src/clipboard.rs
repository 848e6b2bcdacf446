//! Webview clipboard access for the copy action.

use dioxus::document::eval;

/// Marker returned by the copy script when the async clipboard API worked.
const COPIED_VIA_CLIPBOARD: &str = "clipboard";
/// Marker returned when the off-screen textarea fallback did the copy.
const COPIED_VIA_FALLBACK: &str = "fallback";

/// Copies `text` to the system clipboard.
///
/// Tries `navigator.clipboard.writeText` first; when that capability is
/// absent or denies the write, falls back to a transient off-screen textarea
/// plus `document.execCommand("copy")`. Returns `true` when either mechanism
/// reports success. A total failure is the caller's to log; nothing here
/// escalates.
pub async fn copy_text(text: &str) -> bool {
    let script = copy_text_script(text);
    match eval(&script).join::<String>().await {
        Ok(marker) => copy_succeeded(&marker),
        Err(_) => false,
    }
}

fn copy_succeeded(marker: &str) -> bool {
    marker == COPIED_VIA_CLIPBOARD || marker == COPIED_VIA_FALLBACK
}

fn copy_text_script(text: &str) -> String {
    let text_literal = js_string_literal(text);
    format!(
        r#"
        const text = {text_literal};
        try {{
            if (navigator.clipboard && navigator.clipboard.writeText) {{
                await navigator.clipboard.writeText(text);
                return "{COPIED_VIA_CLIPBOARD}";
            }}
        }} catch (_) {{}}
        try {{
            const textArea = document.createElement("textarea");
            textArea.value = text;
            textArea.style.position = "fixed";
            textArea.style.left = "-999999px";
            textArea.style.top = "-999999px";
            document.body.appendChild(textArea);
            textArea.focus();
            textArea.select();
            const copied = document.execCommand("copy");
            document.body.removeChild(textArea);
            if (copied) {{
                return "{COPIED_VIA_FALLBACK}";
            }}
        }} catch (_) {{}}
        return "";
        "#
    )
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
