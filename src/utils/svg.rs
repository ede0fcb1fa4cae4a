/// Escape text for use inside SVG markup
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Small red graphic served in place of a chart when the pipeline fails
pub fn error_svg(message: &str) -> String {
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="400" height="100">
  <rect width="400" height="100" fill="#e74c3c"/>
  <text x="200" y="50" fill="#ffffff" font-size="16" text-anchor="middle">Error loading graph</text>
  <text x="200" y="70" fill="#ffffff" font-size="12" text-anchor="middle">{}</text>
</svg>"##,
        escape_xml(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_error_svg_contains_escaped_message() {
        let svg = error_svg("<script>");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("Error loading graph"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
    }
}
