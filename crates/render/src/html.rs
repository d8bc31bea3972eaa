use pulldown_cmark::{html, Options, Parser};

const TEMPLATE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Converted Document</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 40px auto;
            padding: 0 20px;
            color: #333;
        }
        h1, h2, h3 { color: #2c3e50; }
        code {
            background: #f4f4f4;
            padding: 2px 6px;
            border-radius: 3px;
        }
        pre {
            background: #f4f4f4;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
        }
        table { border-collapse: collapse; }
        th, td { border: 1px solid #ddd; padding: 6px 10px; }
    </style>
</head>
<body>
"#;

const TEMPLATE_TAIL: &str = "</body>\n</html>\n";

/// Text that is already a full HTML document is passed through untouched
pub fn is_html_document(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("<html>") || lower.contains("<body>")
}

/// Markdown to a standalone HTML page
pub fn to_html(text: &str) -> String {
    if is_html_document(text) {
        return text.to_string();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut body = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut body, Parser::new_ext(text, options));

    let mut page = String::with_capacity(TEMPLATE_HEAD.len() + body.len() + TEMPLATE_TAIL.len());
    page.push_str(TEMPLATE_HEAD);
    page.push_str(&body);
    page.push_str(TEMPLATE_TAIL);
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_wrapped_in_template() {
        let page = to_html("# Heading\n\nSome *emphasis*.");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h1>Heading</h1>"));
        assert!(page.contains("<em>emphasis</em>"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_tables_enabled() {
        let page = to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(page.contains("<table>"));
    }

    #[test]
    fn test_existing_document_passthrough() {
        let doc = "<HTML><BODY><p>hi</p></BODY></HTML>";
        assert_eq!(to_html(doc), doc);
    }
}
