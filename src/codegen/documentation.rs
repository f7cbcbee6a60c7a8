use crate::model::Documentation;

/// Renders documentation blocks as doc comments.
pub struct DocumentationRenderer;

impl DocumentationRenderer {
    /// Render `documentation` as a `/** ... */` block indented by `depth`
    /// tabs. Returns an empty string when there is nothing to say.
    pub fn render(documentation: &Documentation, depth: usize) -> String {
        if documentation.is_empty() {
            return String::new();
        }

        let indent = "\t".repeat(depth);
        let mut out = format!("{indent}/**\n");

        for line in documentation.description.iter().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("{indent} * {}\n", sanitize(line)));
        }

        let rationale: Vec<_> = documentation
            .rationale
            .iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
        if !rationale.is_empty() {
            out.push_str(&format!("{indent} * <p>Rationale:</p>\n"));
            for line in rationale {
                out.push_str(&format!("{indent} * {}\n", sanitize(line)));
            }
        }

        out.push_str(&format!("{indent} */\n"));
        out
    }

    /// One-line doc comment for a literal without documentation.
    pub fn render_label(label: &str, depth: usize) -> String {
        let escaped = label
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace(['\r', '\n'], "");
        format!("{}/** {} */\n", "\t".repeat(depth), escaped)
    }
}

fn sanitize(line: &str) -> String {
    line.replace("*/", "*&#47;").replace(['\r', '\n'], " ")
}
