//! Template system for vocabulary code generation

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;

use crate::error::Result;
use crate::vocabulary::{make_friendly, pascal_case};

/// Template engine for code generation
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Generated source, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        handlebars.register_helper("PascalCase", Box::new(pascal_case_helper));
        handlebars.register_helper("friendly", Box::new(friendly_helper));
        handlebars.register_helper("java_string", Box::new(java_string_helper));

        Self { handlebars }
    }

    /// Create an engine with every builtin template registered
    pub fn with_builtins() -> Result<Self> {
        let mut engine = Self::new();
        BuiltinTemplates::register_all(&mut engine)?;
        Ok(engine)
    }

    /// Register a template from string
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars.register_template_string(name, template)?;
        Ok(())
    }

    /// Render a registered template with the given data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String> {
        Ok(self.handlebars.render(template_name, data)?)
    }

    /// Render a template string directly
    pub fn render_template(&self, template: &str, data: &Value) -> Result<String> {
        Ok(self.handlebars.render_template(template, data)?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in template collection
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub const JAVA_VOCABULARY: &'static str = "java_vocabulary";

    /// Java class carrying one constant per vocabulary literal
    pub fn java_vocabulary() -> &'static str {
        r#"package {{package}}.vocabulary;

{{#each api_imports}}
import {{../api_namespace}}.{{this}};
{{/each}}
{{#each java_imports}}
import {{this}};
{{/each}}

{{documentation}}@Structure(name = "{{java_string name}}", codeSystem = "{{java_string content_oid}}", structureType = StructureType.{{structure_type}})
public class {{class_name}} implements {{api_namespace}}.interfaces.IEnumeratedVocabulary {

{{#each declarations}}
{{documentation}}	public static final {{../class_name}} {{identifier}} = new {{../class_name}}("{{java_string code}}", "{{java_string code_system}}");

{{/each}}
	public {{class_name}}(String code, String codeSystem) { this.m_code = code; this.m_codeSystem = codeSystem; }
	private final String m_code;
	private final String m_codeSystem;
	public String getCodeSystem() { return this.m_codeSystem; }
	public String getCode() { return this.m_code; }
}
"#
    }

    pub fn register_all(engine: &mut TemplateEngine) -> Result<()> {
        engine.register_template(Self::JAVA_VOCABULARY, Self::java_vocabulary())
    }
}

fn pascal_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&pascal_case(param).unwrap_or_default())?;
    Ok(())
}

fn friendly_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&make_friendly(param).unwrap_or_default())?;
    Ok(())
}

fn java_string_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&escape_java_string(param))?;
    Ok(())
}

fn escape_java_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
