use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::ReportData;

/// Plain-text report used when no custom template is configured.
pub const DEFAULT_TEMPLATE: &str = r#"{{ model_name }}
Generated: {{ generated_at }}
{% if doctor_name %}Physician: {{ doctor_name }}
{% endif %}
Input values
{% for input in inputs %}- {{ input.label }}: {{ input.value }}
{% endfor %}
Formula: {{ formula }}
{% for param in params %}  {{ param }}
{% endfor %}
Z = {{ z | round(precision=3) }}
P = {{ probability | round(precision=3) }} ({{ probability_percent }}%)

Conclusion: {{ conclusion }}
Risk tier: {{ tier }}
{% if recommendations %}
Recommendations
{% for item in recommendations %}- {{ item }}
{% endfor %}{% endif %}"#;

/// Render a Tera template with a [`ReportData`].
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The report fields become the template context variables.
pub fn render_report(
    template_name: &str,
    template_content: &str,
    report: &ReportData,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

pub fn render_default(report: &ReportData) -> Result<String, ExportError> {
    render_report("report.txt", DEFAULT_TEMPLATE, report)
}
