// src/suggest/prompt.rs
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

use crate::models::SuggestionRequest;

const TEMPLATE_NAME: &str = "suggest_password";

const SUGGEST_PASSWORD_TEMPLATE: &str = "\
You are a password expert who suggests strong and memorable passwords based on user preferences.

Generate a password based on the following criteria:
- Length: {{{length}}} characters
- Complexity: {{{complexity}}}
{{#if keywords}}
- Keywords: {{{keywords}}}
{{/if}}

The password should be strong and difficult to guess, but also relatively easy to remember.
Also, provide a password strength indicator (strong, medium, weak) and the reason for it.
";

#[derive(Serialize)]
struct PromptContext<'a> {
    length: u16,
    complexity: &'a str,
    keywords: Option<&'a str>,
}

pub struct PromptRenderer {
    registry: Handlebars<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        // Keywords go to the model verbatim, not HTML-escaped
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(TEMPLATE_NAME, SUGGEST_PASSWORD_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render(&self, request: &SuggestionRequest) -> Result<String, RenderError> {
        let context = PromptContext {
            length: request.length(),
            complexity: request.complexity().as_str(),
            keywords: request.keyword_hint(),
        };
        self.registry.render(TEMPLATE_NAME, &context)
    }
}
