//! Template rendering engine using minijinja (Jinja2-compatible).

use minijinja::{Environment, UndefinedBehavior, Value};

use crate::error::Result;

/// Jinja2-compatible template engine for prompt generation.
///
/// Undefined variables are errors, so a template that references a value
/// the caller forgot to supply fails instead of rendering an empty gap.
///
/// Two list filters are registered:
/// - `numbered` renders `1. a\n2. b`
/// - `bulleted` renders `- a\n- b`
#[derive(Debug, Clone)]
pub struct PromptEngine {
    env: Environment<'static>,
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEngine {
    /// Create a new template engine with the list filters installed.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(false);
        env.set_lstrip_blocks(false);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_filter("numbered", |v: Value| -> String {
            join_items(&v, |i, item| format!("{}. {item}", i + 1))
        });
        env.add_filter("bulleted", |v: Value| -> String {
            join_items(&v, |_, item| format!("- {item}"))
        });

        Self { env }
    }

    /// Render a template string with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`](crate::Error::Prompt) if the template
    /// syntax is invalid or rendering fails.
    pub fn render(&self, template: &str, context: Value) -> Result<String> {
        let tmpl = self.env.template_from_str(template)?;
        Ok(tmpl.render(context)?)
    }
}

fn join_items(list: &Value, fmt: impl Fn(usize, Value) -> String) -> String {
    list.try_iter()
        .map(|items| {
            items
                .enumerate()
                .map(|(i, item)| fmt(i, item))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
