//! Fixed instruction templates sent to the backends.
//!
//! Only two values are ever rendered into a template: the target language,
//! which comes from a closed list, and (for the local server) the source text,
//! which is inserted as data. Rendering never evaluates caller input as
//! template syntax.

use super::{TargetLanguage, TranslationDomainError};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

const INSTRUCTION_TEMPLATE: &str = "instruction";
const LOCAL_PROMPT_TEMPLATE: &str = "local_prompt";

const INSTRUCTION: &str = "You are a helpful translator. \
However, only the translation result should be output. \
Code blocks or phrases like \"Here is the translation result:\" should not be included. \
Please translate into {{ target_language }}.";

const LOCAL_PROMPT: &str = "{% include 'instruction' %}\n\n\
Source Sentence: {{ source_text }}\n\
Target Sentence: ";

/// Compiled prompt templates.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    environment: Environment<'static>,
}

impl PromptTemplates {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::Prompt`] if a template does not
    /// compile.
    pub fn new() -> Result<Self, TranslationDomainError> {
        let mut environment = Environment::new();
        environment.set_auto_escape_callback(|_| AutoEscape::None);
        environment.set_undefined_behavior(UndefinedBehavior::Strict);
        environment
            .add_template(INSTRUCTION_TEMPLATE, INSTRUCTION)
            .map_err(|err| prompt_error(INSTRUCTION_TEMPLATE, &err))?;
        environment
            .add_template(LOCAL_PROMPT_TEMPLATE, LOCAL_PROMPT)
            .map_err(|err| prompt_error(LOCAL_PROMPT_TEMPLATE, &err))?;
        Ok(Self { environment })
    }

    /// Renders the system instruction used by the hosted API.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::Prompt`] when rendering fails.
    pub fn instruction(&self, target: TargetLanguage) -> Result<String, TranslationDomainError> {
        self.render(
            INSTRUCTION_TEMPLATE,
            context! { target_language => target.as_str() },
        )
    }

    /// Renders the single user prompt used by the local server.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::Prompt`] when rendering fails.
    pub fn local_prompt(
        &self,
        source_text: &str,
        target: TargetLanguage,
    ) -> Result<String, TranslationDomainError> {
        self.render(
            LOCAL_PROMPT_TEMPLATE,
            context! {
                target_language => target.as_str(),
                source_text => source_text,
            },
        )
    }

    fn render(
        &self,
        name: &'static str,
        ctx: minijinja::Value,
    ) -> Result<String, TranslationDomainError> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|err| prompt_error(name, &err))
    }
}

fn prompt_error(template: &'static str, err: &minijinja::Error) -> TranslationDomainError {
    TranslationDomainError::Prompt {
        template,
        reason: err.to_string(),
    }
}
