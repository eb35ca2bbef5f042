use serde_json::Value;

use crate::error::{Error, Result};
use crate::validation::Validation;

pub type ValidateFn<'a> = Box<dyn Fn(&Value) -> Validation + 'a>;
pub type TransformFn<'a> = Box<dyn Fn(Value) -> Value + 'a>;
pub type RetrieveDefaultFn<'a> = Box<dyn Fn() -> Option<Value> + 'a>;

/// Projection of an [`Input`] onto the CLI option surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
}

/// Projection of an [`Input`] onto the interactive prompt surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub name: String,
    pub message: String,
    /// Whether the question should be asked at all. Unless explicitly
    /// overridden, this is true exactly while the value is still unset.
    pub when: bool,
    pub choices: Vec<String>,
}

/// One configurable field: its CLI/prompt projections, its validation and
/// transformation rules, and its (initially unset) resolved value.
///
/// The value slot is only ever written through the validate→transform
/// pipeline, except in "already transformed" mode where the candidate is
/// understood to be canonical (e.g. read back from a previously written
/// manifest) and is stored verbatim.
pub struct Input<'a> {
    name: String,
    path: Option<String>,
    description: String,
    message: String,
    option_name: Option<String>,
    prompt_name: Option<String>,
    choices: Vec<String>,
    when: Option<bool>,
    validate: Option<ValidateFn<'a>>,
    transform: Option<TransformFn<'a>>,
    retrieve_default: Option<RetrieveDefaultFn<'a>>,
    value: Option<Value>,
}

impl<'a> Input<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            description: String::new(),
            message: String::new(),
            option_name: None,
            prompt_name: None,
            choices: Vec::new(),
            when: None,
            validate: None,
            transform: None,
            retrieve_default: None,
            value: None,
        }
    }

    /// Dotted path under which the resolved value lands in the output
    /// document. Defaults to the input name.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Help text shared with the CLI option surface.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Question text shown by the prompt surface.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Overrides the CLI flag name (defaults to the input name).
    pub fn option_name(mut self, name: impl Into<String>) -> Self {
        self.option_name = Some(name.into());
        self
    }

    /// Overrides the prompt answer key (defaults to the input name).
    pub fn prompt_name(mut self, name: impl Into<String>) -> Self {
        self.prompt_name = Some(name.into());
        self
    }

    pub fn choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    /// Forces the prompt's `when` flag instead of deriving it from the
    /// value slot.
    pub fn when(mut self, when: bool) -> Self {
        self.when = Some(when);
        self
    }

    pub fn validate(mut self, validate: impl Fn(&Value) -> Validation + 'a) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Convenience for the common case of validating the string form of a
    /// candidate value. Non-string candidates are rejected outright.
    pub fn validate_str(mut self, validate: impl Fn(&str) -> Validation + 'a) -> Self {
        self.validate = Some(Box::new(move |value| match value {
            Value::String(s) => validate(s),
            _ => Err("Expected a string value".to_string()),
        }));
        self
    }

    pub fn transform(mut self, transform: impl Fn(Value) -> Value + 'a) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Registers the provider used to seed a default before prompting.
    pub fn retrieve_default(mut self, retrieve: impl Fn() -> Option<Value> + 'a) -> Self {
        self.retrieve_default = Some(Box::new(retrieve));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted output path, falling back to the input name.
    pub fn value_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    /// Resolved CLI flag name.
    pub fn option_path(&self) -> &str {
        self.option_name.as_deref().unwrap_or(&self.name)
    }

    /// Resolved prompt answer key.
    pub fn prompt_path(&self) -> &str {
        self.prompt_name.as_deref().unwrap_or(&self.name)
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn as_option(&self) -> OptionSpec {
        OptionSpec {
            name: self.option_path().to_string(),
            description: self.description.clone(),
        }
    }

    pub fn as_prompt(&self) -> PromptSpec {
        PromptSpec {
            name: self.prompt_path().to_string(),
            message: self.message.clone(),
            when: self.when.unwrap_or(self.value.is_none()),
            choices: self.choices.clone(),
        }
    }

    /// Runs only the validation rule against a candidate, leaving the value
    /// slot untouched. Used by the prompt surface for inline re-asking.
    pub fn check(&self, candidate: &Value) -> Validation {
        match &self.validate {
            Some(validate) => validate(candidate),
            None => Ok(()),
        }
    }

    /// Calls the default provider, if any.
    pub fn default_value(&self) -> Option<Value> {
        self.retrieve_default.as_ref().and_then(|retrieve| retrieve())
    }

    /// Stores a new value.
    ///
    /// With `already_transformed` the candidate is stored verbatim. Otherwise
    /// validation runs against the raw candidate first, and the transform is
    /// applied only after acceptance, so validators always see the
    /// user-facing syntax. A rejected candidate leaves the slot unchanged.
    pub fn set_value(&mut self, new_value: Value, already_transformed: bool) -> Result<()> {
        if already_transformed {
            self.value = Some(new_value);
            return Ok(());
        }

        if let Err(reason) = self.check(&new_value) {
            return Err(Error::InvalidValue {
                input: self.name.clone(),
                value: display_value(&new_value),
                reason,
            });
        }

        self.value = Some(match &self.transform {
            Some(transform) => transform(new_value),
            None => new_value,
        });
        Ok(())
    }
}

/// Renders a candidate value the way error messages quote it: strings
/// without surrounding quotes, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
