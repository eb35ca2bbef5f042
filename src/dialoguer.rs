use dialoguer::{Input as TextInput, Select};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::input::Input;
use crate::registry::InputRegistry;

fn prompt_error(e: dialoguer::Error) -> Error {
    match e {
        dialoguer::Error::IO(io) => Error::IoError(io),
    }
}

/// Asks every still-pending question, in registration order, and returns
/// the answers keyed by prompt name.
///
/// Validation runs inline, so an invalid answer is re-asked by the prompt
/// surface and never reaches the registry.
pub fn collect_answers(registry: &InputRegistry) -> Result<Map<String, Value>> {
    let mut answers = Map::new();
    for input in registry.iter() {
        let prompt = input.as_prompt();
        if !prompt.when {
            continue;
        }

        let default = input.default_value();
        let answer = if prompt.choices.is_empty() {
            prompt_text(input, default, &prompt.message)?
        } else {
            prompt_single_choice(&prompt.choices, default, &prompt.message)?
        };
        answers.insert(prompt.name, answer);
    }
    Ok(answers)
}

/// Non-interactive stand-in for [`collect_answers`]: resolves each pending
/// question from its default and skips questions without one.
pub fn default_answers(registry: &InputRegistry) -> Map<String, Value> {
    let mut answers = Map::new();
    for input in registry.iter() {
        let prompt = input.as_prompt();
        if !prompt.when {
            continue;
        }
        if let Some(default) = input.default_value() {
            answers.insert(prompt.name, default);
        }
    }
    answers
}

fn prompt_text(input: &Input, default_value: Option<Value>, prompt: &str) -> Result<Value> {
    let mut text = TextInput::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|answer: &String| input.check(&Value::String(answer.clone())));
    // No default hint is rendered for inputs without one.
    if let Some(default_str) = default_hint(default_value) {
        text = text.default(default_str);
    }

    let answer = text.interact_text().map_err(prompt_error)?;
    Ok(Value::String(answer))
}

/// Text shown as the editable default of a text prompt. Null models an
/// explicitly absent value and gets no hint, like a missing default.
fn default_hint(default_value: Option<Value>) -> Option<String> {
    match default_value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn prompt_single_choice(
    choices: &[String],
    default_value: Option<Value>,
    prompt: &str,
) -> Result<Value> {
    let default_index = match &default_value {
        Some(Value::String(default_str)) => {
            choices.iter().position(|choice| choice == default_str).unwrap_or(0)
        }
        _ => 0,
    };

    let selection = Select::new()
        .with_prompt(prompt)
        .default(default_index)
        .items(choices)
        .interact()
        .map_err(prompt_error)?;

    Ok(Value::String(choices[selection].clone()))
}
