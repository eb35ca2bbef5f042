use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::flatten::{flatten, unflatten};
use crate::input::{Input, OptionSpec, PromptSpec};
use crate::merge::merge_documents;

/// Which source a bulk merge draws from. The source kind decides how keys
/// are matched against inputs, whether values bypass the validate→transform
/// pipeline, and what happens to keys no input claims.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MergeSource {
    /// CLI option values, matched by option name. Unknown keys fail loudly.
    Options,
    /// Interactive answers, matched by prompt name. Unknown keys fail loudly.
    Answers,
    /// Trusted, previously-written values, matched by value path. Stored
    /// verbatim; unknown keys land in the overflow bag so they round-trip.
    RawValues,
}

/// Ordered collection of [`Input`]s with bulk projection and merge
/// operations. Prompt and option order follow registration order.
pub struct InputRegistry<'a> {
    inputs: Vec<Input<'a>>,
    extra_values: Map<String, Value>,
}

impl<'a> InputRegistry<'a> {
    /// Builds a registry.
    ///
    /// # Panics
    /// Input names must be unique; a duplicate name is a programming error
    /// in the registration list and panics in every build.
    pub fn new(inputs: Vec<Input<'a>>) -> Self {
        let mut names: Vec<&str> = inputs.iter().map(Input::name).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            panic!("duplicate input name: {}", pair[0]);
        }
        Self { inputs, extra_values: Map::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Input<'a>> {
        self.inputs.iter()
    }

    /// CLI option descriptors for every input, in registration order.
    pub fn options(&self) -> Vec<OptionSpec> {
        self.inputs.iter().map(Input::as_option).collect()
    }

    /// Prompt descriptors for every input, in registration order.
    pub fn prompts(&self) -> Vec<PromptSpec> {
        self.inputs.iter().map(Input::as_prompt).collect()
    }

    /// Resolved CLI flag name for the input called `name`.
    pub fn option_path_of(&self, name: &str) -> Option<&str> {
        self.inputs.iter().find(|input| input.name() == name).map(Input::option_path)
    }

    /// The full nested output document: every resolved input value placed at
    /// its dotted path, plus the overflow bag content, unflattened. Unset
    /// inputs are omitted.
    pub fn values(&self) -> Value {
        let mut flat = self.extra_values.clone();
        for input in &self.inputs {
            if let Some(value) = input.value() {
                flat.insert(input.value_path().to_string(), value.clone());
            }
        }
        unflatten(&flat)
    }

    /// Merges CLI option values, matching keys against option names.
    /// Values run through validate→transform; unknown keys are an error.
    pub fn merge_options(&mut self, options: &Value) -> Result<()> {
        self.merge(options, MergeSource::Options)
    }

    /// Merges interactive answers, matching keys against prompt names.
    /// Values run through validate→transform; unknown keys are an error.
    pub fn merge_answers(&mut self, answers: &Value) -> Result<()> {
        self.merge(answers, MergeSource::Answers)
    }

    /// Merges trusted values (typically manifest content already on disk),
    /// matching keys against value paths and bypassing validation and
    /// transformation.
    ///
    /// Keys no input claims are kept in the overflow bag and reappear
    /// verbatim in [`InputRegistry::values`], so fields this registry does
    /// not know about still round-trip.
    pub fn merge_raw_values(&mut self, values: &Value) -> Result<()> {
        self.merge(values, MergeSource::RawValues)
    }

    fn merge(&mut self, new_values: &Value, source: MergeSource) -> Result<()> {
        for (key, value) in &flatten(new_values) {
            let matched = self.inputs.iter_mut().find(|input| {
                key == match source {
                    MergeSource::Options => input.option_path(),
                    MergeSource::Answers => input.prompt_path(),
                    MergeSource::RawValues => input.value_path(),
                }
            });

            match matched {
                Some(input) => {
                    input.set_value(value.clone(), source == MergeSource::RawValues)?
                }
                None if source == MergeSource::RawValues => {
                    // Nullish values carry no information worth round-tripping.
                    if !value.is_null() {
                        let merged = match self.extra_values.remove(key) {
                            Some(existing) => merge_documents(existing, value.clone()),
                            None => value.clone(),
                        };
                        self.extra_values.insert(key.clone(), merged);
                    }
                }
                None => return Err(Error::UnknownInput { name: key.clone() }),
            }
        }
        Ok(())
    }
}
