/// Handles argument parsing.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Merging editor configuration files into the project.
pub mod editor;

/// Dotted-path flattening and unflattening of nested documents.
pub mod flatten;

/// Lifecycle orchestration for the scaffolding phases.
pub mod generator;

/// The single-field input abstraction.
pub mod input;

/// The registered poetry manifest inputs.
pub mod inputs;

/// Workspace bootstrapping through poetry.
pub mod install;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Known license identifiers.
pub mod licenses;

/// Structured deep merge for configuration documents.
pub mod merge;

/// External value providers (git, python interpreter).
pub mod providers;

/// pyproject.toml reading, merging and writing.
pub mod pyproject;

/// Ordered input collection with bulk merge operations.
pub mod registry;

/// Package skeleton generation.
pub mod scaffold;

/// User input and interaction handling.
pub mod dialoguer;

/// Answer validators.
pub mod validation;
