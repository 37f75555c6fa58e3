// Licensed under the Apache-2.0 license

//! Template lookup and rendering interfaces.
//!
//! A template turns a flat value map into text. Templates are grouped by
//! target language and addressed by the snake_case name of the node kind
//! they render, so `("systemverilog", "field_instance")` renders
//! [`Node::FieldInstance`](crate::act::Node::FieldInstance).

use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Values handed to a template.
pub type TemplateValues = serde_json::Map<String, Value>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no template '{name}' for language '{language}'")]
    NotFound { language: String, name: String },

    #[error("template '{template}' requires value '{key}'")]
    MissingValue { template: String, key: String },

    #[error("template '{template}' does not support {key} '{value}'")]
    InvalidValue {
        template: String,
        key: String,
        value: String,
    },

    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

pub trait Template {
    fn render(&self, values: &TemplateValues) -> Result<String, TemplateError>;
}

/// Any `Fn(&TemplateValues) -> Result<String, TemplateError>` is a template.
impl<F> Template for F
where
    F: Fn(&TemplateValues) -> Result<String, TemplateError>,
{
    fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        self(values)
    }
}

pub trait TemplateRepository {
    fn resolve(&self, language: &str, name: &str) -> Result<Rc<dyn Template>, TemplateError>;
}

/// Templates registered by hand, keyed by language and name.
#[derive(Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<(String, String), Rc<dyn Template>>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, name: &str, template: impl Template + 'static) {
        self.templates
            .insert((language.to_string(), name.to_string()), Rc::new(template));
    }
}

impl TemplateRepository for TemplateSet {
    fn resolve(&self, language: &str, name: &str) -> Result<Rc<dyn Template>, TemplateError> {
        self.templates
            .get(&(language.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| TemplateError::NotFound {
                language: language.to_string(),
                name: name.to_string(),
            })
    }
}

/// Typed access to template values.
///
/// Each getter fails with [`TemplateError::MissingValue`] naming the
/// template when the key is absent or has the wrong type.
pub struct Values<'a> {
    template: &'a str,
    values: &'a TemplateValues,
}

impl<'a> Values<'a> {
    pub fn new(template: &'a str, values: &'a TemplateValues) -> Self {
        Self { template, values }
    }

    fn missing(&self, key: &str) -> TemplateError {
        TemplateError::MissingValue {
            template: self.template.to_string(),
            key: key.to_string(),
        }
    }

    /// Error for a value the template cannot render.
    pub fn invalid(&self, key: &str, value: &str) -> TemplateError {
        TemplateError::InvalidValue {
            template: self.template.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn str(&self, key: &str) -> Result<&'a str, TemplateError> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key))
    }

    /// Like [`Values::str`], but absent and null values read as empty text.
    pub fn opt_str(&self, key: &str) -> &'a str {
        self.values.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn u64(&self, key: &str) -> Result<u64, TemplateError> {
        self.values
            .get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| self.missing(key))
    }

    pub fn bool(&self, key: &str) -> Result<bool, TemplateError> {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.missing(key))
    }

    pub fn array(&self, key: &str) -> Result<&'a Vec<Value>, TemplateError> {
        self.values
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| self.missing(key))
    }
}
