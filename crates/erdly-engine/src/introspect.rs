//! Model introspection
//!
//! Turns a model's columns into the ordered, filtered attribute list a
//! diagram shows for the entity.

use crate::attribute::{Attribute, AttributeError, AttributeKind, AttributeSummary, NO_NATIVE_LIMITS};
use erdly_catalog::NativeLimits;
use erdly_core::{AttributeRules, Domain, Model};
use serde::Serialize;

/// Serializable attribute listing of one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub model: String,
    pub attributes: Vec<AttributeSummary>,
}

/// Builds attributes for the models of one domain
pub struct ModelIntrospector<'a> {
    domain: &'a Domain,
    native_limits: &'a dyn NativeLimits,
    rules: AttributeRules,
}

impl<'a> ModelIntrospector<'a> {
    /// Introspector with default rules and no native limits
    pub fn new(domain: &'a Domain) -> Self {
        Self {
            domain,
            native_limits: &NO_NATIVE_LIMITS,
            rules: AttributeRules::default(),
        }
    }

    /// Compare limits against this catalog
    pub fn with_native_limits(mut self, native_limits: &'a dyn NativeLimits) -> Self {
        self.native_limits = native_limits;
        self
    }

    /// Replace the selection rules
    pub fn with_rules(mut self, rules: AttributeRules) -> Self {
        self.rules = rules;
        self
    }

    /// Domain being introspected
    pub fn domain(&self) -> &'a Domain {
        self.domain
    }

    /// Models whose attributes are shown, in declaration order
    pub fn models(&self) -> impl Iterator<Item = &'a Model> + '_ {
        self.domain
            .models
            .iter()
            .filter(move |m| !self.rules.is_model_skipped(&m.name))
    }

    /// Attributes of `model` that pass the rules
    ///
    /// Columns come in schema order, sorted by name when `sort` is set;
    /// `prepend_primary` then moves the primary key to the front.
    pub fn attributes(&self, model: &'a Model) -> Vec<Attribute<'a>> {
        if self.rules.is_model_skipped(&model.name) {
            tracing::debug!(model = %model.name, "model skipped by rules");
            return Vec::new();
        }

        let mut attributes: Vec<Attribute<'a>> = model
            .columns
            .iter()
            .map(|column| {
                Attribute::new(self.domain, model, column).with_native_limits(self.native_limits)
            })
            .filter(|attribute| self.is_shown(model, attribute))
            .collect();

        if self.rules.sort {
            attributes.sort();
        }

        if self.rules.prepend_primary {
            if let Some(position) = attributes.iter().position(|a| a.primary_key()) {
                let primary = attributes.remove(position);
                attributes.insert(0, primary);
            }
        }

        tracing::trace!(model = %model.name, count = attributes.len(), "introspected attributes");
        attributes
    }

    /// Attributes of the model named `name`
    pub fn attributes_for(&self, name: &str) -> Result<Vec<Attribute<'a>>, AttributeError> {
        let model = self
            .domain
            .find_model(name)
            .ok_or_else(|| AttributeError::UnknownModel(name.to_string()))?;

        Ok(self.attributes(model))
    }

    /// Owned listing of `model`'s shown attributes
    pub fn summarize(&self, model: &'a Model) -> EntitySummary {
        EntitySummary {
            model: model.name.clone(),
            attributes: self.attributes(model).iter().map(|a| a.summary()).collect(),
        }
    }

    /// Listings of every shown model, in declaration order
    pub fn summaries(&self) -> Vec<EntitySummary> {
        self.models().map(|model| self.summarize(model)).collect()
    }

    fn is_shown(&self, model: &Model, attribute: &Attribute<'_>) -> bool {
        if self.rules.is_column_skipped(&model.name, attribute.name()) {
            tracing::debug!(model = %model.name, column = attribute.name(), "column skipped by pattern");
            return false;
        }

        let kind: AttributeKind = attribute.kind();
        if !self.rules.shows(kind) {
            tracing::debug!(model = %model.name, column = attribute.name(), ?kind, "attribute kind hidden");
            return false;
        }

        true
    }
}
