//! Registry for named validators and late-bound references.
//!
//! This module provides the [`Registry`] type that stores named validators
//! and hands out [`Reference`] validators that resolve a name each time they
//! run. References let a validator refer to itself or to validators that are
//! registered later.

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Weak};

use crate::context::{Context, DEFAULT_MAX_DEPTH};
use crate::driver::{validate_with, ValidateOptions, ValidationResult};
use crate::outcome::Outcome;
use crate::validator::{recursion_limit, BoxedValidator, Validator};
use crate::value::Value;

/// Type alias for the validator storage map.
type ValidatorMap = RwLock<HashMap<String, BoxedValidator>>;

/// A thread-safe registry of named validators.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use autopsy::{Registry, Schema, Value};
/// use serde_json::json;
///
/// let registry = Registry::new();
///
/// // A category holds a name and any number of subcategories
/// registry.register("Category", Schema::record()
///     .field("name", Schema::string())
///     .field("children", Schema::vector_of(registry.reference("Category")))
/// ).unwrap();
///
/// let input = json!({"name": "root", "children": [{"name": "leaf", "children": []}]});
/// let result = registry.validate("Category", Value::from(input)).unwrap();
/// assert!(result.is_pass());
/// ```
pub struct Registry {
    validators: Arc<ValidatorMap>,
    referenced: Arc<RwLock<BTreeSet<String>>>,
    max_depth: usize,
}

impl Registry {
    /// Creates a new empty registry with default max depth (100).
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
            referenced: Arc::new(RwLock::new(BTreeSet::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the recursion limit used by [`Registry::validate`].
    ///
    /// ```rust
    /// use autopsy::Registry;
    ///
    /// let registry = Registry::new().with_max_depth(50);
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Registers a validator under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// ```rust
    /// use autopsy::{Registry, Schema};
    ///
    /// let registry = Registry::new();
    /// registry.register("Email", Schema::string()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Email", Schema::string()).is_err());
    /// ```
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, "registered validator");
        validators.insert(name, validator.boxed());
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<BoxedValidator> {
        self.validators.read().get(name).cloned()
    }

    /// Returns a validator that looks up `name` each time it runs.
    ///
    /// The name does not need to be registered yet. A reference that is
    /// still unresolved when it runs fails with
    /// `validator '<name>' is not registered`. Each resolution counts as one
    /// recursion level.
    pub fn reference(&self, name: impl Into<String>) -> Reference {
        let name = name.into();
        self.referenced.write().insert(name.clone());
        Reference {
            name,
            validators: Arc::downgrade(&self.validators),
        }
    }

    /// Returns the names handed to [`Registry::reference`] that have no
    /// registered validator, sorted.
    ///
    /// Call this after all validators are registered to check reference
    /// integrity.
    ///
    /// ```rust
    /// use autopsy::{Registry, Schema};
    ///
    /// let registry = Registry::new();
    /// registry.register("User", Schema::record()
    ///     .field("id", registry.reference("UserId"))  // UserId not registered!
    /// ).unwrap();
    ///
    /// assert_eq!(registry.unresolved_references(), vec!["UserId"]);
    /// ```
    pub fn unresolved_references(&self) -> Vec<String> {
        let validators = self.validators.read();
        self.referenced
            .read()
            .iter()
            .filter(|name| !validators.contains_key(*name))
            .cloned()
            .collect()
    }

    /// Validates `input` against the validator registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name isn't registered.
    pub fn validate(
        &self,
        name: &str,
        input: impl Into<Value>,
    ) -> Result<ValidationResult, RegistryError> {
        let validator = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        let options = ValidateOptions::default().max_depth(self.max_depth);
        Ok(validate_with(&validator, input, &options))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
            referenced: Arc::clone(&self.referenced),
            max_depth: self.max_depth,
        }
    }
}

/// A validator standing for whatever is registered under a name.
///
/// Created by [`Registry::reference`]. It holds a weak handle to the
/// registry's storage, so a registered validator that references itself does
/// not keep the registry alive.
#[derive(Clone)]
pub struct Reference {
    name: String,
    validators: Weak<ValidatorMap>,
}

impl Reference {
    /// Returns the name of the referenced validator.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Option<BoxedValidator> {
        self.validators.upgrade()?.read().get(&self.name).cloned()
    }
}

impl Validator for Reference {
    fn validate(&self, ctx: &Context) -> Outcome {
        let Some(deeper) = ctx.descend() else {
            return recursion_limit(ctx);
        };

        match self.resolve() {
            Some(validator) => validator.validate(&deeper),
            None => Outcome::Error(format!("validator '{}' is not registered", self.name)),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that isn't registered.
    #[error("validator '{0}' not found")]
    NotFound(String),
}
