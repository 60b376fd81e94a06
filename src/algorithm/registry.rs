//! Signing method registry
//!
//! Maps an `alg` header value to the [`SigningMethod`] that handles it. The
//! lookup is exact: the registry never guesses a method from the key type.
//!
//! A process-wide registry is available through [`global`]. It is initialized
//! once, either explicitly with [`install`] or lazily with the built-in set,
//! and is read without locking afterwards.

use super::{
    EdDSA, NoneMethod, SigningMethod, ES256, ES384, HS256, HS384, HS512, PS256, PS384, PS512,
    RS256, RS384, RS512,
};
use crate::error::{Error, Result};
use crate::keys::Key;

use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

static GLOBAL: OnceCell<Arc<SigningMethodRegistry>> = OnceCell::new();

/// Name-indexed set of signing methods
#[derive(Clone, Default)]
pub struct SigningMethodRegistry {
    methods: BTreeMap<String, Arc<dyn SigningMethod>>,
}

impl SigningMethodRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in method
    ///
    /// HS256/384/512, RS256/384/512, PS256/384/512, ES256/384, EdDSA and `none`.
    pub fn builtin() -> Self {
        let builtin: Vec<Arc<dyn SigningMethod>> = vec![
            Arc::new(HS256),
            Arc::new(HS384),
            Arc::new(HS512),
            Arc::new(RS256),
            Arc::new(RS384),
            Arc::new(RS512),
            Arc::new(PS256),
            Arc::new(PS384),
            Arc::new(PS512),
            Arc::new(ES256),
            Arc::new(ES384),
            Arc::new(EdDSA),
            Arc::new(NoneMethod),
        ];

        Self {
            methods: builtin
                .into_iter()
                .map(|method| (method.alg().to_string(), method))
                .collect(),
        }
    }

    /// Register a method under `name`
    ///
    /// The factory runs once. Registration fails if `name` is taken or if the
    /// produced method reports a different `alg()`.
    pub fn register<M, F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        M: SigningMethod + 'static,
        F: FnOnce() -> M,
    {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(Error::Registry(format!(
                "method '{name}' is already registered"
            )));
        }

        let method = factory();
        if method.alg() != name {
            return Err(Error::Registry(format!(
                "method registered as '{name}' reports alg '{}'",
                method.alg()
            )));
        }

        tracing::debug!(alg = %name, "registered signing method");
        self.methods.insert(name, Arc::new(method));
        Ok(())
    }

    /// Find the method for an `alg` value
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn SigningMethod>> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered method names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Look up `name` and verify `signature` over `signing_input` with `key`
    pub fn verify(
        &self,
        name: &str,
        signing_input: &[u8],
        signature: &[u8],
        key: &Key,
    ) -> Result<()> {
        self.lookup(name)?.verify(signing_input, signature, key)
    }
}

impl std::fmt::Debug for SigningMethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}

/// Install the process-wide registry
///
/// Must run before the first call to [`global`]; a second install, or an
/// install after the built-in set was lazily loaded, fails.
pub fn install(registry: SigningMethodRegistry) -> Result<()> {
    let names: Vec<&str> = registry.names().collect();
    tracing::info!(methods = ?names, "installing global signing method registry");

    GLOBAL
        .set(Arc::new(registry))
        .map_err(|_| Error::Registry("global registry is already initialized".to_string()))
}

/// The process-wide registry, defaulting to [`SigningMethodRegistry::builtin`]
pub fn global() -> Arc<SigningMethodRegistry> {
    GLOBAL
        .get_or_init(|| Arc::new(SigningMethodRegistry::builtin()))
        .clone()
}
