use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::core::error::{PatternError, Result};

/// A boxed constructor producing a fresh capability handle on every call.
pub type Constructor<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// Maps a discriminator onto a constructor of some capability `T`.
///
/// New variants are added with `register` instead of by editing a `match`
/// in the resolver. Resolution builds a new instance each time; nothing is
/// pooled or memoized.
pub struct ProviderRegistry<T: ?Sized> {
    kind: &'static str,
    constructors: BTreeMap<String, Constructor<T>>,
}

impl<T: ?Sized> ProviderRegistry<T> {
    /// Creates an empty registry. `kind` labels the discriminator in errors
    /// and log events (e.g. "payment provider").
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(kind = self.kind, variant = %name, "registering provider");
        self.constructors.insert(name, Box::new(constructor));
        self
    }

    /// Builds the implementation registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<T>> {
        match self.constructors.get(name) {
            Some(constructor) => {
                debug!(kind = self.kind, variant = name, "resolved provider");
                Ok(constructor())
            }
            None => Err(PatternError::unknown_variant(self.kind, name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered discriminators in sorted order.
    pub fn variants(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl<T: ?Sized> fmt::Debug for ProviderRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("kind", &self.kind)
            .field("variants", &self.variants())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Korean;
    impl Greeter for Korean {
        fn greet(&self) -> String {
            "annyeong".to_string()
        }
    }

    #[test]
    fn test_resolve_registered_variant() {
        let mut registry: ProviderRegistry<dyn Greeter> = ProviderRegistry::new("greeter");
        registry.register("en", || Box::new(English));
        registry.register("ko", || Box::new(Korean));

        assert_eq!(registry.resolve("en").unwrap().greet(), "hello");
        assert_eq!(registry.resolve("ko").unwrap().greet(), "annyeong");
        assert_eq!(registry.variants(), vec!["en", "ko"]);
    }

    #[test]
    fn test_unregistered_variant_is_an_error() {
        let mut registry: ProviderRegistry<dyn Greeter> = ProviderRegistry::new("greeter");
        registry.register("en", || Box::new(English));

        let err = registry.resolve("fr").err().unwrap();
        assert_eq!(err, PatternError::unknown_variant("greeter", "fr"));
        assert!(!registry.contains("fr"));
    }

    #[test]
    fn test_register_replaces_existing_constructor() {
        let mut registry: ProviderRegistry<dyn Greeter> = ProviderRegistry::new("greeter");
        registry.register("default", || Box::new(English));
        registry.register("default", || Box::new(Korean));

        assert_eq!(registry.resolve("default").unwrap().greet(), "annyeong");
        assert_eq!(registry.variants().len(), 1);
    }
}
