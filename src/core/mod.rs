// This file is the module declaration file for the `core` module.
// It holds the pieces every demo shares: typed errors, the discriminator
// registry, configuration, validation, narration, and the demo engine.

// `config` module:
// Defines `GalleryConfig`, the `ConfigProvider` trait, and a `ConfigManager`
// that loads, saves, validates, and exports `pattern-gallery.toml`.
pub mod config;
pub mod engine;
pub mod error;
pub mod narrator;

// `registry` module:
// `ProviderRegistry` maps a discriminator to a constructor so new variants
// are added by registration rather than by growing a `match`.
pub mod registry;
pub mod validator;
