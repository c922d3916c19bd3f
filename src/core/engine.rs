use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::core::config::{ConfigManager, ConfigProvider, GalleryConfig};
use crate::core::error::PatternError;
use crate::core::narrator::{ConsoleNarrator, Narrator};
use crate::patterns::{
    abstract_factory, adapter, builder, factory_method, prototype, singleton, template_method,
};

/// The demos the gallery can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    AbstractFactory,
    Adapter,
    Builder,
    FactoryMethod,
    Prototype,
    Singleton,
    TemplateMethod,
}

impl DemoKind {
    pub const ALL: [DemoKind; 7] = [
        DemoKind::AbstractFactory,
        DemoKind::Adapter,
        DemoKind::Builder,
        DemoKind::FactoryMethod,
        DemoKind::Prototype,
        DemoKind::Singleton,
        DemoKind::TemplateMethod,
    ];

    pub fn summary(&self) -> &'static str {
        match self {
            DemoKind::AbstractFactory => "families of related objects (furniture, data access)",
            DemoKind::Adapter => "stock feed, payment processors and power plugs behind one interface",
            DemoKind::Builder => "step-by-step houses and users with reset after build",
            DemoKind::FactoryMethod => "dialogs, logistics, payment gateways and signup",
            DemoKind::Prototype => "document and profile templates cloned from a registry",
            DemoKind::Singleton => "one process-wide counter",
            DemoKind::TemplateMethod => "a fixed drink recipe with overridable steps",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DemoKind::AbstractFactory => "abstract-factory",
            DemoKind::Adapter => "adapter",
            DemoKind::Builder => "builder",
            DemoKind::FactoryMethod => "factory-method",
            DemoKind::Prototype => "prototype",
            DemoKind::Singleton => "singleton",
            DemoKind::TemplateMethod => "template-method",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DemoKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| PatternError::unknown_variant("demo", s))
    }
}

/// Runs demos against a narrator chosen from the configuration.
pub struct DemoEngine {
    config: GalleryConfig,
    narrator: Box<dyn Narrator>,
}

impl DemoEngine {
    pub fn new(config_manager: &ConfigManager) -> Result<Self> {
        let config = config_manager.load_config()?;
        let narrator: Box<dyn Narrator> =
            Box::new(ConsoleNarrator::new(config.global_settings.colored));
        Ok(Self { config, narrator })
    }

    pub fn with_narrator(config: GalleryConfig, narrator: Box<dyn Narrator>) -> Self {
        Self { config, narrator }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn run(&mut self, kind: DemoKind) -> Result<()> {
        info!(demo = %kind, "running demo");
        let settings = &self.config.global_settings;
        let narrator = self.narrator.as_mut();

        match kind {
            DemoKind::AbstractFactory => abstract_factory::demonstrate(narrator, settings),
            DemoKind::Adapter => adapter::demonstrate(narrator, settings),
            DemoKind::Builder => builder::demonstrate(narrator, settings),
            DemoKind::FactoryMethod => factory_method::demonstrate(narrator, settings),
            DemoKind::Prototype => prototype::demonstrate(narrator, settings),
            DemoKind::Singleton => singleton::demonstrate(narrator, settings),
            DemoKind::TemplateMethod => template_method::demonstrate(narrator, settings),
        }
        .with_context(|| format!("Demo '{kind}' failed"))
    }

    pub fn run_named(&mut self, name: &str) -> Result<()> {
        let kind: DemoKind = name.parse()?;
        self.run(kind)
    }

    /// Runs every demo listed in the config, in order.
    pub fn run_enabled(&mut self) -> Result<()> {
        let demos = self.config.demos.clone();
        for name in &demos {
            self.run_named(name)?;
            self.narrator.blank();
        }
        Ok(())
    }
}
