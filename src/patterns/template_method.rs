//! A fixed recipe whose individual steps can be overridden.

use std::str::FromStr;

use crate::core::config::GlobalSettings;
use crate::core::error::{PatternError, Result};
use crate::core::narrator::Narrator;

/// Steps of a hot drink. Implementors override the steps they care about;
/// `make` always runs them in the same order.
pub trait Drink {
    fn name(&self) -> &'static str;

    fn boil_water(&self) -> String {
        "Boiling water".to_string()
    }

    fn brew(&self) -> String {
        "Steeping the liquid".to_string()
    }

    fn pour_in_cup(&self) -> String {
        "Pouring into cup".to_string()
    }

    fn add_condiments(&self) -> String {
        "Adding flavouring".to_string()
    }

    fn make(&self) -> Vec<String> {
        vec![
            self.boil_water(),
            self.brew(),
            self.pour_in_cup(),
            self.add_condiments(),
        ]
    }
}

pub struct Coffee;
pub struct Tea;

impl Drink for Coffee {
    fn name(&self) -> &'static str {
        "coffee"
    }
    fn brew(&self) -> String {
        "Brewing coffee".to_string()
    }
    fn add_condiments(&self) -> String {
        "Adding sugar and milk".to_string()
    }
}

impl Drink for Tea {
    fn name(&self) -> &'static str {
        "tea"
    }
    fn brew(&self) -> String {
        "Steeping tea".to_string()
    }
    fn add_condiments(&self) -> String {
        "Adding lemon".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrinkKind {
    Coffee,
    Tea,
}

impl FromStr for DrinkKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "coffee" => Ok(DrinkKind::Coffee),
            "tea" => Ok(DrinkKind::Tea),
            other => Err(PatternError::unknown_variant("drink", other)),
        }
    }
}

pub fn drink_for(kind: DrinkKind) -> Box<dyn Drink> {
    match kind {
        DrinkKind::Coffee => Box::new(Coffee),
        DrinkKind::Tea => Box::new(Tea),
    }
}

pub fn demonstrate(narrator: &mut dyn Narrator, _settings: &GlobalSettings) -> Result<()> {
    narrator.heading("☕ Template Method");

    for kind in [DrinkKind::Coffee, DrinkKind::Tea] {
        let drink = drink_for(kind);
        narrator.line(&format!("--- {} ---", drink.name()));
        narrator.lines(&drink.make());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coffee_overrides_brew_and_condiments() {
        assert_eq!(
            Coffee.make(),
            vec![
                "Boiling water",
                "Brewing coffee",
                "Pouring into cup",
                "Adding sugar and milk"
            ]
        );
    }

    #[test]
    fn test_tea_keeps_shared_steps() {
        let steps = drink_for("tea".parse().unwrap()).make();
        assert_eq!(steps[0], "Boiling water");
        assert_eq!(steps[1], "Steeping tea");
        assert_eq!(steps[3], "Adding lemon");
    }

    #[test]
    fn test_default_steps_apply_without_overrides() {
        struct HotWater;
        impl Drink for HotWater {
            fn name(&self) -> &'static str {
                "hot water"
            }
        }

        assert_eq!(HotWater.make()[1], "Steeping the liquid");
        assert!("cocoa".parse::<DrinkKind>().is_err());
    }
}
