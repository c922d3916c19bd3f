//! Step-by-step construction with a reset after every finished product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::core::config::GlobalSettings;
use crate::core::error::{PatternError, Result};
use crate::core::narrator::Narrator;

// ---------------------------------------------------------------------------
// Houses
// ---------------------------------------------------------------------------

/// Every part starts as an empty string; builders overwrite the ones they build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct House {
    pub walls: String,
    pub roof: String,
    pub doors: String,
    pub windows: String,
    pub garage: String,
    pub garden: String,
    pub swimming_pool: String,
    pub basement: String,
}

impl House {
    pub fn list_parts(&self) -> String {
        format!(
            "House parts: {}, {}, {}, {}, {}, {}, {}, {}",
            self.walls,
            self.roof,
            self.doors,
            self.windows,
            self.garage,
            self.garden,
            self.swimming_pool,
            self.basement
        )
    }
}

/// Each `build_*` step overwrites one part, so calling it twice leaves the
/// last value. `get_result` hands the house over and starts a fresh one.
pub trait HouseBuilder {
    fn reset(&mut self);
    fn build_walls(&mut self);
    fn build_roof(&mut self);
    fn build_doors(&mut self);
    fn build_windows(&mut self);
    fn build_garage(&mut self);
    fn build_garden(&mut self);
    fn build_swimming_pool(&mut self);
    fn build_basement(&mut self);
    fn get_result(&mut self) -> House;
}

#[derive(Debug, Default)]
pub struct BasicHouseBuilder {
    house: House,
}

impl BasicHouseBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HouseBuilder for BasicHouseBuilder {
    fn reset(&mut self) {
        self.house = House::default();
    }
    fn build_walls(&mut self) {
        self.house.walls = "Basic wooden walls".to_string();
    }
    fn build_roof(&mut self) {
        self.house.roof = "Basic shingle roof".to_string();
    }
    fn build_doors(&mut self) {
        self.house.doors = "Basic wooden door".to_string();
    }
    fn build_windows(&mut self) {
        self.house.windows = "Basic glass windows".to_string();
    }
    fn build_garage(&mut self) {
        self.house.garage = "No garage".to_string();
    }
    fn build_garden(&mut self) {
        self.house.garden = "Small front garden".to_string();
    }
    fn build_swimming_pool(&mut self) {
        self.house.swimming_pool = "No swimming pool".to_string();
    }
    fn build_basement(&mut self) {
        self.house.basement = "No basement".to_string();
    }
    fn get_result(&mut self) -> House {
        mem::take(&mut self.house)
    }
}

#[derive(Debug, Default)]
pub struct LuxuryHouseBuilder {
    house: House,
}

impl LuxuryHouseBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HouseBuilder for LuxuryHouseBuilder {
    fn reset(&mut self) {
        self.house = House::default();
    }
    fn build_walls(&mut self) {
        self.house.walls = "Premium stone walls".to_string();
    }
    fn build_roof(&mut self) {
        self.house.roof = "Premium tile roof".to_string();
    }
    fn build_doors(&mut self) {
        self.house.doors = "Premium wooden doors with carvings".to_string();
    }
    fn build_windows(&mut self) {
        self.house.windows = "Premium double-glazed windows".to_string();
    }
    fn build_garage(&mut self) {
        self.house.garage = "3-car garage".to_string();
    }
    fn build_garden(&mut self) {
        self.house.garden = "Large landscaped garden with fountain".to_string();
    }
    fn build_swimming_pool(&mut self) {
        self.house.swimming_pool = "Olympic-size swimming pool".to_string();
    }
    fn build_basement(&mut self) {
        self.house.basement = "Finished basement with home theater".to_string();
    }
    fn get_result(&mut self) -> House {
        mem::take(&mut self.house)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseStyle {
    Basic,
    Luxury,
}

impl fmt::Display for HouseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseStyle::Basic => write!(f, "basic"),
            HouseStyle::Luxury => write!(f, "luxury"),
        }
    }
}

impl FromStr for HouseStyle {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(HouseStyle::Basic),
            "luxury" => Ok(HouseStyle::Luxury),
            other => Err(PatternError::unknown_variant("house style", other)),
        }
    }
}

pub fn house_builder(style: HouseStyle) -> Box<dyn HouseBuilder> {
    match style {
        HouseStyle::Basic => Box::new(BasicHouseBuilder::new()),
        HouseStyle::Luxury => Box::new(LuxuryHouseBuilder::new()),
    }
}

/// Named recipes over whichever builder is currently bound.
pub struct HouseDirector {
    builder: Box<dyn HouseBuilder>,
}

impl HouseDirector {
    pub fn new(builder: Box<dyn HouseBuilder>) -> Self {
        Self { builder }
    }

    /// Binds a new builder and returns the previous one untouched; nothing
    /// the old builder had in progress carries over.
    pub fn set_builder(&mut self, builder: Box<dyn HouseBuilder>) -> Box<dyn HouseBuilder> {
        mem::replace(&mut self.builder, builder)
    }

    pub fn build_basic_house(&mut self) -> House {
        self.build_shell();
        self.builder.get_result()
    }

    pub fn build_luxury_house(&mut self) -> House {
        let b = self.builder.as_mut();
        b.build_walls();
        b.build_roof();
        b.build_doors();
        b.build_windows();
        b.build_garage();
        b.build_garden();
        b.build_swimming_pool();
        b.build_basement();
        b.get_result()
    }

    pub fn build_custom_house(&mut self, garage: bool, pool: bool, basement: bool) -> House {
        self.build_shell();
        if garage {
            self.builder.build_garage();
        }
        if pool {
            self.builder.build_swimming_pool();
        }
        if basement {
            self.builder.build_basement();
        }
        self.builder.get_result()
    }

    fn build_shell(&mut self) {
        let b = self.builder.as_mut();
        b.build_walls();
        b.build_roof();
        b.build_doors();
        b.build_windows();
        b.build_garden();
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub two_fa_enabled: bool,
    pub backup_codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Sys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
    pub marketing_opt_in: bool,
}

/// Required fields default to empty strings; optional sections stay `None`
/// until built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_settings: Option<SecuritySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

/// Chaining builder for `User`.
#[derive(Debug, Default)]
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, id: &str, email: &str, password: &str) -> &mut Self {
        self.user.id = id.to_string();
        self.user.email = email.to_string();
        self.user.password = password.to_string();
        self
    }

    pub fn build_address(&mut self, address: Address) -> &mut Self {
        self.user.address = Some(address);
        self
    }

    pub fn build_security_settings(&mut self, settings: SecuritySettings) -> &mut Self {
        self.user.security_settings = Some(settings);
        self
    }

    pub fn build_preferences(&mut self, preferences: Preferences) -> &mut Self {
        self.user.preferences = Some(preferences);
        self
    }

    /// Returns the user and leaves an empty one behind for the next build.
    pub fn get_result(&mut self) -> User {
        mem::take(&mut self.user)
    }
}

/// Recipes for the standard, secure and full user tiers.
pub struct UserDirector<'a> {
    builder: &'a mut UserBuilder,
}

impl<'a> UserDirector<'a> {
    pub fn new(builder: &'a mut UserBuilder) -> Self {
        Self { builder }
    }

    pub fn build_standard_user(&mut self, id: &str, email: &str, password: &str) -> User {
        self.builder.initialize(id, email, password).get_result()
    }

    pub fn build_secure_user(&mut self, id: &str, email: &str, password: &str) -> User {
        self.builder
            .initialize(id, email, password)
            .build_security_settings(SecuritySettings {
                two_fa_enabled: true,
                backup_codes: Vec::new(),
            })
            .get_result()
    }

    pub fn build_full_user(&mut self, id: &str, email: &str, password: &str) -> User {
        self.builder
            .initialize(id, email, password)
            .build_address(Address {
                city: "Seoul".to_string(),
                state: "gangnam".to_string(),
            })
            .build_preferences(Preferences {
                theme: Theme::Dark,
                language: Language::Ko,
                marketing_opt_in: false,
            })
            .build_security_settings(SecuritySettings {
                two_fa_enabled: true,
                backup_codes: vec!["abc".to_string(), "def".to_string()],
            })
            .get_result()
    }
}

fn user_json(user: &User) -> Result<String> {
    serde_json::to_string(user)
        .map_err(|e| PatternError::InvalidFormat(format!("cannot serialize user: {e}")))
}

pub fn demonstrate(narrator: &mut dyn Narrator, _settings: &GlobalSettings) -> Result<()> {
    narrator.heading("🏠 Builder");

    narrator.line("--- Without a director ---");
    let mut basic = BasicHouseBuilder::new();
    basic.build_walls();
    basic.build_roof();
    basic.build_doors();
    basic.build_windows();
    basic.build_garden();
    narrator.line(&basic.get_result().list_parts());

    let mut luxury = LuxuryHouseBuilder::new();
    luxury.build_walls();
    luxury.build_roof();
    luxury.build_doors();
    luxury.build_windows();
    luxury.build_garage();
    luxury.build_garden();
    luxury.build_swimming_pool();
    luxury.build_basement();
    narrator.line(&luxury.get_result().list_parts());
    narrator.blank();

    narrator.line("--- With a director ---");
    let mut director = HouseDirector::new(house_builder(HouseStyle::Basic));
    narrator.line(&director.build_basic_house().list_parts());
    director.set_builder(house_builder(HouseStyle::Luxury));
    narrator.line(&director.build_luxury_house().list_parts());
    narrator.line("Custom (garage, pool, no basement):");
    narrator.line(&director.build_custom_house(true, true, false).list_parts());
    narrator.blank();

    narrator.line("--- Users ---");
    let mut builder = UserBuilder::new();
    let mut users = UserDirector::new(&mut builder);
    for user in [
        users.build_standard_user("1", "basic@test.com", "1234"),
        users.build_secure_user("2", "secure@test.com", "abcd"),
        users.build_full_user("3", "full@test.com", "qwer"),
    ] {
        narrator.line(&user_json(&user)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_step_keeps_last_write() {
        let mut builder = BasicHouseBuilder::new();
        builder.build_walls();
        builder.build_walls();
        builder.build_roof();
        let house = builder.get_result();

        assert_eq!(house.walls, "Basic wooden walls");
        assert_eq!(house.roof, "Basic shingle roof");
        assert_eq!(house.garage, "");
        assert_eq!(house.basement, "");
    }

    #[test]
    fn test_get_result_resets_builder() {
        let mut builder = LuxuryHouseBuilder::new();
        builder.build_roof();
        builder.build_garage();
        let first = builder.get_result();
        builder.build_walls();
        let second = builder.get_result();

        assert_eq!(first.garage, "3-car garage");
        assert_eq!(first.walls, "");
        assert_eq!(
            second,
            House {
                walls: "Premium stone walls".to_string(),
                ..House::default()
            }
        );
    }

    #[test]
    fn test_reset_discards_partial_house() {
        let mut builder = BasicHouseBuilder::new();
        builder.build_walls();
        builder.reset();
        assert_eq!(builder.get_result(), House::default());
    }

    #[test]
    fn test_director_recipes() {
        let mut director = HouseDirector::new(house_builder(HouseStyle::Basic));
        let basic = director.build_basic_house();
        assert_eq!(basic.garden, "Small front garden");
        assert_eq!(basic.garage, "");

        director.set_builder(house_builder(HouseStyle::Luxury));
        let custom = director.build_custom_house(true, false, true);
        assert_eq!(custom.garage, "3-car garage");
        assert_eq!(custom.swimming_pool, "");
        assert_eq!(custom.basement, "Finished basement with home theater");

        let luxury = director.build_luxury_house();
        assert_eq!(luxury.swimming_pool, "Olympic-size swimming pool");
    }

    #[test]
    fn test_set_builder_does_not_carry_partial_state() {
        let mut partial = BasicHouseBuilder::new();
        partial.build_garage();
        let mut director = HouseDirector::new(Box::new(partial));

        let mut previous = director.set_builder(house_builder(HouseStyle::Luxury));
        let house = director.build_basic_house();
        assert_eq!(house.garage, "");

        // The partial house stayed with the builder that was swapped out.
        assert_eq!(previous.get_result().garage, "No garage");
    }

    #[test]
    fn test_user_builder_chains_and_resets() {
        let mut builder = UserBuilder::new();
        let full = UserDirector::new(&mut builder).build_full_user("3", "full@test.com", "qwer");
        assert_eq!(full.address.as_ref().unwrap().city, "Seoul");
        assert_eq!(
            full.security_settings.as_ref().unwrap().backup_codes,
            vec!["abc", "def"]
        );

        let basic = builder.initialize("1", "basic@test.com", "1234").get_result();
        assert!(basic.address.is_none());
        assert!(basic.security_settings.is_none());
        assert!(basic.preferences.is_none());
        assert_eq!(builder.get_result(), User::default());
    }

    #[test]
    fn test_user_json_hides_password() {
        let mut builder = UserBuilder::new();
        let user = UserDirector::new(&mut builder).build_secure_user("2", "s@test.com", "abcd");
        let json = user_json(&user).unwrap();
        assert!(!json.contains("abcd"));
        assert!(json.contains("\"two_fa_enabled\":true"));
        assert!(!json.contains("address"));
    }

    #[test]
    fn test_house_style_parsing() {
        assert_eq!("luxury".parse::<HouseStyle>().unwrap(), HouseStyle::Luxury);
        assert!("castle".parse::<HouseStyle>().is_err());
    }
}
