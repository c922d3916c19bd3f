//! Families of related products created through one factory.
//!
//! A factory only ever hands out members of its own family: a
//! `PostgresFactory` never pairs a Postgres connection with a Mongo query
//! executor, and a `ModernFurnitureFactory` never mixes in Victorian pieces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::config::GlobalSettings;
use crate::core::error::{PatternError, Result};
use crate::core::narrator::Narrator;

// ---------------------------------------------------------------------------
// Furniture
// ---------------------------------------------------------------------------

pub trait Chair {
    fn has_legs(&self) -> bool;
    fn sit_on(&self) -> String;
}

pub trait Table {
    fn has_legs(&self) -> bool;
    fn sit_on(&self) -> String;
}

pub trait Sofa {
    fn has_legs(&self) -> bool;
    fn sit_on(&self) -> String;
}

pub struct ModernChair;
pub struct ModernTable;
pub struct ModernSofa;
pub struct VictorianChair;
pub struct VictorianTable;
pub struct VictorianSofa;

impl Chair for ModernChair {
    fn has_legs(&self) -> bool {
        true
    }
    fn sit_on(&self) -> String {
        "🪑 Sitting on a modern chair".to_string()
    }
}

impl Table for ModernTable {
    fn has_legs(&self) -> bool {
        true
    }
    fn sit_on(&self) -> String {
        "🪑 Sitting on a modern table".to_string()
    }
}

impl Sofa for ModernSofa {
    fn has_legs(&self) -> bool {
        true
    }
    fn sit_on(&self) -> String {
        "🪑 Sitting on a modern sofa".to_string()
    }
}

impl Chair for VictorianChair {
    fn has_legs(&self) -> bool {
        true
    }
    fn sit_on(&self) -> String {
        "👑 Sitting on a victorian chair".to_string()
    }
}

impl Table for VictorianTable {
    fn has_legs(&self) -> bool {
        true
    }
    fn sit_on(&self) -> String {
        "👑 Sitting on a victorian table".to_string()
    }
}

impl Sofa for VictorianSofa {
    // Victorian sofas rest on a plinth.
    fn has_legs(&self) -> bool {
        false
    }
    fn sit_on(&self) -> String {
        "👑 Sitting on a victorian sofa".to_string()
    }
}

pub trait FurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair>;
    fn create_table(&self) -> Box<dyn Table>;
    fn create_sofa(&self) -> Box<dyn Sofa>;
}

pub struct ModernFurnitureFactory;
pub struct VictorianFurnitureFactory;

impl FurnitureFactory for ModernFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ModernChair)
    }
    fn create_table(&self) -> Box<dyn Table> {
        Box::new(ModernTable)
    }
    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(ModernSofa)
    }
}

impl FurnitureFactory for VictorianFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(VictorianChair)
    }
    fn create_table(&self) -> Box<dyn Table> {
        Box::new(VictorianTable)
    }
    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(VictorianSofa)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureStyle {
    Modern,
    Victorian,
}

impl fmt::Display for FurnitureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FurnitureStyle::Modern => write!(f, "modern"),
            FurnitureStyle::Victorian => write!(f, "victorian"),
        }
    }
}

impl FromStr for FurnitureStyle {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "modern" => Ok(FurnitureStyle::Modern),
            "victorian" => Ok(FurnitureStyle::Victorian),
            other => Err(PatternError::unknown_variant("furniture style", other)),
        }
    }
}

pub fn furniture_factory(style: FurnitureStyle) -> Box<dyn FurnitureFactory> {
    match style {
        FurnitureStyle::Modern => Box::new(ModernFurnitureFactory),
        FurnitureStyle::Victorian => Box::new(VictorianFurnitureFactory),
    }
}

/// Creates a chair, a table and a sofa from one factory and sits on each.
pub fn furnish_room(factory: &dyn FurnitureFactory) -> Vec<String> {
    let chair = factory.create_chair();
    let table = factory.create_table();
    let sofa = factory.create_sofa();

    vec![chair.sit_on(), table.sit_on(), sofa.sit_on()]
}

// ---------------------------------------------------------------------------
// Data access
// ---------------------------------------------------------------------------

pub trait DbConnection {
    fn connect(&self) -> String;
}

pub trait DbQuery {
    fn execute_query(&self, sql: &str) -> String;
}

pub trait DataAccessFactory {
    fn create_connection(&self) -> Box<dyn DbConnection>;
    fn create_query(&self) -> Box<dyn DbQuery>;
    /// The discriminator this factory was resolved from.
    fn family(&self) -> DatabaseKind;
}

pub struct MongoConnection;
pub struct MongoQuery;
pub struct PostgresConnection;
pub struct PostgresQuery;

impl DbConnection for MongoConnection {
    fn connect(&self) -> String {
        "MongoDB connected successfully.".to_string()
    }
}

impl DbQuery for MongoQuery {
    fn execute_query(&self, sql: &str) -> String {
        format!("Executing NoSQL command on Mongo: {sql}")
    }
}

impl DbConnection for PostgresConnection {
    fn connect(&self) -> String {
        "PostgreSQL connected successfully.".to_string()
    }
}

impl DbQuery for PostgresQuery {
    fn execute_query(&self, sql: &str) -> String {
        format!("Executing SQL query on Postgres: {sql}")
    }
}

pub struct MongoFactory;
pub struct PostgresFactory;

impl DataAccessFactory for MongoFactory {
    fn create_connection(&self) -> Box<dyn DbConnection> {
        Box::new(MongoConnection)
    }
    fn create_query(&self) -> Box<dyn DbQuery> {
        Box::new(MongoQuery)
    }
    fn family(&self) -> DatabaseKind {
        DatabaseKind::Mongo
    }
}

impl DataAccessFactory for PostgresFactory {
    fn create_connection(&self) -> Box<dyn DbConnection> {
        Box::new(PostgresConnection)
    }
    fn create_query(&self) -> Box<dyn DbQuery> {
        Box::new(PostgresQuery)
    }
    fn family(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Mongo,
}

impl DatabaseKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DatabaseKind::Postgres => "PostgreSQL",
            DatabaseKind::Mongo => "MongoDB",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::Postgres => write!(f, "postgres"),
            DatabaseKind::Mongo => write!(f, "mongo"),
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(DatabaseKind::Postgres),
            "mongo" => Ok(DatabaseKind::Mongo),
            other => Err(PatternError::unknown_variant("database", other)),
        }
    }
}

pub fn data_access_factory(kind: DatabaseKind) -> Box<dyn DataAccessFactory> {
    debug!(family = %kind, "creating data access factory");
    match kind {
        DatabaseKind::Postgres => Box::new(PostgresFactory),
        DatabaseKind::Mongo => Box::new(MongoFactory),
    }
}

/// Resolves a textual discriminator ("postgres", "mongo") to a factory.
pub fn resolve_data_access(name: &str) -> Result<Box<dyn DataAccessFactory>> {
    let kind: DatabaseKind = name.parse()?;
    Ok(data_access_factory(kind))
}

/// Deployment environment; each one is served by a fixed data-access family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn database(&self) -> DatabaseKind {
        match self {
            Environment::Production => DatabaseKind::Postgres,
            Environment::Development => DatabaseKind::Mongo,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            other => Err(PatternError::unknown_variant("environment", other)),
        }
    }
}

/// What `UserService::load_user` did, step by step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoad {
    pub connection: String,
    pub query: String,
    pub summary: String,
}

/// Loads users through whichever data-access family it was built with.
pub struct UserService {
    family: DatabaseKind,
    conn: Box<dyn DbConnection>,
    query: Box<dyn DbQuery>,
}

impl UserService {
    pub fn new(factory: &dyn DataAccessFactory) -> Self {
        Self {
            family: factory.family(),
            conn: factory.create_connection(),
            query: factory.create_query(),
        }
    }

    pub fn load_user(&self, user_id: &str) -> UserLoad {
        let connection = self.conn.connect();
        let sql = format!("SELECT * FROM users WHERE id = {user_id}");
        let query = self.query.execute_query(&sql);

        UserLoad {
            connection,
            query,
            summary: format!("User data loaded via {}.", self.family.display_name()),
        }
    }
}

pub fn demonstrate(narrator: &mut dyn Narrator, settings: &GlobalSettings) -> Result<()> {
    narrator.heading("🪑 Abstract Factory");

    for style in [FurnitureStyle::Modern, FurnitureStyle::Victorian] {
        narrator.line(&format!("--- {style} furniture ---"));
        let factory = furniture_factory(style);
        narrator.lines(&furnish_room(factory.as_ref()));
    }
    narrator.blank();

    let configured = settings.environment;
    for environment in [configured, other_environment(configured)] {
        let factory = data_access_factory(environment.database());
        narrator.line(&format!(
            "--- {environment} environment ({}) ---",
            factory.family().display_name()
        ));
        let service = UserService::new(factory.as_ref());
        let load = service.load_user(&format!("{environment}_user_123"));
        narrator.line(&load.connection);
        narrator.line(&load.query);
        narrator.line(&load.summary);
    }

    Ok(())
}

fn other_environment(environment: Environment) -> Environment {
    match environment {
        Environment::Production => Environment::Development,
        Environment::Development => Environment::Production,
    }
}
