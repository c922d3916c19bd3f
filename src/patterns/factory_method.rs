//! Creators that defer the choice of product to a factory method.

use sha2::{Digest, Sha256};
use std::str::FromStr;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::GlobalSettings;
use crate::core::error::{PatternError, Result};
use crate::core::narrator::Narrator;
use crate::core::registry::ProviderRegistry;

// ---------------------------------------------------------------------------
// Dialogs and buttons
// ---------------------------------------------------------------------------

pub trait Button {
    fn render(&self) -> String;
    fn on_click(&self) -> String;
}

pub struct HtmlButton;
pub struct WindowsButton;
pub struct LinuxButton;

impl Button for HtmlButton {
    fn render(&self) -> String {
        "html button rendered".to_string()
    }
    fn on_click(&self) -> String {
        "html button clicked".to_string()
    }
}

impl Button for WindowsButton {
    fn render(&self) -> String {
        "windows button rendered".to_string()
    }
    fn on_click(&self) -> String {
        "windows button clicked".to_string()
    }
}

impl Button for LinuxButton {
    fn render(&self) -> String {
        "linux button rendered".to_string()
    }
    fn on_click(&self) -> String {
        "linux button clicked".to_string()
    }
}

/// A dialog whose OK button comes from the `create_button` factory method.
pub trait Dialog {
    fn create_button(&self) -> Box<dyn Button>;

    fn render_dialog(&self) -> Vec<String> {
        let ok_button = self.create_button();
        vec![ok_button.on_click(), ok_button.render()]
    }
}

pub struct WebDialog;
pub struct WindowsDialog;
pub struct LinuxDialog;

impl Dialog for WebDialog {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(HtmlButton)
    }
}

impl Dialog for WindowsDialog {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }
}

impl Dialog for LinuxDialog {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(LinuxButton)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Windows,
    Linux,
}

impl FromStr for Platform {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "web" => Ok(Platform::Web),
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            other => Err(PatternError::unknown_variant("platform", other)),
        }
    }
}

pub fn dialog_for(platform: Platform) -> Box<dyn Dialog> {
    match platform {
        Platform::Web => Box::new(WebDialog),
        Platform::Windows => Box::new(WindowsDialog),
        Platform::Linux => Box::new(LinuxDialog),
    }
}

// ---------------------------------------------------------------------------
// Logistics
// ---------------------------------------------------------------------------

pub trait Transport {
    fn deliver(&self) -> String;
}

pub struct Truck;
pub struct Train;
pub struct Ship;

impl Transport for Truck {
    fn deliver(&self) -> String {
        "🚚 Delivering by truck.".to_string()
    }
}

impl Transport for Train {
    fn deliver(&self) -> String {
        "🚂 Delivering by train.".to_string()
    }
}

impl Transport for Ship {
    fn deliver(&self) -> String {
        "🚢 Delivering by ship.".to_string()
    }
}

pub trait LogisticsCreator {
    fn create_transport(&self) -> Box<dyn Transport>;

    fn plan_delivery(&self) -> String {
        self.create_transport().deliver()
    }
}

pub struct RoadLogistics;
pub struct RailLogistics;
pub struct SeaLogistics;

impl LogisticsCreator for RoadLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Truck)
    }
}

impl LogisticsCreator for RailLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Train)
    }
}

impl LogisticsCreator for SeaLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Ship)
    }
}

// ---------------------------------------------------------------------------
// Payment gateways
// ---------------------------------------------------------------------------

pub trait PaymentGateway {
    fn pay(&self, amount: f64) -> String;
}

pub struct StripePaymentGateway;
pub struct PaypalPaymentGateway;
pub struct ApplePayPaymentGateway;

impl PaymentGateway for StripePaymentGateway {
    fn pay(&self, amount: f64) -> String {
        format!("{amount} processed by Stripe")
    }
}

impl PaymentGateway for PaypalPaymentGateway {
    fn pay(&self, amount: f64) -> String {
        format!("{amount} processed by PayPal")
    }
}

impl PaymentGateway for ApplePayPaymentGateway {
    fn pay(&self, amount: f64) -> String {
        format!("{amount} processed by Apple Pay")
    }
}

pub type GatewayRegistry = ProviderRegistry<dyn PaymentGateway>;

/// Registry with the `stripe`, `paypal` and `applePay` gateways.
pub fn default_gateways() -> GatewayRegistry {
    let mut registry = GatewayRegistry::new("payment provider");
    registry
        .register("stripe", || Box::new(StripePaymentGateway))
        .register("paypal", || Box::new(PaypalPaymentGateway))
        .register("applePay", || Box::new(ApplePayPaymentGateway));
    registry
}

pub fn checkout(gateways: &GatewayRegistry, amount: f64, provider: &str) -> Result<String> {
    let gateway = gateways.resolve(provider)?;
    Ok(gateway.pay(amount))
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub platform: String,
    pub email: String,
    pub password_digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    pub record_id: Uuid,
    pub platform: String,
    pub email: String,
    pub welcome: String,
}

/// Owns the signup flow; concrete platforms only decide how users are made.
pub trait AuthFactory {
    fn platform(&self) -> &'static str;

    fn create_user(&self, email: &str, password_digest: String) -> User;

    fn signup(&self, email: &str, password: &str) -> SignupReceipt {
        validate_email(email);
        let digest = encrypt_password(password);
        let user = self.create_user(email, digest);
        let record_id = save_to_database(&user);
        let welcome = welcome_message(&user);

        SignupReceipt {
            record_id,
            platform: user.platform,
            email: user.email,
            welcome,
        }
    }
}

/// Flags addresses that do not look like `local@domain`. Signup goes ahead
/// either way.
fn validate_email(email: &str) -> bool {
    let looks_valid = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    );
    if !looks_valid {
        warn!(email, "signing up with an unusual email address");
    }
    looks_valid
}

fn encrypt_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

fn save_to_database(user: &User) -> Uuid {
    let record_id = Uuid::new_v4();
    debug!(platform = %user.platform, %record_id, "saved user");
    record_id
}

fn welcome_message(user: &User) -> String {
    format!("Welcome to {}, {}!", user.platform, user.email)
}

pub struct NaverAuthFactory;
pub struct KakaoAuthFactory;
pub struct GoogleAuthFactory;

impl AuthFactory for NaverAuthFactory {
    fn platform(&self) -> &'static str {
        "Naver"
    }
    fn create_user(&self, email: &str, password_digest: String) -> User {
        User {
            platform: self.platform().to_string(),
            email: email.to_string(),
            password_digest,
        }
    }
}

impl AuthFactory for KakaoAuthFactory {
    fn platform(&self) -> &'static str {
        "Kakao"
    }
    fn create_user(&self, email: &str, password_digest: String) -> User {
        User {
            platform: self.platform().to_string(),
            email: email.to_string(),
            password_digest,
        }
    }
}

impl AuthFactory for GoogleAuthFactory {
    fn platform(&self) -> &'static str {
        "Google"
    }
    fn create_user(&self, email: &str, password_digest: String) -> User {
        User {
            platform: self.platform().to_string(),
            // Google addresses are case-insensitive.
            email: email.to_lowercase(),
            password_digest,
        }
    }
}

/// Auth platforms available for signup. Only `Naver` ships registered.
pub struct AuthRegistry {
    factories: ProviderRegistry<dyn AuthFactory>,
}

impl AuthRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            factories: ProviderRegistry::new("auth platform"),
        };
        registry.register("Naver", || Box::new(NaverAuthFactory));
        registry
    }

    /// Adds (or replaces) the platform served under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn AuthFactory> + Send + Sync + 'static,
    {
        self.factories.register(name, constructor);
        self
    }

    pub fn register_kakao(&mut self) -> &mut Self {
        self.register("Kakao", || Box::new(KakaoAuthFactory))
    }

    pub fn register_google(&mut self) -> &mut Self {
        self.register("Google", || Box::new(GoogleAuthFactory))
    }

    pub fn get_auth_factory(&self, platform: &str) -> Result<Box<dyn AuthFactory>> {
        self.factories.resolve(platform)
    }

    pub fn platforms(&self) -> Vec<&str> {
        self.factories.variants()
    }
}

pub fn demonstrate(narrator: &mut dyn Narrator, _settings: &GlobalSettings) -> Result<()> {
    narrator.heading("🏭 Factory Method");

    narrator.line("--- Dialogs ---");
    for platform in [Platform::Web, Platform::Windows, Platform::Linux] {
        narrator.lines(&dialog_for(platform).render_dialog());
    }
    narrator.blank();

    narrator.line("--- Logistics ---");
    let creators: [&dyn LogisticsCreator; 3] = [&RoadLogistics, &RailLogistics, &SeaLogistics];
    for creator in creators {
        narrator.line(&creator.plan_delivery());
    }
    narrator.blank();

    narrator.line("--- Payment gateways ---");
    let gateways = default_gateways();
    for (amount, provider) in [(100.0, "stripe"), (200.0, "paypal"), (300.0, "applePay")] {
        narrator.line(&checkout(&gateways, amount, provider)?);
    }
    narrator.blank();

    narrator.line("--- Signup ---");
    let mut auth = AuthRegistry::with_defaults();
    let receipt = auth.get_auth_factory("Naver")?.signup("joe", "123");
    info!(platform = %receipt.platform, "signup completed");
    narrator.line(&format!(
        "user {{ platform: {}, email: {} }}",
        receipt.platform, receipt.email
    ));
    narrator.line(&receipt.welcome);

    if let Err(err) = auth.get_auth_factory("Kakao") {
        narrator.line(&format!("Kakao before registration: {err}"));
    }
    auth.register_kakao();
    let receipt = auth.get_auth_factory("Kakao")?.signup("joe@kakao.com", "123");
    narrator.line(&receipt.welcome);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_clicks_then_renders() {
        assert_eq!(
            WebDialog.render_dialog(),
            vec!["html button clicked", "html button rendered"]
        );
        assert_eq!(
            dialog_for("windows".parse().unwrap()).render_dialog()[1],
            "windows button rendered"
        );
        assert!("macos".parse::<Platform>().is_err());
    }

    #[test]
    fn test_logistics_creators_pick_their_transport() {
        assert!(RoadLogistics.plan_delivery().contains("truck"));
        assert!(RailLogistics.plan_delivery().contains("train"));
        assert!(SeaLogistics.plan_delivery().contains("ship"));
    }

    #[test]
    fn test_checkout_through_each_registered_gateway() {
        let gateways = default_gateways();
        assert_eq!(gateways.variants(), vec!["applePay", "paypal", "stripe"]);
        assert_eq!(
            checkout(&gateways, 100.0, "stripe").unwrap(),
            "100 processed by Stripe"
        );
        assert!(checkout(&gateways, 300.0, "applePay").unwrap().contains("Apple Pay"));
    }

    #[test]
    fn test_checkout_with_unknown_gateway_fails() {
        let err = checkout(&default_gateways(), 10.0, "venmo").unwrap_err();
        assert_eq!(err, PatternError::unknown_variant("payment provider", "venmo"));
    }

    #[test]
    fn test_signup_through_naver() {
        let auth = AuthRegistry::with_defaults();
        let receipt = auth
            .get_auth_factory("Naver")
            .unwrap()
            .signup("joe@naver.com", "123");
        assert_eq!(receipt.platform, "Naver");
        assert_eq!(receipt.email, "joe@naver.com");
        assert_eq!(receipt.welcome, "Welcome to Naver, joe@naver.com!");
        assert!(!receipt.record_id.is_nil());
    }

    #[test]
    fn test_kakao_unknown_until_registered() {
        let mut auth = AuthRegistry::with_defaults();
        let err = auth.get_auth_factory("Kakao").err().unwrap();
        assert_eq!(err, PatternError::unknown_variant("auth platform", "Kakao"));

        auth.register_kakao().register_google();
        assert_eq!(auth.platforms(), vec!["Google", "Kakao", "Naver"]);
        let receipt = auth
            .get_auth_factory("Google")
            .unwrap()
            .signup("Joe@Gmail.com", "pw");
        assert_eq!(receipt.email, "joe@gmail.com");
    }

    #[test]
    fn test_signup_accepts_bare_names() {
        let receipt = AuthRegistry::with_defaults()
            .get_auth_factory("Naver")
            .unwrap()
            .signup("joe", "123");
        assert_eq!(receipt.email, "joe");
        assert_eq!(receipt.welcome, "Welcome to Naver, joe!");

        assert!(validate_email("joe@naver.com"));
        assert!(!validate_email("joe"));
        assert!(!validate_email("a@@b"));
        assert!(!validate_email("@naver.com"));
    }

    #[test]
    fn test_new_platform_added_by_registration() {
        struct LineAuthFactory;
        impl AuthFactory for LineAuthFactory {
            fn platform(&self) -> &'static str {
                "Line"
            }
            fn create_user(&self, email: &str, password_digest: String) -> User {
                User {
                    platform: self.platform().to_string(),
                    email: email.to_string(),
                    password_digest,
                }
            }
        }

        let mut auth = AuthRegistry::with_defaults();
        assert!(auth.get_auth_factory("Line").is_err());

        auth.register("Line", || Box::new(LineAuthFactory));
        assert_eq!(auth.platforms(), vec!["Line", "Naver"]);
        let receipt = auth.get_auth_factory("Line").unwrap().signup("joe@line.me", "pw");
        assert_eq!(receipt.welcome, "Welcome to Line, joe@line.me!");
    }

    #[test]
    fn test_password_is_digested() {
        let user = NaverAuthFactory.create_user("a@b.c", encrypt_password("123"));
        assert_eq!(user.password_digest.len(), 64);
        assert_ne!(user.password_digest, "123");
    }
}
