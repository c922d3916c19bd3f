//! Adapters that let existing services be used through the interface a
//! client already expects.

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::core::config::GlobalSettings;
use crate::core::error::{PatternError, Result};
use crate::core::narrator::Narrator;

// ---------------------------------------------------------------------------
// Stock monitoring
// ---------------------------------------------------------------------------

/// The interface the monitoring app was written against.
pub trait StockDataClient {
    fn get_stock_price(&self, symbol: &str) -> f64;
    fn get_stock_volume(&self, symbol: &str) -> u64;
    fn get_stock_change(&self, symbol: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub price: f64,
    pub volume: u64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub price: f64,
    pub volume: u64,
    pub change: f64,
    pub analysis: String,
}

/// Third-party analyzer that only understands JSON payloads.
#[derive(Debug, Clone)]
pub struct ThirdPartyStockAnalyzer {
    stock_data: HashMap<String, StockQuote>,
}

impl ThirdPartyStockAnalyzer {
    /// Analyzer seeded with AAPL, GOOGL and MSFT.
    pub fn new() -> Self {
        Self::with_data([
            (
                "AAPL",
                StockQuote {
                    price: 150.25,
                    volume: 1_000_000,
                    change: 2.5,
                },
            ),
            (
                "GOOGL",
                StockQuote {
                    price: 2750.8,
                    volume: 500_000,
                    change: -1.2,
                },
            ),
            (
                "MSFT",
                StockQuote {
                    price: 310.45,
                    volume: 750_000,
                    change: 0.8,
                },
            ),
        ])
    }

    pub fn with_data<'a>(quotes: impl IntoIterator<Item = (&'a str, StockQuote)>) -> Self {
        let stock_data = quotes
            .into_iter()
            .map(|(symbol, quote)| (symbol.to_string(), quote))
            .collect();
        Self { stock_data }
    }

    /// Analyzes a JSON payload carrying a `symbol` field.
    ///
    /// Unlike the getters on the adapter, an unregistered symbol is a hard
    /// failure here.
    pub fn analyze_stock_data(&self, json_data: &Value) -> Result<StockAnalysis> {
        let symbol = json_data
            .get("symbol")
            .and_then(Value::as_str)
            .ok_or_else(|| PatternError::InvalidFormat("payload has no symbol".to_string()))?;

        let data = self
            .stock_data
            .get(symbol)
            .ok_or_else(|| PatternError::not_found("stock symbol", symbol))?;

        let direction = if data.change > 0.0 { "up" } else { "down" };
        Ok(StockAnalysis {
            symbol: symbol.to_string(),
            price: data.price,
            volume: data.volume,
            change: data.change,
            analysis: format!("Stock {symbol} is {direction} by {}%", data.change.abs()),
        })
    }

    pub fn get_stock_info(&self, symbol: &str) -> Option<&StockQuote> {
        self.stock_data.get(symbol)
    }
}

impl Default for ThirdPartyStockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Exposes the analyzer through `StockDataClient` and accepts XML input.
pub struct StockDataAdapter {
    analyzer: ThirdPartyStockAnalyzer,
}

impl StockDataAdapter {
    pub fn new(analyzer: ThirdPartyStockAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Converts `<symbol>..</symbol><price>..</price>...` into a JSON object.
    ///
    /// Missing or unparsable numeric fields become 0; a missing symbol is an
    /// error.
    pub fn xml_to_json(&self, xml_data: &str) -> Result<Value> {
        let symbol = extract_tag(&SYMBOL_TAG, xml_data).ok_or_else(|| {
            PatternError::InvalidFormat("Invalid XML format: symbol not found".to_string())
        })?;
        let price = parse_or_zero::<f64>(extract_tag(&PRICE_TAG, xml_data));
        let volume = parse_or_zero::<u64>(extract_tag(&VOLUME_TAG, xml_data));
        let change = parse_or_zero::<f64>(extract_tag(&CHANGE_TAG, xml_data));

        Ok(json!({
            "symbol": symbol,
            "price": price,
            "volume": volume,
            "change": change,
        }))
    }

    pub fn analyze_xml_stock_data(&self, xml_data: &str) -> Result<StockAnalysis> {
        let json_data = self.xml_to_json(xml_data)?;
        debug!(payload = %json_data, "converted XML payload");
        self.analyzer.analyze_stock_data(&json_data)
    }

    fn quote(&self, symbol: &str) -> Option<&StockQuote> {
        let quote = self.analyzer.get_stock_info(symbol);
        if quote.is_none() {
            warn!(symbol, "no stock data, reporting zero");
        }
        quote
    }
}

impl StockDataClient for StockDataAdapter {
    fn get_stock_price(&self, symbol: &str) -> f64 {
        self.quote(symbol).map_or(0.0, |q| q.price)
    }

    fn get_stock_volume(&self, symbol: &str) -> u64 {
        self.quote(symbol).map_or(0, |q| q.volume)
    }

    fn get_stock_change(&self, symbol: &str) -> f64 {
        self.quote(symbol).map_or(0.0, |q| q.change)
    }
}

static SYMBOL_TAG: LazyLock<Regex> = LazyLock::new(|| tag_pattern("symbol"));
static PRICE_TAG: LazyLock<Regex> = LazyLock::new(|| tag_pattern("price"));
static VOLUME_TAG: LazyLock<Regex> = LazyLock::new(|| tag_pattern("volume"));
static CHANGE_TAG: LazyLock<Regex> = LazyLock::new(|| tag_pattern("change"));

fn tag_pattern(tag: &str) -> Regex {
    Regex::new(&format!(r"<{tag}>([^<]+)</{tag}>")).expect("tag names are plain words")
}

fn extract_tag(pattern: &Regex, xml_data: &str) -> Option<String> {
    pattern
        .captures(xml_data)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn parse_or_zero<T: FromStr + Default>(raw: Option<String>) -> T {
    raw.and_then(|value| value.parse().ok()).unwrap_or_default()
}

/// Formats an integer with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn signed(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{sign}{change:.2}%")
}

/// The monitoring app; it only knows `StockDataClient`.
pub struct StockMarketApp<C: StockDataClient> {
    stock_client: C,
}

impl<C: StockDataClient> StockMarketApp<C> {
    pub fn new(stock_client: C) -> Self {
        Self { stock_client }
    }

    pub fn client(&self) -> &C {
        &self.stock_client
    }

    pub fn display_stock_info(&self, symbol: &str) -> Vec<String> {
        let price = self.stock_client.get_stock_price(symbol);
        let volume = self.stock_client.get_stock_volume(symbol);
        let change = self.stock_client.get_stock_change(symbol);

        vec![
            format!("=== {symbol} Stock Information ==="),
            format!("Price: ${price:.2}"),
            format!("Volume: {}", group_thousands(volume)),
            format!("Change: {}", signed(change)),
            "===============================".to_string(),
        ]
    }

    pub fn generate_chart(&self, symbol: &str) -> Vec<String> {
        let price = self.stock_client.get_stock_price(symbol);
        let change = self.stock_client.get_stock_change(symbol);
        let marker = if change > 0.0 { "🟢" } else { "🔴" };

        vec![
            format!("📊 Chart for {symbol}:"),
            format!("💰 Current Price: ${price:.2}"),
            format!("📈 Change: {marker} {}", signed(change)),
        ]
    }
}

// ---------------------------------------------------------------------------
// Payment processors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundResult {
    pub success: bool,
    pub refund_id: String,
    pub message: String,
}

/// The payment interface the checkout flow expects.
pub trait PaymentProcessor {
    fn process_payment(&self, amount: f64, currency: &str) -> PaymentResult;
    fn refund(&self, transaction_id: &str) -> RefundResult;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeCharge {
    pub id: String,
    pub status: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeRefund {
    pub id: String,
    pub status: String,
}

/// Stripe works in cents.
pub struct StripePaymentService;

impl StripePaymentService {
    pub fn charge(&self, amount_in_cents: u64, currency: &str) -> StripeCharge {
        debug!(amount_in_cents, currency, "Stripe: charging");
        StripeCharge {
            id: format!("stripe_{}", Utc::now().timestamp_millis()),
            status: "succeeded".to_string(),
            amount: amount_in_cents,
        }
    }

    pub fn create_refund(&self, charge_id: &str) -> StripeRefund {
        debug!(charge_id, "Stripe: creating refund");
        StripeRefund {
            id: format!("refund_{}", Utc::now().timestamp_millis()),
            status: "succeeded".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayPalPayment {
    pub payment_id: String,
    pub state: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPalRefund {
    pub refund_id: String,
    pub state: String,
}

/// PayPal works in dollars and reports a `state` rather than a status.
pub struct PayPalPaymentService;

impl PayPalPaymentService {
    pub fn make_payment(&self, dollars: f64, currency_code: &str) -> PayPalPayment {
        debug!(dollars, currency_code, "PayPal: processing");
        PayPalPayment {
            payment_id: format!("PAYPAL-{}", Utc::now().timestamp_millis()),
            state: "approved".to_string(),
            amount: dollars,
        }
    }

    pub fn refund_payment(&self, payment_id: &str) -> PayPalRefund {
        debug!(payment_id, "PayPal: refunding");
        PayPalRefund {
            refund_id: format!("REFUND-{}", Utc::now().timestamp_millis()),
            state: "completed".to_string(),
        }
    }
}

pub struct StripePaymentAdapter {
    stripe_service: StripePaymentService,
}

impl StripePaymentAdapter {
    pub fn new(stripe_service: StripePaymentService) -> Self {
        Self { stripe_service }
    }
}

impl PaymentProcessor for StripePaymentAdapter {
    fn process_payment(&self, amount: f64, currency: &str) -> PaymentResult {
        let amount_in_cents = (amount * 100.0).round() as u64;
        let result = self.stripe_service.charge(amount_in_cents, currency);

        PaymentResult {
            success: result.status == "succeeded",
            message: format!("Stripe payment {}", result.status),
            transaction_id: result.id,
        }
    }

    fn refund(&self, transaction_id: &str) -> RefundResult {
        let result = self.stripe_service.create_refund(transaction_id);

        RefundResult {
            success: result.status == "succeeded",
            message: format!("Refund {}", result.status),
            refund_id: result.id,
        }
    }
}

pub struct PayPalPaymentAdapter {
    paypal_service: PayPalPaymentService,
}

impl PayPalPaymentAdapter {
    pub fn new(paypal_service: PayPalPaymentService) -> Self {
        Self { paypal_service }
    }
}

impl PaymentProcessor for PayPalPaymentAdapter {
    fn process_payment(&self, amount: f64, currency: &str) -> PaymentResult {
        let result = self.paypal_service.make_payment(amount, currency);

        PaymentResult {
            success: result.state == "approved",
            message: format!("PayPal payment {}", result.state),
            transaction_id: result.payment_id,
        }
    }

    fn refund(&self, transaction_id: &str) -> RefundResult {
        let result = self.paypal_service.refund_payment(transaction_id);

        RefundResult {
            success: result.state == "completed",
            message: format!("Refund {}", result.state),
            refund_id: result.refund_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
    Stripe,
    PayPal,
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentProvider::Stripe => write!(f, "stripe"),
            PaymentProvider::PayPal => write!(f, "paypal"),
        }
    }
}

impl FromStr for PaymentProvider {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stripe" => Ok(PaymentProvider::Stripe),
            "paypal" => Ok(PaymentProvider::PayPal),
            other => Err(PatternError::unknown_variant("payment processor", other)),
        }
    }
}

pub fn payment_processor(provider: PaymentProvider) -> Box<dyn PaymentProcessor> {
    match provider {
        PaymentProvider::Stripe => Box::new(StripePaymentAdapter::new(StripePaymentService)),
        PaymentProvider::PayPal => Box::new(PayPalPaymentAdapter::new(PayPalPaymentService)),
    }
}

/// Checkout flow that works with any `PaymentProcessor`.
pub struct PaymentService {
    processor: Box<dyn PaymentProcessor>,
}

impl PaymentService {
    pub fn new(processor: Box<dyn PaymentProcessor>) -> Self {
        Self { processor }
    }

    pub fn checkout(&self, amount: f64, currency: &str) -> String {
        let result = self.processor.process_payment(amount, currency);
        if result.success {
            format!(
                "✓ Payment successful! Transaction ID: {}",
                result.transaction_id
            )
        } else {
            format!("✗ Payment failed: {}", result.message)
        }
    }

    pub fn process_refund(&self, transaction_id: &str) -> String {
        let result = self.processor.refund(transaction_id);
        if result.success {
            format!("✓ Refund successful! Refund ID: {}", result.refund_id)
        } else {
            format!("✗ Refund failed: {}", result.message)
        }
    }
}

// ---------------------------------------------------------------------------
// Power plugs
// ---------------------------------------------------------------------------

pub const KOREAN_PLUG_SHAPE: &str = "Korean round plug";
pub const JAPANESE_PLUG_SHAPE: &str = "Japanese flat plug";

pub trait KoreanPlug {
    fn voltage(&self) -> u32;
    fn shape(&self) -> &'static str;
}

pub struct KoreanPowerPlug;

impl KoreanPlug for KoreanPowerPlug {
    fn voltage(&self) -> u32 {
        220
    }
    fn shape(&self) -> &'static str {
        KOREAN_PLUG_SHAPE
    }
}

/// The external socket; it cannot be modified.
pub struct JapaneseSocket {
    voltage: u32,
    shape: &'static str,
}

impl JapaneseSocket {
    pub fn new() -> Self {
        Self {
            voltage: 100,
            shape: "Japanese flat socket",
        }
    }

    pub fn can_connect(&self, plug_shape: &str) -> bool {
        plug_shape == JAPANESE_PLUG_SHAPE
    }

    pub fn supply_power(&self, plug_shape: &str) -> String {
        if self.can_connect(plug_shape) {
            format!("Japanese socket supplying {}V...", self.voltage)
        } else {
            "Plug shape does not fit! Cannot connect.".to_string()
        }
    }

    pub fn socket_info(&self) -> String {
        format!("{}, {}V", self.shape, self.voltage)
    }
}

impl Default for JapaneseSocket {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PowerAdapter {
    socket: JapaneseSocket,
}

impl PowerAdapter {
    pub fn new(socket: JapaneseSocket) -> Self {
        Self { socket }
    }

    pub fn connect_korean_plug(&self) -> String {
        let adapted_shape = self.shape();
        if self.socket.can_connect(adapted_shape) {
            self.socket.supply_power(adapted_shape)
        } else {
            "Adapter error: cannot connect.".to_string()
        }
    }

    pub fn voltage_info(&self) -> String {
        "Korea 220V → Japan 100V converted".to_string()
    }
}

impl KoreanPlug for PowerAdapter {
    fn voltage(&self) -> u32 {
        100
    }
    fn shape(&self) -> &'static str {
        JAPANESE_PLUG_SHAPE
    }
}

pub fn demonstrate(narrator: &mut dyn Narrator, settings: &GlobalSettings) -> Result<()> {
    narrator.heading("🔌 Adapter");

    narrator.line("--- Stock monitoring ---");
    let app = StockMarketApp::new(StockDataAdapter::new(ThirdPartyStockAnalyzer::new()));
    for symbol in ["AAPL", "GOOGL", "MSFT"] {
        narrator.lines(&app.display_stock_info(symbol));
    }
    for symbol in ["AAPL", "GOOGL"] {
        narrator.lines(&app.generate_chart(symbol));
    }

    let xml_data =
        "<symbol>AAPL</symbol><price>150.25</price><volume>1000000</volume><change>2.5</change>";
    match app.client().analyze_xml_stock_data(xml_data) {
        Ok(analysis) => narrator.line(&format!("XML analysis: {}", analysis.analysis)),
        Err(err) => narrator.line(&format!("XML analysis error: {err}")),
    }
    narrator.blank();

    narrator.line("--- Payment processors ---");
    let currency = settings.default_currency.as_str();
    for (provider, amount, refund_id) in [
        (PaymentProvider::Stripe, 99.99, "stripe_12345"),
        (PaymentProvider::PayPal, 149.5, "PAYPAL-67890"),
    ] {
        let service = PaymentService::new(payment_processor(provider));
        narrator.line(&format!("[{provider}] {amount} {currency}"));
        narrator.line(&service.checkout(amount, currency));
        narrator.line(&service.process_refund(refund_id));
    }
    narrator.blank();

    narrator.line("--- Power plugs ---");
    let socket = JapaneseSocket::new();
    narrator.line(&format!("Socket: {}", socket.socket_info()));
    let plug = KoreanPowerPlug;
    narrator.line(&format!(
        "Direct connection ({}V {}): {}",
        plug.voltage(),
        plug.shape(),
        socket.supply_power(plug.shape())
    ));
    let adapter = PowerAdapter::new(socket);
    narrator.line(&adapter.voltage_info());
    narrator.line(&adapter.connect_korean_plug());

    Ok(())
}
