// This file is the module declaration file for the `patterns` module.
// Each sub-module renders one pattern as a small class hierarchy plus a
// `demonstrate` function that narrates it through a `Narrator`.

// `abstract_factory` module:
// Furniture and data-access families. A factory only produces members of its
// own family, and `UserService` depends on the capability traits alone.
pub mod abstract_factory;

// `adapter` module:
// The XML stock feed adapted onto a JSON-only analyzer, Stripe and PayPal
// adapted onto one `PaymentProcessor`, and a Korean plug on a Japanese socket.
pub mod adapter;

// `builder` module:
// House builders with a director, and a chaining user builder. Every
// `get_result` hands the product over and resets the builder.
pub mod builder;

// `factory_method` module:
// Dialogs, logistics, registry-resolved payment gateways, and the signup flow
// whose user creation is left to each auth platform.
pub mod factory_method;

// `prototype` module:
// Documents and profiles cloned out of a keyed `PrototypeRegistry`.
pub mod prototype;

pub mod singleton;
pub mod template_method;
