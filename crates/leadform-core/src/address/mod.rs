//! Address suggestion and resolution.

pub mod parser;
pub mod resolver;
pub mod service;

pub use parser::parse_address_components;
pub use resolver::{AddressResolver, SuggestOutcome};
pub use service::AddressService;
