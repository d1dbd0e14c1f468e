//! Lead form logic: validators, the step state machine, step controllers,
//! draft persistence and address resolution.
//!
//! Storage and the address service are ports (`SlotStore`, `AddressService`)
//! implemented in `leadform-infra`. Nothing in this crate touches the
//! filesystem or the network directly.

pub mod address;
pub mod machine;
pub mod session;
pub mod steps;
pub mod storage;
pub mod validation;
