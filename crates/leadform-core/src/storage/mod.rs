//! Draft persistence.
//!
//! `SlotStore` is the port implemented in leadform-infra; `DraftStore` maps
//! the draft onto one slot and `DraftWriter` debounces writes to it.

pub mod draft_store;
pub mod slot_store;
pub mod writer;
