//! Domain model: money, order drafts, total aggregates, tax line items, and
//! the ports through which external collaborators are reached.

pub mod draft;
pub mod money;
pub mod ports;
pub mod tax;
pub mod total;
