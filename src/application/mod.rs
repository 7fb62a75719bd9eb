//! Application layer: the fee's eligibility gate, its tax processor, and the
//! collector that runs both as one step of a draft's total recompute.

pub mod collector;
pub mod eligibility;
pub mod fee_tax;
