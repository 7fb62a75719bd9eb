pub mod flat_rate;
pub mod in_memory;
