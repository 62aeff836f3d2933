// Talent matching engine.
// raw HR tables → profiles → 10 rule-based TVs → benchmark median baselines
// → TV/TGV/final match rates → ranked list and comparison views.

pub mod baseline;
pub mod catalog;
pub mod handlers;
pub mod pipeline;
pub mod profile;
pub mod rules;
pub mod scorer;
pub mod views;
