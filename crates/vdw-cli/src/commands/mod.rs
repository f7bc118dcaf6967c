pub mod eval;
pub mod rules;
