mod lsystem;
mod rules;

pub use lsystem::LSystem;
pub use rules::RuleMap;
