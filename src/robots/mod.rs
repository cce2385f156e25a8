//! Robots.txt handling module
//!
//! This module provides a deliberately minimal robots.txt interpreter: only
//! `User-agent` and `Disallow` directives are understood, and a ruleset is
//! rebuilt from a fresh fetch for every URL checked. Anything that prevents
//! a verdict (unfetchable robots.txt, unparseable origin) resolves to
//! "allowed" — absence of policy is not a block.

mod checker;
mod parser;

pub use checker::RobotsChecker;
pub use parser::RobotsRuleSet;
