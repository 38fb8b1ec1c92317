mod resolver;
mod table;

pub use resolver::{ActionResult, Failure, Resolver};
pub use table::{AppTarget, Intent, PatternTable, RuleMatch};
