mod analysis;
mod chat;
mod prompt;
mod report;
mod symptom_query;

pub use analysis::*;
pub use chat::*;
pub use prompt::*;
pub use report::*;
pub use symptom_query::*;
