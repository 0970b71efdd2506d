mod analyze_report;
mod analyze_symptoms;
mod completion_timeout;
mod health_chat;
mod list_analyses;
#[cfg(test)]
mod test_support;

pub use analyze_report::*;
pub use analyze_symptoms::*;
pub use completion_timeout::DEFAULT_REQUEST_TIMEOUT;
pub use health_chat::*;
pub use list_analyses::*;
