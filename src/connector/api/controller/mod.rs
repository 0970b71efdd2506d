pub mod analyze_controller;
pub mod chat_controller;
pub mod report_controller;

pub use analyze_controller::AnalyzeController;
pub use chat_controller::ChatController;
pub use report_controller::ReportController;
