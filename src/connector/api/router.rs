use anyhow::Result;
use tokio::io::BufReader;

use crate::{Commands, SymptomInput};

use super::container::Container;
use super::controller::{AnalyzeController, ChatController, ReportController};

pub struct Router<'a> {
    analyze_controller: AnalyzeController<'a>,
    report_controller: ReportController<'a>,
    chat_controller: ChatController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            analyze_controller: AnalyzeController::new(container),
            report_controller: ReportController::new(container),
            chat_controller: ChatController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Analyze {
                symptoms,
                age,
                gender,
                duration,
                severity,
                history,
                format,
            } => {
                let input = SymptomInput {
                    symptoms,
                    age,
                    gender,
                    duration,
                    severity,
                    medical_history: history,
                };
                self.analyze_controller.analyze(input, format).await
            }
            Commands::Report { path, format } => self.report_controller.report(path, format).await,
            Commands::Chat => {
                let stdin = BufReader::new(tokio::io::stdin());
                let mut stdout = tokio::io::stdout();
                let context = self.chat_controller.chat(stdin, &mut stdout).await?;
                Ok(format!("Chat ended after {} turn(s).", context.len()))
            }
            Commands::Serve { .. } => {
                anyhow::bail!("serve is handled by the HTTP server, not the CLI router")
            }
        }
    }
}
