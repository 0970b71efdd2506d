use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Analyze a set of symptoms
    Analyze {
        /// Symptom to analyze (repeat for several)
        #[arg(short, long = "symptom", required = true)]
        symptoms: Vec<String>,

        #[arg(long)]
        age: i64,

        /// male, female or other
        #[arg(long)]
        gender: String,

        /// How long the symptoms have been present
        #[arg(long, default_value = "")]
        duration: String,

        /// mild, moderate or severe
        #[arg(long, default_value = "")]
        severity: String,

        /// Relevant medical history
        #[arg(long)]
        history: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Summarize a medical report PDF
    Report {
        path: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Interactive health chat; reads one message per line from stdin
    Chat,
}
