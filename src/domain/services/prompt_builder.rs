use crate::domain::{ChatContext, ChatTurn, Prompt, SymptomQuery};

/// Maximum number of characters of extracted report text sent to the model.
pub const MAX_REPORT_CHARS: usize = 4000;

/// System instruction for symptom analysis. Describes the JSON shape the
/// response normalizer expects back.
const ANALYSIS_SYSTEM_PROMPT: &str = "\
You are a helpful medical AI assistant. You provide preliminary health information \
based on symptoms described.

IMPORTANT DISCLAIMERS:
- You are NOT a replacement for professional medical advice
- Always recommend consulting a healthcare provider for proper diagnosis
- In case of emergency symptoms, advise immediate medical attention
- Provide educational information only";

const REPORT_SYSTEM_PROMPT: &str = "\
You are a helpful medical AI assistant who explains medical documents to patients \
in plain language. You never diagnose and always encourage patients to review \
results with their healthcare provider.";

const CHAT_SYSTEM_PROMPT: &str = "\
You are a supportive health information assistant. You give evidence-based, \
empathetic answers, avoid definitive diagnoses and recommend professional \
consultation when appropriate.";

const ANALYSIS_SCHEMA: &str = "\
Respond ONLY with a JSON object, no prose and no markdown, with these fields:
- \"preliminary_assessment\": string, a brief overview of the symptoms
- \"possible_conditions\": array of objects {\"name\": string, \"likelihood\": string, \"description\": string}
- \"recommendations\": array of strings, actionable advice
- \"urgency_level\": one of \"low\", \"moderate\", \"high\", \"emergency\"
- \"when_to_seek_help\": string, specific warning signs to watch for";

const REPORT_SCHEMA: &str = "\
Respond in plain text, in a way that is accessible to someone without medical \
training. Do not return JSON.";

const CHAT_SCHEMA: &str = "\
Respond in plain text as the assistant's next message only. Do not repeat the \
conversation and do not return JSON.";

/// Builds completion prompts from typed input.
///
/// Every builder is a pure function of its arguments: the same input always
/// yields byte-identical prompt text.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn symptoms(query: &SymptomQuery) -> Prompt {
        let body = format!(
            "Please analyze the following health symptoms and provide a structured assessment.

Patient Information:
- Age: {age} years old
- Gender: {gender}
- Medical History: {history}

Symptoms:
{symptoms}

Duration: {duration}
Severity: {severity}

Please provide:
1. A preliminary assessment of these symptoms
2. Possible conditions that could cause these symptoms (with likelihood)
3. Recommended next steps
4. Urgency level (low/moderate/high/emergency)
5. Warning signs that would require immediate medical attention

Remember: this is for educational purposes only and not a medical diagnosis.

{schema}",
            age = query.age(),
            gender = query.gender(),
            history = query.medical_history().unwrap_or("None provided"),
            symptoms = query.symptoms().join(", "),
            duration = or_unspecified(query.duration()),
            severity = or_unspecified(query.severity()),
            schema = ANALYSIS_SCHEMA,
        );

        Prompt::new(ANALYSIS_SYSTEM_PROMPT, body)
    }

    pub fn report(extracted_text: &str) -> Prompt {
        let body = format!(
            "Please analyze the following medical report and provide a patient-friendly summary.

Medical Report Content:
{content}

Please provide:
1. A clear, easy-to-understand summary of the report findings
2. Key health indicators and what they mean
3. Any abnormal values and their significance
4. Recommended follow-up actions
5. Questions the patient might want to ask their doctor

{schema}",
            content = truncate_chars(extracted_text.trim(), MAX_REPORT_CHARS),
            schema = REPORT_SCHEMA,
        );

        Prompt::new(REPORT_SYSTEM_PROMPT, body)
    }

    /// Prior context is replayed verbatim, then the new user turn is appended.
    pub fn chat(turn: &ChatTurn, context: &ChatContext) -> Prompt {
        let history = if context.is_empty() {
            "None".to_string()
        } else {
            context.transcript()
        };

        let body = format!(
            "Previous conversation:
{history}

{turn}

Please provide helpful, accurate health information while:
1. Being empathetic and supportive
2. Providing evidence-based information
3. Recommending professional consultation when appropriate
4. Avoiding definitive diagnoses

{schema}",
            history = history,
            turn = turn.transcript_line(),
            schema = CHAT_SCHEMA,
        );

        Prompt::new(CHAT_SYSTEM_PROMPT, body)
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        "Not specified"
    } else {
        value
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
