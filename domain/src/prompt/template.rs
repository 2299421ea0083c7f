//! Prompt templates for analysis and follow-up questions

use super::language::OutputLanguage;
use crate::analysis::request::AnalysisRequest;
use crate::chat::entities::ChatMessage;
use crate::chat::history::flatten;

/// Templates for generating prompts sent to the generation service
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for the structured analysis call.
    ///
    /// Dataset and scope are embedded verbatim. The response shape itself
    /// travels separately as the declared schema.
    pub fn analysis_prompt(request: &AnalysisRequest, language: &OutputLanguage) -> String {
        let ambition = request.ambition();

        format!(
            r#"Act as a Senior Full-Stack Developer and Data Analyst Expert.

Analyze the following raw data (CSV/Text format):
"{dataset}"

My Job Description (JD) is:
"{scope}"

STRICT CONSTRAINT: All suggestions and tools MUST fall within the scope of my JD. Do not suggest tasks that belong to other departments unless it's a collaborative tool I can build.

Goal: Create an analysis report with a "Wow Factor" of {level}%.
{instruction}

Output Language: {language}

Return the result strictly in JSON format."#,
            dataset = request.dataset_text(),
            scope = request.scope_text(),
            level = ambition.value(),
            instruction = ambition.instruction(),
            language = language.label(),
        )
    }

    /// Prompt for a free-text follow-up question.
    ///
    /// `history` must already be windowed by the caller.
    pub fn follow_up_prompt(
        question: &str,
        dataset_text: &str,
        scope_text: &str,
        history: &[ChatMessage],
        language: &OutputLanguage,
    ) -> String {
        format!(
            r#"Context:
You are an expert Data Analyst & Senior Full-Stack Developer.
You have already analyzed a dataset. Now the user is asking follow-up questions.

Raw Data:
"{dataset}"

User's JD (Scope Constraint):
"{scope}"

Conversation History:
{history}

Current Question:
"{question}"

Instructions:
1. Answer based strictly on the data provided.
2. Keep the tone professional and helpful.
3. If suggesting technical solutions, ensure they fit the JD.
4. Answer in {language}."#,
            dataset = dataset_text,
            scope = scope_text,
            history = flatten(history),
            question = question,
            language = language.name(),
        )
    }
}
