//! Prompt construction for remote KPI evaluation
//!
//! The prompt asks the model to be generous: paraphrases and implied
//! competencies count, not only literal KPI names. It pins the response to
//! a four-field JSON object and names the feedback language explicitly.

use crate::types::Language;

/// System message sent ahead of every evaluation prompt
pub const SYSTEM_PROMPT: &str = "You are an expert examiner for professional certification \
exams. You grade open-ended answers by identifying which competencies (KPIs) the answer \
demonstrates. You always reply with a single JSON object and nothing else.";

/// Worked recognition examples, grouped by KPI category
const RECOGNITION_EXAMPLES: &str = r#"Recognize competencies generously. Examples of what COUNTS:
- Leadership: "I coordinated the team", "I took responsibility for the rollout", "ohjasin tiimiä", "vastasin projektista"
- Communication: "I explained the change to the customer", "we held weekly check-ins", "kerroin asiakkaalle", "pidimme palavereja"
- Teamwork / collaboration: "we solved it together", "I helped a colleague", "teimme yhteistyötä", "autoin kollegaa"
- Problem solving: "I found the root cause", "I tried a different approach", "selvitin syyn", "keksin ratkaisun"
- Customer focus: "the client was satisfied", "I listened to what the user needed", "asiakas oli tyytyväinen"
- Risk management: "we prepared a backup plan", "I flagged the issue early", "varauduimme ongelmiin"
- Quality: "I double-checked the results", "we reviewed each other's work", "tarkistin tulokset"
- Time management: "I prioritized the urgent tasks", "we met the deadline", "priorisoin tehtävät", "pysyimme aikataulussa"

An answer does NOT need to use the KPI's exact words. Describing the behavior is enough.
Answers may be written in Finnish or English; judge both the same way."#;

/// Build the user prompt for one evaluation
pub fn build_evaluation_prompt(
    answer_text: &str,
    target_kpis: &[String],
    language: Language,
    extra_criteria: &[String],
) -> String {
    let kpi_list = target_kpis
        .iter()
        .map(|kpi| format!("- {}", kpi))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        r#"Evaluate the following exam answer.

ANSWER:
"""
{answer}
"""

KPIs TO LOOK FOR:
{kpis}

{examples}

SCORING:
- 3 points: 3 or more KPIs detected
- 2 points: 2 KPIs detected
- 1 point: 1 KPI detected
- 0 points: no KPIs detected
"#,
        answer = answer_text,
        kpis = kpi_list,
        examples = RECOGNITION_EXAMPLES,
    );

    let criteria: Vec<&str> = extra_criteria
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if !criteria.is_empty() {
        prompt.push_str("\nADDITIONAL EVALUATION CRITERIA:\n");
        for criterion in criteria {
            prompt.push_str("- ");
            prompt.push_str(criterion);
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!(
        r#"
Use the KPI names exactly as listed above. Every listed KPI must appear in exactly one of
"detected_kpis" or "missing_kpis".

Write the "feedback" field in {language}: two or three encouraging sentences that name what
the answer did well and what it should add.

Respond with ONLY this JSON object:
{{"detected_kpis": ["..."], "missing_kpis": ["..."], "score": 0, "feedback": "..."}}"#,
        language = language.prompt_name(),
    ));

    prompt
}
