//! Fixed instructions sent to the model.

/// Instruction sent alongside every uploaded leaf image.
pub const IMAGE_ANALYSIS_PROMPT: &str = r#"
You are an expert plant pathologist. Analyze the provided image.
First decide whether the image actually shows a plant leaf, then identify the plant and any disease you detect.
Provide your response ONLY in a valid JSON format with the following keys:
- "is_plant_leaf": true if the image shows a plant leaf, otherwise false.
- "plant": The common name of the plant (e.g., "Grapevine").
- "disease": The common name of the disease (e.g., "Black Rot"). If healthy, state "Healthy".
- "description": A brief, one-paragraph description of the disease and its symptoms visible in the image.
- "confidence": Your confidence level as "High", "Medium", or "Low".

Do not include any other text or explanations outside of the JSON object.
"#;

/// Render the treatment plan request for `disease_name`.
pub fn treatment_plan_prompt(disease_name: &str) -> String {
    format!(
        r#"
You are an agricultural advisor. A farmer has identified "{disease_name}" on their plant.
Generate a concise, actionable treatment plan. Structure the plan with the following sections:
1.  **Immediate Actions:** What to do right now (e.g., pruning, isolating plants).
2.  **Organic Solutions:** Safe, organic treatment options.
3.  **Chemical Solutions:** Common and effective fungicides or treatments to recommend.
4.  **Prevention Tips:** How to prevent this issue in the future.

Keep the language clear and easy for a non-expert to understand.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disease_name_is_quoted_into_template() {
        let prompt = treatment_plan_prompt("Black Rot");
        assert!(prompt.contains("\"Black Rot\""));
        assert!(prompt.contains("**Prevention Tips:**"));
    }

    #[test]
    fn braces_in_disease_name_are_kept_literally() {
        let prompt = treatment_plan_prompt("{odd}");
        assert!(prompt.contains("\"{odd}\""));
    }

    #[test]
    fn analysis_prompt_names_every_result_key() {
        for key in ["is_plant_leaf", "plant", "disease", "description", "confidence"] {
            assert!(
                IMAGE_ANALYSIS_PROMPT.contains(&format!("\"{key}\"")),
                "missing {key}"
            );
        }
    }
}
