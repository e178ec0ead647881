// All prompt constants for the match-analysis pipeline.
// Replace the `{placeholder}` markers before sending.

/// Match prompt for the OpenAI backend.
/// Replace `{resume_text}` and `{job_desc_text}` before sending.
pub const OPENAI_MATCH_PROMPT_TEMPLATE: &str = r#"Resume:
{resume_text}

Job Description:
{job_desc_text}

Match this resume to the job description. Provide percentage scores in this format:
- Skills: XX%
- Experience: XX%
- Education: XX%
- Overall: XX%

Then explain the match."#;

/// Match prompt for the Claude backend.
/// Replace `{resume_text}` and `{job_desc_text}` before sending.
pub const CLAUDE_MATCH_PROMPT_TEMPLATE: &str = r#"Resume:
{resume_text}

Job Description:
{job_desc_text}

Match this resume to the job. Provide match percentages in this format:
- Skills: XX%
- Experience: XX%
- Education: XX%
- Overall: XX%

Then briefly explain the match."#;

/// Improvement-suggestion prompt, shared by both backends.
/// Replace `{provider}` and `{analysis_text}` before sending.
/// No output structure is required of the model.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"Resume Analysis from {provider}:
{analysis_text}

Based on this, suggest detailed, actionable improvements to make the resume stronger and improve match scores."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_templates_embed_both_texts_verbatim() {
        let resume = "5 years Python, AWS";
        let jd = "Seeking Python/AWS engineer";
        for template in [OPENAI_MATCH_PROMPT_TEMPLATE, CLAUDE_MATCH_PROMPT_TEMPLATE] {
            let prompt = template
                .replace("{resume_text}", resume)
                .replace("{job_desc_text}", jd);
            assert!(prompt.contains(resume));
            assert!(prompt.contains(jd));
            assert!(!prompt.contains("{resume_text}"));
            assert!(!prompt.contains("{job_desc_text}"));
        }
    }

    #[test]
    fn test_match_templates_instruct_the_four_categories_in_order() {
        for template in [OPENAI_MATCH_PROMPT_TEMPLATE, CLAUDE_MATCH_PROMPT_TEMPLATE] {
            let skills = template.find("- Skills: XX%").unwrap();
            let experience = template.find("- Experience: XX%").unwrap();
            let education = template.find("- Education: XX%").unwrap();
            let overall = template.find("- Overall: XX%").unwrap();
            assert!(skills < experience && experience < education && education < overall);
        }
    }

    #[test]
    fn test_suggestion_template_embeds_prior_analysis() {
        let prompt = SUGGESTION_PROMPT_TEMPLATE
            .replace("{provider}", "OpenAI")
            .replace("{analysis_text}", "- Overall: 70%\nWeak on cloud experience.");
        assert!(prompt.starts_with("Resume Analysis from OpenAI:"));
        assert!(prompt.contains("Weak on cloud experience."));
        assert!(prompt.contains("actionable improvements"));
    }
}
