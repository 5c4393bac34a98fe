// All LLM prompt constants for the Optimization module.

/// System prompt for resume optimization — enforces JSON-only output.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert resume writer and ATS optimization specialist. \
    Rewrite resumes to target a specific role without inventing facts. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT fabricate employers, dates, degrees, or metrics.";

/// Optimization prompt template.
/// Replace: {target_title}, {seniority}, {job_description_section},
///          {notes_section}, {resume_text}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below for the target role.

TARGET ROLE: {target_title} ({seniority})

{job_description_section}{notes_section}Return a JSON object with this EXACT schema (no extra fields):
{
  "optimized_text": "the full rewritten resume in the markdown dialect below",
  "key_changes": ["Reordered experience to lead with platform work"],
  "suggested_skills": ["Kubernetes"],
  "ats_score": 82
}

MARKDOWN DIALECT for optimized_text (nothing else is rendered):
- `# Name` — exactly one title line at the top
- the line directly after the title is the contact line
- `## Section` — section headers (Summary, Experience, Education, Skills)
- `### Subheading` — individual roles or institutions
- `- item` — achievement bullets
- `**text**` — bold emphasis inside a line

RULES:
1. Use ONLY facts present in the original resume — rephrase, reorder, and surface what is already there
2. Mirror the target role's terminology wherever the resume supports it
3. Keep bullets dense and verb-first, one or two printed lines each
4. "ats_score" is an integer 0-100 estimating keyword compatibility with the target role
5. "key_changes" lists the most important edits, ordered by impact
6. "suggested_skills" lists skills worth adding IF the candidate has them — never insert them into the resume yourself

RESUME:
{resume_text}"#;
