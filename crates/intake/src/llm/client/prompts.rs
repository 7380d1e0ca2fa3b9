//! Default LLM prompts for resume field extraction.

/// Default prompt for extracting candidate fields (uses the {content} placeholder).
pub const DEFAULT_EXTRACTION_PROMPT: &str = r#"You extract contact details from resumes. Read the resume text below and return ONE JSON object with exactly these keys:

- "name": the candidate's full name
- "email": the candidate's email address (comma-separate if several)
- "phone": the candidate's phone number (comma-separate if several)
- "experience": total years of professional experience as a number

Use an empty string for anything that is not present. Do NOT guess, do NOT add other keys, and do NOT wrap the object in prose or markdown.

Resume text:
"""
{content}
"""

JSON:"#;
