//! Prompts for LLM framework extraction

/// System prompt for framework extraction
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a compliance analyst. Your task is to extract a structured control framework from an unstructured compliance document.

## Rules

1. Extract only controls that are actually stated in the document. Do not invent controls, categories, or identifiers.
2. Preserve the document's own control identifiers when present; otherwise derive sequential identifiers within each category.
3. Classify each control as one of: "technical", "operational", "management".
4. Assign criticality only when the document states or clearly implies it: one of "low", "medium", "high", "critical".

## Output Requirements

- `name` is the framework's own name; `version` is its stated version (empty string if unknown)
- `description` is a one-sentence summary of the framework's scope
- Each control carries its identifier, category, short title, and the requirement text as its description
- Omit `criticality` entirely when the document gives no signal
- Return an empty controls array if the document contains no identifiable controls"#;

/// Build the extraction prompt from raw document text
pub fn build_extraction_prompt(document: &str) -> String {
    format!(
        r#"Extract the control framework from the following document.

## Document Content

{}

---

Extract the control framework per your instructions. Return an empty controls array if the document contains no identifiable controls."#,
        document
    )
}
