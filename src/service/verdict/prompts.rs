//! Prompts for document fraud screening

use crate::model::VerdictRequest;

/// Build the screening instruction for a single document
pub fn build_verdict_prompt(request: &VerdictRequest, suspicion_markers: &[String]) -> String {
    let markers = if suspicion_markers.is_empty() {
        "signs of forgery or inconsistency".to_string()
    } else {
        suspicion_markers
            .iter()
            .map(|m| format!("\"{}\"", m))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"You are a senior compliance officer for a commodities trading platform.
Analyze the following document metadata and context for potential fraud or inconsistencies.

Document Name: {doc_name}
Document Type: {doc_type}
Context/Extracted Text Summary: {context}

Rules:
1. Check if the context mentions {markers}.
2. If it seems valid, return status "Approved".
3. If suspicious, return status "Flagged".
4. Provide a short, professional reason.

Return ONLY a JSON object: {{ "status": "Approved" | "Flagged", "reason": "string" }}"#,
        doc_name = request.doc_name,
        doc_type = request.doc_type,
        context = request.context,
        markers = markers,
    )
}
