// Rubric judge LLM prompt templates.
// All prompts for the scoring module are defined here.

pub const JUDGE_SYSTEM: &str = "\
You are a precise fact-checking judge for technical interviews. \
You evaluate one candidate answer at a time against a rubric, using resume \
context to check factual grounding when it is provided. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Never invent context that was not provided.";

pub const JUDGE_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate's answer to the interview question below.

--- Interview Question ---
{question}

--- Candidate's Answer ---
{answer}

--- Resume Context (optional) ---
{context}

OUTPUT SCHEMA (return exactly this structure):
{
  "relevance": 0.0 to 1.0,
  "accuracy": 0.0 to 1.0,
  "completeness": 0.0 to 1.0,
  "clarity": 0.0 to 1.0,
  "hallucination": "Valid" | "Speculative" | "Hallucination"
}

RULES:
1. relevance: does the answer address the question that was asked?
2. accuracy: are the factual claims correct, and consistent with the resume context when present?
3. completeness: does the answer cover the substance the question calls for?
4. clarity: is the answer structured and easy to follow?
5. hallucination: "Hallucination" for fabricated claims, "Speculative" for hedged or unverifiable claims, "Valid" otherwise.
6. Return ONLY the JSON object — nothing else, no code fences."#;
