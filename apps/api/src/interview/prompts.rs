// Interview LLM prompt templates and fixed candidate-facing strings.
// The fixed strings are part of the wire contract: clients and tests match
// them verbatim.

pub const INTERVIEWER_SYSTEM: &str = "\
You are a professional, supportive AI interview agent conducting a mock \
job interview. On each turn you receive the conversation so far, ending \
with the candidate's latest answer. Reply with exactly one next interview \
question and nothing else. \
Balance behavioral and technical questions over the course of the \
interview, build on what the candidate has already said, and never repeat \
a question that was already asked. \
Always keep a warm, professional tone.";

/// Fixed opening prompt while no real answer is on record.
pub const ROLE_PROMPT: &str = "Which role are you applying for?";

/// Fixed second prompt after the role answer.
pub const INTRO_PROMPT: &str =
    "Please give me a brief introduction of your previous work experience, education, and key skills.";

/// Reply when the candidate stays silent or asks to skip in an adaptive turn.
pub const MOVE_ON_PROMPT: &str = "Let's move on to the next question.";

/// Reply when the candidate asks to be taught the answer.
pub const TEACH_REFUSAL: &str = "\
I can't explain the answer during the interview, but I'd love to hear how \
you would approach it. Walk me through your thinking.";

/// Frames the previous question as a simpler restatement.
pub fn simplified_question(question: &str) -> String {
    format!("Let me put that more simply: {question}")
}
