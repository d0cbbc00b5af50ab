//! Prompt templates for the search round-trip

/// Prefix of the turn the driver types into the host's composer.
pub const RESUBMISSION_MARKER: &str = "Exa Search (AI Decision: YES)";

/// Templates for the rewritten turns at each step of a round-trip
pub struct PromptTemplate;

impl PromptTemplate {
    /// Decision prompt, sent in place of the user's turn on `Idle -> AwaitingDecision`.
    ///
    /// `transcript` is the full conversation including the latest turn, one
    /// turn per line.
    pub fn decision(transcript: &str) -> String {
        format!(
            r#"Please analyze the following full conversation history:
{}

Based on the above dialogue, determine whether the user's latest query requires a web search to answer effectively.
If a web search is required, reply ONLY with: SEARCH_KEYWORDS: [comma,separated,terms]
If no web search is needed, provide a direct answer to the user's query, and ensure your reply begins with "NO_SEARCH_NEEDED: " (with a space after the colon). For example: "NO_SEARCH_NEEDED: It is 3 PM in London now.""#,
            transcript
        )
    }

    /// Synthesis prompt, sent in place of the keyword turn once results arrived.
    pub fn synthesis(
        prior_history: Option<&str>,
        original_query: &str,
        keywords: &str,
        results: &str,
    ) -> String {
        let history = prior_history
            .filter(|h| !h.is_empty())
            .map(|h| format!("Conversation history prior to this query:\n{}\n\n", h))
            .unwrap_or_default();

        format!(
            r#"{}Latest user query: "{}"
Exa search keywords: "{}"

Web search results:
{}

Please answer the user's query using the above conversation history, latest query, and web search results."#,
            history, original_query, keywords, results
        )
    }

    /// Fallback prompt, used when the search failed or returned nothing.
    pub fn fallback(original_query: &str, keywords: &str) -> String {
        format!(
            r#"Original Query: "{}"
Web search for keywords "{}" was attempted but failed or returned no results. Please answer the original query to the best of your ability using your existing knowledge."#,
            original_query, keywords
        )
    }

    /// Turn the driver submits through the host so the interceptor sees a
    /// second request.
    pub fn resubmission_turn(keywords: &str) -> String {
        format!("{}. Keywords: {}", RESUBMISSION_MARKER, keywords)
    }
}
