//! Fixed texts: the system instruction injected at the gateway and the canned replies.

static SYSTEM_PROMPT: &str = include_str!("../config/system_prompt.md");

/// Source tag on the reply served when every model in the chain failed.
pub const STATIC_FALLBACK_SOURCE: &str = "static-fallback";

/// Reply served when every model in the chain failed.
pub const STATIC_FALLBACK_CONTENT: &str = "Sawubona! Molo! Hallo! Hello! Dumela! I'm EquiED, your Equidistributed Salary Aide. I'm currently experiencing connection issues with my knowledge base. Here's what I can tell you about the Equidistributed Salary model:

The National Equidistributed Salary represents a theoretical economic model where a nation's monetary resources are uniformly distributed among its populace through the National or Central Bank. In South Africa, this would amount to approximately R135,000 per person per month, which is higher than what the current top 5% earn.

This is not a traditional salary that adds up over time, but rather a continuously redistributed amount facilitated by smart contracts. The distribution happens potentially every millisecond, making the stated amount more of a monthly average.

Please try asking a more specific question, or check back later when our connection is restored.";

/// Reply body content when the inbound request could not be parsed.
pub const REQUEST_ERROR_CONTENT: &str = "Hello and welcome. I'm EquiED, your Equidistributed Salary Aide. I apologize, but I'm having trouble connecting to my knowledge base right now. Please try again in a moment.";

/// Client-side apology appended when the gateway could not be reached.
pub const CLIENT_ERROR_CONTENT: &str = "I'm sorry, I encountered an error processing your request. Please try again or use the Quick Facts feature while we resolve this issue.";

/// First message of every conversation.
pub const WELCOME_CONTENT: &str = "Sawubona! Molo! Hallo! Hello! Dumela!

I'm EquiED, your Equidistributed Salary Aide. I can communicate in all South African languages, so feel free to ask questions in the language you're most comfortable with.

What would you like to know about the National Equidistributed Salary model?";

/// Question posed by `/concerns`.
pub const CONCERNS_CONTENT: &str = "What is it about South Africa or your country that is currently your issue or concern about the system?";

/// The system instruction sent as the first provider message.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT.trim_end()
}
