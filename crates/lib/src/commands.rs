//! Slash commands and quick facts.
//!
//! Recognized commands are a closed set matched case-insensitively on the trimmed input.
//! Unrecognized `/words` are not commands; they are sent to the model like any text.

use crate::knowledge;
use crate::prompt::CONCERNS_CONTENT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/calculator [total] [population]`, `/calc`
    Calculator(Vec<String>),
    /// `/debug`
    Debug,
    /// `/model`, `/info`
    Model,
    /// `/favorites`, `/saved`
    Favorites,
    /// `/clear`, `/reset`
    Clear,
    /// `/concerns`
    Concerns,
    /// `/help`
    Help,
    /// `/retry`: re-submit the message that failed
    Retry,
    /// `/fav`: toggle favorite on the latest reply
    FavoriteLast,
    /// `/share`: share link for the latest reply
    ShareLast,
    /// `/fact <name>`
    Fact(QuickFact),
    /// `/card <name>`: pre-written summary, no model call
    Card(QuickFact),
}

impl Command {
    /// Parse one line of input. None means "send it to the model".
    pub fn parse(input: &str) -> Option<Command> {
        let mut words = input.split_whitespace();
        let head = words.next()?.to_lowercase();
        let args: Vec<String> = words.map(str::to_string).collect();
        let bare = args.is_empty();
        let cmd = match head.as_str() {
            "/calculator" | "/calc" => Command::Calculator(args),
            "/debug" if bare => Command::Debug,
            "/model" | "/info" if bare => Command::Model,
            "/favorites" | "/saved" if bare => Command::Favorites,
            "/clear" | "/reset" if bare => Command::Clear,
            "/concerns" if bare => Command::Concerns,
            "/help" if bare => Command::Help,
            "/retry" if bare => Command::Retry,
            "/fav" if bare => Command::FavoriteLast,
            "/share" if bare => Command::ShareLast,
            "/fact" if args.len() == 1 => Command::Fact(QuickFact::from_name(&args[0])?),
            "/card" if args.len() == 1 => {
                let fact = QuickFact::from_name(&args[0])?;
                fact.card()?;
                Command::Card(fact)
            }
            _ => return None,
        };
        Some(cmd)
    }
}

/// Canned questions offered from the command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFact {
    Salary,
    Debt,
    Free,
    Enterprise,
    Distribution,
    Education,
    Help,
}

impl QuickFact {
    pub const ALL: [QuickFact; 7] = [
        QuickFact::Salary,
        QuickFact::Debt,
        QuickFact::Free,
        QuickFact::Enterprise,
        QuickFact::Distribution,
        QuickFact::Education,
        QuickFact::Help,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            QuickFact::Salary => "salary",
            QuickFact::Debt => "debt",
            QuickFact::Free => "free",
            QuickFact::Enterprise => "enterprise",
            QuickFact::Distribution => "distribution",
            QuickFact::Education => "education",
            QuickFact::Help => "help",
        }
    }

    /// The question sent to the model.
    pub fn prompt(self) -> &'static str {
        match self {
            QuickFact::Salary => "Tell me about the South African salary calculation",
            QuickFact::Debt => "How long would it take to clear South Africa's national debt?",
            QuickFact::Free => "How do products become free in the Equidistributed Salary model?",
            QuickFact::Enterprise => "Explain the Enterprise Contribution concept",
            QuickFact::Distribution => "How does the continuous redistribution work?",
            QuickFact::Education => "How would education work in the Equidistributed Salary model?",
            QuickFact::Help => "What can you help me with?",
        }
    }

    /// Pre-written summary, for the facts that have one.
    pub fn card(self) -> Option<String> {
        match self {
            QuickFact::Salary => Some(knowledge::salary_card()),
            QuickFact::Debt => Some(knowledge::debt_card()),
            QuickFact::Free => Some(knowledge::free_card()),
            QuickFact::Enterprise => Some(knowledge::enterprise_card()),
            QuickFact::Education => Some(knowledge::education_card()),
            QuickFact::Distribution | QuickFact::Help => None,
        }
    }
}

/// What the `/debug` and `/model` replies report.
#[derive(Debug, Clone)]
pub struct StatusInfo<'a> {
    pub message_count: usize,
    pub last_source: Option<&'a str>,
    pub models: &'a [String],
    pub gateway_url: &'a str,
}

pub fn debug_text(info: &StatusInfo<'_>) -> String {
    format!(
        "**Debug Information**\n\n\
         - Total messages: {}\n\
         - Gateway: {}\n\
         - Time: {}\n\
         - Current model: {}\n\n\
         If you're experiencing issues, please try:\n\
         1. Running `/retry`\n\
         2. Using a quick fact (`/fact salary`)\n\
         3. Checking that the gateway is running",
        info.message_count,
        info.gateway_url,
        chrono::Utc::now().to_rfc3339(),
        info.last_source.unwrap_or("Unknown"),
    )
}

pub fn model_text(info: &StatusInfo<'_>) -> String {
    let mut out = String::from("**Current Model Information**\n\n");
    for (i, label) in info.models.iter().enumerate() {
        let role = if i == 0 { "Primary model" } else { "Fallback model" };
        out.push_str(&format!("- {}: {}\n", role, label));
    }
    out.push_str(&format!(
        "- Last response from: {}\n",
        info.last_source.unwrap_or("No responses yet")
    ));
    out
}

pub fn help_text() -> String {
    let mut out = String::from(
        "**Commands**\n\n\
         - `/calculator [total] [population]` salary calculator\n\
         - `/model` model information\n\
         - `/debug` debug information\n\
         - `/favorites` saved messages, `/fav` save the latest reply\n\
         - `/share` share link for the latest reply\n\
         - `/retry` retry a failed message\n\
         - `/concerns` discuss your country's concerns\n\
         - `/clear` start over\n\n\
         **Quick facts** (`/fact <name>`): ",
    );
    let names: Vec<&str> = QuickFact::ALL.iter().map(|f| f.name()).collect();
    out.push_str(&names.join(", "));
    out.push_str("\n\n**Fact cards** (`/card <name>`): ");
    let cards: Vec<&str> = QuickFact::ALL
        .iter()
        .filter(|f| f.card().is_some())
        .map(|f| f.name())
        .collect();
    out.push_str(&cards.join(", "));
    out
}

pub fn concerns_text() -> &'static str {
    CONCERNS_CONTENT
}
