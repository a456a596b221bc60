//! Prompt augmentation with keyword-triggered intelligence modules
//!
//! The final system prompt is the fixed base prompt, followed by a header
//! describing the active mode, followed by the text of every module whose
//! trigger keywords appear in the user's message.

use shared::Mode;

/// Number of trailing history entries carried into a composed prompt
pub const HISTORY_WINDOW: usize = 3;

/// Base system prompt shared by every mode
pub const BASE_PROMPT: &str = "You are SaintSal, the AI strategist behind SaintVisionAI. \
You help founders, operators and families make clear decisions and carry them out. \
Answer directly, cite the assumptions you make, and never invent facts, figures or credentials. \
When a question needs a licensed professional, say so plainly and explain what to ask them.";

/// A keyword-triggered block of system prompt text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub key: &'static str,
    /// Lowercase trigger keywords matched as substrings
    pub triggers: &'static [&'static str],
    pub text: &'static str,
}

impl Module {
    /// True when any trigger occurs in the already-lowercased message
    fn matches(&self, lowered_message: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| lowered_message.contains(&trigger.to_lowercase()))
    }
}

/// Module table, in the order blocks are appended to the prompt.
///
/// Triggers are plain substrings: "ip" also matches "zip" or "ship".
pub static MODULES: [Module; 4] = [
    Module {
        key: "legal",
        triggers: &[
            "contract", "legal", "lawsuit", "liability", "trademark", "copyright", "ip",
            "compliance", "attorney",
        ],
        text: "LEGAL INTELLIGENCE MODULE ACTIVE:\n\
- Break agreements into obligations, rights, deadlines and exit terms\n\
- Flag indemnity, liability caps, assignment and IP ownership clauses\n\
- Note jurisdiction-specific risks and recommend review by a licensed attorney",
    },
    Module {
        key: "financial",
        triggers: &[
            "valuation", "investment", "revenue", "cash flow", "tax", "portfolio", "roi",
            "funding", "financial",
        ],
        text: "FINANCIAL INTELLIGENCE MODULE ACTIVE:\n\
- Show the numbers behind every estimate and state the method used (comparables, DCF, multiples)\n\
- Separate cash flow, profit and valuation questions\n\
- Call out tax exposure and recommend a CPA for filings",
    },
    Module {
        key: "health",
        triggers: &[
            "health", "medical", "symptom", "wellness", "diagnosis", "medication", "fitness",
        ],
        text: "HEALTH INTELLIGENCE MODULE ACTIVE:\n\
- Give general, evidence-based information only, never a diagnosis\n\
- Point out warning signs that need prompt medical attention\n\
- Encourage the user to confirm any change with their physician",
    },
    Module {
        key: "business",
        triggers: &[
            "strategy", "growth", "marketing", "sales", "startup", "scale", "business plan",
            "operations",
        ],
        text: "BUSINESS INTELLIGENCE MODULE ACTIVE:\n\
- Frame answers as prioritized next actions with owners and timelines\n\
- Tie recommendations to revenue, margin or retention\n\
- Identify the single biggest constraint before suggesting growth tactics",
    },
];

/// Fixed persona traits for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTraits {
    pub tone: &'static str,
    pub personality: &'static str,
    pub behavior: &'static str,
    pub documentation: &'static str,
}

static RYAN_TRAITS: ModeTraits = ModeTraits {
    tone: "warm, candid and encouraging",
    personality: "trusted mentor who speaks like a founder",
    behavior: "asks one clarifying question when the goal is unclear, then advises",
    documentation: "conversational summaries with the key takeaway first",
};

static EXECUTION_TRAITS: ModeTraits = ModeTraits {
    tone: "direct, concise and decisive",
    personality: "operator focused on shipping results",
    behavior: "turns every request into concrete steps with owners and deadlines",
    documentation: "numbered action plans and checklists",
};

/// Look up the trait record for a mode
pub fn mode_traits(mode: Mode) -> &'static ModeTraits {
    match mode {
        Mode::Ryan => &RYAN_TRAITS,
        Mode::Execution => &EXECUTION_TRAITS,
    }
}

/// Header naming the mode and its four traits
pub fn mode_header(mode: Mode) -> String {
    let traits = mode_traits(mode);
    format!(
        "\n\nMODE: {}\nTone: {}\nPersonality: {}\nBehavior: {}\nDocumentation: {}",
        mode.as_str().to_uppercase(),
        traits.tone,
        traits.personality,
        traits.behavior,
        traits.documentation
    )
}

/// Builds augmented prompts from a module table
#[derive(Debug, Clone, Copy)]
pub struct PromptAugmenter<'a> {
    modules: &'a [Module],
}

impl PromptAugmenter<'static> {
    /// Augmenter over the built-in module table
    pub fn new() -> Self {
        Self { modules: &MODULES }
    }
}

impl Default for PromptAugmenter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PromptAugmenter<'a> {
    /// Augmenter over a custom module table
    pub fn with_modules(modules: &'a [Module]) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &'a [Module] {
        self.modules
    }

    /// Modules whose triggers occur in the message, in table order
    pub fn active_modules(&self, message: &str) -> Vec<&'a Module> {
        let lowered = message.to_lowercase();
        self.modules.iter().filter(|module| module.matches(&lowered)).collect()
    }

    /// Base prompt, then mode header, then every active module block
    pub fn build_prompt(&self, base: &str, message: &str, mode: Mode) -> String {
        let mut prompt = String::with_capacity(base.len() + 512);
        prompt.push_str(base);
        prompt.push_str(&mode_header(mode));

        for module in self.active_modules(message) {
            prompt.push_str("\n\n");
            prompt.push_str(module.text);
        }

        prompt
    }
}

/// Modules from the built-in table activated by a message
pub fn active_modules(message: &str) -> Vec<&'static Module> {
    PromptAugmenter::new().active_modules(message)
}

/// Build an augmented prompt using the built-in module table
pub fn build_prompt(base: &str, message: &str, mode: Mode) -> String {
    PromptAugmenter::new().build_prompt(base, message, mode)
}

/// Append the last [`HISTORY_WINDOW`] history entries and the user message
pub fn compose_with_history(prompt: &str, history: &[String], message: &str) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let recent = history[start..].join("\n");

    if recent.is_empty() {
        format!("{prompt}\n\nUser: {message}")
    } else {
        format!("{prompt}\n\nRecent conversation:\n{recent}\n\nUser: {message}")
    }
}
