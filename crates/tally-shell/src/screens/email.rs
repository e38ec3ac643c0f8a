//! Email tab: static provider cards.
//!
//! Account linking is not wired up yet; the cards only describe what a
//! connection would unlock.

/// Screen-level description shown above the provider cards.
pub const DESCRIPTION: &str =
    "Connect to your email to unlock automatic receipt and invoice detection. \
     No more forwarding or manual uploads.";

/// One connectable provider card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailProvider {
    pub name: &'static str,
    pub action_label: &'static str,
    pub scope_label: &'static str,
}

pub const PROVIDERS: [EmailProvider; 2] = [
    EmailProvider {
        name: "Gmail",
        action_label: "Connect Google Workspace (Gmail)",
        scope_label: "Mail + Calendar",
    },
    EmailProvider {
        name: "Outlook",
        action_label: "Connect Microsoft 365 (Outlook)",
        scope_label: "Mail + Calendar",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_both_providers() {
        assert_eq!(PROVIDERS[0].name, "Gmail");
        assert_eq!(PROVIDERS[1].name, "Outlook");
        assert!(PROVIDERS.iter().all(|p| p.scope_label == "Mail + Calendar"));
    }
}
