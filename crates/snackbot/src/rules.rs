//! Command rules: the phrases the bot reacts to, kept as data.
//!
//! A rule pairs a [`Trigger`] (a predicate over the message content) with an
//! [`Action`]. The dispatcher walks the table in order for every plain chat
//! message, so adding a phrase never touches the dispatch loop.
//!
//! Content is matched as raw bytes. Phrases are plain text and compared
//! byte for byte.

/// When a rule fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// `<nick>: <phrase>` or `<nick>, <phrase>`, matched exactly and
    /// case-sensitively.
    Addressed(String),
    /// The whole content equals the text, addressed or not.
    Exact(String),
}

impl Trigger {
    /// Returns `true` if `content`, seen by a bot called `nick`, fires this
    /// trigger.
    pub fn matches(&self, nick: &str, content: &[u8]) -> bool {
        match self {
            Self::Addressed(phrase) => {
                addressed_remainder(nick, content) == Some(phrase.as_bytes())
            }
            Self::Exact(text) => content == text.as_bytes(),
        }
    }

    /// Returns `true` if the trigger only fires when the bot is addressed
    /// by name.
    pub fn requires_address(&self) -> bool {
        matches!(self, Self::Addressed(_))
    }
}

/// What the bot does when a rule fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reply `Hello, <sender>`.
    Greet,
    /// Reply with fixed text.
    Say(String),
    /// Send QUIT and shut down. Rules after this one are not evaluated.
    Quit,
}

/// One table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub trigger: Trigger,
    pub action: Action,
}

impl Rule {
    pub fn new(trigger: Trigger, action: Action) -> Self {
        Self { trigger, action }
    }

    /// A rule for `<nick>: <phrase>`.
    pub fn addressed(phrase: &str, action: Action) -> Self {
        Self::new(Trigger::Addressed(phrase.to_string()), action)
    }

    /// A rule for content that is exactly `text`.
    pub fn exact(text: &str, action: Action) -> Self {
        Self::new(Trigger::Exact(text.to_string()), action)
    }
}

/// An ordered rule table.
#[derive(Debug, Clone, Default)]
pub struct CommandRules {
    rules: Vec<Rule>,
}

impl CommandRules {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock table: `hello` greets, `!quit` quits, `botsnack` gets `<3`.
    pub fn builtin() -> Self {
        Self::new()
            .with(Rule::addressed("hello", Action::Greet))
            .with(Rule::addressed("!quit", Action::Quit))
            .with(Rule::exact("botsnack", Action::Say("<3".to_string())))
    }

    /// Appends a rule, builder style.
    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule `content` fires, in table order.
    pub fn matching<'a>(
        &'a self,
        nick: &'a str,
        content: &'a [u8],
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.trigger.matches(nick, content))
    }
}

/// Returns what follows `<nick>, ` or `<nick>: ` at the start of `content`.
///
/// The remainder must be non-empty; a bare `snack: ` is not addressed.
pub fn addressed_remainder<'a>(nick: &str, content: &'a [u8]) -> Option<&'a [u8]> {
    let rest = content.strip_prefix(nick.as_bytes())?;
    let rest = rest
        .strip_prefix(b", ")
        .or_else(|| rest.strip_prefix(b": "))?;
    (!rest.is_empty()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions<'a>(rules: &'a CommandRules, content: &'a [u8]) -> Vec<&'a Action> {
        rules.matching("snack", content).map(|rule| &rule.action).collect()
    }

    #[test]
    fn test_addressed_remainder_separators() {
        assert_eq!(addressed_remainder("snack", b"snack: hello"), Some(&b"hello"[..]));
        assert_eq!(addressed_remainder("snack", b"snack, hello"), Some(&b"hello"[..]));
        assert_eq!(addressed_remainder("snack", b"snack hello"), None);
        assert_eq!(addressed_remainder("snack", b"snack:hello"), None);
    }

    #[test]
    fn test_addressed_remainder_is_case_sensitive() {
        assert_eq!(addressed_remainder("snack", b"Snack: hello"), None);
    }

    #[test]
    fn test_addressed_remainder_needs_content() {
        assert_eq!(addressed_remainder("snack", b"snack: "), None);
        assert_eq!(addressed_remainder("snack", b"snack:"), None);
        assert_eq!(addressed_remainder("snack", b""), None);
    }

    #[test]
    fn test_addressed_remainder_keeps_rest_verbatim() {
        assert_eq!(addressed_remainder("snack", b"snack: hello "), Some(&b"hello "[..]));
        assert_eq!(addressed_remainder("snack", b"snack: a: b"), Some(&b"a: b"[..]));
        assert_eq!(addressed_remainder("snack", b"snack: caf\xe9"), Some(&b"caf\xe9"[..]));
    }

    #[test]
    fn test_addressed_trigger_is_exact() {
        let trigger = Trigger::Addressed("hello".into());
        assert!(trigger.matches("snack", b"snack: hello"));
        assert!(!trigger.matches("snack", b"snack: hello!"));
        assert!(!trigger.matches("snack", b"hello"));
        assert!(trigger.requires_address());
    }

    #[test]
    fn test_exact_trigger_ignores_addressing() {
        let trigger = Trigger::Exact("botsnack".into());
        assert!(trigger.matches("snack", b"botsnack"));
        assert!(!trigger.matches("snack", b"snack: botsnack"));
        assert!(!trigger.matches("snack", b"botsnack "));
        assert!(!trigger.requires_address());
    }

    #[test]
    fn test_builtin_table_order() {
        let rules = CommandRules::builtin();
        assert_eq!(rules.len(), 3);
        assert!(!rules.is_empty());

        assert_eq!(actions(&rules, b"snack: hello"), [&Action::Greet]);
        assert_eq!(actions(&rules, b"snack, !quit"), [&Action::Quit]);
        assert_eq!(actions(&rules, b"botsnack"), [&Action::Say("<3".into())]);
        assert!(actions(&rules, b"hello").is_empty());
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let rules = CommandRules::new();
        assert!(rules.is_empty());
        assert!(actions(&rules, b"botsnack").is_empty());
    }

    #[test]
    fn test_custom_rules_fire_in_order() {
        let rules = CommandRules::new()
            .with(Rule::exact("ping", Action::Say("pong".into())))
            .with(Rule::exact("ping", Action::Say("again".into())));
        assert_eq!(
            actions(&rules, b"ping"),
            [&Action::Say("pong".into()), &Action::Say("again".into())]
        );
    }
}
