//! Action classifier.
//!
//! Labels each action `ReadOnly`, `Destructive` or `Other` using a fixed,
//! auditable rule set instead of a grammar of the policy language:
//!
//! 1. An action on the allow-list is `ReadOnly`.
//! 2. A verb containing a destructive fragment is `Destructive`.
//! 3. A verb containing a read-only fragment is `ReadOnly`.
//! 4. Anything else is `Other`.
//!
//! Fragment matching is a case-sensitive substring match against the verb
//! (the part after `service:`). Allow-list entries are exact action names,
//! or prefix globs when they end in `*`.

use leastpriv_contracts::{
    action::{ActionClass, ActionName},
    config::RuleConfig,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AllowListEntry {
    Exact(String),
    Prefix(String),
}

impl AllowListEntry {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix('*') {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    fn matches(&self, action: &str) -> bool {
        match self {
            Self::Exact(name) => name == action,
            Self::Prefix(prefix) => action.starts_with(prefix.as_str()),
        }
    }
}

/// Classifies actions according to a `RuleConfig`.
///
/// Built once per configuration and shared by every check that needs it.
#[derive(Debug, Clone)]
pub struct ActionClassifier {
    allow_list: Vec<AllowListEntry>,
    destructive_verbs: Vec<String>,
    read_only_verbs: Vec<String>,
}

impl ActionClassifier {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            allow_list: config
                .allow_list_wildcard_actions
                .iter()
                .map(|entry| AllowListEntry::parse(entry))
                .collect(),
            destructive_verbs: config.destructive_verbs.clone(),
            read_only_verbs: config.read_only_verbs.clone(),
        }
    }

    /// True when the organisation explicitly exempts `action` from
    /// wildcard-resource scrutiny.
    pub fn is_allow_listed(&self, action: &ActionName) -> bool {
        self.allow_list.iter().any(|entry| entry.matches(action.as_str()))
    }

    pub fn classify(&self, action: &ActionName) -> ActionClass {
        if self.is_allow_listed(action) {
            return ActionClass::ReadOnly;
        }

        let verb = action.verb();
        if self.destructive_verbs.iter().any(|v| verb.contains(v.as_str())) {
            ActionClass::Destructive
        } else if self.read_only_verbs.iter().any(|v| verb.contains(v.as_str())) {
            ActionClass::ReadOnly
        } else {
            ActionClass::Other
        }
    }

    /// Classify a whole statement's action set, most restrictive wins.
    ///
    /// `Destructive` beats `Other`, which beats `ReadOnly`: one unsafe action
    /// makes the whole set unsafe because conditions apply per statement.
    pub fn classify_all<'a>(&self, actions: impl IntoIterator<Item = &'a ActionName>) -> ActionClass {
        actions
            .into_iter()
            .map(|a| self.classify(a))
            .fold(ActionClass::ReadOnly, most_restrictive)
    }

    /// The actions in `actions` classified `Destructive`.
    pub fn destructive<'a>(&self, actions: &'a [ActionName]) -> Vec<&'a ActionName> {
        actions
            .iter()
            .filter(|a| self.classify(a) == ActionClass::Destructive)
            .collect()
    }
}

fn rank(class: ActionClass) -> u8 {
    match class {
        ActionClass::ReadOnly => 0,
        ActionClass::Other => 1,
        ActionClass::Destructive => 2,
    }
}

fn most_restrictive(a: ActionClass, b: ActionClass) -> ActionClass {
    if rank(b) > rank(a) {
        b
    } else {
        a
    }
}
