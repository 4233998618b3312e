//! Command tree nodes: topics group, actions execute.

use crate::matcher::{rank_candidates, MAX_SUGGESTIONS};
use crate::registry::action::Action;

/// A grouping node. Children keep insertion order.
#[derive(Debug, Clone)]
pub struct Topic {
    pub(crate) name: String,
    pub(crate) summary: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) children: Vec<CommandNode>,
}

impl Topic {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            aliases: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Nest a child node; validated when the topic is registered.
    pub fn child(mut self, node: impl Into<CommandNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Exact lookup by name or alias.
    pub fn lookup(&self, token: &str) -> Option<&CommandNode> {
        self.children
            .iter()
            .find(|c| c.name() == token)
            .or_else(|| self.children.iter().find(|c| c.has_alias(token)))
    }

    /// Closest child names to `token`. Aliases take part in matching but are reported by
    /// their canonical name.
    pub fn suggest(&self, token: &str) -> Vec<String> {
        let candidates: Vec<&str> = self
            .children
            .iter()
            .flat_map(|c| std::iter::once(c.name()).chain(c.aliases().iter().map(String::as_str)))
            .collect();

        let mut suggestions: Vec<String> = Vec::new();
        for candidate in rank_candidates(token, &candidates, candidates.len()) {
            let canonical = match self.lookup(&candidate) {
                Some(node) => node.name().to_string(),
                None => candidate,
            };
            if !suggestions.contains(&canonical) {
                suggestions.push(canonical);
            }
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
        }
        suggestions
    }
}

/// One node of the command tree.
#[derive(Debug, Clone)]
pub enum CommandNode {
    Topic(Topic),
    Action(Action),
}

impl CommandNode {
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Topic(t) => &t.name,
            CommandNode::Action(a) => &a.name,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            CommandNode::Topic(t) => &t.summary,
            CommandNode::Action(a) => &a.summary,
        }
    }

    pub fn aliases(&self) -> &[String] {
        match self {
            CommandNode::Topic(t) => &t.aliases,
            CommandNode::Action(a) => &a.aliases,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            CommandNode::Topic(_) => "topic",
            CommandNode::Action(_) => "action",
        }
    }

    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases().iter().any(|a| a == token)
    }

    /// True when `token` is this node's name or one of its aliases.
    pub fn answers_to(&self, token: &str) -> bool {
        self.name() == token || self.has_alias(token)
    }
}

impl From<Topic> for CommandNode {
    fn from(topic: Topic) -> Self {
        CommandNode::Topic(topic)
    }
}

impl From<Action> for CommandNode {
    fn from(action: Action) -> Self {
        CommandNode::Action(action)
    }
}
