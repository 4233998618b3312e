//! Command registry: the topic/action tree and token resolution.
//!
//! The tree is assembled once at startup through [`CommandRegistry::register`] and only read
//! afterwards. Handlers are `Send + Sync`, so a built registry can be shared across threads.

mod action;
mod node;

pub use action::{
    Action, ArgSpec, FlagSpec, FlagValue, Handler, HumanRenderer, Invocation, ParsedFlags,
};
pub use node::{CommandNode, Topic};

use crate::error::StructuralError;
use tracing::debug;

/// Outcome of resolving input tokens against the tree.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// An action was reached. Tokens after it are left for flag/argument parsing.
    Resolved {
        action: &'a Action,
        path: Vec<String>,
        remaining_args: Vec<String>,
    },
    /// A token matched no child of the topic reached so far.
    Unknown {
        /// Canonical path consumed before the unknown token.
        attempted_path: Vec<String>,
        token: String,
        suggestions: Vec<String>,
    },
    /// Tokens ran out at a topic.
    Incomplete {
        topic_path: Vec<String>,
        topic: &'a Topic,
    },
}

/// The command tree, rooted at an unnamed topic standing for the program itself.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    root: Topic,
}

impl CommandRegistry {
    pub fn new(program: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            root: Topic::new(program, summary),
        }
    }

    pub fn program(&self) -> &str {
        &self.root.name
    }

    pub fn root(&self) -> &Topic {
        &self.root
    }

    /// Insert `node` under the topic at `parent_path`, creating missing topics on the way.
    ///
    /// Either the whole node lands or, on error, the tree is left exactly as it was.
    pub fn register<S: AsRef<str>>(
        &mut self,
        parent_path: &[S],
        node: impl Into<CommandNode>,
    ) -> Result<(), StructuralError> {
        let mut root = self.root.clone();
        register_into(&mut root, parent_path, node.into())?;
        self.root = root;
        Ok(())
    }

    /// Resolve input tokens to an action, descending one topic per token.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, tokens: &[S]) -> Resolution<'a> {
        let mut topic = &self.root;
        let mut path: Vec<String> = Vec::new();

        for (index, token) in tokens.iter().map(AsRef::as_ref).enumerate() {
            match topic.lookup(token) {
                Some(CommandNode::Topic(next)) => {
                    path.push(next.name.clone());
                    topic = next;
                }
                Some(CommandNode::Action(action)) => {
                    path.push(action.name.clone());
                    let remaining_args = tokens[index + 1..]
                        .iter()
                        .map(|t| t.as_ref().to_string())
                        .collect();
                    debug!(command = %path.join(" "), "Resolved command");
                    return Resolution::Resolved {
                        action,
                        path,
                        remaining_args,
                    };
                }
                None => {
                    let suggestions = topic.suggest(token);
                    debug!(
                        token,
                        attempted = %path.join(" "),
                        suggestions = suggestions.len(),
                        "Unknown command token"
                    );
                    return Resolution::Unknown {
                        attempted_path: path,
                        token: token.to_string(),
                        suggestions,
                    };
                }
            }
        }

        Resolution::Incomplete {
            topic_path: path,
            topic,
        }
    }

    /// Topic at `path` (empty path is the root). Names and aliases are both accepted.
    pub fn find_topic<S: AsRef<str>>(&self, path: &[S]) -> Option<&Topic> {
        let mut topic = &self.root;
        for segment in path {
            match topic.lookup(segment.as_ref())? {
                CommandNode::Topic(next) => topic = next,
                CommandNode::Action(_) => return None,
            }
        }
        Some(topic)
    }

    /// Node at exactly `path`, topic or action. The empty path names no node.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandNode> {
        let (last, parent) = path.split_last()?;
        self.find_topic(parent)?.lookup(last.as_ref())
    }

    /// Action at exactly `path`.
    pub fn find_action<S: AsRef<str>>(&self, path: &[S]) -> Option<&Action> {
        let (last, parent) = path.split_last()?;
        match self.find_topic(parent)?.lookup(last.as_ref())? {
            CommandNode::Action(action) => Some(action),
            CommandNode::Topic(_) => None,
        }
    }

    /// Children of the topic at `topic_path`, in insertion order.
    pub fn children<S: AsRef<str>>(&self, topic_path: &[S]) -> Option<&[CommandNode]> {
        self.find_topic(topic_path).map(|t| t.children.as_slice())
    }

    /// Canonical paths of every action, depth first in insertion order.
    pub fn action_paths(&self) -> Vec<Vec<String>> {
        fn walk(topic: &Topic, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
            for child in &topic.children {
                prefix.push(child.name().to_string());
                match child {
                    CommandNode::Topic(t) => walk(t, prefix, out),
                    CommandNode::Action(_) => out.push(prefix.clone()),
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

/// `help` is routed before resolution, so no top-level command may answer to it.
const RESERVED_NAME: &str = "help";

const ROOT_LABEL: &str = "<root>";

fn register_into<S: AsRef<str>>(
    root: &mut Topic,
    parent_path: &[S],
    node: CommandNode,
) -> Result<(), StructuralError> {
    let mut current = root;
    let mut walked: Vec<&str> = Vec::with_capacity(parent_path.len());

    for segment in parent_path.iter().map(AsRef::as_ref) {
        validate_name(segment)?;
        if walked.is_empty() && segment == RESERVED_NAME {
            return Err(StructuralError::ReservedName {
                name: segment.to_string(),
            });
        }
        let parent_display = display_path(&walked);
        walked.push(segment);

        let index = match current.children.iter().position(|c| c.name() == segment) {
            Some(index) => index,
            None => {
                if current.children.iter().any(|c| c.has_alias(segment)) {
                    return Err(StructuralError::AliasConflict {
                        parent: parent_display,
                        alias: segment.to_string(),
                    });
                }
                current.children.push(Topic::new(segment, "").into());
                current.children.len() - 1
            }
        };

        current = match &mut current.children[index] {
            CommandNode::Topic(topic) => topic,
            CommandNode::Action(_) => {
                return Err(StructuralError::ParentIsAction {
                    path: display_path(&walked),
                })
            }
        };
    }

    insert_node(current, &display_path(&walked), node)
}

fn display_path(segments: &[&str]) -> String {
    if segments.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        segments.join(" ")
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_LABEL {
        name.to_string()
    } else {
        format!("{} {}", parent, name)
    }
}

fn validate_name(name: &str) -> Result<(), StructuralError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(StructuralError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn insert_node(
    parent: &mut Topic,
    parent_path: &str,
    node: CommandNode,
) -> Result<(), StructuralError> {
    validate_name(node.name())?;
    for alias in node.aliases() {
        validate_name(alias)?;
    }
    if parent_path == ROOT_LABEL
        && (node.name() == RESERVED_NAME || node.aliases().iter().any(|a| a == RESERVED_NAME))
    {
        return Err(StructuralError::ReservedName {
            name: RESERVED_NAME.to_string(),
        });
    }
    let path = child_path(parent_path, node.name());
    if let CommandNode::Action(action) = &node {
        action
            .check_declarations()
            .map_err(|message| StructuralError::InvalidDeclaration {
                path: path.clone(),
                message,
            })?;
    }

    let Some(index) = parent.children.iter().position(|c| c.name() == node.name()) else {
        let tokens = std::iter::once(node.name()).chain(node.aliases().iter().map(String::as_str));
        for token in tokens {
            if parent.children.iter().any(|c| c.answers_to(token)) {
                return Err(StructuralError::AliasConflict {
                    parent: parent_path.to_string(),
                    alias: token.to_string(),
                });
            }
        }
        match node {
            CommandNode::Action(action) => parent.children.push(CommandNode::Action(action)),
            CommandNode::Topic(mut topic) => {
                let children = std::mem::take(&mut topic.children);
                parent.children.push(CommandNode::Topic(topic));
                if let Some(CommandNode::Topic(inserted)) = parent.children.last_mut() {
                    for child in children {
                        insert_node(inserted, &path, child)?;
                    }
                }
            }
        }
        return Ok(());
    };

    let existing_is_topic = matches!(parent.children[index], CommandNode::Topic(_));
    match node {
        CommandNode::Topic(incoming) if existing_is_topic => {
            let new_aliases: Vec<String> = incoming
                .aliases
                .iter()
                .filter(|a| !parent.children[index].has_alias(a))
                .cloned()
                .collect();
            for alias in &new_aliases {
                let taken = parent
                    .children
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != index && c.answers_to(alias));
                if taken {
                    return Err(StructuralError::AliasConflict {
                        parent: parent_path.to_string(),
                        alias: alias.clone(),
                    });
                }
            }
            if let CommandNode::Topic(existing) = &mut parent.children[index] {
                if existing.summary.is_empty() {
                    existing.summary = incoming.summary;
                }
                existing.aliases.extend(new_aliases);
                for child in incoming.children {
                    insert_node(existing, &path, child)?;
                }
            }
            Ok(())
        }
        CommandNode::Action(_) if !existing_is_topic => {
            Err(StructuralError::DuplicateAction { path })
        }
        incoming => Err(StructuralError::KindConflict {
            path,
            existing: parent.children[index].kind_label(),
            requested: incoming.kind_label(),
        }),
    }
}
