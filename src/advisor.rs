//! Follow-up suggestions shown after a command succeeds.

use crate::error::StructuralError;
use crate::registry::CommandRegistry;
use std::collections::HashMap;

/// Static edge list: completed command path → example command lines.
#[derive(Debug, Clone, Default)]
pub struct FollowUpAdvisor {
    edges: HashMap<Vec<String>, Vec<String>>,
}

impl FollowUpAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add suggestions for the action at `path`. The path may use aliases; it is stored in
    /// canonical form so lookups by resolved path succeed.
    pub fn add<S, I, T>(
        &mut self,
        registry: &CommandRegistry,
        path: &[S],
        suggestions: I,
    ) -> Result<(), StructuralError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let canonical = canonical_action_path(registry, path).ok_or_else(|| {
            StructuralError::UnknownFollowUpSource {
                path: path.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" "),
            }
        })?;
        self.edges
            .entry(canonical)
            .or_default()
            .extend(suggestions.into_iter().map(Into::into));
        Ok(())
    }

    /// Suggestions for a completed command, empty when none are configured.
    pub fn suggest<S: AsRef<str>>(&self, completed: &[S]) -> &[String] {
        let key: Vec<String> = completed.iter().map(|s| s.as_ref().to_string()).collect();
        self.edges.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn canonical_action_path<S: AsRef<str>>(
    registry: &CommandRegistry,
    path: &[S],
) -> Option<Vec<String>> {
    match registry.resolve(path) {
        crate::registry::Resolution::Resolved {
            path,
            remaining_args,
            ..
        } if remaining_args.is_empty() => Some(path),
        _ => None,
    }
}
