//! Action nodes: executable leaves with declared flags, positional args and examples.

use crate::error::TypedError;
use crate::output::{OutputRecord, Styler};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Business-logic entry point of an action.
pub type Handler =
    Arc<dyn Fn(&Invocation) -> Result<Vec<OutputRecord>, TypedError> + Send + Sync>;

/// Per-action human rendering of one record.
pub type HumanRenderer = Arc<dyn Fn(&OutputRecord, &Styler) -> String + Send + Sync>;

/// Declared flag of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub short: Option<char>,
    pub help: String,
    /// `None` for a boolean switch.
    pub value_name: Option<String>,
    pub required: bool,
    pub default: Option<String>,
    pub multiple: bool,
}

impl FlagSpec {
    /// A boolean switch (`--all`).
    pub fn switch(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            help: help.into(),
            value_name: None,
            required: false,
            default: None,
            multiple: false,
        }
    }

    /// A flag taking a value (`--team NAME`).
    pub fn value(
        name: impl Into<String>,
        value_name: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            value_name: Some(value_name.into()),
            ..Self::switch(name, help)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Allow the flag to be repeated; values accumulate.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn takes_value(&self) -> bool {
        self.value_name.is_some()
    }
}

/// Declared positional argument of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub help: String,
    pub required: bool,
    pub variadic: bool,
}

impl ArgSpec {
    pub fn required(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            required: true,
            variadic: false,
        }
    }

    pub fn optional(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, help)
        }
    }

    /// Accept one or more values; only valid as the last argument.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Parsed flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Switch(bool),
    Single(String),
    Many(Vec<String>),
}

/// Flag values after parsing, keyed by flag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    values: BTreeMap<String, FlagValue>,
}

impl ParsedFlags {
    pub fn insert(&mut self, name: impl Into<String>, value: FlagValue) {
        self.values.insert(name.into(), value);
    }

    /// True when a switch is on or a valued flag was given.
    pub fn is_set(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(FlagValue::Switch(on)) => *on,
            Some(FlagValue::Single(_)) => true,
            Some(FlagValue::Many(values)) => !values.is_empty(),
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FlagValue::Single(v) => Some(v),
            FlagValue::Many(values) => values.first().map(String::as_str),
            FlagValue::Switch(_) => None,
        }
    }

    pub fn values(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FlagValue::Single(v)) => std::slice::from_ref(v),
            Some(FlagValue::Many(values)) => values,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Everything a handler receives for one execution.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Canonical command path, aliases already expanded.
    pub path: Vec<String>,
    /// Positional arguments in declaration order.
    pub args: Vec<String>,
    pub flags: ParsedFlags,
    pub local_mode: bool,
}

impl Invocation {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// An executable command.
#[derive(Clone)]
pub struct Action {
    pub(crate) name: String,
    pub(crate) summary: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) local_capable: bool,
    pub(crate) args: Vec<ArgSpec>,
    pub(crate) flags: Vec<FlagSpec>,
    pub(crate) examples: Vec<String>,
    pub(crate) handler: Handler,
    pub(crate) human: Option<HumanRenderer>,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, summary: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Invocation) -> Result<Vec<OutputRecord>, TypedError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            summary: summary.into(),
            aliases: Vec::new(),
            local_capable: false,
            args: Vec::new(),
            flags: Vec::new(),
            examples: Vec::new(),
            handler: Arc::new(handler),
            human: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Mark the action as runnable without a remote connection.
    pub fn local_capable(mut self) -> Self {
        self.local_capable = true;
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Add a complete example command line. The first example doubles as the remediation
    /// shown for validation errors.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn human<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&OutputRecord, &Styler) -> String + Send + Sync + 'static,
    {
        self.human = Some(Arc::new(renderer));
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

    pub fn is_local_capable(&self) -> bool {
        self.local_capable
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn human_renderer(&self) -> Option<&HumanRenderer> {
        self.human.as_ref()
    }

    pub fn run(&self, invocation: &Invocation) -> Result<Vec<OutputRecord>, TypedError> {
        (self.handler)(invocation)
    }

    /// Check that the declared flags and args can be parsed unambiguously.
    ///
    /// Flags and args share one namespace. `--help`/`-h` belong to help routing. Optional
    /// args may only trail required ones and a variadic arg must come last.
    pub(crate) fn check_declarations(&self) -> Result<(), String> {
        let mut names: Vec<&str> = Vec::new();
        let mut shorts: Vec<char> = Vec::new();

        for flag in &self.flags {
            let name = flag.name.as_str();
            if name.is_empty() || name.starts_with('-') || name.contains(char::is_whitespace) {
                return Err(format!("flag name {:?} is not a valid long flag", name));
            }
            if name == "help" {
                return Err("flag --help is reserved".to_string());
            }
            if names.contains(&name) {
                return Err(format!("flag --{} is declared twice", name));
            }
            names.push(name);

            if let Some(short) = flag.short {
                if short == 'h' {
                    return Err("flag -h is reserved".to_string());
                }
                if short == '-' || short.is_whitespace() {
                    return Err(format!("short flag {:?} is not valid", short));
                }
                if shorts.contains(&short) {
                    return Err(format!("short flag -{} is declared twice", short));
                }
                shorts.push(short);
            }
        }

        let mut seen_optional = false;
        for (index, arg) in self.args.iter().enumerate() {
            let name = arg.name.as_str();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(format!("argument name {:?} is not valid", name));
            }
            if names.contains(&name) {
                return Err(format!(
                    "argument {} collides with a flag or argument of the same name",
                    name
                ));
            }
            names.push(name);

            if arg.required && seen_optional {
                return Err(format!(
                    "required argument {} follows an optional argument",
                    name
                ));
            }
            seen_optional |= !arg.required;

            if arg.variadic && index + 1 != self.args.len() {
                return Err(format!("variadic argument {} must come last", name));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("local_capable", &self.local_capable)
            .field("args", &self.args)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
