//! Scripted backend for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{Backend, OutputFormat, ProjectLister};
use crate::error::{Error, Result};
use crate::types::ListedResource;

/// Shared record of every invocation, in order.
pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub subcommand: String,
    pub format: Option<OutputFormat>,
    pub args: Vec<String>,
}

type Responder = Box<dyn Fn() -> Result<String> + Send + Sync>;

/// Backend answering from a table keyed by `subcommand` or
/// `subcommand first-arg`, recording every call.
#[derive(Default)]
pub struct MockBackend {
    responses: HashMap<String, Responder>,
    calls: CallLog,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `key` with `stdout`.
    pub fn respond(mut self, key: &str, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        self.responses
            .insert(key.to_string(), Box::new(move || Ok(stdout.clone())));
        self
    }

    /// Answer `key` with an error.
    pub fn fail(mut self, key: &str, make: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.responses
            .insert(key.to_string(), Box::new(move || Err(make())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Handle on the call record that outlives the backend being moved
    /// into a client.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.subcommand).collect()
    }
}

impl Backend for MockBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn run(
        &self,
        subcommand: &str,
        format: Option<OutputFormat>,
        args: &[String],
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                subcommand: subcommand.to_string(),
                format,
                args: args.to_vec(),
            });

        let specific = args
            .first()
            .map(|a| format!("{subcommand} {a}"))
            .and_then(|k| self.responses.get(&k));
        match specific.or_else(|| self.responses.get(subcommand)) {
            Some(respond) => respond(),
            None => Ok(String::new()),
        }
    }
}

/// Fixed project table.
pub struct MockProjects(pub Vec<ListedResource>);

impl ProjectLister for MockProjects {
    fn list_projects(&self) -> Result<Vec<ListedResource>> {
        Ok(self.0.clone())
    }
}
