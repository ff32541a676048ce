//! Scripted runner for unit tests

use super::VagrantRunner;
use crate::error::{CommandError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Answers commands from a fixed script; unscripted commands fail
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    responses: HashMap<String, Option<String>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Some(stdout.to_string()));
        self
    }

    pub(crate) fn fail(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), None);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl VagrantRunner for ScriptedRunner {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());

        match self.responses.get(&command) {
            Some(Some(stdout)) => Ok(stdout.clone()),
            _ => Err(CommandError::Failed {
                command: format!("vagrant {}", command),
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            }
            .into()),
        }
    }
}
