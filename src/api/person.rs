use std::cmp;
use std::fmt::{Display, Formatter, Result};

use colored::Colorize;
use inquire::Select;
use log::error;
use serde::{Deserialize, Serialize};

use crate::api;
use crate::TERMINAL_SIZE;

const ID_EMPTY: &str = "Id should not be empty";

#[derive(Deserialize, Serialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct Person {
    #[serde(skip_serializing)]
    id: Option<u32>,
    name: String,
    born: Option<i32>,
}

impl Person {
    pub const fn new(id: Option<u32>, name: String, born: Option<i32>) -> Self {
        Self { id, name, born }
    }

    pub fn id(&self) -> Option<&u32> {
        self.id.as_ref()
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub const fn born(&self) -> Option<i32> {
        self.born
    }
    pub fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }
    pub fn set_born(&mut self, born: Option<i32>) {
        self.born = born;
    }

    pub fn born_label(&self) -> String {
        self.born.map_or_else(|| "Not specified".to_owned(), |year| year.to_string())
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let row = format!(
            "{}. {} (born {})",
            self.id.unwrap_or(0),
            self.name(),
            self.born_label()
        );

        let line = truncate(&row, TERMINAL_SIZE.lock().expect("Failed to get terminal size").0 - 5);

        write!(f, "{line}")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let max_chars = cmp::max(max_chars, 40);
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...{}", &s[..idx], "".white()),
    }
}

/// Let the user pick a person from the full collection. Used by edit and
/// remove when no id was given on the command line.
pub fn ask_for(api_client: &dyn api::Client) -> u32 {
    let persons = api_client.list_persons().unwrap_or_else(|e| {
        error!("{} while trying to list persons", e);
        vec![]
    });
    let count = persons.len();

    Select::new("Select the right person:", persons)
        .with_help_message(format!("Number of persons found: {count}").as_str())
        .with_page_size(10)
        .prompt()
        .map_or(0, |person| *person.id().expect(ID_EMPTY))
}
