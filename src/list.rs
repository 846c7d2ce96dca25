use std::cmp;
use std::collections::HashMap;
use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use log::warn;
use term_table::row::Row;
use term_table::table_cell::TableCell;
use term_table::{Table, TableStyle};

use crate::api;
use crate::api::person::Person;
use crate::TERMINAL_SIZE;

pub const COMMAND_NAME: &str = "list";

pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .about("List all persons")
        .short_flag('l')
        .visible_alias("ls")
}

pub fn command(_matches: &ArgMatches, api_client: &dyn api::Client, _quiet: bool) -> Result<u8, Box<dyn Error>> {
    print_collection(api_client)?;

    Ok(0)
}

/// Fetch the collection and print it. Mutating commands call this after a
/// successful save or delete, so the screen always shows what the server
/// holds instead of a locally patched copy.
pub fn print_collection(api_client: &dyn api::Client) -> Result<(), api::Error> {
    let persons = api_client.list_persons()?;

    if persons.is_empty() {
        warn!("No persons found");
    } else {
        warn!("{}", print_table(&persons));
    }

    Ok(())
}

fn print_table(persons: &[Person]) -> String {
    let mut table = Table::new();
    let terminal_width = TERMINAL_SIZE.try_lock().expect("Failed").0;

    let widths = HashMap::from([
        (0, terminal_width * 10 / 100),
        (1, cmp::max(40, terminal_width * 60 / 100)),
        (2, terminal_width * 20 / 100),
    ]);

    table.max_column_widths = widths;
    table.style = TableStyle::rounded();

    table.add_row(Row::new(vec![
        TableCell::new("Id".green()),
        TableCell::new("Name".green()),
        TableCell::new("Born".green()),
    ]));

    for person in persons {
        table.add_row(Row::new(vec![
            TableCell::new(person.id().map_or(0, |id| *id)),
            TableCell::new(person.name()),
            TableCell::new(person.born_label()),
        ]));
    }

    table.render()
}
