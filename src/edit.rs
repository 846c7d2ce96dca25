use std::error::Error;

use clap::{arg, ArgMatches, Command};
use colored::Colorize;
use log::{info, warn};

use crate::api;
use crate::api::person::{ask_for, Person};
use crate::api::AppError;
use crate::list;
use crate::prompt::{get_match_string, get_numeric_input};

pub const COMMAND_NAME_EDIT: &str = "edit";
pub const COMMAND_NAME_NEW: &str = "new";

/// Unsaved form state. Whatever the user typed for `born` stays a raw
/// string until submit, where an empty value becomes null and anything
/// else must parse as a year.
pub struct Draft {
    pub name: String,
    pub born: String,
}

impl Draft {
    pub fn parse_born(&self) -> Result<Option<i32>, AppError> {
        let raw = self.born.trim();
        if raw.is_empty() {
            Ok(None)
        } else {
            raw.parse::<i32>()
                .map(Some)
                .map_err(|_| AppError(format!("Invalid birth year: {raw}")))
        }
    }
}

#[allow(clippy::module_name_repetitions)]
pub fn command_helper_edit() -> Command {
    Command::new(COMMAND_NAME_EDIT)
        .short_flag('e')
        .visible_aliases(["change"])
        .about("Edit a person")
        .arg(
            arg!(-i --id <ID> "Person id. Leave empty to select interactively")
                .required(false)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(arg!(-n --name <NAME> "New name").required(false))
        .arg(arg!(-b --born <YEAR> "New birth year. Leave empty for unknown").required(false))
}

pub fn command_helper_new() -> Command {
    Command::new(COMMAND_NAME_NEW)
        .visible_alias("add")
        .short_flag('n')
        .short_flag_alias('a')
        .about("Add a new person")
        .arg(arg!(-n --name <NAME> "Name").required(false))
        .arg(arg!(-b --born <YEAR> "Birth year. Leave empty for unknown").required(false))
}

#[allow(clippy::module_name_repetitions)]
pub fn command_edit(matches: &ArgMatches, api_client: &dyn api::Client, quiet: bool) -> Result<u8, Box<dyn Error>> {
    let id = get_numeric_input("id", matches, Some(|| ask_for(api_client)), quiet);
    if id == 0 {
        Err(AppError("Invalid id given".to_owned()))?;
    }

    let mut person = api_client.get_person(id)?;

    let draft = Draft {
        name: get_match_string(matches, quiet, "name", "Name: ", person.name(), true),
        born: get_match_string(
            matches,
            quiet,
            "born",
            "Born (year): ",
            &person.born().map_or_else(String::new, |year| year.to_string()),
            false,
        ),
    };

    person.set_name(&draft.name);
    person.set_born(draft.parse_born()?);

    info!("Trying to edit person");

    save(api_client, &person, |p| api_client.update_person(p))
}

pub fn command_new(matches: &ArgMatches, api_client: &dyn api::Client, quiet: bool) -> Result<u8, Box<dyn Error>> {
    let draft = Draft {
        name: get_match_string(matches, quiet, "name", "Name: ", "", true),
        born: get_match_string(matches, quiet, "born", "Born (year): ", "", false),
    };

    let person = Person::new(None, draft.name.clone(), draft.parse_born()?);

    info!("Trying to create person");

    save(api_client, &person, |p| api_client.create_person(p))
}

fn save(
    api_client: &dyn api::Client,
    person: &Person,
    operation: impl Fn(&Person) -> Result<Person, api::Error>,
) -> Result<u8, Box<dyn Error>> {
    match operation(person) {
        Ok(saved) => {
            warn!(
                "{} Person {} ({}) saved!",
                "\u{2714}".bright_green(),
                saved.name().green(),
                saved.id().expect("Id should be set after saving")
            );
            list::print_collection(api_client)?;

            Ok(0)
        }
        Err(error) => Err(format!("{error}: Could not save person"))?,
    }
}
