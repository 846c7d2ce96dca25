use std::error::Error;

use clap::{arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use log::warn;

use crate::api;
use crate::api::person::ask_for;
use crate::api::AppError;
use crate::list;
use crate::prompt::{ask_confirm, get_numeric_input};

pub const COMMAND_NAME: &str = "remove";

pub fn command_helper() -> Command {
    Command::new(COMMAND_NAME)
        .visible_alias("delete")
        .short_flag('r')
        .about("Remove a person")
        .arg(
            arg!(-i --id <ID> "Person id. Leave empty to select interactively")
                .required(false)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            arg!(-y --yes "Do not ask for confirmation")
                .required(false)
                .action(ArgAction::SetTrue),
        )
}

pub fn command(matches: &ArgMatches, api_client: &dyn api::Client, quiet: bool) -> Result<u8, Box<dyn Error>> {
    let id = get_numeric_input("id", matches, Some(|| ask_for(api_client)), quiet);
    if id == 0 {
        Err(AppError("Invalid id given".to_owned()))?;
    }

    // Deleting is the one thing a refetch cannot undo, so it always needs
    // an explicit yes.
    if !matches.get_flag("yes") {
        if quiet {
            Err(AppError("Refusing to delete without --yes in quiet mode".to_owned()))?;
        }

        if !ask_confirm("Are you sure you want to delete this person?") {
            warn!("Nothing deleted");
            return Ok(0);
        }
    }

    api_client.delete_person(id)?;

    warn!("{} Person removed", "\u{2714}".bright_green());
    list::print_collection(api_client)?;

    Ok(0)
}
