use std::fmt;

use colored::Colorize;

use crate::api::person::Person;
use crate::config::Config;

pub mod person;
pub mod rest;

pub trait Client {
    fn list_persons(&self) -> Result<Vec<Person>, Error>;
    fn get_person(&self, id: u32) -> Result<Person, Error>;
    fn create_person(&self, person: &Person) -> Result<Person, Error>;
    fn update_person(&self, person: &Person) -> Result<Person, Error>;
    fn delete_person(&self, id: u32) -> Result<(), Error>;
    fn get_config(&self) -> &Config;
}

/// Everything a request can fail with, split the way the user needs to
/// hear about it: the server answered with an error, the server never
/// answered, or the request itself was broken.
#[derive(Debug)]
pub enum Error {
    Server { status: u16, message: String },
    Connect(String),
    Other(String),
}

#[derive(Debug)]
pub struct AppError(pub String);

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Server { status, message } => {
                if message.is_empty() {
                    write!(f, "Status: {status}")
                } else {
                    write!(f, "Status: {status}. {message}")
                }
            }
            Self::Connect(host) => {
                write!(f, "Cannot connect to API. Make sure the server is running on {host}")
            }
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} Error: {}", "\u{2716}".bright_red(), self.0)
    }
}

impl From<Error> for AppError {
    fn from(value: Error) -> Self {
        Self(value.to_string())
    }
}
