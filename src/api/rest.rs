use std::time::Duration;

use log::debug;
use reqwest::blocking::{ClientBuilder, RequestBuilder, Response};
use serde_json::Value;

use crate::api;
use crate::api::person::Person;
use crate::config::Config;

pub struct PersonsApi {
    client: reqwest::blocking::Client,
    config: Config,
}

fn get_builder(config: &Config) -> ClientBuilder {
    let builder = ClientBuilder::new().danger_accept_invalid_certs(!config.verify_host);

    match config.request_timeout {
        Some(seconds) => builder.timeout(Duration::from_secs(seconds)),
        None => builder,
    }
}

/// Pull a human readable message out of an error body. The server sends
/// either `{"error": "..."}` or a per-field validation list such as
/// `{"name": ["This field may not be blank."]}`.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            if let Some(error) = json.get("error").and_then(Value::as_str) {
                error.to_owned()
            } else if let Some(name) = json.get("name").and_then(|v| v.as_array()) {
                name.first().and_then(Value::as_str).unwrap_or_default().to_owned()
            } else {
                body.trim().to_owned()
            }
        }
        Err(_) => body.trim().to_owned(),
    }
}

impl PersonsApi {
    fn collection_url(&self) -> String {
        let host = self.config.host.trim_end_matches('/');
        host.to_owned() + "/"
    }

    fn person_url(&self, id: u32) -> String {
        format!("{}{}/", self.collection_url(), id)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, api::Error> {
        match request.send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(response)
                } else {
                    let message = extract_message(&response.text().unwrap_or_default());
                    Err(api::Error::Server {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
            Err(error) => {
                if error.is_connect() || error.is_timeout() {
                    Err(api::Error::Connect(self.collection_url()))
                } else {
                    Err(api::Error::Other(error.to_string()))
                }
            }
        }
    }

    fn read_person(response: Response) -> Result<Person, api::Error> {
        let json: Value = response
            .json()
            .map_err(|_| api::Error::Other("Server response did not contain JSON".to_owned()))?;

        debug!("Received response:\n{:#?}\n", json);

        serde_json::from_value(json).map_err(|error| api::Error::Other(error.to_string()))
    }
}

impl From<Config> for PersonsApi {
    fn from(value: Config) -> Self {
        Self {
            client: get_builder(&value).build().expect("Got client"),
            config: value,
        }
    }
}

impl api::Client for PersonsApi {
    fn list_persons(&self) -> Result<Vec<Person>, api::Error> {
        let url = self.collection_url();
        debug!("Sending GET request to {}\n", url);

        let response = self.send(self.client.get(&url))?;
        let json: Value = response
            .json()
            .map_err(|_| api::Error::Other("Server response did not contain JSON".to_owned()))?;

        debug!("Received response:\n{:#?}\n", json);

        let mut list: Vec<Person> =
            serde_json::from_value(json).map_err(|error| api::Error::Other(error.to_string()))?;
        list.sort_by(|a, b| a.id().cmp(&b.id()));

        Ok(list)
    }

    fn get_person(&self, id: u32) -> Result<Person, api::Error> {
        self.list_persons()?
            .into_iter()
            .find(|person| person.id() == Some(&id))
            .ok_or_else(|| api::Error::Other(format!("No person with id {id}")))
    }

    fn create_person(&self, person: &Person) -> Result<Person, api::Error> {
        let url = self.collection_url();
        debug!("Sending POST request to {}\n", url);

        let response = self.send(self.client.post(&url).json(person))?;

        Self::read_person(response)
    }

    fn update_person(&self, person: &Person) -> Result<Person, api::Error> {
        let id = person.id().ok_or_else(|| api::Error::Other("Id should not be empty".to_owned()))?;
        let url = self.person_url(*id);
        debug!("Sending PATCH request to {}\n", url);

        let response = self.send(self.client.patch(&url).json(person))?;

        Self::read_person(response)
    }

    fn delete_person(&self, id: u32) -> Result<(), api::Error> {
        let url = self.person_url(id);
        debug!("Sending DELETE request to {}\n", url);

        self.send(self.client.delete(&url))?;

        Ok(())
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockito::{Mock, Server, ServerGuard};

    use crate::api::person::Person;
    use crate::api::rest::{extract_message, PersonsApi};
    use crate::api::{Client, Error};
    use crate::config::Config;

    pub fn create_server_response(
        response: Option<impl AsRef<Path>>,
        status: usize,
        method: &str,
        path: &str,
    ) -> (Mock, PersonsApi, ServerGuard) {
        let mut server = Server::new();
        let mut mock = server.mock(method, path);

        mock = match response {
            Some(path) => mock.with_body_from_file(path),
            None => mock.with_body(""),
        }
        .with_status(status)
        .create();

        let client = PersonsApi::from(Config {
            host: server.url() + "/api/persons/",
            verify_host: false,
            request_timeout: None,
        });

        (mock, client, server)
    }

    #[test]
    fn test_extract_message() {
        assert_eq!("Kaboom", extract_message("{\"error\": \"Kaboom\"}"));
        assert_eq!(
            "This field may not be blank.",
            extract_message("{\"name\": [\"This field may not be blank.\", \"second\"]}")
        );
        assert_eq!("plain text", extract_message(" plain text\n"));
        assert_eq!("{\"other\": 1}", extract_message("{\"other\": 1}"));
    }

    #[test]
    fn test_list_persons() {
        let test = create_server_response(
            Option::from("tests/responses/persons_list.json"),
            200,
            "GET",
            "/api/persons/",
        );

        let persons = test.1.list_persons().expect("List should not have failed");

        assert_eq!(3, persons.len());
        assert_eq!("Alan Turing", persons[0].name());
        assert_eq!(Some(1912), persons[0].born());
        assert_eq!(None, persons[2].born());

        test.0.assert();
    }

    #[test]
    fn test_list_persons_sorted_by_id() {
        let test = create_server_response(
            Option::from("tests/responses/persons_list_unsorted.json"),
            200,
            "GET",
            "/api/persons/",
        );

        let persons = test.1.list_persons().expect("List should not have failed");
        let ids: Vec<u32> = persons.iter().map(|p| *p.id().expect("Id is set")).collect();

        assert_eq!(vec![1, 2, 3], ids);
    }

    #[test]
    fn test_list_persons_empty() {
        let test = create_server_response(
            Option::from("tests/responses/persons_empty.json"),
            200,
            "GET",
            "/api/persons/",
        );

        let persons = test.1.list_persons().expect("List should not have failed");

        assert_eq!(0, persons.len());
    }

    #[test]
    fn test_list_persons_invalid_body() {
        let test = create_server_response(None::<String>, 200, "GET", "/api/persons/");

        match test.1.list_persons() {
            Err(Error::Other(message)) => {
                assert_eq!("Server response did not contain JSON", message);
            }
            _ => panic!("List should have failed"),
        }
    }

    #[test]
    fn test_get_person() {
        let test = create_server_response(
            Option::from("tests/responses/persons_list.json"),
            200,
            "GET",
            "/api/persons/",
        );

        let person = test.1.get_person(2).expect("Person should exist");
        assert_eq!("Grace Hopper", person.name());

        match test.1.get_person(999) {
            Err(Error::Other(message)) => assert_eq!("No person with id 999", message),
            _ => panic!("Lookup should have failed"),
        }
    }

    #[test]
    fn test_create_person() {
        let test = create_server_response(
            Option::from("tests/responses/person_created.json"),
            201,
            "POST",
            "/api/persons/",
        );

        let draft = Person::new(None, "Ada Lovelace".to_owned(), Some(1815));
        let person = test.1.create_person(&draft).expect("Create should not have failed");

        assert_eq!(Some(&4), person.id());
        assert_eq!("Ada Lovelace", person.name());

        test.0.assert();
    }

    #[test]
    fn test_update_person() {
        let test = create_server_response(
            Option::from("tests/responses/person_updated.json"),
            200,
            "PATCH",
            "/api/persons/2/",
        );

        let person = Person::new(Some(2), "Grace Hopper".to_owned(), Some(1906));
        let updated = test.1.update_person(&person).expect("Update should not have failed");

        assert_eq!(Some(&2), updated.id());
        assert_eq!(Some(1906), updated.born());

        test.0.assert();
    }

    #[test]
    fn test_update_person_without_id() {
        let test = create_server_response(None::<String>, 200, "PATCH", "/api/persons/0/");
        let person = Person::new(None, "Grace Hopper".to_owned(), None);

        match test.1.update_person(&person) {
            Err(Error::Other(message)) => assert_eq!("Id should not be empty", message),
            _ => panic!("Update should have failed"),
        }
    }

    #[test]
    fn test_delete_person() {
        let test = create_server_response(None::<String>, 204, "DELETE", "/api/persons/1/");

        test.1.delete_person(1).expect("Delete should not have failed");

        test.0.assert();
    }

    #[test]
    fn test_delete_person_not_found() {
        let test = create_server_response(
            Option::from("tests/responses/error_not_found.json"),
            404,
            "DELETE",
            "/api/persons/1/",
        );

        match test.1.delete_person(1) {
            Err(Error::Server { status, message }) => {
                assert_eq!(404, status);
                assert_eq!("Person not found", message);
            }
            _ => panic!("Delete should have failed"),
        }
    }

    #[test]
    fn test_create_person_validation_error() {
        let test = create_server_response(
            Option::from("tests/responses/error_validation.json"),
            400,
            "POST",
            "/api/persons/",
        );

        let draft = Person::new(None, String::new(), None);

        match test.1.create_person(&draft) {
            Err(error @ Error::Server { status: 400, .. }) => {
                assert_eq!("Status: 400. This field may not be blank.", error.to_string());
            }
            _ => panic!("Create should have failed"),
        }
    }

    #[test]
    fn test_connect_error() {
        let client = PersonsApi::from(Config {
            host: "http://127.0.0.1:1/api/persons/".to_owned(),
            verify_host: false,
            request_timeout: None,
        });

        match client.list_persons() {
            Err(Error::Connect(host)) => {
                assert_eq!("http://127.0.0.1:1/api/persons/", host);
            }
            _ => panic!("Request should have failed to connect"),
        }
    }
}
