//! Shared HTTP client factory.

use reqwest::Client;
use std::time::Duration;

/// Build the client used for upstream calls.
///
/// `None` leaves the request timeout unset; a hung upstream then holds its
/// request open until the caller or the platform gives up.
pub fn create_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
