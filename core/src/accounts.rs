//! Organisation accounts: fetch, create and delete.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes the `HttpResponse`, so a
//! caller can drive the I/O itself. `fetch`, `create` and `delete` compose the
//! two halves over the client's transport.

use crate::client::{parse, parse_empty, Client};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Response};
use crate::types::{AccountData, AccountRoot, Envelope};

pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

/// Account operations, borrowed from a `Client`.
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a> {
    client: &'a Client,
}

impl<'a> AccountService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn build_fetch(&self, id: &str) -> Result<HttpRequest, ClientError> {
        self.client
            .request::<()>(HttpMethod::Get, &format!("{ACCOUNTS_PATH}/{id}"), None)
    }

    pub fn build_create(&self, account: &AccountData) -> Result<HttpRequest, ClientError> {
        self.client
            .request(HttpMethod::Post, ACCOUNTS_PATH, Some(&Envelope::new(account)))
    }

    pub fn build_delete(&self, id: &str, version: i64) -> Result<HttpRequest, ClientError> {
        self.client.request::<()>(
            HttpMethod::Delete,
            &format!("{ACCOUNTS_PATH}/{id}?version={version}"),
            None,
        )
    }

    pub fn parse_fetch(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<(AccountRoot, Response), ClientError> {
        parse(request, response)
    }

    pub fn parse_create(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<(AccountRoot, Response), ClientError> {
        parse(request, response)
    }

    /// Success is any 2xx; the API answers 204 with an empty body.
    pub fn parse_delete(&self, request: &HttpRequest, response: HttpResponse) -> Result<Response, ClientError> {
        parse_empty(request, response)
    }

    /// Get a single account by id.
    pub fn fetch(&self, id: &str) -> Result<(AccountRoot, Response), ClientError> {
        let request = self.build_fetch(id)?;
        let response = self.client.execute(&request)?;
        self.parse_fetch(&request, response)
    }

    /// Register an account. The payload is sent as `{"data": account}`.
    pub fn create(&self, account: &AccountData) -> Result<(AccountRoot, Response), ClientError> {
        let request = self.build_create(account)?;
        let response = self.client.execute(&request)?;
        self.parse_create(&request, response)
    }

    /// Delete an account at the given version.
    pub fn delete(&self, id: &str, version: i64) -> Result<Response, ClientError> {
        let request = self.build_delete(id, version)?;
        let response = self.client.execute(&request)?;
        self.parse_delete(&request, response)
    }
}
