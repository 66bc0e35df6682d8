use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

/// A stored account. Attributes are kept as opaque JSON and echoed back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(rename = "type")]
    pub account_type: String,
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRoot {
    pub data: Account,
    pub links: Links,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

#[derive(Deserialize)]
pub struct CreateAccount {
    pub data: Option<NewAccount>,
}

#[derive(Deserialize)]
pub struct NewAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organisation_id: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    pub version: Option<i64>,
    pub attributes: Option<Value>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Account>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(ACCOUNTS_PATH, post(create_account))
        .route(
            &format!("{ACCOUNTS_PATH}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error_message: message.into(),
        }),
    )
        .into_response()
}

fn root(account: Account) -> AccountRoot {
    AccountRoot {
        links: Links {
            self_link: format!("{ACCOUNTS_PATH}/{}", account.id),
        },
        data: account,
    }
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(value).map_err(|_| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} in body must be of type uuid: \"{value}\""),
        )
    })
}

async fn create_account(
    State(db): State<Db>,
    payload: Result<Json<CreateAccount>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let Some(input) = request.data else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "validation failure list:\ndata in body is required",
        );
    };

    let id = match parse_uuid("id", &input.id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let organisation_id = match parse_uuid("organisation_id", &input.organisation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if input.account_type != "accounts" {
        return api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("type in body should be one of [accounts]: \"{}\"", input.account_type),
        );
    }

    let mut accounts = db.write().await;
    if accounts.contains_key(&id) {
        return api_error(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        );
    }
    let account = Account {
        id,
        organisation_id,
        account_type: input.account_type,
        version: input.version.unwrap_or(0),
        attributes: input.attributes,
    };
    accounts.insert(id, account.clone());
    tracing::info!(%id, "account created");

    (StatusCode::CREATED, Json(root(account))).into_response()
}

async fn fetch_account(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return api_error(StatusCode::BAD_REQUEST, "id is not a valid uuid");
    };
    let accounts = db.read().await;
    match accounts.get(&uuid) {
        Some(account) => Json(root(account.clone())).into_response(),
        None => api_error(StatusCode::NOT_FOUND, format!("record {id} does not exist")),
    }
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return api_error(StatusCode::BAD_REQUEST, "id is not a valid uuid");
    };
    let Some(version) = params.get("version").and_then(|v| v.parse::<i64>().ok()) else {
        return api_error(StatusCode::BAD_REQUEST, "invalid version number");
    };

    let mut accounts = db.write().await;
    match accounts.get(&uuid).map(|account| account.version) {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(current) if current != version => api_error(StatusCode::CONFLICT, "invalid version"),
        Some(_) => {
            accounts.remove(&uuid);
            tracing::info!(%uuid, version, "account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
