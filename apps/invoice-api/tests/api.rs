//! End-to-end tests: the full router over an in-memory database.

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use invoice_api::state::AppState;
use invoice_core::{TaxPolicy, TaxRate};
use invoice_db::{Database, DbConfig};

async fn app_with_policy(policy: TaxPolicy) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    invoice_api::router(AppState::new(db, policy))
}

async fn app() -> Router {
    app_with_policy(TaxPolicy::default()).await
}

/// Sends one request and returns status + parsed JSON body.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn apply(app: &Router, draft: Value, command: Value) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/drafts/apply",
        Some(json!({ "draft": draft, "command": command })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "apply failed: {body}");
    body
}

fn update_item(index: usize, kind: &str, value: &str) -> Value {
    json!({ "kind": "update_item", "index": index, "field": { "kind": kind, "value": value } })
}

/// Reads a decimal out of a JSON string field.
fn dec(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

/// Builds a draft with two `{mrp 100, discount 10, qty 2}` items.
async fn reference_draft(app: &Router) -> Value {
    let (_, mut draft) = send(app, Method::GET, "/api/drafts/new", None).await;

    draft = apply(
        app,
        draft,
        json!({ "kind": "set_company", "field": { "kind": "name", "value": "Acme Traders" } }),
    )
    .await;
    draft = apply(
        app,
        draft,
        json!({ "kind": "set_customer", "field": { "kind": "name", "value": "R. Sharma" } }),
    )
    .await;

    for index in 0..2 {
        draft = apply(app, draft, json!({ "kind": "add_item" })).await;
        draft = apply(app, draft, update_item(index, "mrp", "100")).await;
        draft = apply(app, draft, update_item(index, "discount", "10")).await;
        draft = apply(app, draft, update_item(index, "quantity", "2")).await;
    }

    draft
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn new_draft_is_empty() {
    let app = app().await;
    let (status, draft) = send(&app, Method::GET, "/api/drafts/new", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["items"], json!([]));
    assert_eq!(dec(&draft["footer"]["total_after_tax"]), Decimal::ZERO);
}

#[tokio::test]
async fn editing_recomputes_items_and_footer() {
    let app = app().await;
    let draft = reference_draft(&app).await;

    let item = &draft["items"][1];
    assert_eq!(item["serial"], "2");
    assert_eq!(dec(&item["rate_after_discount"]), Decimal::from(90));
    assert_eq!(dec(&item["final_rate"]), Decimal::from(180));

    let footer = &draft["footer"];
    assert_eq!(dec(&footer["total_before_tax"]), Decimal::from(400));
    assert_eq!(dec(&footer["cgst"]), Decimal::new(324, 1));
    assert_eq!(dec(&footer["igst"]), Decimal::new(324, 1));
    assert_eq!(dec(&footer["total_after_tax"]), Decimal::new(4248, 1));
}

#[tokio::test]
async fn non_numeric_input_counts_as_zero() {
    let app = app().await;
    let (_, draft) = send(&app, Method::GET, "/api/drafts/new", None).await;
    let draft = apply(&app, draft, json!({ "kind": "add_item" })).await;
    let draft = apply(&app, draft, update_item(0, "mrp", "twelve")).await;
    let draft = apply(&app, draft, update_item(0, "quantity", "3")).await;

    assert_eq!(dec(&draft["items"][0]["mrp"]), Decimal::ZERO);
    assert_eq!(dec(&draft["footer"]["total_after_tax"]), Decimal::ZERO);
}

#[tokio::test]
async fn out_of_range_item_index_is_a_validation_error() {
    let app = app().await;
    let (_, draft) = send(&app, Method::GET, "/api/drafts/new", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/drafts/apply",
        Some(json!({ "draft": draft, "command": { "kind": "remove_item", "index": 0 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_command_is_a_validation_error() {
    let app = app().await;
    let (_, draft) = send(&app, Method::GET, "/api/drafts/new", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/drafts/apply",
        Some(json!({ "draft": draft, "command": { "kind": "rename_everything" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn recompute_repairs_client_side_values() {
    let app = app().await;
    let mut draft = reference_draft(&app).await;
    draft["items"][0]["final_rate"] = json!("1");
    draft["footer"]["total_after_tax"] = json!("1");

    let (status, fixed) = send(&app, Method::POST, "/api/drafts/recompute", Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&fixed["items"][0]["final_rate"]), Decimal::from(180));
    assert_eq!(dec(&fixed["footer"]["total_after_tax"]), Decimal::new(4248, 1));
}

#[tokio::test]
async fn negative_mrp_and_quantity_are_floored_on_submit() {
    let app = app().await;
    let mut draft = reference_draft(&app).await;
    draft["items"][0]["mrp"] = json!("-100");
    draft["items"][1]["quantity"] = json!("-2");

    let (status, fixed) = send(
        &app,
        Method::POST,
        "/api/drafts/recompute",
        Some(draft.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&fixed["items"][0]["mrp"]), Decimal::ZERO);
    assert_eq!(dec(&fixed["items"][1]["quantity"]), Decimal::ZERO);

    let (status, created) = send(&app, Method::POST, "/api/invoices", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dec(&created["items"][0]["mrp"]), Decimal::ZERO);
    assert_eq!(dec(&created["items"][0]["final_rate"]), Decimal::ZERO);
    assert_eq!(dec(&created["footer"]["total_before_tax"]), Decimal::ZERO);
    assert_eq!(dec(&created["footer"]["total_after_tax"]), Decimal::ZERO);
}

#[tokio::test]
async fn submit_then_fetch_and_list() {
    let app = app().await;
    let mut draft = reference_draft(&app).await;
    // tampered totals are recomputed on submit
    draft["footer"]["total_after_tax"] = json!("0");

    let (status, created) = send(&app, Method::POST, "/api/invoices", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(dec(&created["footer"]["total_after_tax"]), Decimal::new(4248, 1));

    let (status, fetched) = send(&app, Method::GET, &format!("/api/invoices/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["company"]["name"], "Acme Traders");
    assert_eq!(fetched["items"].as_array().unwrap().len(), 2);

    let (status, list) = send(&app, Method::GET, "/api/invoices", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["customer_name"], "R. Sharma");
    assert_eq!(list[0]["item_count"], 2);
}

#[tokio::test]
async fn missing_invoice_is_404() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/invoices/550e8400-e29b-41d4-a716-446655440000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_invoice_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/invoices/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn configured_tax_policy_is_used() {
    let app = app_with_policy(TaxPolicy::new(TaxRate::from_bps(600), TaxRate::zero())).await;
    let (_, draft) = send(&app, Method::GET, "/api/drafts/new", None).await;
    let draft = apply(&app, draft, json!({ "kind": "add_item" })).await;
    let draft = apply(&app, draft, update_item(0, "mrp", "50")).await;
    let draft = apply(&app, draft, update_item(0, "quantity", "1")).await;

    assert_eq!(dec(&draft["footer"]["cgst"]), Decimal::from(3));
    assert_eq!(dec(&draft["footer"]["igst"]), Decimal::ZERO);
    assert_eq!(dec(&draft["footer"]["total_after_tax"]), Decimal::from(53));
}
