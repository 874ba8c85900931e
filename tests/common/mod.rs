//! In-process stand-in for the catalog, user and order services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use shop_client::{build_backends, Backends, Config, MemoryStore};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub role: Option<String>,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct Stub {
    pub products: Vec<Value>,
    /// Non-zero makes `GET /api/products` fail with this status.
    pub products_status: u16,
    pub orders: Vec<Value>,
    /// Non-zero makes `POST /api/orders` fail with this status.
    pub create_order_status: u16,
    /// Bearer tokens answered with 401.
    pub rejected_tokens: Vec<String>,
    /// Bearer tokens answered with 403.
    pub forbidden_tokens: Vec<String>,
    pub requests: Vec<Recorded>,
}

impl Stub {
    pub fn with_products(count: usize) -> Self {
        Stub {
            products: (1..=count)
                .map(|i| {
                    json!({
                        "id": format!("p{}", i),
                        "name": format!("Product {}", i),
                        "price": 9.99,
                        "stock": 3,
                    })
                })
                .collect(),
            ..Stub::default()
        }
    }
}

pub type SharedStub = web::Data<Mutex<Stub>>;

pub struct TestEnv {
    pub stub: SharedStub,
    pub backends: Backends,
    pub store: Arc<MemoryStore>,
}

impl TestEnv {
    pub fn requests(&self) -> Vec<Recorded> {
        self.stub.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

/// Starts the stub on an ephemeral port and points every backend at it.
pub async fn start(stub: Stub) -> TestEnv {
    let data: SharedStub = web::Data::new(Mutex::new(stub));
    let app_data = data.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .default_service(web::to(route))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind the stub backend");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let base = format!("http://{}", addr);
    let config = Config::from_lookup(|var| match var {
        "SHOP_STATE_FILE" => None,
        _ => Some(base.clone()),
    })
    .expect("stub config");

    TestEnv {
        stub: data,
        backends: build_backends(&config),
        store: Arc::new(MemoryStore::new()),
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn product_id(p: &Value) -> &str {
    p["id"].as_str().or_else(|| p["ID"].as_str()).unwrap_or_default()
}

async fn route(req: HttpRequest, body: web::Bytes, state: SharedStub) -> HttpResponse {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|q| q.into_inner())
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let authorization = header(&req, "Authorization");

    let mut stub = state.lock().unwrap();
    stub.requests.push(Recorded {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: query.clone(),
        authorization: authorization.clone(),
        role: header(&req, "X-User-Role"),
        body: body.clone(),
    });

    if let Some(token) = authorization.as_deref().and_then(|a| a.strip_prefix("Bearer ")) {
        if stub.rejected_tokens.iter().any(|t| t == token) {
            return HttpResponse::Unauthorized().body("token expired\n");
        }
        if stub.forbidden_tokens.iter().any(|t| t == token) {
            return HttpResponse::Forbidden().json(json!({"error": "Access denied"}));
        }
    }

    let segments: Vec<&str> = req.path().trim_matches('/').split('/').collect();
    let method = req.method().as_str().to_string();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "products"]) => {
            if stub.products_status != 0 {
                return HttpResponse::build(status(stub.products_status)).body("catalog down\n");
            }
            let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let per_page: usize = query.get("per_page").and_then(|p| p.parse().ok()).unwrap_or(10);
            let items: Vec<Value> = stub
                .products
                .iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .cloned()
                .collect();
            // Mirrors Go encoding an empty result as `null`.
            let products = if items.is_empty() {
                Value::Null
            } else {
                Value::Array(items)
            };
            HttpResponse::Ok().json(json!({
                "products": products,
                "total": stub.products.len(),
                "page": page,
                "per_page": per_page,
            }))
        }
        ("GET", ["api", "products", id]) => {
            match stub.products.iter().find(|p| product_id(p) == *id) {
                Some(p) => HttpResponse::Ok().json(p),
                None => HttpResponse::NotFound().body("product not found\n"),
            }
        }
        ("POST", ["api", "admin", "products"]) => {
            let mut product = body.clone();
            product["id"] = json!(format!("p{}", stub.products.len() + 1));
            stub.products.push(product.clone());
            HttpResponse::Created().json(product)
        }
        ("PUT", ["api", "admin", "products", id]) => {
            let mut product = body.clone();
            product["id"] = json!(id);
            if let Some(existing) = stub.products.iter_mut().find(|p| product_id(p) == *id) {
                *existing = product.clone();
            }
            HttpResponse::Ok().json(product)
        }
        ("DELETE", ["api", "admin", "products", id]) => {
            stub.products.retain(|p| product_id(p) != *id);
            HttpResponse::NoContent().finish()
        }
        ("POST", ["api", "users", "login"]) => {
            let username = body["username"].as_str().unwrap_or_default();
            match body["password"].as_str() {
                Some("secret") => HttpResponse::Ok().json(auth_body(username)),
                Some("locked") => {
                    HttpResponse::Forbidden().json(json!({"error": "Account locked"}))
                }
                _ => HttpResponse::Unauthorized().body("Invalid credentials\n"),
            }
        }
        ("POST", ["api", "users", "register"]) => {
            let username = body["username"].as_str().unwrap_or_default();
            match username {
                "taken" => HttpResponse::Conflict().body("Username already exists\n"),
                "banned" => {
                    HttpResponse::BadRequest().json(json!({"error": "Username not allowed"}))
                }
                "broken" => HttpResponse::InternalServerError().finish(),
                _ => HttpResponse::Created().json(auth_body(username)),
            }
        }
        ("GET", ["api", "users", id]) => HttpResponse::Ok().json(json!({
            "id": id,
            "username": "alice-remote",
            "role": "user",
        })),
        ("POST", ["api", "orders"]) => {
            if stub.create_order_status != 0 {
                return HttpResponse::build(status(stub.create_order_status))
                    .body("insufficient stock\n");
            }
            let order_id = format!("o{}", stub.orders.len() + 1);
            stub.orders.push(json!({
                "id": order_id,
                "user_id": body["user_id"],
                "status": "pending",
                "total_price": 0.0,
                "created_at": "2024-05-01T10:00:00Z",
                "items": [],
            }));
            HttpResponse::Created().json(json!({
                "order_id": order_id,
                "status": "pending",
                "message": "Order created successfully",
            }))
        }
        ("GET", ["api", "orders"]) => {
            let user_id = query.get("user_id").cloned().unwrap_or_default();
            let orders: Vec<Value> = stub
                .orders
                .iter()
                .filter(|o| o["user_id"].as_str() == Some(user_id.as_str()))
                .cloned()
                .collect();
            HttpResponse::Ok().json(json!({
                "orders": orders,
                "total": orders.len(),
                "page": 1,
                "limit": 10,
            }))
        }
        ("GET", ["api", "orders", id]) => {
            match stub.orders.iter().find(|o| o["id"].as_str() == Some(*id)) {
                Some(o) => HttpResponse::Ok().json(o),
                None => HttpResponse::NotFound().body("order not found\n"),
            }
        }
        ("PATCH", ["api", "orders", id]) => {
            let new_status = body["status"].clone();
            match stub.orders.iter_mut().find(|o| o["id"].as_str() == Some(*id)) {
                Some(o) => {
                    o["status"] = new_status;
                    HttpResponse::Ok().json(o.clone())
                }
                None => HttpResponse::InternalServerError().body("order not found\n"),
            }
        }
        _ => HttpResponse::NotFound().finish(),
    }
}

fn auth_body(username: &str) -> Value {
    json!({
        "token": format!("tok-{}", username),
        "user": {"id": format!("u-{}", username), "username": username, "role": "user"},
    })
}

fn status(code: u16) -> actix_web::http::StatusCode {
    actix_web::http::StatusCode::from_u16(code).expect("valid status code")
}
