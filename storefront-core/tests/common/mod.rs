#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_core::api::{Method, Request, Response, TransportError};
use storefront_core::{NotificationQueue, Product, Storefront, StorefrontConfig, Transport};

#[derive(Debug, Clone)]
struct Scripted {
    result: Result<Response, TransportError>,
    delay: Duration,
}

/// A transport that answers from a script and remembers every request it was sent.
///
/// Responses for a route are used in order; the last one repeats. A route with no script fails
/// the way an unreachable host would.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn respond(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        self.respond_after(Duration::ZERO, method, path, status, body)
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.script(
            method,
            path,
            Scripted {
                result: Ok(Response {
                    status,
                    body: body.to_string(),
                }),
                delay: Duration::ZERO,
            },
        )
    }

    pub fn respond_after(
        &self,
        delay: Duration,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        self.script(
            method,
            path,
            Scripted {
                result: Ok(Response {
                    status,
                    body: body.to_string(),
                }),
                delay,
            },
        )
    }

    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.script(
            method,
            path,
            Scripted {
                result: Err(TransportError("connection refused".to_string())),
                delay: Duration::ZERO,
            },
        )
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        self.requests.lock().unwrap().push(request.clone());

        let scripted = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&(request.method, request.path.clone()))
            .and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
        let path = request.path;

        async move {
            let Some(scripted) = scripted else {
                return Err(TransportError(format!("nothing scripted for {path}")));
            };
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            scripted.result
        }
    }
}

pub fn product(id: &str, cost: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        category: "Sports".to_string(),
        cost,
        rating: 5,
        image_url: format!("https://i.imgur.com/{id}.jpg"),
    }
}

pub fn products_json(products: &[Product]) -> serde_json::Value {
    serde_json::to_value(products).unwrap()
}

pub fn cart_json(entries: &[(&str, u32)]) -> serde_json::Value {
    serde_json::Value::Array(
        entries
            .iter()
            .map(|(id, qty)| serde_json::json!({ "productId": id, "qty": qty }))
            .collect(),
    )
}

pub fn error_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "message": message })
}

pub fn storefront(
    transport: FakeTransport,
) -> (Storefront<FakeTransport>, Arc<NotificationQueue>) {
    let sink = Arc::new(NotificationQueue::new());
    let store = Storefront::new(transport, sink.clone(), &StorefrontConfig::default());
    (store, sink)
}
