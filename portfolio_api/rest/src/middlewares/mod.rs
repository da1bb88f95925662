use axum::Router;

mod panic_handler;
mod request_id;
mod trace;

/// Wrap the router in all middlewares, the request id being the outermost layer.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    let router = panic_handler::add(router);
    let router = trace::add(router);
    request_id::add(router)
}
