const GIT_SHA: &str = env!("HUB_WEB_GIT_SHA");

#[cfg(target_arch = "wasm32")]
pub fn main() {
    hub_web::app_lib::telemetry::init(3);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), git_sha = GIT_SHA, "starting hub-web");
    leptos::mount::mount_to_body(hub_web::App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {
    hub_web::app_lib::telemetry::init(2);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = GIT_SHA,
        "hub-web runs in the browser; build it for wasm32-unknown-unknown"
    );
}
