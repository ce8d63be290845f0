use actix_web::web;

pub mod games;
pub mod health;

/// Register every route. Shared by `main.rs` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Inbox and turns: /api/2/games/**
    cfg.service(web::scope("/api/2/games").configure(games::configure_routes));
}
