pub mod convert;
pub mod preview;
pub mod system;

use actix_files::Files;
use actix_web::web;
use std::path::Path;
use tracing::{info, warn};

/// Register every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system::root)
        .service(system::health)
        .service(convert::convert_stream)
        .service(convert::convert)
        .service(preview::preview);
}

/// Mount the frontend at /static when the directory exists
pub fn configure_static(cfg: &mut web::ServiceConfig, frontend_dir: &Path) {
    if frontend_dir.is_dir() {
        info!("Serving frontend from {}", frontend_dir.display());
        cfg.service(Files::new("/static", frontend_dir).index_file("index.html"));
    } else {
        warn!(
            "Frontend directory {} not found, /static disabled",
            frontend_dir.display()
        );
    }
}
