pub mod handler;

pub use handler::create_static_router;
