pub mod cors;
mod error;
mod server;
pub mod services;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use server::{NEXT_ARRIVALS_PATH, router, run};
