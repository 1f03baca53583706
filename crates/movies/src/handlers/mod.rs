pub mod error;
pub mod extract;
mod forward;
pub mod health;
pub mod items;
pub mod queries;
pub mod sample_data;
pub mod tables;

pub use error::ApiError;
pub use extract::{Params, Payload};
use forward::forward;
