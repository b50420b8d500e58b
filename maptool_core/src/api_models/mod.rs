mod api_data;
mod error;
mod tokens;
mod upgrade;

pub use api_data::*;
pub use error::*;
pub use tokens::*;
pub use upgrade::*;
