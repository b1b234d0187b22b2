mod health;
mod url;

pub use health::health_handler;
pub use url::{redirect_handler, shorten_json_handler, shorten_text_handler};
