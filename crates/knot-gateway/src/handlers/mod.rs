pub mod health;
pub mod redirect;
pub mod url;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use url::{
    bulk_shorten_handler, delete_handler, list_handler, shorten_handler, stats_handler,
};
