mod health;
mod redirect;
mod url;

pub use health::health_handler;
pub use redirect::{redirect_handler, redirect_root_handler};
pub use self::url::{
    decode_handler, encode_handler, list_handler, statistics_handler, statistics_root_handler,
};
