mod url;

pub use self::url::{DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse, HealthResponse};
