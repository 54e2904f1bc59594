pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod zipcode;

pub use config::ValidatorConfig;
pub use error::{BoxError, ZipCodeError};
pub use transport::{HttpTransport, ResponseBody, Transport, body_from_bytes};
pub use types::ZipCode;
pub use zipcode::ZipCodeValidator;
