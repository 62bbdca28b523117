// phonectl-api: Async HTTP client for the REST control surface of a single phone.

pub mod address;
pub mod error;
pub mod model;
pub mod session;
pub mod transport;

mod maintenance;
mod multipart;
mod parameters;
mod phonebook;

pub use address::Address;
pub use error::Error;
pub use model::{FunctionKey, NO_KEY_TYPE, Parameters, Setting};
pub use session::PhoneSession;
pub use transport::{TlsMode, TransportConfig};
