pub mod error;
pub mod notice;
pub mod response;

pub use error::{ClientError, ClientResult};
pub use notice::{Notice, Severity};
