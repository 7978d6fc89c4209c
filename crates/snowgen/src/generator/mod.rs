mod error;
mod lock;
mod mutex;
mod status;
#[cfg(test)]
mod tests;

pub use error::*;
pub use lock::*;
pub(crate) use mutex::*;
pub use status::*;
