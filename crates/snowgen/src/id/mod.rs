mod fields;
mod layout;
mod snowflake;

pub use fields::*;
pub use snowflake::*;
