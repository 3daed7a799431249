//! Value objects - immutable types that represent domain concepts

mod price;
mod snowflake;

pub use price::{Price, PriceParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
