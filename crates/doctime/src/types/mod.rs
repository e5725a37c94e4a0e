//! Time value types stored by the codecs.

mod instant;
mod offset;
mod period;
mod zoned;

pub use instant::{max_iso_instant, min_iso_instant};
pub use offset::Offset;
pub use period::Period;
pub use zoned::ZonedDateTime;
