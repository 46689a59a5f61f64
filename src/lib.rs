pub mod asset;
pub mod chars;
pub mod collision;
pub mod config;
pub mod encode;
pub mod error;
pub mod frame;
mod helpers;
pub mod sheet;

pub use asset::{Asset, Format};
pub use chars::Cell;
pub use collision::CollisionMask;
pub use config::{Config, DirectiveTemplate};
pub use encode::{decode_directives, encode_row, EncodedLine, Segment};
pub use error::{Error, Malformed, Result};
pub use frame::Frame;
pub use sheet::Sheet;
