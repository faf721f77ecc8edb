//! Domain layer for sublabel.
//!
//! Pure value types and the decoding pipeline that turns a recipient address
//! into label names:
//!
//! ```text
//! "J" <jonathan+abc.def+foo_bar@example.com>
//!     | extract_address
//!     v
//! jonathan+abc.def+foo_bar@example.com
//!     | get_subroute
//!     v
//! abc.def+foo_bar
//!     | decode
//!     v
//! ["Abc/Def", "Foo Bar"]
//! ```
//!
//! Nothing in this module fails; malformed input yields a best-effort result.

mod address;
mod label;
mod label_path;
mod message;
mod subroute;
mod types;

pub use address::{extract_address, parse_address, AddressParts};
pub use label::Label;
pub use label_path::{
    decode, title_case, LabelPath, GROUP_DELIMITER, HIERARCHY_DELIMITER, PATH_SEPARATOR,
    WORD_DELIMITER,
};
pub use message::Message;
pub use subroute::{get_subroute, Subroute, DIRECT, TAG_DELIMITER};
pub use types::{LabelId, ThreadId};
