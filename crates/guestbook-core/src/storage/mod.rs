//! Storage layer: the JSON file codec and the entry and user stores.

pub mod codec;
pub mod json_entries;
pub mod json_users;
pub mod traits;
pub mod types;
pub mod validation;

pub use codec::JsonFile;
pub use json_entries::JsonEntryStore;
pub use json_users::JsonUserStore;
pub use traits::{EntryStore, UserStore};
pub use types::{GuestbookEntry, User};
pub use validation::{validate_registration, Registration};
