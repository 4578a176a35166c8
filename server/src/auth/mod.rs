mod crypto;
mod db;
mod extractor;

pub use crypto::{hash_password, verify_password};
pub use db::{create_session, ensure_admin_account};
pub use extractor::{AuthUser, MaybeUser};
