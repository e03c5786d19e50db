use serde::{Deserialize, Serialize};

/// Identity attached to a request by the auth middleware. The ledger treats
/// `user_key` as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_key: String,
}
