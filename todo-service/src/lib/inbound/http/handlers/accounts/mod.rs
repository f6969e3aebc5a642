use serde::Serialize;

use crate::domain::account::models::Account;

pub mod delete_account;
pub mod get_account;
pub mod list_accounts;
pub mod login;
pub mod register;
pub mod update_account;

pub use delete_account::delete_account;
pub use get_account::get_account;
pub use list_accounts::list_accounts;
pub use login::login;
pub use register::register;
pub use update_account::update_account;

/// Public view of an account; never carries the password hash or token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
        }
    }
}
