/**
 * Account Handler Types
 *
 * Request and response types used by the register, login and list handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::registrar::NewAccount;
use crate::backend::auth::users::Account;
use crate::shared::{error::is_valid_email, FieldError, SharedError, UserRole};

/// Text fields of a multipart registration
///
/// Fields arrive one part at a time, so everything starts out absent.
/// Deliberately not `Debug`: it holds the raw password.
#[derive(Default, Clone)]
pub struct RegisterForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RegisterForm {
    /// Record one multipart text part; unknown names are ignored
    ///
    /// Returns `false` for names the form does not know.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "password" => &mut self.password,
            "role" => &mut self.role,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Check the form and turn it into a registration request
    ///
    /// All violations are reported together.
    pub fn validate(self, avatar: String) -> Result<NewAccount, SharedError> {
        let mut errors = Vec::new();

        let first_name = present(&self.first_name).map(str::to_owned);
        if first_name.is_none() {
            errors.push(FieldError::new("firstName", "first name is required"));
        }

        let email = present(&self.email).map(str::to_owned);
        match &email {
            None => errors.push(FieldError::new("email", "email is required")),
            Some(e) if !is_valid_email(e) => errors.push(FieldError::new("email", "email must be a valid email")),
            Some(_) => {}
        }

        // Passwords are taken verbatim; surrounding spaces are significant
        let password = self.password.filter(|p| !p.is_empty());
        if password.is_none() {
            errors.push(FieldError::new("password", "password is required"));
        }

        let role = match UserRole::parse_optional(self.role.as_deref()) {
            Ok(role) => role,
            Err(e) => {
                errors.push(FieldError::new("role", e.to_string()));
                UserRole::default()
            }
        };

        SharedError::check(errors)?;

        match (first_name, email, password) {
            (Some(first_name), Some(email), Some(password)) => Ok(NewAccount {
                first_name,
                last_name: present(&self.last_name).map(str::to_owned).unwrap_or_default(),
                email,
                password,
                role,
                avatar,
            }),
            _ => Err(SharedError::serialization("incomplete registration form")),
        }
    }
}

/// Login request
///
/// Both fields are optional so that absence can be told apart from an empty
/// string by the registrar, not by deserialization.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `data` of a successful registration
#[derive(Serialize, Debug)]
pub struct UserData {
    pub user: Account,
}

/// `data` of a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenData {
    pub token: String,
}

/// Account as shown to other callers; carries no credential
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            role: account.role,
            avatar: account.avatar,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// `data` of the account listing
#[derive(Serialize, Debug)]
pub struct UsersData {
    pub users: Vec<AccountSummary>,
}

impl From<Vec<Account>> for UsersData {
    fn from(accounts: Vec<Account>) -> Self {
        Self {
            users: accounts.into_iter().map(AccountSummary::from).collect(),
        }
    }
}
