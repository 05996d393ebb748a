//! Customer accounts and authentication.
//!
//! Passwords are stored as argon2 hashes and sessions are stateless JWTs
//! signed with the configured secret.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::Customer;
use crate::repositories::{AccountUpdate, AddressUpdate, CustomerRepository};
use crate::utils::jwt::generate_access_token;
use crate::utils::password::{hash_password, verify_password};

/// Registration data after request validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub day_phone: Option<String>,
    pub eve_phone: Option<String>,
    pub mob_phone: Option<String>,
    pub credit_card: Option<String>,
}

/// Account changes; `password: None` keeps the current one.
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub day_phone: Option<String>,
    pub eve_phone: Option<String>,
    pub mob_phone: Option<String>,
}

/// A customer with a freshly issued token.
#[derive(Debug, Clone)]
pub struct Session {
    pub customer: Customer,
    /// Raw JWT, without the `Bearer ` prefix
    pub token: String,
    pub expires_in_hours: i64,
}

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    jwt: JwtConfig,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, jwt: JwtConfig) -> Self {
        Self { repo, jwt }
    }

    /// Signs a new customer up and logs them in.
    ///
    /// # Returns
    /// The session, or `USR_04` when the email is taken
    pub async fn register(&self, registration: Registration) -> AppResult<Session> {
        if self.repo.login_info(&registration.email).await?.is_some() {
            return Err(email_taken(&registration.email));
        }

        let password_hash = hash_password(&registration.password)?;
        let account = AccountUpdate {
            name: registration.name,
            email: registration.email,
            password: password_hash,
            day_phone: registration.day_phone,
            eve_phone: registration.eve_phone,
            mob_phone: registration.mob_phone,
        };
        let customer_id = self
            .repo
            .register(&account, registration.credit_card.as_deref())
            .await?;

        tracing::info!(customer_id, "Customer registered");
        self.session_for(customer_id).await
    }

    /// Checks credentials.
    ///
    /// # Returns
    /// `USR_05` for an unknown email, `USR_01` for a wrong password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let info = self
            .repo
            .login_info(email)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::EmailNotFound, "email", email))?;

        if !verify_password(password, &info.password)? {
            tracing::warn!(customer_id = info.customer_id, "Login with wrong password");
            return Err(AppError::Unauthorized {
                code: ErrorCode::InvalidEmailPassword,
                message: ErrorCode::InvalidEmailPassword.default_message().to_string(),
                field: Some("password".to_string()),
            });
        }

        self.session_for(info.customer_id).await
    }

    pub async fn profile(&self, customer_id: i32) -> AppResult<Customer> {
        self.repo.find_by_id(customer_id).await?.ok_or_else(|| {
            // Token outlived the account
            AppError::invalid_token()
        })
    }

    pub async fn update_account(
        &self,
        customer_id: i32,
        changes: AccountChanges,
    ) -> AppResult<Customer> {
        let current = self.profile(customer_id).await?;

        if let Some(owner) = self.repo.login_info(&changes.email).await? {
            if owner.customer_id != customer_id {
                return Err(email_taken(&changes.email));
            }
        }

        let password = match &changes.password {
            Some(password) => hash_password(password)?,
            None => current.password,
        };
        let update = AccountUpdate {
            name: changes.name,
            email: changes.email,
            password,
            day_phone: changes.day_phone,
            eve_phone: changes.eve_phone,
            mob_phone: changes.mob_phone,
        };
        self.repo.update_account(customer_id, &update).await?;

        self.profile(customer_id).await
    }

    pub async fn update_address(
        &self,
        customer_id: i32,
        address: AddressUpdate,
    ) -> AppResult<Customer> {
        self.profile(customer_id).await?;
        self.repo.update_address(customer_id, &address).await?;
        self.profile(customer_id).await
    }

    pub async fn update_credit_card(&self, customer_id: i32, card: &str) -> AppResult<Customer> {
        self.profile(customer_id).await?;
        self.repo.update_credit_card(customer_id, card).await?;
        self.profile(customer_id).await
    }

    async fn session_for(&self, customer_id: i32) -> AppResult<Session> {
        let customer = self.profile(customer_id).await?;
        let token = generate_access_token(
            customer.customer_id,
            customer.email.clone(),
            &self.jwt.secret,
            self.jwt.expiration_hours,
        )?;

        Ok(Session {
            customer,
            token,
            expires_in_hours: self.jwt.expiration_hours,
        })
    }
}

fn email_taken(email: &str) -> AppError {
    AppError::Duplicate {
        code: ErrorCode::EmailAlreadyExists,
        field: "email".to_string(),
        value: email.to_string(),
    }
}
