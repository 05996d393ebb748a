//! Customer accounts through the `customer_*` routines.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Text, Varchar};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Customer, LoginInfo};

#[derive(QueryableByName)]
struct NewCustomerId {
    #[diesel(sql_type = Integer)]
    customer_id: i32,
}

/// Values written by `customer_update_account`.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub name: String,
    pub email: String,
    /// Already hashed
    pub password: String,
    pub day_phone: Option<String>,
    pub eve_phone: Option<String>,
    pub mob_phone: Option<String>,
}

impl AccountUpdate {
    pub fn has_phone(&self) -> bool {
        self.day_phone.is_some() || self.eve_phone.is_some() || self.mob_phone.is_some()
    }
}

/// Values written by `customer_update_address`.
#[derive(Debug, Clone)]
pub struct AddressUpdate {
    pub address_1: String,
    pub address_2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub shipping_region_id: i32,
}

#[derive(Clone)]
pub struct CustomerRepository {
    pool: AsyncDbPool,
}

impl CustomerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a customer with its contact details and card in one transaction.
    ///
    /// Nothing is left behind when a later statement fails, so the email stays free.
    /// A taken email surfaces as `AppError::Duplicate` through the unique index.
    pub async fn register(
        &self,
        account: &AccountUpdate,
        credit_card: Option<&str>,
    ) -> Result<i32, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let id = add_customer(conn, &account.name, &account.email, &account.password).await?;
                if account.has_phone() {
                    write_account(conn, id, account).await?;
                }
                if let Some(card) = credit_card {
                    write_credit_card(conn, id, card).await?;
                }
                Ok(id)
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM customer_get_customer($1)")
            .bind::<Integer, _>(id)
            .get_result::<Customer>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Id and password hash of the customer owning `email`.
    pub async fn login_info(&self, email: &str) -> Result<Option<LoginInfo>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM customer_get_login_info($1)")
            .bind::<Varchar, _>(email)
            .get_result::<LoginInfo>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn update_account(&self, id: i32, update: &AccountUpdate) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;
        write_account(&mut conn, id, update).await
    }

    pub async fn update_credit_card(&self, id: i32, credit_card: &str) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;
        write_credit_card(&mut conn, id, credit_card).await
    }

    pub async fn update_address(&self, id: i32, update: &AddressUpdate) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT customer_update_address($1, $2, $3, $4, $5, $6, $7, $8)")
            .bind::<Integer, _>(id)
            .bind::<Varchar, _>(&update.address_1)
            .bind::<Nullable<Varchar>, _>(update.address_2.as_deref())
            .bind::<Varchar, _>(&update.city)
            .bind::<Varchar, _>(&update.region)
            .bind::<Varchar, _>(&update.postal_code)
            .bind::<Varchar, _>(&update.country)
            .bind::<Integer, _>(update.shipping_region_id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}

async fn add_customer(
    conn: &mut AsyncPgConnection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<i32, AppError> {
    let row = diesel::sql_query("SELECT * FROM customer_add($1, $2, $3)")
        .bind::<Varchar, _>(name)
        .bind::<Varchar, _>(email)
        .bind::<Varchar, _>(password_hash)
        .get_result::<NewCustomerId>(conn)
        .await?;
    Ok(row.customer_id)
}

async fn write_account(
    conn: &mut AsyncPgConnection,
    id: i32,
    update: &AccountUpdate,
) -> Result<(), AppError> {
    diesel::sql_query("SELECT customer_update_account($1, $2, $3, $4, $5, $6, $7)")
        .bind::<Integer, _>(id)
        .bind::<Varchar, _>(&update.name)
        .bind::<Varchar, _>(&update.email)
        .bind::<Varchar, _>(&update.password)
        .bind::<Nullable<Varchar>, _>(update.day_phone.as_deref())
        .bind::<Nullable<Varchar>, _>(update.eve_phone.as_deref())
        .bind::<Nullable<Varchar>, _>(update.mob_phone.as_deref())
        .execute(conn)
        .await?;
    Ok(())
}

async fn write_credit_card(
    conn: &mut AsyncPgConnection,
    id: i32,
    credit_card: &str,
) -> Result<(), AppError> {
    diesel::sql_query("SELECT customer_update_credit_card($1, $2)")
        .bind::<Integer, _>(id)
        .bind::<Text, _>(credit_card)
        .execute(conn)
        .await?;
    Ok(())
}
