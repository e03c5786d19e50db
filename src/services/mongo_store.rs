use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{self, doc};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use rust_decimal::Decimal;

use crate::{error::StoreError, models::Account};

use super::account_store::AccountStore;

pub const ACCOUNTS_COLLECTION: &str = "demo_accounts";

/// Accounts stored one document per user key, positions and trades embedded.
#[derive(Clone)]
pub struct MongoAccountStore {
    accounts: Collection<Account>,
    starting_balance: Decimal,
}

impl MongoAccountStore {
    pub fn new(db: &Database, starting_balance: Decimal) -> Self {
        Self {
            accounts: db.collection::<Account>(ACCOUNTS_COLLECTION),
            starting_balance,
        }
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    e.to_string().contains("E11000")
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn get_or_create(&self, user_key: &str) -> Result<Account, StoreError> {
        if let Some(acc) = self.get(user_key).await? {
            return Ok(acc);
        }

        let mut fresh = bson::to_document(&Account::new(user_key, self.starting_balance))?;
        fresh.remove("_id");

        let opts = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        match self
            .accounts
            .find_one_and_update(doc! { "_id": user_key }, doc! { "$setOnInsert": fresh }, opts)
            .await
        {
            Ok(Some(acc)) => Ok(acc),
            // lost the upsert race; the winner's document is there now
            Err(e) if is_duplicate_key(&e) => self
                .get(user_key)
                .await?
                .ok_or_else(|| StoreError::Backend(format!("account {user_key} vanished after upsert"))),
            Ok(None) => Err(StoreError::Backend("upsert returned no document".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, user_key: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.find_one(doc! { "_id": user_key }, None).await?)
    }

    async fn compare_and_swap(
        &self,
        user_key: &str,
        expected_version: i64,
        mut next: Account,
    ) -> Result<Account, StoreError> {
        next.user_key = user_key.to_string();
        next.version = expected_version + 1;
        next.updated_at = Utc::now();

        // documents written before versioning have no field and read back as 0
        let filter = if expected_version == 0 {
            doc! {
                "_id": user_key,
                "$or": [ { "version": 0_i64 }, { "version": { "$exists": false } } ],
            }
        } else {
            doc! { "_id": user_key, "version": expected_version }
        };

        let res = self.accounts.replace_one(filter, &next, None).await?;

        if res.matched_count == 0 {
            return Err(StoreError::VersionConflict);
        }
        Ok(next)
    }
}
