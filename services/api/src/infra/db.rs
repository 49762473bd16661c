use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Statement, TransactionTrait,
    Value,
};

use snooze_api_schema::{favorites, recovery_codes, stories, users};

use crate::domain::repository::{RecoveryCodeRepository, StoryRepository, UserRepository};
use crate::domain::types::{
    NewStory, NewUser, RecoveryEntry, Story, StoryPatch, User, UserPatch,
};
use crate::error::ApiError;
use crate::infra::sql::partial_update;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(username)
            .one(&self.db)
            .await
            .context("find user")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            phone: Set(user.phone.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }

    async fn update(&self, username: &str, patch: &UserPatch) -> Result<User, ApiError> {
        // Whitelisted column set; the builder interpolates these names.
        let mut fields: Vec<(&str, Value)> = Vec::new();
        if let Some(ref name) = patch.name {
            fields.push(("name", name.clone().into()));
        }
        if let Some(ref hash) = patch.password_hash {
            fields.push(("password_hash", hash.clone().into()));
        }
        if let Some(ref phone) = patch.phone {
            fields.push(("phone", phone.clone().into()));
        }
        fields.push(("updated_at", Utc::now().into()));

        let (query, values) = partial_update("users", &fields, "username", username.into());
        let model = users::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                query,
                values,
            ))
            .one(&self.db)
            .await
            .context("update user")?;
        model.map(user_from_model).ok_or(ApiError::UserNotFound)
    }

    async fn delete(&self, username: &str) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(username)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        username: model.username,
        name: model.name,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Story repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStoryRepository {
    pub db: DatabaseConnection,
}

impl StoryRepository for DbStoryRepository {
    async fn find(&self, id: i32) -> Result<Option<Story>, ApiError> {
        let model = stories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find story")?;
        Ok(model.map(story_from_model))
    }

    async fn create(&self, story: &NewStory) -> Result<Story, ApiError> {
        let now = Utc::now();
        let model = stories::ActiveModel {
            id: NotSet,
            title: Set(story.title.clone()),
            url: Set(story.url.clone()),
            author: Set(story.author.clone()),
            username: Set(story.username.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create story")?;
        Ok(story_from_model(model))
    }

    async fn update(&self, id: i32, patch: &StoryPatch) -> Result<Story, ApiError> {
        let mut fields: Vec<(&str, Value)> = Vec::new();
        if let Some(ref title) = patch.title {
            fields.push(("title", title.clone().into()));
        }
        if let Some(ref url) = patch.url {
            fields.push(("url", url.clone().into()));
        }
        if let Some(ref author) = patch.author {
            fields.push(("author", author.clone().into()));
        }
        fields.push(("updated_at", Utc::now().into()));

        let (query, values) = partial_update("stories", &fields, "id", id.into());
        let model = stories::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                query,
                values,
            ))
            .one(&self.db)
            .await
            .context("update story")?;
        model.map(story_from_model).ok_or(ApiError::StoryNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = stories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete story")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_author(&self, username: &str) -> Result<Vec<Story>, ApiError> {
        let models = stories::Entity::find()
            .filter(stories::Column::Username.eq(username))
            .order_by_desc(stories::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list stories by author")?;
        Ok(models.into_iter().map(story_from_model).collect())
    }

    async fn list_favorites(&self, username: &str) -> Result<Vec<Story>, ApiError> {
        let models = stories::Entity::find()
            .join(JoinType::InnerJoin, stories::Relation::Favorites.def())
            .filter(favorites::Column::Username.eq(username))
            .order_by_desc(stories::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list favorite stories")?;
        Ok(models.into_iter().map(story_from_model).collect())
    }

    async fn update_author(&self, username: &str, new_name: &str) -> Result<u64, ApiError> {
        let result = stories::Entity::update_many()
            .col_expr(stories::Column::Author, Expr::value(new_name))
            .col_expr(stories::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(stories::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .context("cascade author rename")?;
        Ok(result.rows_affected)
    }
}

fn story_from_model(model: stories::Model) -> Story {
    Story {
        id: model.id,
        title: model.title,
        url: model.url,
        author: model.author,
        username: model.username,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Recovery code repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecoveryCodeRepository {
    pub db: DatabaseConnection,
}

impl RecoveryCodeRepository for DbRecoveryCodeRepository {
    async fn find(&self, username: &str) -> Result<Option<RecoveryEntry>, ApiError> {
        let model = recovery_codes::Entity::find_by_id(username)
            .one(&self.db)
            .await
            .context("find recovery entry")?;
        Ok(model.map(entry_from_model))
    }

    async fn replace(&self, entry: &RecoveryEntry) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let entry = entry.clone();
                Box::pin(async move {
                    recovery_codes::Entity::delete_by_id(entry.username.clone())
                        .exec(txn)
                        .await?;
                    insert_entry(txn, &entry).await?;
                    Ok(())
                })
            })
            .await
            .context("replace recovery entry")?;
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<bool, ApiError> {
        let result = recovery_codes::Entity::delete_by_id(username)
            .exec(&self.db)
            .await
            .context("delete recovery entry")?;
        Ok(result.rows_affected > 0)
    }

    async fn redeem(&self, username: &str, new_password_hash: &str) -> Result<bool, ApiError> {
        let redeemed = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                let username = username.to_owned();
                let new_password_hash = new_password_hash.to_owned();
                Box::pin(async move {
                    // The conditional delete is the commit point: if the
                    // entry is already gone, a concurrent redemption won
                    // and this one must not touch the password.
                    let deleted = recovery_codes::Entity::delete_by_id(username.clone())
                        .exec(txn)
                        .await?;
                    if deleted.rows_affected == 0 {
                        return Ok(false);
                    }

                    let fields: Vec<(&str, Value)> = vec![
                        ("password_hash", new_password_hash.into()),
                        ("updated_at", Utc::now().into()),
                    ];
                    let (query, values) =
                        partial_update("users", &fields, "username", username.into());
                    txn.execute(Statement::from_sql_and_values(
                        txn.get_database_backend(),
                        query,
                        values,
                    ))
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("redeem recovery entry")?;
        Ok(redeemed)
    }
}

async fn insert_entry(
    txn: &DatabaseTransaction,
    entry: &RecoveryEntry,
) -> Result<(), sea_orm::DbErr> {
    recovery_codes::ActiveModel {
        username: Set(entry.username.clone()),
        code_hash: Set(entry.code_hash.clone()),
        created_at: Set(entry.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn entry_from_model(model: recovery_codes::Model) -> RecoveryEntry {
    RecoveryEntry {
        username: model.username,
        code_hash: model.code_hash,
        created_at: model.created_at,
    }
}
