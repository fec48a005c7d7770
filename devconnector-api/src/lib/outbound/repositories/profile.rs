use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::profile::models::Education;
use crate::domain::profile::models::Experience;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileDetails;
use crate::domain::profile::models::SocialLinks;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::user::models::UserId;
use crate::profile::errors::ProfileError;

const PROFILE_COLUMNS: &str = "id, user_id, status, skills, company, website, location, bio, \
     github_username, social, experience, education, created_at";

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    status: String,
    skills: Vec<String>,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    github_username: Option<String>,
    social: Json<SocialLinks>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user_id: UserId(row.user_id),
            details: ProfileDetails {
                status: row.status,
                skills: row.skills,
                company: row.company,
                website: row.website,
                location: row.location,
                bio: row.bio,
                github_username: row.github_username,
                social: row.social.0,
            },
            experience: row.experience.0,
            education: row.education.0,
            created_at: row.created_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> ProfileError {
    ProfileError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn upsert(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let details = &profile.details;

        let row: ProfileRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO profiles (id, user_id, status, skills, company, website, location, bio,
                                  github_username, social, experience, education, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE
            SET status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                company = EXCLUDED.company,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                bio = EXCLUDED.bio,
                github_username = EXCLUDED.github_username,
                social = EXCLUDED.social
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.id)
        .bind(profile.user_id.0)
        .bind(&details.status)
        .bind(&details.skills)
        .bind(&details.company)
        .bind(&details.website)
        .bind(&details.location)
        .bind(&details.bio)
        .bind(&details.github_username)
        .bind(Json(&details.social))
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(profile.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Profile::from))
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn save_entries(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET experience = $2, education = $3
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.0)
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NoProfile(profile.user_id.to_string()));
        }

        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
