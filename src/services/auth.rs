use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    auth::{Claims, RefreshClaims},
    user::{AuthResponse, RefreshToken, User},
};

/// Client-side form rules, enforced before any row is written.
pub fn validate_signup(password: &str, confirm_password: &str) -> anyhow::Result<()> {
    if password != confirm_password {
        anyhow::bail!("Passwords don't match");
    }
    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters");
    }
    Ok(())
}

pub struct AuthService;

impl AuthService {
    pub async fn signup(
        pool: &PgPool,
        email: &str,
        full_name: &str,
        password: &str,
        confirm_password: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<AuthResponse> {
        validate_signup(password, confirm_password)?;

        let email = email.trim().to_lowercase();
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&email)
                .fetch_one(pool)
                .await?;
        if exists {
            anyhow::bail!("An account with this email already exists");
        }

        let password_hash = bcrypt::hash(password, 12)?;
        let user: User = sqlx::query_as(
            "INSERT INTO users (email, password_hash, full_name)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(&email)
        .bind(password_hash)
        .bind(full_name)
        .fetch_one(pool)
        .await?;

        crate::services::metrics::SIGNUPS_COUNTER.inc();

        Self::issue_token_pair(pool, user, jwt_secret, refresh_secret, access_ttl, refresh_ttl_days)
            .await
    }

    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<AuthResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Invalid email or password"))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| anyhow::anyhow!("Invalid email or password"))?;
        if !valid {
            anyhow::bail!("Invalid email or password");
        }

        Self::issue_token_pair(pool, user, jwt_secret, refresh_secret, access_ttl, refresh_ttl_days)
            .await
    }

    /// Issue a fresh access + refresh pair and persist the refresh hash.
    async fn issue_token_pair(
        pool: &PgPool,
        user: User,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<AuthResponse> {
        let access_token = Self::generate_access_token(user.id, jwt_secret, access_ttl)?;
        let (refresh_token_str, refresh_id) =
            Self::generate_refresh_token(&user.id, refresh_secret, refresh_ttl_days)?;

        let hash = bcrypt::hash(&refresh_token_str, 8)?;
        let expires_at = Utc::now() + chrono::Duration::days(refresh_ttl_days as i64);
        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(refresh_id)
        .bind(user.id)
        .bind(hash)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(AuthResponse {
            access_token,
            refresh_token: refresh_token_str,
            user: user.into(),
        })
    }

    pub fn generate_access_token(
        user_id: Uuid,
        secret: &str,
        ttl_seconds: u64,
    ) -> anyhow::Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl_seconds as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }

    fn generate_refresh_token(
        user_id: &Uuid,
        secret: &str,
        ttl_days: u64,
    ) -> anyhow::Result<(String, Uuid)> {
        let now = Utc::now().timestamp() as usize;
        let jti = Uuid::new_v4();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: jti.to_string(),
            iat: now,
            exp: now + (ttl_days * 86400) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok((token, jti))
    }

    /// Rotate refresh token: revoke old, issue new pair.
    pub async fn refresh(
        pool: &PgPool,
        refresh_token_str: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> anyhow::Result<AuthResponse> {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let key = DecodingKey::from_secret(refresh_secret.as_bytes());
        let data = decode::<RefreshClaims>(
            refresh_token_str,
            &key,
            &Validation::new(Algorithm::HS256),
        )?;
        let rc = data.claims;
        let jti: Uuid = rc.jti.parse()?;
        let user_id: Uuid = rc.sub.parse()?;

        let stored: RefreshToken = sqlx::query_as(
            "SELECT * FROM refresh_tokens WHERE id = $1 AND revoked = FALSE",
        )
        .bind(jti)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Refresh token not found or revoked"))?;

        if stored.expires_at < Utc::now() {
            anyhow::bail!("Refresh token expired");
        }
        if !bcrypt::verify(refresh_token_str, &stored.token_hash)? {
            anyhow::bail!("Refresh token invalid");
        }

        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
            .bind(jti)
            .execute(pool)
            .await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Self::issue_token_pair(pool, user, jwt_secret, refresh_secret, access_ttl, refresh_ttl_days)
            .await
    }

    /// Revoke a refresh token (logout).
    pub async fn logout(
        pool: &PgPool,
        refresh_token_str: &str,
        refresh_secret: &str,
    ) -> anyhow::Result<()> {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let key = DecodingKey::from_secret(refresh_secret.as_bytes());
        let data =
            decode::<RefreshClaims>(refresh_token_str, &key, &Validation::new(Algorithm::HS256));

        if let Ok(data) = data {
            let jti: Uuid = data.claims.jti.parse()?;
            sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
                .bind(jti)
                .execute(pool)
                .await?;
        }

        Ok(())
    }

    pub async fn me(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Change password (requires current password verification).
    /// All refresh tokens are revoked to force re-login on other devices.
    pub async fn change_password(
        pool: &PgPool,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> anyhow::Result<()> {
        if new_password.len() < 6 {
            anyhow::bail!("Password must be at least 6 characters");
        }

        let password_hash: String = sqlx::query_scalar(
            "SELECT password_hash FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let valid = bcrypt::verify(current_password, &password_hash)
            .map_err(|_| anyhow::anyhow!("Current password is incorrect"))?;
        if !valid {
            anyhow::bail!("Current password is incorrect");
        }

        let new_hash = bcrypt::hash(new_password, 12)?;
        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(pool)
            .await?;

        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Update email (requires password verification).
    pub async fn update_email(
        pool: &PgPool,
        user_id: Uuid,
        new_email: &str,
        password: &str,
    ) -> anyhow::Result<()> {
        let password_hash: String = sqlx::query_scalar(
            "SELECT password_hash FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let valid = bcrypt::verify(password, &password_hash)
            .map_err(|_| anyhow::anyhow!("Password is incorrect"))?;
        if !valid {
            anyhow::bail!("Password is incorrect");
        }

        let new_email = new_email.trim().to_lowercase();
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id != $2)",
        )
        .bind(&new_email)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        if exists {
            anyhow::bail!("This email is already in use");
        }

        sqlx::query("UPDATE users SET email = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_email)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Password-verified full account deletion. Everything the account owns
    /// goes in one transaction; FK cascades take care of baby logs, posts,
    /// favorites and messages hanging off the deleted rows.
    pub async fn delete_account(
        pool: &PgPool,
        user_id: Uuid,
        password: &str,
    ) -> anyhow::Result<()> {
        let password_hash: String = sqlx::query_scalar(
            "SELECT password_hash FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let valid = bcrypt::verify(password, &password_hash)
            .map_err(|_| anyhow::anyhow!("Password is incorrect"))?;
        if !valid {
            anyhow::bail!("Password is incorrect");
        }

        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM babies WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM forum_threads WHERE author_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM forum_posts WHERE author_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM marketplace_listings WHERE seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!("Account {} deleted", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_access_token;

    #[test]
    fn test_validate_signup_mismatch() {
        let err = validate_signup("secret1", "secret2").unwrap_err();
        assert_eq!(err.to_string(), "Passwords don't match");
    }

    #[test]
    fn test_validate_signup_too_short() {
        let err = validate_signup("abc", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_validate_signup_ok() {
        assert!(validate_signup("secret", "secret").is_ok());
    }

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = AuthService::generate_access_token(user_id, "test-secret", 900).unwrap();
        let decoded = decode_access_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.user_id, user_id);
    }

    #[test]
    fn test_access_token_wrong_secret_rejected() {
        let token = AuthService::generate_access_token(Uuid::new_v4(), "secret-a", 900).unwrap();
        assert!(decode_access_token(&token, "secret-b").is_err());
    }
}
