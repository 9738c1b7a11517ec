use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Authenticated caller, built from the `JwtClaims` placed in request
/// extensions by the JWT middleware.
///
/// Rejects with 401 when no valid token was presented.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(super::jwt::ADMIN_ROLE)
    }
}

impl TryFrom<&JwtClaims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token subject is not a valid user id".to_string()))?;

        Ok(Self {
            id,
            email: claims.email.clone(),
            roles: claims.roles.clone(),
        })
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        AuthUser::try_from(claims)
    }
}

/// Authenticated caller holding the `admin` role.
///
/// Rejects with 401 without a token and 403 without the role.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            tracing::debug!(user_id = %user.id, "Admin role required");
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn claims(sub: &str, roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "ada@example.com".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        }
    }

    fn parts_with(claims: Option<JwtClaims>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_auth_user_from_claims() {
        let id = Uuid::now_v7();
        let mut parts = parts_with(Some(claims(&id.to_string(), &["user"])));

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, id);
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_auth_user_missing_claims() {
        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_auth_user_bad_subject() {
        let mut parts = parts_with(Some(claims("user-42", &[])));
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_admin_user_requires_role() {
        let id = Uuid::now_v7().to_string();

        let mut parts = parts_with(Some(claims(&id, &["user"])));
        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let mut parts = parts_with(Some(claims(&id, &["admin"])));
        assert!(AdminUser::from_request_parts(&mut parts, &()).await.is_ok());
    }
}
