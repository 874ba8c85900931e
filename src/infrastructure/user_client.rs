use reqwest::{Client, Url};

use crate::domain::session::{AuthResponse, User};
use crate::errors::ClientError;

use super::http::{endpoint, send_json, with_bearer};
use super::models::{AuthResponseDto, CredentialsBody, UserDto};

#[derive(Debug, Clone)]
pub struct UserClient {
    http: Client,
    base_url: Url,
}

impl UserClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.authenticate("/api/users/login", username, password).await
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        self.authenticate("/api/users/register", username, password).await
    }

    pub async fn get_profile(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<User, ClientError> {
        let url = endpoint(&self.base_url, &format!("/api/users/{}", user_id))?;
        let req = with_bearer(self.http.get(url), token);
        let user: UserDto = send_json(req, token.is_some()).await?;
        Ok(user.into())
    }

    async fn authenticate(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let url = endpoint(&self.base_url, path)?;
        let req = with_bearer(self.http.post(url), None)
            .json(&CredentialsBody { username, password });
        let dto: AuthResponseDto = send_json(req, false).await?;
        dto.into_domain()
            .ok_or_else(|| ClientError::Rejected("No token received from server".to_string()))
    }
}
