//! Typed client for the review backend. Responses are decoded and normalized
//! here, so callers only ever see canonical models.

pub mod query;
pub mod transport;

use std::rc::Rc;

use http::{Method, StatusCode};
use leptos::logging::{error, log, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthState, AuthStore};
use crate::error::ApiError;
use crate::models::{
    LoginCredentials, NewReview, Page, Review, Role, Teacher, TeacherForm,
    TeacherStats, TokenResponse, User, UserForm, UserStats,
};
pub use query::{query_params, ReviewQuery, TeacherQuery, UserQuery};
pub use transport::{
    ApiRequest, ApiResponse, FormField, GlooTransport, ImageUpload, RequestBody, Transport,
};

#[derive(Deserialize)]
struct HelpfulCount {
    helpful_count: u32,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh: &'a str,
}

pub struct ApiClient<T> {
    transport: Rc<T>,
    auth: AuthStore,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            auth: self.auth.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, auth: AuthStore) -> Self {
        Self {
            transport: Rc::new(transport),
            auth,
        }
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest {
        let mut request = ApiRequest::new(method, path);
        request.bearer = self.auth.access_token();
        request
    }

    fn with_json<B: Serialize>(mut request: ApiRequest, body: &B) -> Result<ApiRequest, ApiError> {
        request.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(request)
    }

    async fn send(&self, request: ApiRequest) -> Result<String, ApiError> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.status.is_success() {
            return Ok(response.body);
        }
        error!("[API] {} {} -> {}: {}", method, path, response.status, response.body);
        Err(ApiError::from_response(response.status, &response.body))
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    // --- authentication ---

    /// Signs in through the role's endpoint and records the session.
    pub async fn login(
        &self,
        role: Role,
        credentials: &LoginCredentials,
    ) -> Result<AuthState, ApiError> {
        let path = match role {
            Role::Student => "/auth/student/login/",
            Role::Admin => "/auth/admin/login/",
        };
        let request = Self::with_json(ApiRequest::new(Method::POST, path), credentials)?;
        let tokens: TokenResponse = self.fetch(request).await?;
        self.auth.login(role, &credentials.username, &tokens);
        Ok(self.auth.state_untracked())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(self.request(Method::GET, "/auth/user/")).await
    }

    /// Trades the stored refresh token for a new access token.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.auth.refresh_token() else {
            return Err(ApiError::Decode("no refresh token stored".into()));
        };
        let request = Self::with_json(
            ApiRequest::new(Method::POST, "/auth/refresh/"),
            &RefreshBody { refresh: &refresh },
        )?;
        let tokens: TokenResponse = self.fetch(request).await?;
        self.auth.replace_tokens(&tokens);
        Ok(())
    }

    /// Checks a restored session against the backend. An expired access token
    /// is refreshed once; if that fails too, the local session is dropped.
    /// Transport failures leave the session alone.
    pub async fn revalidate_session(&self) -> AuthState {
        if self.auth.access_token().is_none() {
            return self.auth.state_untracked();
        }
        match self.current_user().await {
            Ok(user) => log!("[AUTH] session valid for {}", user.username),
            Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) => {
                if let Err(err) = self.refresh_session().await {
                    warn!("[AUTH] refresh failed, signing out: {}", err);
                    self.auth.logout();
                }
            }
            Err(err) => warn!("[AUTH] could not check the session: {}", err),
        }
        self.auth.state_untracked()
    }

    /// Clears the local session right away, then tells the backend. A failed
    /// server call is only logged; the user is signed out either way.
    pub async fn logout(&self) {
        let request = self.request(Method::POST, "/auth/logout/");
        self.auth.logout();
        if let Err(err) = self.execute(request).await {
            log!("[AUTH] server logout failed: {}", err);
        }
    }

    // --- teachers ---

    pub async fn list_teachers(&self, query: &TeacherQuery) -> Result<Page<Teacher>, ApiError> {
        let mut request = self.request(Method::GET, "/teachers/");
        request.query = query_params(query);
        self.fetch(request).await
    }

    pub async fn teacher(&self, id: u64) -> Result<Teacher, ApiError> {
        self.fetch(self.request(Method::GET, format!("/teachers/{id}/")))
            .await
    }

    pub async fn teacher_stats(&self) -> Result<TeacherStats, ApiError> {
        self.fetch(self.request(Method::GET, "/teachers/stats/"))
            .await
    }

    fn teacher_form(form: &TeacherForm, image: Option<&ImageUpload>) -> RequestBody {
        let mut fields: Vec<FormField> = form
            .fields()
            .iter()
            .map(|(name, value)| FormField::text(name, value))
            .collect();
        if let Some(upload) = image {
            fields.push(FormField::File {
                name: "image".into(),
                upload: upload.clone(),
            });
        }
        RequestBody::Multipart(fields)
    }

    pub async fn create_teacher(
        &self,
        form: &TeacherForm,
        image: Option<&ImageUpload>,
    ) -> Result<Teacher, ApiError> {
        let mut request = self.request(Method::POST, "/teachers/");
        request.body = Self::teacher_form(form, image);
        self.fetch(request).await
    }

    pub async fn update_teacher(
        &self,
        id: u64,
        form: &TeacherForm,
        image: Option<&ImageUpload>,
    ) -> Result<Teacher, ApiError> {
        let mut request = self.request(Method::PATCH, format!("/teachers/{id}/"));
        request.body = Self::teacher_form(form, image);
        self.fetch(request).await
    }

    pub async fn delete_teacher(&self, id: u64) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, format!("/teachers/{id}/")))
            .await
    }

    // --- reviews ---

    pub async fn list_reviews(&self, query: &ReviewQuery) -> Result<Page<Review>, ApiError> {
        let mut request = self.request(Method::GET, "/reviews/");
        request.query = query_params(query);
        self.fetch(request).await
    }

    pub async fn list_reviews_for_admin(
        &self,
        query: &ReviewQuery,
    ) -> Result<Page<Review>, ApiError> {
        let mut request = self.request(Method::GET, "/reviews/manage/");
        request.query = query_params(query);
        self.fetch(request).await
    }

    pub async fn create_review(&self, review: &NewReview) -> Result<(), ApiError> {
        let request = Self::with_json(self.request(Method::POST, "/reviews/create/"), review)?;
        self.execute(request).await
    }

    pub async fn delete_review(&self, id: u64) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, format!("/reviews/manage/{id}/")))
            .await
    }

    /// Returns the new helpful count.
    pub async fn mark_helpful(&self, id: u64) -> Result<u32, ApiError> {
        let count: HelpfulCount = self
            .fetch(self.request(Method::POST, format!("/reviews/{id}/helpful/")))
            .await?;
        Ok(count.helpful_count)
    }

    // --- users ---

    pub async fn list_users(&self, query: &UserQuery) -> Result<Page<User>, ApiError> {
        let mut request = self.request(Method::GET, "/auth/users/");
        request.query = query_params(query);
        self.fetch(request).await
    }

    pub async fn user(&self, id: u64) -> Result<User, ApiError> {
        self.fetch(self.request(Method::GET, format!("/auth/users/{id}/")))
            .await
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<(), ApiError> {
        let request = Self::with_json(self.request(Method::POST, "/auth/users/"), form)?;
        self.execute(request).await
    }

    pub async fn update_user(&self, id: u64, form: &UserForm) -> Result<(), ApiError> {
        let request = Self::with_json(self.request(Method::PUT, format!("/auth/users/{id}/")), form)?;
        self.execute(request).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, format!("/auth/users/{id}/")))
            .await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.fetch(self.request(Method::GET, "/auth/users/stats/"))
            .await
    }
}
