//! # 인증 흐름
//!
//! 회원가입, 로그인, 요청 단위 사용자 확인(identity resolver), 외부 신원 연동(federation)을
//! 담당합니다.
//!
//! 흐름 자체는 [`AuthFlow`]에 있고 [`UserStore`] / [`AssertionVerifier`] 트레이트에만 의존합니다.
//! 운영에서는 [`AuthService`]가 MongoDB 리포지토리와 Google 검증기를 꽂아 쓰고,
//! 테스트에서는 메모리 저장소와 스텁 검증기를 씁니다.
//!
//! ## Google 로그인 상태 전이
//!
//! ```text
//! Received → Verifying ─┬─ 실패 ──────────────────────────────→ Rejected
//!                       ├─ 같은 이메일 존재 → Linked      ──┐
//!                       └─ 없음 → insert ─┬─ Provisioned ────┼→ TokenIssued
//!                                         └─ 중복키 → 재조회 → Linked
//! ```
//!
//! 같은 새 이메일로 동시에 두 요청이 들어오면 email unique 인덱스가 한쪽 insert를 막고,
//! 진 쪽은 `ConflictError`를 받아 이긴 쪽이 만든 레코드에 연결됩니다.

use std::sync::Arc;

use singleton_macro::service;
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::{AuthResponse, LoginRequest, OAuthAuthResponse, SignupRequest};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::users::{UserRepository, UserStore};
use crate::services::auth::google_auth_service::{AssertionVerifier, GoogleAuthService};
use crate::services::auth::password_service::PasswordService;
use crate::services::auth::token_service::{extract_bearer_token, TokenService};
use crate::utils::string_utils::normalize_email;

/// 외부 신원이 로컬 계정에 어떻게 붙었는지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederationOutcome {
    /// 같은 이메일의 기존 계정에 연결
    Linked,
    /// 새 계정 생성
    Provisioned,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct FederatedSession {
    pub token: String,
    pub user: User,
    pub outcome: FederationOutcome,
}

/// 저장소 구현과 무관한 인증 흐름
pub struct AuthFlow<'a, S: UserStore + ?Sized> {
    store: &'a S,
    passwords: &'a PasswordService,
    tokens: &'a TokenService,
}

impl<'a, S: UserStore + ?Sized> AuthFlow<'a, S> {
    pub fn new(store: &'a S, passwords: &'a PasswordService, tokens: &'a TokenService) -> Self {
        Self { store, passwords, tokens }
    }

    fn session_for(&self, user: User) -> AppResult<IssuedSession> {
        let token = self.tokens.issue(&user.id_string())?;
        Ok(IssuedSession { token, user })
    }

    /// 로컬 계정 생성
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 요청 형식 오류
    /// * `AppError::ConflictError` - 이미 등록된 이메일 (동시 가입 경합 포함). 기존 레코드는 변경되지 않음
    pub async fn signup(&self, request: SignupRequest) -> AppResult<IssuedSession> {
        let request = SignupRequest { email: normalize_email(&request.email), ..request };
        request.validate()?;

        let email = request.email.clone();
        if self.store.find_by_email(&email).await?.is_some() {
            log::warn!("회원가입 거부: 이미 등록된 이메일");
            return Err(AppError::ConflictError("email already registered".to_string()));
        }

        let digest = self.passwords.hash(&request.password)?;
        let user = self
            .store
            .insert(User::new_local(email, request.name.trim().to_string(), digest))
            .await?;

        log::info!("회원가입 완료: user_id={}", user.id_string());
        self.session_for(user)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 이메일이 없든 비밀번호가 틀리든 같은 `invalid_credentials` 에러를 돌려줍니다.
    /// Google로 가입한 계정의 비밀번호 다이제스트는 아무도 모르는 값이므로 항상 불일치합니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<IssuedSession> {
        let request = LoginRequest { email: normalize_email(&request.email), ..request };
        request.validate()?;

        let Some(user) = self.store.find_by_email(&request.email).await? else {
            log::warn!("로그인 실패: 알 수 없는 이메일");
            return Err(AppError::invalid_credentials());
        };

        let verified = user
            .password_digest()
            .is_some_and(|digest| self.passwords.verify(&request.password, digest));
        if !verified {
            log::warn!("로그인 실패: 비밀번호 불일치 user_id={}", user.id_string());
            return Err(AppError::invalid_credentials());
        }

        log::info!("로그인 성공: user_id={}", user.id_string());
        self.session_for(user)
    }

    /// `Authorization` 헤더로부터 현재 사용자를 찾습니다.
    ///
    /// 토큰은 유효하지만 사용자가 삭제된 경우도 호출자에게는 같은 401입니다.
    pub async fn resolve_current_user(&self, auth_header: Option<&str>) -> AppResult<User> {
        let token = extract_bearer_token(auth_header)?;
        let user_id = self.tokens.validate(token)?;

        match self.store.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                log::warn!("토큰의 사용자가 존재하지 않음: user_id={}", user_id);
                Err(AppError::invalid_token())
            }
        }
    }

    /// 외부 assertion을 검증하고 로컬 계정에 연결(또는 생성)한 뒤 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidAssertion` - 서명/audience/issuer/만료 검증 실패, 이메일 없음
    /// * `AppError::ExternalServiceError` - IdP 공개키 조회 실패
    pub async fn federate<V: AssertionVerifier + ?Sized>(
        &self,
        verifier: &V,
        assertion: &str,
    ) -> AppResult<FederatedSession> {
        let identity = verifier.verify(assertion).await?;

        let (user, outcome) = match self.store.link_identity(&identity.email, &identity).await? {
            Some(user) => (user, FederationOutcome::Linked),
            None => {
                let candidate = User::new_oauth(
                    identity.email.clone(),
                    identity.display_name(),
                    identity.picture.clone(),
                    identity.provider,
                    identity.subject.clone(),
                    self.passwords.placeholder_hash()?,
                );

                match self.store.insert(candidate).await {
                    Ok(user) => (user, FederationOutcome::Provisioned),
                    Err(AppError::ConflictError(_)) => {
                        log::info!("동시 가입 경합: 먼저 생성된 계정에 연결합니다 ({})", identity.provider.as_str());
                        let user = self
                            .store
                            .link_identity(&identity.email, &identity)
                            .await?
                            .ok_or_else(|| {
                                AppError::InternalError("user vanished after duplicate-key conflict".to_string())
                            })?;
                        (user, FederationOutcome::Linked)
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        log::info!(
            "외부 로그인 {:?}: user_id={} provider={}",
            outcome,
            user.id_string(),
            identity.provider.as_str()
        );

        let token = self.tokens.issue(&user.id_string())?;
        Ok(FederatedSession { token, user, outcome })
    }
}

/// HTTP 계층이 쓰는 인증 서비스 (MongoDB 저장소 + Google 검증기)
#[service(name = "auth")]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
    google: Arc<GoogleAuthService>,
}

impl AuthService {
    fn flow(&self) -> AuthFlow<'_, UserRepository> {
        AuthFlow::new(self.user_repo.as_ref(), self.passwords.as_ref(), self.tokens.as_ref())
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let session = self.flow().signup(request).await?;
        Ok(AuthResponse::new(session.token, &session.user))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let session = self.flow().login(request).await?;
        Ok(AuthResponse::new(session.token, &session.user))
    }

    pub async fn google_login(&self, credential: &str) -> AppResult<OAuthAuthResponse> {
        let session = self.flow().federate(self.google.as_ref(), credential).await?;
        Ok(OAuthAuthResponse::new(session.token, &session.user))
    }

    /// 미들웨어용 identity resolver
    pub async fn authenticate(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser> {
        let user = self.flow().resolve_current_user(auth_header).await?;
        Ok(AuthenticatedUser::from(&user))
    }
}
