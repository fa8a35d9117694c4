//! 인증 요청 관련 DTO
//!
//! 회원가입, 로그인, 토큰 갱신, 비밀번호 변경 요청을 매핑합니다.
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 전역 유일 식별자 (학번 등)
    #[validate(length(min = 1, max = 64, message = "식별자는 1-64자 사이여야 합니다"))]
    #[validate(custom(function = "validate_identifier"))]
    pub identifier: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub secret: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    /// 요청 역할. 공개 가입은 생략하거나 `student`만 허용되며,
    /// 그 외 역할은 관리자 전용 경로로만 부여됩니다.
    #[validate(length(min = 1, max = 32, message = "역할은 1-32자 사이여야 합니다"))]
    #[serde(default)]
    pub role: Option<String>,
}

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "식별자를 입력해주세요"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub secret: String,
}

/// 리프레시 토큰 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 비밀번호 변경 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeCredentialRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_secret: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub new_secret: String,
}

/// 식별자 형식 검증 (공백 불가)
fn validate_identifier(identifier: &str) -> Result<(), ValidationError> {
    if identifier.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("invalid_identifier")
            .with_message("식별자에는 공백을 사용할 수 없습니다".into()));
    }
    Ok(())
}
