/// 미들웨어 생성 및 실행 중 발생하는 에러
#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("미들웨어 {middleware} 설정 오류: {message}")]
    Config {
        middleware: String,
        message: String,
    },

    /// 정규식 컴파일 실패. 설정 시점에만 발생합니다.
    #[error("잘못된 정규식 패턴 `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: String,
    },
}
