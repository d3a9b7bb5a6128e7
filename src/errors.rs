use std::fmt;

#[derive(Debug, Clone)]
pub enum ServiceError {
    Config(String),
    Metrics(String),
    FileOperation(String),
    Serialization(String),
    NotFound(String),
    CommandFailed(String),
    MissingField(String),
}

impl ServiceError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Config(_) => "E001",
            ServiceError::Metrics(_) => "E002",
            ServiceError::FileOperation(_) => "E003",
            ServiceError::Serialization(_) => "E004",
            ServiceError::NotFound(_) => "E005",
            ServiceError::CommandFailed(_) => "E006",
            ServiceError::MissingField(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::Config(_) => "Configuration Error",
            ServiceError::Metrics(_) => "Metrics Error",
            ServiceError::FileOperation(_) => "File Operation Error",
            ServiceError::Serialization(_) => "Serialization Error",
            ServiceError::NotFound(_) => "Resource Not Found",
            ServiceError::CommandFailed(_) => "Command Failed",
            ServiceError::MissingField(_) => "Missing Field",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Config(msg)
            | ServiceError::Metrics(msg)
            | ServiceError::FileOperation(msg)
            | ServiceError::Serialization(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::CommandFailed(msg)
            | ServiceError::MissingField(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ServiceError {}

// 便捷的构造函数
impl ServiceError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        ServiceError::Config(msg.into())
    }

    pub fn metrics<T: Into<String>>(msg: T) -> Self {
        ServiceError::Metrics(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ServiceError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ServiceError::Serialization(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn command_failed<T: Into<String>>(msg: T) -> Self {
        ServiceError::CommandFailed(msg.into())
    }

    pub fn missing_field<T: Into<String>>(msg: T) -> Self {
        ServiceError::MissingField(msg.into())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err.to_string())
    }
}

impl From<prometheus::Error> for ServiceError {
    fn from(err: prometheus::Error) -> Self {
        ServiceError::Metrics(err.to_string())
    }
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            ServiceError::config("x"),
            ServiceError::metrics("x"),
            ServiceError::file_operation("x"),
            ServiceError::serialization("x"),
            ServiceError::not_found("x"),
            ServiceError::command_failed("x"),
            ServiceError::missing_field("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = ServiceError::missing_field("vm_public_ip");
        assert_eq!(err.to_string(), "Missing Field: vm_public_ip");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ServiceError = parse_err.into();
        assert!(matches!(err, ServiceError::Serialization(_)));
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ServiceError = io_err.into();
        assert!(matches!(err, ServiceError::FileOperation(_)));
        assert!(err.message().contains("gone"));
    }

    #[test]
    fn test_format_colored_contains_code_and_message() {
        colored::control::set_override(false);
        let err = ServiceError::command_failed("terraform exited with status 1");
        let out = err.format_colored();
        assert!(out.contains("E006"));
        assert!(out.contains("terraform exited with status 1"));
    }
}
