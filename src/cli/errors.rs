use crate::config::ConfigError;
use crate::convert::ConvertError;
use thiserror::Error;

/// Everything that can end either program with a non-zero status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 1 for usage, validation and config problems; 2 when an external tool failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Convert(e) => e.exit_code(),
            AppError::Config(_) | AppError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolError;

    #[test]
    fn exit_codes_follow_cause() {
        let tool = ConvertError::Tool(ToolError::Failed {
            program: "convert".into(),
            code: Some(4),
        });
        assert_eq!(AppError::from(tool).exit_code(), 2);
        assert_eq!(AppError::from(ConvertError::NoInputs).exit_code(), 1);
        assert_eq!(
            AppError::from(ConfigError::Validation("bad".into())).exit_code(),
            1
        );
    }
}
