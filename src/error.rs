use std::path::PathBuf;
use thiserror::Error;

/// 診断出力まわりのエラー
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("failed to write diagnostic line: {0}")]
    Diagnostic(#[from] std::io::Error),

    #[error("failed to create diagnostics file {}: {source}", .path.display())]
    OpenDiagnostics {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModuleError>;
