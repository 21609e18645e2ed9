use crate::error::{ModuleError, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// 人間向けの診断行を書き出す出力先
pub struct DiagnosticSink<W: Write> {
    out: W,
}

impl DiagnosticSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl DiagnosticSink<File> {
    /// 診断行をファイルへリダイレクト
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let out = File::create(path).map_err(|source| ModuleError::OpenDiagnostics {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Diagnostics redirected to {}", path.display());
        Ok(Self { out })
    }
}

impl<W: Write> DiagnosticSink<W> {
    pub fn from_writer(out: W) -> Self {
        Self { out }
    }

    /// 1行書き出してフラッシュする
    pub fn emit(&mut self, line: &str) -> Result<()> {
        debug!(target: "example_module::diagnostics", "{}", line);
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
