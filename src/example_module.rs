use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use std::io::Write;
use tracing::{debug, warn};

/// ロード時に出力される診断行
pub const LOAD_MESSAGE: &str = "Inside example_module.py";

/// `AnyClass` 構築時に出力される診断行
pub const INIT_MESSAGE: &str = "Inside the anyClass.__init__()";

const FUNCTION_RESULT: &str = "returningFromFunction";
const OBJECT_VAR: &str = "An object var.";

/// ロード済みモジュールのハンドル。これを持っていればエクスポートされたシンボルが使える
#[derive(Debug)]
pub struct ExampleModule {
    _loaded: (),
}

lazy_static::lazy_static! {
    static ref PROCESS_MODULE: ExampleModule = {
        let mut sink = DiagnosticSink::stdout();
        if let Err(e) = sink.emit(LOAD_MESSAGE) {
            warn!("Failed to emit load message: {}", e);
        }
        ExampleModule { _loaded: () }
    };
}

/// プロセス全体のモジュール。初回呼び出し時のみ stdout にロード行を出す
pub fn module() -> &'static ExampleModule {
    &PROCESS_MODULE
}

pub fn any_function() -> &'static str {
    module().any_function()
}

fn getting(value: &str) -> String {
    format!("Getting '{}'", value)
}

impl ExampleModule {
    /// 新しいロードコンテキスト。ロード行を一度だけ `sink` に書き出す
    pub fn load<W: Write>(sink: &mut DiagnosticSink<W>) -> Result<Self> {
        sink.emit(LOAD_MESSAGE)?;
        debug!("example_module loaded");
        Ok(Self { _loaded: () })
    }

    pub fn any_function(&self) -> &'static str {
        FUNCTION_RESULT
    }

    /// `AnyClass::get_from_class_method` と同じ値。プロセス全体のモジュールには触れない
    pub fn get_from_class_method(&self) -> String {
        AnyClass::format_constant()
    }

    pub fn any_class<W: Write>(&self, sink: &mut DiagnosticSink<W>) -> Result<AnyClass> {
        sink.emit(INIT_MESSAGE)?;
        Ok(AnyClass::init())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyClass {
    in_var: String,
}

impl AnyClass {
    pub const A_CONSTANT: &'static str = "A class constant.";

    /// stdout に構築メッセージを出してからインスタンスを作る
    pub fn new() -> Self {
        let mut sink = DiagnosticSink::stdout();
        match module().any_class(&mut sink) {
            Ok(instance) => instance,
            Err(e) => {
                warn!("Failed to emit init message: {}", e);
                Self::init()
            }
        }
    }

    /// 診断行を出さずに作る。`any_class` と `report` からのみ使う
    pub(crate) fn init() -> Self {
        Self {
            in_var: OBJECT_VAR.to_string(),
        }
    }

    /// インスタンス不要のクラスレベルアクセサ。未ロードならここでロードする
    pub fn get_from_class_method() -> String {
        module();
        Self::format_constant()
    }

    fn format_constant() -> String {
        getting(Self::A_CONSTANT)
    }

    pub fn get_from_object_method(&self) -> String {
        getting(&self.in_var)
    }

    pub fn in_var(&self) -> &str {
        &self.in_var
    }
}

impl Default for AnyClass {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(sink: DiagnosticSink<Vec<u8>>) -> Vec<String> {
        String::from_utf8(sink.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_load_emits_single_line() {
        let mut sink = DiagnosticSink::from_writer(Vec::new());
        let module = ExampleModule::load(&mut sink).unwrap();

        // シンボルを使ってもロード行は増えない
        assert_eq!(module.any_function(), "returningFromFunction");
        assert_eq!(module.any_function(), "returningFromFunction");

        assert_eq!(captured(sink), vec!["Inside example_module.py"]);
    }

    #[test]
    fn test_any_function_is_deterministic() {
        assert_eq!(any_function(), "returningFromFunction");
        assert_eq!(any_function(), any_function());
    }

    #[test]
    fn test_construction_emits_init_line() {
        let mut sink = DiagnosticSink::from_writer(Vec::new());
        let module = ExampleModule::load(&mut sink).unwrap();
        let instance = module.any_class(&mut sink).unwrap();

        assert_eq!(instance.in_var(), "An object var.");
        assert_eq!(
            captured(sink),
            vec!["Inside example_module.py", "Inside the anyClass.__init__()"]
        );
    }

    #[test]
    fn test_each_construction_emits_once() {
        let mut sink = DiagnosticSink::from_writer(Vec::new());
        let module = ExampleModule::load(&mut sink).unwrap();
        let _first = module.any_class(&mut sink).unwrap();
        let _second = module.any_class(&mut sink).unwrap();

        let lines = captured(sink);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| *l == INIT_MESSAGE).count(), 2);
    }

    #[test]
    fn test_class_method_without_instance() {
        assert_eq!(AnyClass::A_CONSTANT, "A class constant.");
        assert_eq!(
            AnyClass::get_from_class_method(),
            "Getting 'A class constant.'"
        );
    }

    #[test]
    fn test_handle_class_method_matches_associated() {
        let mut sink = DiagnosticSink::from_writer(Vec::new());
        let module = ExampleModule::load(&mut sink).unwrap();

        assert_eq!(module.get_from_class_method(), AnyClass::get_from_class_method());
        assert_eq!(captured(sink), vec!["Inside example_module.py"]);
    }

    #[test]
    fn test_object_method() {
        let instance = AnyClass::new();
        assert_eq!(instance.get_from_object_method(), "Getting 'An object var.'");
        assert_eq!(
            AnyClass::get_from_class_method(),
            "Getting 'A class constant.'"
        );
    }

    #[test]
    fn test_instances_are_isolated() {
        let first = AnyClass::new();
        let mut second = AnyClass::new();
        assert_eq!(first.get_from_object_method(), second.get_from_object_method());

        second.in_var = "changed".to_string();
        assert_eq!(first.get_from_object_method(), "Getting 'An object var.'");
        assert_eq!(second.get_from_object_method(), "Getting 'changed'");
    }

    #[test]
    fn test_process_module_is_shared() {
        assert!(std::ptr::eq(module(), module()));
    }
}
