use crate::example_module::{AnyClass, ExampleModule, INIT_MESSAGE, LOAD_MESSAGE};
use serde::Serialize;

/// 公開シンボルとその値の一覧
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub module: String,
    pub load_message: String,
    pub function: FunctionReport,
    pub class: ClassReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionReport {
    pub name: String,
    pub returns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub constant: String,
    pub init_message: String,
    pub class_method: String,
    pub object_method: String,
}

impl SurfaceReport {
    /// 構築メッセージは出さない
    pub fn collect(module: &ExampleModule) -> Self {
        Self {
            module: "example_module".to_string(),
            load_message: LOAD_MESSAGE.to_string(),
            function: FunctionReport {
                name: "any_function".to_string(),
                returns: module.any_function().to_string(),
            },
            class: ClassReport {
                name: "AnyClass".to_string(),
                constant: AnyClass::A_CONSTANT.to_string(),
                init_message: INIT_MESSAGE.to_string(),
                class_method: module.get_from_class_method(),
                object_method: AnyClass::init().get_from_object_method(),
            },
        }
    }
}
