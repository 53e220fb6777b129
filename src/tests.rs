pub mod test_utils;

pub mod ast_json;
pub mod cpp;
pub mod driver;
pub mod enums;
pub mod globals;
