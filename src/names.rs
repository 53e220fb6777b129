//! Identifier filtering shared by the type converter and the generator.

use hashbrown::HashSet;
use std::sync::OnceLock;

/// Words that cannot be used as identifiers in the generated code.
const RESERVED_WORDS: &[&str] = &[
    "as", "asm", "assert", "atomic", "break", "case", "chan", "const", "continue", "default",
    "defer", "else", "enum", "fallthrough", "fn", "for", "func", "go", "goto", "if", "import",
    "in", "interface", "is", "lock", "map", "match", "module", "mut", "none", "or", "package",
    "pub", "range", "return", "rlock", "select", "shared", "sizeof", "spawn", "static", "struct",
    "switch", "type", "typeof", "union", "unsafe", "var", "volatile",
];

/// libc functions and objects that are referenced through the `C.` namespace.
const BUILTIN_FN_NAMES: &[&str] = &[
    "fopen", "puts", "fflush", "printf", "memset", "atoi", "memcpy", "remove", "strlen", "rename",
    "stdout", "stderr", "stdin", "ftell", "fclose", "fread", "read", "perror", "ftruncate", "FILE",
    "strcmp", "toupper", "strchr", "strdup", "strncasecmp", "strcasecmp", "isspace", "strncmp",
    "malloc", "close", "open", "lseek", "fseek", "fgets", "rewind", "write", "calloc", "setenv",
    "gets", "abs", "sqrt", "erfl", "fprintf", "snprintf", "exit", "__stderrp", "fwrite", "scanf",
    "sscanf", "strrchr", "div", "free", "memcmp", "memmove", "vsnprintf", "rintf", "rint",
];

/// Path fragments of system and toolchain headers.
pub const BUILTIN_HEADERS: &[&str] = &[
    "usr/include",
    "/opt/",
    "usr/lib",
    "usr/local",
    "/Library/",
    "lib/clang",
];

/// libc typedefs that must never be redeclared.
pub const BUILTIN_TYPE_NAMES: &[&str] = &["ldiv_t", "__float2", "__double2", "exception", "double_t"];

/// libc globals that leak into translation units through headers.
pub const BUILTIN_GLOBAL_NAMES: &[&str] = &["sys_nerr", "sys_errlist", "suboptarg"];

fn reserved_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| RESERVED_WORDS.iter().copied().collect())
}

fn builtin_fn_names() -> &'static HashSet<&'static str> {
    static NAMES: OnceLock<HashSet<&'static str>> = OnceLock::new();
    NAMES.get_or_init(|| BUILTIN_FN_NAMES.iter().copied().collect())
}

pub fn is_reserved_word(name: &str) -> bool {
    reserved_words().contains(name)
}

pub fn is_builtin_fn_name(name: &str) -> bool {
    builtin_fn_names().contains(name)
}

pub fn is_builtin_header(path: &str) -> bool {
    !path.is_empty() && BUILTIN_HEADERS.iter().any(|h| path.contains(h))
}

pub fn is_builtin_type_name(name: &str) -> bool {
    BUILTIN_TYPE_NAMES.contains(&name)
}

pub fn is_builtin_global_name(name: &str) -> bool {
    BUILTIN_GLOBAL_NAMES.contains(&name)
}

/// Rewrites a C identifier so it is legal in the generated code.
///
/// Reserved words get a trailing underscore, libc symbols move into the
/// `C.` namespace, and `argv` maps onto `os.argv`.
pub fn filter_name(name: &str) -> String {
    if is_reserved_word(name) {
        return format!("{name}_");
    }
    if is_builtin_fn_name(name) {
        return format!("C.{name}");
    }
    match name {
        "argv" => "os.argv".to_string(),
        _ => name.to_string(),
    }
}

/// Enum member names live inside their enum, so only reserved words need
/// renaming.
pub fn enum_member_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if is_reserved_word(&lower) {
        return format!("{lower}_");
    }
    lower
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn trim_underscores(s: &str) -> &str {
    s.trim_start_matches('_')
}

/// Type names are capitalized after dropping leading underscores.
pub fn capitalize_type(s: &str) -> String {
    if s.starts_with("func ") {
        return s.to_string();
    }
    capitalize(trim_underscores(s))
}
