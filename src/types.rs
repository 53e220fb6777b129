//! Conversion of clang type strings into target type names.
//!
//! The front end only gives us the printed form of a type (`"const char *"`,
//! `"struct foo [4]"`, `"int (*)(void *, int)"`), so conversion is a fixed
//! sequence of textual rewrite rules. Every rule is a small total function
//! that can be exercised on its own; [`convert_type`] chains them.
//!
//! Converting an already converted name returns it unchanged.

use crate::names::{capitalize, capitalize_type};

/// A converted type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Type {
    pub name: String,
    pub is_const: bool,
    pub is_static: bool,
}

impl Type {
    fn named(name: impl Into<String>) -> Self {
        Type {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.name.starts_with('&') || self.name == "voidptr"
    }

    pub fn is_array(&self) -> bool {
        self.name.starts_with('[')
    }
}

/// Target names that map onto themselves.
const TARGET_PRIMITIVES: &[&str] = &[
    "int", "i8", "i16", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "usize", "isize", "bool",
    "void", "voidptr", "va_list", "C.FILE", "C.intptr_t",
];

/// Converts a C qualified type string into a target type.
pub fn convert_type(c_type: &str) -> Type {
    let raw = c_type.trim();
    if raw.contains("__va_list_tag") {
        return Type::named("va_list");
    }

    let (typ, is_const, is_static) = strip_qualifiers(raw);
    let typ = typ.as_str();

    if let Some(name) = opaque_pointer_idiom(typ) {
        return Type {
            name,
            is_const,
            is_static,
        };
    }

    let name = convert_unqualified(typ);
    Type {
        name,
        is_const,
        is_static,
    }
}

fn convert_unqualified(typ: &str) -> String {
    let typ = typ.trim();
    if typ.starts_with("func ") || typ.starts_with("func(") {
        return typ.to_string();
    }
    if let Some(rest) = typ.strip_prefix('&') {
        return format!("&{}", convert_unqualified(rest));
    }
    if let Some((size, elem)) = split_converted_array(typ) {
        return format!("{size}{}", convert_unqualified(elem));
    }
    if let Some(name) = enum_type(typ) {
        return name;
    }
    if is_function_signature(typ) {
        return function_pointer(typ);
    }

    let (base, array) = split_array_suffix(typ);
    let base = strip_namespace(base);
    let base = strip_record_prefix(&base);
    let (base, mut pointers) = count_pointer_suffix(&base);
    let (base, is_ref) = strip_reference(&base);
    if is_ref {
        pointers += 1;
    }

    let mapped = map_primitive(&base);
    let (mapped, pointers) = if mapped == "void" && pointers > 0 {
        ("voidptr".to_string(), pointers - 1)
    } else {
        (mapped, pointers)
    };
    format!("{array}{}{mapped}", "&".repeat(pointers))
}

/// Rule 2: drops `const`, `volatile `, `static ` and `std::`, reporting what was seen.
pub fn strip_qualifiers(typ: &str) -> (String, bool, bool) {
    let is_const = typ.contains("const ") || typ.ends_with(" const") || typ.ends_with("*const");
    let is_static = typ.contains("static ");
    let mut out = typ
        .replace("const ", "")
        .replace("volatile ", "")
        .replace("static ", "")
        .replace("std::", "");
    // `char *const`
    if let Some(stripped) = out.strip_suffix("const")
        && (stripped.ends_with(' ') || stripped.ends_with('*'))
    {
        out = stripped.to_string();
    }
    (out.trim().to_string(), is_const, is_static)
}

/// Rule 1: fixed spellings for `void` pointers and string arrays.
pub fn opaque_pointer_idiom(typ: &str) -> Option<String> {
    match typ {
        "char **" | "char * *" => return Some("&&u8".to_string()),
        "void *" => return Some("voidptr".to_string()),
        "void **" | "void * *" => return Some("&voidptr".to_string()),
        _ => {}
    }
    let size = typ.strip_prefix("void *[")?.strip_suffix(']')?;
    Some(format!("[{size}]voidptr"))
}

/// Rule 3: `enum color` becomes `Color`.
pub fn enum_type(typ: &str) -> Option<String> {
    let name = typ.strip_prefix("enum ")?;
    if name.contains('*') || name.contains('[') {
        return None;
    }
    Some(capitalize(name.trim()))
}

/// Rule 4: splits `int [2][3]` into `("int", "[2][3]")`.
pub fn split_array_suffix(typ: &str) -> (&str, &str) {
    match typ.find('[') {
        Some(pos) if pos > 0 && typ.ends_with(']') => (typ[..pos].trim_end(), &typ[pos..]),
        _ => (typ, ""),
    }
}

/// Recognizes an already converted `[N]T`, returning `("[N]", "T")`.
fn split_converted_array(typ: &str) -> Option<(&str, &str)> {
    if !typ.starts_with('[') {
        return None;
    }
    let mut end = 0;
    let bytes = typ.as_bytes();
    while end < bytes.len() && bytes[end] == b'[' {
        let close = typ[end..].find(']')? + end;
        end = close + 1;
    }
    Some((&typ[..end], &typ[end..]))
}

/// Rule 5: `leveldb::DB` and `boolean:boolean` both reduce to the last segment.
pub fn strip_namespace(typ: &str) -> String {
    if let Some(pos) = typ.rfind("::") {
        return typ[pos + 2..].to_string();
    }
    if !typ.starts_with("C.")
        && let Some(pos) = typ.rfind(':')
    {
        return typ[pos + 1..].to_string();
    }
    typ.to_string()
}

/// Rule 6: drops the `struct `, `union ` and `signed ` spellings.
pub fn strip_record_prefix(typ: &str) -> String {
    let out = typ.replace("struct ", "").replace("union ", "");
    match out.strip_prefix("signed ") {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// Rule 7: `char ***` becomes `("char", 3)`.
pub fn count_pointer_suffix(typ: &str) -> (String, usize) {
    let trimmed = typ.trim_end();
    let base = trimmed.trim_end_matches(|c: char| c == '*' || c == ' ');
    let stars = trimmed[base.len()..].chars().filter(|&c| c == '*').count();
    (base.trim().to_string(), stars)
}

/// Rule 9: a trailing C++ reference ` &`.
pub fn strip_reference(typ: &str) -> (String, bool) {
    match typ.strip_suffix('&') {
        Some(rest) if rest.ends_with(' ') => (rest.trim_end().to_string(), true),
        _ => (typ.to_string(), false),
    }
}

fn is_function_signature(typ: &str) -> bool {
    typ.contains("(*)") || (typ.ends_with(')') && typ.contains(" (") && !typ.starts_with('('))
}

/// Rule 8: `int (*)(void *, int)` becomes `func (voidptr, int) int`.
pub fn function_pointer(typ: &str) -> String {
    let flat = typ.replacen("(*)", "", 1);
    let Some(open) = flat.find('(') else {
        return typ.to_string();
    };
    let ret = convert_type(&flat[..open]).name;
    let close = flat.rfind(')').unwrap_or(flat.len());
    let params = &flat[open + 1..close.max(open + 1)];

    let args = if params.trim() == "void" || params.trim().is_empty() {
        Vec::new()
    } else {
        split_params(params)
            .into_iter()
            .map(|p| {
                if p == "..." {
                    p.to_string()
                } else {
                    convert_type(p).name
                }
            })
            .collect()
    };

    let sig = format!("func ({})", args.join(", "));
    if ret == "void" || ret.is_empty() {
        sig
    } else {
        format!("{sig} {ret}")
    }
}

/// Splits a parameter list on top-level commas only.
fn split_params(params: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '(' | '<' => depth += 1,
            ')' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(params[start..].trim());
    out
}

/// Rule 10: the primitive table; anything else is a struct or typedef name.
pub fn map_primitive(base: &str) -> String {
    if TARGET_PRIMITIVES.contains(&base) {
        return base.to_string();
    }
    if let Some(inner) = base.strip_prefix("vector<").and_then(|s| s.strip_suffix('>')) {
        return format!("[]{}", convert_type(inner).name);
    }
    let mapped = match base {
        "long long" | "long long int" => "i64",
        "long" | "long int" => "int",
        "unsigned" | "unsigned int" => "u32",
        "unsigned long long" | "unsigned long long int" => "u64",
        "unsigned long" | "unsigned long int" => "u32",
        "unsigned char" => "u8",
        "unsigned short" | "unsigned short int" => "u16",
        "uint32_t" | "__uint32_t" => "u32",
        "int32_t" | "__int32_t" => "int",
        "uint64_t" | "__uint64_t" => "u64",
        "int64_t" | "__int64_t" => "i64",
        "int16_t" | "__int16_t" => "i16",
        "uint16_t" | "__uint16_t" => "u16",
        "int8_t" | "__int8_t" => "i8",
        "uint8_t" | "__uint8_t" | "byte" => "u8",
        "short" | "short int" => "i16",
        "char" => "i8",
        "float" => "f32",
        "double" | "long double" => "f64",
        "intptr_t" => "C.intptr_t",
        "size_t" => "usize",
        "ssize_t" | "ptrdiff_t" => "isize",
        "boolean" | "_Bool" | "Bool" | "bool (int)" | "bool" => "bool",
        "FILE" => "C.FILE",
        _ => return capitalize_type(base),
    };
    mapped.to_string()
}

/// Two global types match when identical, or when both are arrays of the same element type.
pub fn types_are_equal(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    if a.starts_with('[') && b.starts_with('[') {
        let elem = |s: &str| s.rsplit_once(']').map(|(_, e)| e.to_string());
        return elem(a) == elem(b);
    }
    false
}

/// Zero value used for uninitialized locals and implicit initializers.
///
/// `c_type` is the original spelling, `desugared` the canonical one.
pub fn zero_value(ty: &Type, c_type: &str, desugared: &str) -> String {
    let typ = ty.name.as_str();
    if desugared.starts_with("struct ") && !desugared.contains('*') && !typ.starts_with('[') {
        return format!("{typ}{{}}");
    }
    match typ {
        "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i64" | "isize" => {
            format!("{typ}(0)")
        }
        "int" => "0".to_string(),
        "bool" => "false".to_string(),
        "f32" => "f32(0.0)".to_string(),
        "f64" => "0.0".to_string(),
        "voidptr" => "voidptr(0)".to_string(),
        _ if c_type.trim_end().ends_with('*') || typ.starts_with('&') => {
            let target = typ.strip_prefix('&').unwrap_or(typ);
            format!("&{target}(0)")
        }
        _ => format!("{typ}{{}}"),
    }
}
