use serde::Deserialize;

use super::cursor::Cursor;
use super::kind::NodeKind;
use crate::names::{is_builtin_fn_name, is_builtin_header};

/// Literal payload of a node; clang uses strings, numbers and booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl LiteralValue {
    pub fn as_text(&self) -> String {
        match self {
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Int(n) => n.to_string(),
            LiteralValue::Text(s) => s.clone(),
        }
    }
}

/// Sugared and desugared spelling of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual: String,
    #[serde(rename = "desugaredQualType")]
    pub desugared: String,
}

/// The declaration an expression refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefDecl {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
}

/// A file change recorded by clang inside a `loc` or `range` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMark {
    pub file: String,
    pub included_from: String,
}

/// Source position of a node, flattened from clang's `loc`/`range` objects.
///
/// Clang only prints `file` when it differs from the previously printed
/// location, so `file` and `included_from` are completed by the session
/// pre-pass from the marks of everything printed before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub offset: u64,
    pub file: String,
    pub line: u64,
    pub included_from: String,
    pub spelling_file: String,
    pub range_spelling_file: String,
    pub has_position: bool,
    pub loc_marks: Vec<FileMark>,
    pub range_marks: Vec<FileMark>,
}

impl Location {
    /// `"loc": {}` is how clang marks compiler-provided declarations.
    pub fn is_empty(&self) -> bool {
        !self.has_position
            && self.file.is_empty()
            && self.spelling_file.is_empty()
            && self.range_spelling_file.is_empty()
    }
}

/// One AST node.
///
/// Immutable after the session pre-pass; traversal state lives in [`Cursor`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawNode")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// The raw clang kind string, kept for diagnostics of `Unknown` nodes.
    pub kind_name: String,
    pub loc: Location,
    pub previous_decl: Option<String>,
    pub name: String,
    pub ty: QualType,
    pub storage_class: String,
    pub tag_used: String,
    pub init: String,
    pub value: Option<LiteralValue>,
    pub opcode: String,
    pub arg_type: QualType,
    pub array_filler: Vec<Node>,
    pub decl_id: String,
    pub target_label_id: String,
    pub is_postfix: bool,
    pub is_arrow: bool,
    pub inner: Vec<Node>,
    pub referenced_decl: Option<RefDecl>,

    /// Set by the pre-pass.
    pub is_builtin: bool,
    /// Number of later top-level declarations naming this one as `previousDecl`.
    pub redeclarations: usize,
}

impl Node {
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }

    pub fn has_child_of_kind(&self, kind: NodeKind) -> bool {
        self.inner.iter().any(|c| c.kind == kind)
    }

    pub fn count_children_of_kind(&self, kind: NodeKind) -> usize {
        self.inner.iter().filter(|c| c.kind == kind).count()
    }

    pub fn find_children(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.inner.iter().filter(move |c| c.kind == kind)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.inner.first()
    }

    /// Skips implicit casts, parentheses and constant wrappers.
    pub fn strip_transparent(&self) -> &Node {
        let mut node = self;
        while node.kind.is_transparent()
            && let Some(child) = node.inner.first()
        {
            node = child;
        }
        node
    }

    pub fn value_text(&self) -> String {
        self.value.as_ref().map(LiteralValue::as_text).unwrap_or_default()
    }

    pub fn is_extern(&self) -> bool {
        self.storage_class == "extern"
    }

    pub fn is_static(&self) -> bool {
        self.storage_class == "static"
    }

    /// Whether the declaration comes from the compiler or a system header.
    pub fn has_builtin_origin(&self) -> bool {
        self.loc.is_empty()
            || is_builtin_header(&self.loc.file)
            || is_builtin_header(&self.loc.included_from)
            || is_builtin_header(&self.loc.spelling_file)
            || is_builtin_header(&self.loc.range_spelling_file)
            || is_builtin_fn_name(&self.name)
    }

    pub fn refers_to(&self, kind: NodeKind) -> bool {
        self.referenced_decl.as_ref().is_some_and(|r| r.kind == kind)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFile {
    file: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSubLoc {
    offset: Option<u64>,
    file: String,
    line: u64,
    #[serde(rename = "includedFrom")]
    included_from: RawFile,
}

impl RawSubLoc {
    fn mark(&self) -> Option<FileMark> {
        (!self.file.is_empty()).then(|| FileMark {
            file: self.file.clone(),
            included_from: self.included_from.file.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLoc {
    offset: Option<u64>,
    file: String,
    line: u64,
    #[serde(rename = "includedFrom")]
    included_from: RawFile,
    #[serde(rename = "spellingLoc")]
    spelling: RawSubLoc,
    #[serde(rename = "expansionLoc")]
    expansion: RawSubLoc,
}

impl RawLoc {
    /// File changes in the order clang printed them.
    fn marks(&self) -> Vec<FileMark> {
        let mut marks: Vec<FileMark> = [self.spelling.mark(), self.expansion.mark()]
            .into_iter()
            .flatten()
            .collect();
        if !self.file.is_empty() {
            marks.push(FileMark {
                file: self.file.clone(),
                included_from: self.included_from.file.clone(),
            });
        }
        marks
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRange {
    begin: RawLoc,
    end: RawLoc,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRef {
    id: String,
    kind: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNode {
    id: String,
    kind: String,
    loc: RawLoc,
    range: RawRange,
    #[serde(rename = "previousDecl")]
    previous_decl: Option<String>,
    name: String,
    #[serde(rename = "type")]
    ty: QualType,
    #[serde(rename = "storageClass")]
    storage_class: String,
    #[serde(rename = "tagUsed")]
    tag_used: String,
    init: String,
    value: Option<LiteralValue>,
    opcode: String,
    #[serde(rename = "argType")]
    arg_type: QualType,
    array_filler: Vec<Node>,
    #[serde(rename = "declId")]
    decl_id: String,
    #[serde(rename = "targetLabelDeclId")]
    target_label_id: String,
    #[serde(rename = "isPostfix")]
    is_postfix: bool,
    #[serde(rename = "isArrow")]
    is_arrow: bool,
    inner: Vec<Node>,
    #[serde(rename = "referencedDecl")]
    referenced_decl: Option<RawRef>,
}

impl RawNode {
    fn into_node(self, kind: NodeKind) -> Node {
        let loc_marks = self.loc.marks();
        let mut range_marks = self.range.begin.marks();
        range_marks.extend(self.range.end.marks());

        let raw = self.loc;
        let has_position =
            raw.offset.is_some() || raw.spelling.offset.is_some() || raw.expansion.offset.is_some();
        // Macro-expanded declarations only carry nested locations.
        let (offset, file, line, included_from) = if raw.offset.is_none() && raw.expansion.offset.is_some() {
            (
                raw.expansion.offset.unwrap_or_default(),
                raw.expansion.file,
                raw.expansion.line,
                raw.expansion.included_from.file,
            )
        } else {
            (raw.offset.unwrap_or_default(), raw.file, raw.line, raw.included_from.file)
        };
        let loc = Location {
            offset,
            file,
            line,
            included_from,
            spelling_file: raw.spelling.file,
            range_spelling_file: self.range.begin.spelling.file,
            has_position,
            loc_marks,
            range_marks,
        };

        let referenced_decl = self.referenced_decl.map(|r| RefDecl {
            kind: NodeKind::from_clang(&r.kind),
            id: r.id,
            name: r.name,
        });

        Node {
            id: self.id,
            kind,
            kind_name: self.kind,
            loc,
            previous_decl: self.previous_decl,
            name: self.name,
            ty: self.ty,
            storage_class: self.storage_class,
            tag_used: self.tag_used,
            init: self.init,
            value: self.value,
            opcode: self.opcode,
            arg_type: self.arg_type,
            array_filler: self.array_filler,
            decl_id: self.decl_id,
            target_label_id: self.target_label_id,
            is_postfix: self.is_postfix,
            is_arrow: self.is_arrow,
            inner: self.inner,
            referenced_decl,
            is_builtin: false,
            redeclarations: 0,
        }
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let kind = NodeKind::from_clang(&raw.kind);
        raw.into_node(kind)
    }
}
