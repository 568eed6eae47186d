//! Wire-shaped serde types and their normalization into domain values.
//!
//! Everything a backend sends in a union ("either" type on the wire) is
//! decoded here, once, into a closed enum or a normalized struct. Client
//! implementations deserialize into these shapes and hand the domain types
//! onward; nothing downstream inspects raw JSON.

use serde::Deserialize;

use prism_types::{
    Diagnostic, DocumentReport, DocumentSymbol, Location, Position, Range, Severity, SymbolKind,
    SymbolMatch, WorkspaceDiagnosticReport,
};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WirePosition {
    pub line: u32,
    pub character: u32,
}

impl WirePosition {
    #[must_use]
    pub fn into_position(self) -> Position {
        Position::new(self.line, self.character)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WireRange {
    pub start: WirePosition,
    pub end: WirePosition,
}

impl WireRange {
    #[must_use]
    pub fn into_range(self) -> Range {
        Range::new(self.start.into_position(), self.end.into_position())
    }
}

/// The two wire variants of a workspace symbol's location.
///
/// Some servers return a full `Location`; others return only a URI and
/// leave range resolution to the client. Variant order matters for
/// untagged deserialization: the richer shape is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireWorkspaceLocation {
    Full { uri: String, range: WireRange },
    UriOnly { uri: String },
}

impl WireWorkspaceLocation {
    /// Collapse to a concrete location. A URI-only answer gets an empty
    /// range at the document start — the range resolver upgrades it later.
    #[must_use]
    pub fn into_location(self) -> Location {
        match self {
            Self::Full { uri, range } => Location::new(uri, range.into_range()),
            Self::UriOnly { uri } => Location::new(uri, Range::default()),
        }
    }
}

/// One workspace symbol search result as the server sent it.
#[derive(Debug, Deserialize)]
pub struct WireSymbol {
    pub name: String,
    pub kind: u64,
    #[serde(rename = "containerName", default)]
    pub container_name: Option<String>,
    pub location: WireWorkspaceLocation,
}

impl WireSymbol {
    /// Normalize into a [`SymbolMatch`].
    ///
    /// Returns `None` for kinds outside the protocol range; callers skip
    /// those entries.
    #[must_use]
    pub fn into_symbol_match(self) -> Option<SymbolMatch> {
        let kind = SymbolKind::from_lsp(self.kind)?;
        Some(SymbolMatch {
            name: self.name,
            kind,
            location: self.location.into_location(),
            container_name: self.container_name.filter(|c| !c.is_empty()),
        })
    }
}

/// One node of a document symbol tree as the server sent it.
#[derive(Debug, Deserialize)]
pub struct WireDocumentSymbol {
    pub name: String,
    pub kind: u64,
    pub range: WireRange,
    #[serde(rename = "selectionRange")]
    pub selection_range: WireRange,
    #[serde(default)]
    pub children: Vec<WireDocumentSymbol>,
}

impl WireDocumentSymbol {
    /// Normalize into a [`DocumentSymbol`], dropping nodes (and their
    /// subtrees) whose kind is outside the protocol range.
    #[must_use]
    pub fn into_document_symbol(self) -> Option<DocumentSymbol> {
        let kind = SymbolKind::from_lsp(self.kind)?;
        Some(DocumentSymbol {
            name: self.name,
            kind,
            range: self.range.into_range(),
            selection_range: self.selection_range.into_range(),
            children: self
                .children
                .into_iter()
                .filter_map(WireDocumentSymbol::into_document_symbol)
                .collect(),
        })
    }
}

/// One diagnostic as the server sent it.
#[derive(Debug, Deserialize)]
pub struct WireDiagnostic {
    pub range: WireRange,
    pub severity: Option<u64>,
    pub source: Option<String>,
    pub message: String,
}

impl WireDiagnostic {
    /// Normalize into a [`Diagnostic`]. Missing severity defaults to
    /// warning; missing source to "unknown".
    #[must_use]
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic {
            severity: self
                .severity
                .and_then(Severity::from_lsp)
                .unwrap_or(Severity::Warning),
            range: self.range.into_range(),
            message: self.message,
            source: self.source.unwrap_or_else(|| String::from("unknown")),
        }
    }
}

/// The two wire variants of a per-document workspace diagnostic report,
/// tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WireDocumentReport {
    Full {
        uri: String,
        #[serde(rename = "resultId", default)]
        result_id: Option<String>,
        items: Vec<WireDiagnostic>,
    },
    Unchanged {
        uri: String,
        #[serde(rename = "resultId")]
        result_id: String,
    },
}

impl WireDocumentReport {
    #[must_use]
    pub fn into_document_report(self) -> DocumentReport {
        match self {
            Self::Full {
                uri,
                result_id,
                items,
            } => DocumentReport::Full {
                uri,
                result_id,
                diagnostics: items
                    .into_iter()
                    .map(WireDiagnostic::into_diagnostic)
                    .collect(),
            },
            Self::Unchanged { uri, result_id } => DocumentReport::Unchanged { uri, result_id },
        }
    }
}

/// A whole workspace diagnostic pull as the server sent it.
#[derive(Debug, Deserialize)]
pub struct WireWorkspaceReport {
    pub items: Vec<WireDocumentReport>,
}

impl WireWorkspaceReport {
    #[must_use]
    pub fn into_report(self) -> WorkspaceDiagnosticReport {
        WorkspaceDiagnosticReport {
            documents: self
                .items
                .into_iter()
                .map(WireDocumentReport::into_document_report)
                .collect(),
        }
    }
}

/// Render a `file://` URI as a plain path for human-readable output.
/// Non-file URIs (and anything unparseable) pass through untouched.
#[must_use]
pub fn uri_to_display_path(uri: &str) -> String {
    url::Url::parse(uri)
        .ok()
        .and_then(|u| u.to_file_path().ok())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| uri.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Workspace symbol union ─────────────────────────────────────────

    #[test]
    fn test_full_location_variant_decodes() {
        let json = serde_json::json!({
            "name": "ParseFile",
            "kind": 12,
            "containerName": "parser",
            "location": {
                "uri": "file:///src/parser.go",
                "range": {
                    "start": { "line": 41, "character": 5 },
                    "end": { "line": 41, "character": 14 }
                }
            }
        });
        let symbol: WireSymbol = serde_json::from_value(json).unwrap();
        let matched = symbol.into_symbol_match().unwrap();
        assert_eq!(matched.name, "ParseFile");
        assert_eq!(matched.kind, SymbolKind::Function);
        assert_eq!(matched.location.uri, "file:///src/parser.go");
        assert_eq!(matched.location.range.start, Position::new(41, 5));
        assert_eq!(matched.container_name.as_deref(), Some("parser"));
    }

    #[test]
    fn test_uri_only_variant_decodes_with_empty_range() {
        let json = serde_json::json!({
            "name": "Config",
            "kind": 23,
            "location": { "uri": "file:///src/config.go" }
        });
        let symbol: WireSymbol = serde_json::from_value(json).unwrap();
        let matched = symbol.into_symbol_match().unwrap();
        assert_eq!(matched.kind, SymbolKind::Struct);
        assert_eq!(matched.location.uri, "file:///src/config.go");
        assert!(matched.location.range.is_empty());
        assert_eq!(matched.container_name, None);
    }

    #[test]
    fn test_out_of_range_kind_is_skipped() {
        let json = serde_json::json!({
            "name": "mystery",
            "kind": 99,
            "location": { "uri": "file:///x.go" }
        });
        let symbol: WireSymbol = serde_json::from_value(json).unwrap();
        assert!(symbol.into_symbol_match().is_none());
    }

    #[test]
    fn test_empty_container_name_normalizes_to_none() {
        let json = serde_json::json!({
            "name": "main",
            "kind": 12,
            "containerName": "",
            "location": { "uri": "file:///main.go" }
        });
        let symbol: WireSymbol = serde_json::from_value(json).unwrap();
        assert_eq!(symbol.into_symbol_match().unwrap().container_name, None);
    }

    // ── Document symbol tree ───────────────────────────────────────────

    #[test]
    fn test_document_symbol_tree_decodes_recursively() {
        let json = serde_json::json!({
            "name": "Lexer",
            "kind": 5,
            "range": {
                "start": { "line": 10, "character": 0 },
                "end": { "line": 80, "character": 1 }
            },
            "selectionRange": {
                "start": { "line": 10, "character": 6 },
                "end": { "line": 10, "character": 11 }
            },
            "children": [{
                "name": "next_token",
                "kind": 6,
                "range": {
                    "start": { "line": 20, "character": 4 },
                    "end": { "line": 35, "character": 5 }
                },
                "selectionRange": {
                    "start": { "line": 20, "character": 8 },
                    "end": { "line": 20, "character": 18 }
                }
            }]
        });
        let node: WireDocumentSymbol = serde_json::from_value(json).unwrap();
        let symbol = node.into_document_symbol().unwrap();
        assert_eq!(symbol.kind, SymbolKind::Class);
        assert_eq!(symbol.children.len(), 1);
        assert_eq!(symbol.children[0].kind, SymbolKind::Method);
        assert_eq!(symbol.children[0].range.start.line, 20);
    }

    // ── Diagnostic report union ────────────────────────────────────────

    #[test]
    fn test_full_report_decodes() {
        let json = serde_json::json!({
            "kind": "full",
            "uri": "file:///src/main.go",
            "resultId": "r1",
            "items": [{
                "range": {
                    "start": { "line": 3, "character": 1 },
                    "end": { "line": 3, "character": 9 }
                },
                "severity": 1,
                "source": "gopls",
                "message": "undefined: frobnicate"
            }]
        });
        let report: WireDocumentReport = serde_json::from_value(json).unwrap();
        match report.into_document_report() {
            DocumentReport::Full {
                uri,
                result_id,
                diagnostics,
            } => {
                assert_eq!(uri, "file:///src/main.go");
                assert_eq!(result_id.as_deref(), Some("r1"));
                assert_eq!(diagnostics.len(), 1);
                assert!(diagnostics[0].severity.is_error());
            }
            DocumentReport::Unchanged { .. } => panic!("expected full report"),
        }
    }

    #[test]
    fn test_unchanged_report_decodes() {
        let json = serde_json::json!({
            "kind": "unchanged",
            "uri": "file:///src/other.go",
            "resultId": "r7"
        });
        let report: WireDocumentReport = serde_json::from_value(json).unwrap();
        match report.into_document_report() {
            DocumentReport::Unchanged { uri, result_id } => {
                assert_eq!(uri, "file:///src/other.go");
                assert_eq!(result_id, "r7");
            }
            DocumentReport::Full { .. } => panic!("expected unchanged report"),
        }
    }

    #[test]
    fn test_workspace_report_mixes_variants() {
        let json = serde_json::json!({
            "items": [
                { "kind": "unchanged", "uri": "file:///a.go", "resultId": "r1" },
                { "kind": "full", "uri": "file:///b.go", "items": [] }
            ]
        });
        let report: WireWorkspaceReport = serde_json::from_value(json).unwrap();
        let domain = report.into_report();
        assert_eq!(domain.documents.len(), 2);
        assert_eq!(domain.error_count(), 0);
    }

    #[test]
    fn test_diagnostic_defaults() {
        let json = serde_json::json!({
            "range": {
                "start": { "line": 0, "character": 0 },
                "end": { "line": 0, "character": 1 }
            },
            "message": "something odd"
        });
        let diag: WireDiagnostic = serde_json::from_value(json).unwrap();
        let domain = diag.into_diagnostic();
        assert_eq!(domain.severity, Severity::Warning);
        assert_eq!(domain.source, "unknown");
    }

    // ── URI rendering ──────────────────────────────────────────────────

    #[test]
    fn test_file_uri_renders_as_path() {
        assert_eq!(
            uri_to_display_path("file:///src/main.go"),
            "/src/main.go"
        );
    }

    #[test]
    fn test_non_file_uri_passes_through() {
        assert_eq!(
            uri_to_display_path("untitled:Untitled-1"),
            "untitled:Untitled-1"
        );
        assert_eq!(uri_to_display_path("not a uri"), "not a uri");
    }
}
